//! OpenRouter chat-completions client.
//!
//! Speaks the OpenAI-compatible wire format: tools are declared as
//! `function` tools, tool arguments travel as JSON-encoded strings and tool
//! results are `tool` messages tagged with `tool_call_id`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error};

use crate::{
    error::{FlowError, Result},
    message::{ChatMessage, MessageRole, ToolCall},
    model::{ModelClient, ModelResponse, ToolSpec},
};

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_MODEL: &str = "openai/gpt-4o-mini";
pub const DEFAULT_TEMPERATURE: f32 = 0.2;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Clone)]
pub struct OpenRouterConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub temperature: f32,
    pub timeout: Duration,
}

impl OpenRouterConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

pub struct OpenRouterClient {
    http: reqwest::Client,
    config: OpenRouterConfig,
}

impl OpenRouterClient {
    pub fn new(config: OpenRouterConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(FlowError::Config("OpenRouter API key is empty".to_string()));
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| FlowError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl ModelClient for OpenRouterClient {
    async fn invoke(&self, messages: &[ChatMessage], tools: &[ToolSpec]) -> Result<ModelResponse> {
        let request = build_request(&self.config, messages, tools);
        debug!(
            model = %self.config.model,
            messages = messages.len(),
            tools = tools.len(),
            "sending chat completion request"
        );

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| FlowError::ModelUnavailable(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(%status, "chat completion request rejected");
            return Err(FlowError::ModelUnavailable(format!(
                "Provider returned {}: {}",
                status, body
            )));
        }

        let completion: WireCompletion = response
            .json()
            .await
            .map_err(|e| FlowError::ModelUnavailable(format!("Failed to decode response: {}", e)))?;

        parse_completion(completion)
    }

    fn name(&self) -> &str {
        &self.config.model
    }
}

#[derive(Debug, Serialize)]
struct WireRequest {
    model: String,
    temperature: f32,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<WireTool>,
}

#[derive(Debug, Serialize)]
struct WireMessage {
    role: MessageRole,
    content: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tool_calls: Vec<WireToolCall>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireToolCall {
    id: String,
    #[serde(rename = "type", default = "function_kind")]
    kind: String,
    function: WireFunctionCall,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireFunctionCall {
    name: String,
    #[serde(default)]
    arguments: String,
}

#[derive(Debug, Serialize)]
struct WireTool {
    #[serde(rename = "type")]
    kind: &'static str,
    function: WireFunction,
}

#[derive(Debug, Serialize)]
struct WireFunction {
    name: String,
    description: String,
    parameters: Value,
}

#[derive(Debug, Deserialize)]
struct WireCompletion {
    #[serde(default)]
    choices: Vec<WireChoice>,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    message: WireReply,
}

/// Assistant message as returned by the provider; both fields may be null
#[derive(Debug, Deserialize)]
struct WireReply {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<WireToolCall>>,
}

fn function_kind() -> String {
    "function".to_string()
}

fn build_request(config: &OpenRouterConfig, messages: &[ChatMessage], tools: &[ToolSpec]) -> WireRequest {
    WireRequest {
        model: config.model.clone(),
        temperature: config.temperature,
        messages: messages.iter().map(to_wire_message).collect(),
        tools: tools
            .iter()
            .map(|tool| WireTool {
                kind: "function",
                function: WireFunction {
                    name: tool.name.clone(),
                    description: tool.description.clone(),
                    parameters: tool.parameters.clone(),
                },
            })
            .collect(),
    }
}

fn to_wire_message(message: &ChatMessage) -> WireMessage {
    let tool_calls = message
        .tool_calls
        .iter()
        .map(|call| WireToolCall {
            id: call.id.clone(),
            kind: function_kind(),
            function: WireFunctionCall {
                name: call.name.clone(),
                arguments: call.arguments.to_string(),
            },
        })
        .collect::<Vec<_>>();

    // Assistant turns that only carry tool calls are sent with null content
    let content = if message.content.is_empty() && !tool_calls.is_empty() {
        None
    } else {
        Some(message.content.clone())
    };

    WireMessage {
        role: message.role,
        content,
        tool_calls,
        tool_call_id: message.tool_call_id.clone(),
    }
}

fn parse_completion(completion: WireCompletion) -> Result<ModelResponse> {
    let choice = completion
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| FlowError::ModelUnavailable("Response contained no choices".to_string()))?;

    let tool_calls = choice
        .message
        .tool_calls
        .unwrap_or_default()
        .into_iter()
        .map(|call| {
            // Unparsable arguments are passed through so the tool set rejects them
            let arguments = serde_json::from_str(&call.function.arguments)
                .unwrap_or(Value::String(call.function.arguments));
            ToolCall::new(call.id, call.function.name, arguments)
        })
        .collect();

    Ok(ModelResponse {
        text: choice.message.content.unwrap_or_default(),
        tool_calls,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Json, Router,
        http::{HeaderMap, StatusCode, header::AUTHORIZATION},
        routing::post,
    };
    use serde_json::json;

    #[test]
    fn test_request_wire_format() {
        let config = OpenRouterConfig::new("key");
        let messages = vec![
            ChatMessage::system("You are a diagnosis agent"),
            ChatMessage::assistant_with_tools(
                "",
                vec![ToolCall::new("call_1", "lookup_drug_info", json!({"drug_name": "warfarin"}))],
            ),
            ChatMessage::tool_result("call_1", "Drug: Warfarin"),
        ];
        let tools = vec![ToolSpec::new(
            "lookup_drug_info",
            "Look up a drug",
            json!({"type": "object"}),
        )];

        let value = serde_json::to_value(build_request(&config, &messages, &tools)).unwrap();

        assert_eq!(value["model"], DEFAULT_MODEL);
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["content"], Value::Null);
        assert_eq!(value["messages"][1]["tool_calls"][0]["type"], "function");
        assert_eq!(
            value["messages"][1]["tool_calls"][0]["function"]["arguments"],
            r#"{"drug_name":"warfarin"}"#
        );
        assert_eq!(value["messages"][2]["role"], "tool");
        assert_eq!(value["messages"][2]["tool_call_id"], "call_1");
        assert_eq!(value["tools"][0]["function"]["name"], "lookup_drug_info");
    }

    #[test]
    fn test_tools_omitted_when_none_declared() {
        let config = OpenRouterConfig::new("key");
        let value =
            serde_json::to_value(build_request(&config, &[ChatMessage::user("hi")], &[])).unwrap();
        assert!(value.get("tools").is_none());
    }

    #[test]
    fn test_parse_tool_call_response() {
        let completion: WireCompletion = serde_json::from_value(json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call_9",
                        "type": "function",
                        "function": {
                            "name": "check_drug_interactions",
                            "arguments": "{\"drug_names\": [\"warfarin\", \"aspirin\"]}"
                        }
                    }]
                }
            }]
        }))
        .unwrap();

        let response = parse_completion(completion).unwrap();

        assert_eq!(response.text, "");
        assert_eq!(response.tool_calls[0].id, "call_9");
        assert_eq!(
            response.tool_calls[0].arguments,
            json!({"drug_names": ["warfarin", "aspirin"]})
        );
    }

    #[test]
    fn test_parse_text_response() {
        let completion: WireCompletion = serde_json::from_value(json!({
            "choices": [{ "message": { "role": "assistant", "content": "Assessment" } }]
        }))
        .unwrap();

        let response = parse_completion(completion).unwrap();
        assert!(response.is_terminal());
        assert_eq!(response.text, "Assessment");
    }

    #[test]
    fn test_empty_choices_is_unavailable() {
        let completion: WireCompletion = serde_json::from_value(json!({ "choices": [] })).unwrap();
        assert!(matches!(
            parse_completion(completion),
            Err(FlowError::ModelUnavailable(_))
        ));
    }

    #[test]
    fn test_empty_api_key_rejected() {
        let result = OpenRouterClient::new(OpenRouterConfig::new("  "));
        assert!(matches!(result, Err(FlowError::Config(_))));
    }

    /// Serves `router` on an ephemeral local port and returns its base URL
    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/api/v1", address)
    }

    fn client(base_url: String) -> OpenRouterClient {
        let mut config = OpenRouterConfig::new("sk-test");
        config.base_url = base_url;
        OpenRouterClient::new(config).unwrap()
    }

    fn unavailable_message(result: Result<ModelResponse>) -> String {
        match result {
            Err(FlowError::ModelUnavailable(message)) => message,
            other => panic!("expected ModelUnavailable, got {:?}", other),
        }
    }

    async fn echo_completion(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
        let authorized = headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            == Some("Bearer sk-test");
        if !authorized {
            return (StatusCode::UNAUTHORIZED, Json(json!({"error": "bad key"})));
        }

        let content = format!(
            "model={} messages={} tools={}",
            body["model"].as_str().unwrap_or_default(),
            body["messages"].as_array().map(Vec::len).unwrap_or_default(),
            body["tools"].as_array().map(Vec::len).unwrap_or_default(),
        );
        (
            StatusCode::OK,
            Json(json!({
                "choices": [{ "message": { "role": "assistant", "content": content } }]
            })),
        )
    }

    #[tokio::test]
    async fn test_posts_to_chat_completions_with_bearer_key() {
        let base_url = serve(Router::new().route("/api/v1/chat/completions", post(echo_completion))).await;
        let tools = [ToolSpec::new("lookup_drug_info", "Look up a drug", json!({"type": "object"}))];

        let response = client(format!("{}/", base_url))
            .invoke(&[ChatMessage::system("sys"), ChatMessage::user("hi")], &tools)
            .await
            .unwrap();

        assert_eq!(response.text, format!("model={} messages=2 tools=1", DEFAULT_MODEL));
        assert!(response.is_terminal());
    }

    #[tokio::test]
    async fn test_rejected_key_is_unavailable() {
        let base_url = serve(Router::new().route("/api/v1/chat/completions", post(echo_completion))).await;
        let mut config = OpenRouterConfig::new("sk-wrong");
        config.base_url = base_url;

        let result = OpenRouterClient::new(config)
            .unwrap()
            .invoke(&[ChatMessage::user("hi")], &[])
            .await;

        let message = unavailable_message(result);
        assert!(message.contains("401"), "{}", message);
        assert!(message.contains("bad key"), "{}", message);
    }

    #[tokio::test]
    async fn test_error_status_carries_status_and_body() {
        let router = Router::new().route(
            "/api/v1/chat/completions",
            post(|| async { (StatusCode::BAD_GATEWAY, "upstream overloaded") }),
        );
        let base_url = serve(router).await;

        let result = client(base_url).invoke(&[ChatMessage::user("hi")], &[]).await;

        assert_eq!(
            unavailable_message(result),
            "Provider returned 502 Bad Gateway: upstream overloaded"
        );
    }

    #[tokio::test]
    async fn test_undecodable_body_is_unavailable() {
        let router = Router::new().route(
            "/api/v1/chat/completions",
            post(|| async { "<html>maintenance</html>" }),
        );
        let base_url = serve(router).await;

        let result = client(base_url).invoke(&[ChatMessage::user("hi")], &[]).await;

        assert!(unavailable_message(result).starts_with("Failed to decode response"));
    }

    #[tokio::test]
    async fn test_connection_failure_is_unavailable() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        drop(listener);

        let result = client(format!("http://{}", address))
            .invoke(&[ChatMessage::user("hi")], &[])
            .await;

        assert!(unavailable_message(result).starts_with("Request failed"));
    }
}
