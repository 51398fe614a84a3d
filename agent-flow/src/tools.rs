use serde::de::DeserializeOwned;
use serde_json::json;

use crate::{
    error::{FlowError, Result},
    message::ToolCall,
    model::ToolSpec,
};

/// A closed set of tools a stage may offer the model.
///
/// Implemented by an enum with one variant per tool; each variant carries its
/// own typed arguments. Execution is synchronous and never fails: missing
/// data is reported in the returned text.
pub trait ToolSet: Sized + Send {
    /// Declarations advertised to the model
    fn specs() -> Vec<ToolSpec>;

    /// Resolve a requested invocation to a variant of this set
    fn from_call(call: &ToolCall) -> Result<Self>;

    fn name(&self) -> &'static str;

    fn execute(&self) -> String;
}

/// Resolve `call` into an adjacently tagged enum (`name` + `arguments`).
///
/// Names outside `declared` are [`FlowError::UnknownTool`]; arguments that do
/// not fit the variant are [`FlowError::InvalidToolArguments`].
pub fn parse_tool_call<T: DeserializeOwned>(call: &ToolCall, declared: &[&str]) -> Result<T> {
    if !declared.contains(&call.name.as_str()) {
        return Err(FlowError::UnknownTool(call.name.clone()));
    }

    let tagged = json!({ "name": call.name, "arguments": call.arguments });
    serde_json::from_value(tagged).map_err(|e| FlowError::InvalidToolArguments {
        tool: call.name.clone(),
        reason: e.to_string(),
    })
}
