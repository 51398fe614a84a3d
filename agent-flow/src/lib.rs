pub mod error;
pub mod message;
pub mod model;
#[cfg(feature = "openrouter")]
pub mod openrouter;
pub mod stage;
pub mod testing;
pub mod tool_loop;
pub mod tools;

// Re-export commonly used types
pub use error::{FlowError, Result};
pub use message::{ChatMessage, MessageRole, ToolCall};
pub use model::{ModelClient, ModelResponse, ToolSpec, complete};
#[cfg(feature = "openrouter")]
pub use openrouter::{OpenRouterClient, OpenRouterConfig};
pub use stage::Stage;
pub use tool_loop::{LoopOutcome, ToolInvocation, ToolLoop};
pub use tools::{ToolSet, parse_tool_call};
