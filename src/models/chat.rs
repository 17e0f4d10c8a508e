//! Chat completion payloads

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Model requested when the caller does not pick one
pub const DEFAULT_MODEL: &str = "orion-12b-it:latest";

/// Body for `POST /chat`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub prompt: String,
    pub model: String,
}

impl ChatRequest {
    pub fn new(prompt: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            model: model.into(),
        }
    }
}

/// Response of `POST /chat`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_action: Option<ToolAction>,
}

/// Side action the backend performed (or wants performed) while answering.
///
/// On the wire this is `{"type": "tool_action", "tool": "...", ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolAction {
    #[serde(rename = "type", default = "tool_action_type")]
    pub kind: String,
    #[serde(flatten)]
    pub tool: Tool,
}

fn tool_action_type() -> String {
    "tool_action".to_string()
}

/// The tool behind a [`ToolAction`], keyed by the `tool` field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Tool {
    Known(KnownTool),
    /// A tool this client does not know yet, kept field for field so it
    /// can be written back with the message
    Other(Map<String, Value>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tool", rename_all = "snake_case")]
pub enum KnownTool {
    /// Server clock lookup
    Datetime {
        #[serde(default)]
        result: String,
    },
    /// Request to launch a desktop application
    OpenApp {
        #[serde(default)]
        action_required: bool,
        #[serde(default)]
        message: String,
        #[serde(default)]
        app_name: String,
    },
}

impl Tool {
    /// Value of the `tool` field
    pub fn name(&self) -> &str {
        match self {
            Tool::Known(KnownTool::Datetime { .. }) => "datetime",
            Tool::Known(KnownTool::OpenApp { .. }) => "open_app",
            Tool::Other(fields) => fields.get("tool").and_then(Value::as_str).unwrap_or(""),
        }
    }
}

impl From<KnownTool> for Tool {
    fn from(tool: KnownTool) -> Self {
        Tool::Known(tool)
    }
}

impl ToolAction {
    pub fn new(tool: impl Into<Tool>) -> Self {
        Self {
            kind: tool_action_type(),
            tool: tool.into(),
        }
    }

    /// One-line description shown under an assistant reply
    pub fn summary(&self) -> Option<String> {
        let Tool::Known(tool) = &self.tool else {
            return None;
        };
        match tool {
            KnownTool::Datetime { result } if !result.is_empty() => Some(format!("🕒 {}", result)),
            KnownTool::Datetime { .. } => None,
            KnownTool::OpenApp {
                app_name, message, ..
            } => {
                if message.is_empty() {
                    Some(format!("Open app: {}", app_name))
                } else {
                    Some(message.clone())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_reply_without_tool_action() {
        let reply: ChatReply = serde_json::from_str(r#"{"response": "hello"}"#).unwrap();
        assert_eq!(reply.response, "hello");
        assert!(reply.tool_action.is_none());
    }

    #[test]
    fn test_decode_open_app_action() {
        let json = r#"{
            "response": "Opening",
            "tool_action": {
                "type": "tool_action",
                "tool": "open_app",
                "action_required": true,
                "message": "Launching calculator",
                "app_name": "calc"
            }
        }"#;
        let reply: ChatReply = serde_json::from_str(json).unwrap();
        let action = reply.tool_action.unwrap();
        assert_eq!(
            action.tool,
            Tool::Known(KnownTool::OpenApp {
                action_required: true,
                message: "Launching calculator".into(),
                app_name: "calc".into(),
            })
        );
        assert_eq!(action.summary().as_deref(), Some("Launching calculator"));
    }

    #[test]
    fn test_unknown_tool_is_kept() {
        let json = r#"{"type": "tool_action", "tool": "weather", "city": "Bandung"}"#;
        let action: ToolAction = serde_json::from_str(json).unwrap();
        assert!(matches!(action.tool, Tool::Other(_)));
        assert_eq!(action.tool.name(), "weather");
        assert!(action.summary().is_none());

        let written = serde_json::to_value(&action).unwrap();
        assert_eq!(
            written,
            serde_json::json!({"type": "tool_action", "tool": "weather", "city": "Bandung"})
        );
    }

    #[test]
    fn test_unknown_tool_survives_reply_round_trip() {
        let json = r#"{
            "response": "It is sunny",
            "tool_action": {"type": "tool_action", "tool": "weather", "city": "Bandung", "temp": 31}
        }"#;
        let reply: ChatReply = serde_json::from_str(json).unwrap();
        let again: ChatReply = serde_json::from_str(&serde_json::to_string(&reply).unwrap()).unwrap();
        assert_eq!(again, reply);

        let written = serde_json::to_value(&again).unwrap();
        assert_eq!(written["tool_action"]["city"], "Bandung");
        assert_eq!(written["tool_action"]["temp"], 31);
    }

    #[test]
    fn test_tool_action_round_trips_type_tag() {
        let action = ToolAction::new(KnownTool::Datetime {
            result: "12:00".into(),
        });
        let value = serde_json::to_value(&action).unwrap();
        assert_eq!(value["type"], "tool_action");
        assert_eq!(value["tool"], "datetime");
        assert_eq!(value["result"], "12:00");
    }
}
