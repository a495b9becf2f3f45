use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Who authored a message within a conversation context.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

impl TryFrom<String> for Role {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        serde_plain::from_str(&value).map_err(|e| anyhow::anyhow!("{}", e))
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        serde_plain::to_string(self)
            .map_err(|_| std::fmt::Error::default())?
            .fmt(f)
    }
}

/// A tool call requested by the assistant, with the arguments kept as the
/// raw JSON text the wire carried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCall {
    pub id: String,
    pub name: String,
    pub arguments: String,
}

/// One entry in a conversation context's history.
///
/// `tool_call` is only ever set on assistant messages, `tool_call_id` and
/// `tool_name` only on tool messages. The constructors uphold this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: Option<String>,
    pub tool_call: Option<ToolCall>,
    pub tool_call_id: Option<String>,
    pub tool_name: Option<String>,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: Some(content.into()),
            tool_call: None,
            tool_call_id: None,
            tool_name: None,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: Some(content.into()),
            tool_call: None,
            tool_call_id: None,
            tool_name: None,
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: Some(content.into()),
            tool_call: None,
            tool_call_id: None,
            tool_name: None,
        }
    }

    /// Assistant message recording a pending tool call. Carries no text,
    /// the answer only arrives after the tool result goes back out.
    pub fn tool_request(call: ToolCall) -> Self {
        Self {
            role: Role::Assistant,
            content: None,
            tool_call: Some(call),
            tool_call_id: None,
            tool_name: None,
        }
    }

    /// Tool message answering the call with the given id.
    pub fn tool_result(
        call_id: impl Into<String>,
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            role: Role::Tool,
            content: Some(content.into()),
            tool_call: None,
            tool_call_id: Some(call_id.into()),
            tool_name: Some(name.into()),
        }
    }
}
