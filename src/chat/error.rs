use thiserror::Error;

/// Everything that can go wrong while running a conversation turn.
#[derive(Debug, Error)]
pub enum ChatError {
    /// No usable API key, neither a tenant override nor a process default.
    #[error("no API key is configured")]
    Unconfigured,

    /// The turn asked for tool use but no search provider is provisioned.
    #[error("web search is not provisioned")]
    ToolUnavailable,

    /// The completion API answered with a non-success status.
    #[error("completion API returned {status}: {message}")]
    Provider { status: u16, message: String },

    /// Transport failures, unparsable payloads, out-of-contract responses.
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl ChatError {
    /// The text shown to the invoker for each failure class.
    pub fn user_reply(&self) -> String {
        match self {
            Self::Unconfigured => {
                "AI chat is not configured. An admin must set an API key.".to_string()
            }
            Self::ToolUnavailable => {
                "Sorry, the web search feature is not configured by the bot owner. \
                 I cannot perform a web search."
                    .to_string()
            }
            Self::Provider { status, message } => {
                format!("**API Error:** {status} - {message}")
            }
            Self::Unexpected(_) => {
                "An unexpected error occurred. Please check the console.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_reply_carries_status_and_message() {
        let error = ChatError::Provider {
            status: 429,
            message: "Rate limit reached".to_string(),
        };

        assert_eq!(error.user_reply(), "**API Error:** 429 - Rate limit reached");
    }

    #[test]
    fn unexpected_reply_never_leaks_the_inner_error() {
        let error = ChatError::Unexpected(anyhow::anyhow!("tcp reset by sk-secret-peer"));

        assert_eq!(
            error.user_reply(),
            "An unexpected error occurred. Please check the console."
        );
    }
}
