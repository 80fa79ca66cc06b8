//! Error types for configuration, provider calls, search, and the tool
//! loop.

use thiserror::Error;

/// Errors from agent configuration and execution.
#[derive(Debug, Error)]
pub enum AgentError {
    /// A required API key environment variable was not set.
    #[error("missing API key: set the {var} environment variable")]
    ApiKeyMissing {
        /// Name of the missing environment variable.
        var: &'static str,
    },

    /// The configured provider name is not recognised.
    #[error("unsupported provider: {name}")]
    UnsupportedProvider {
        /// The provider name as configured.
        name: String,
    },

    /// A chat completion request to the model provider failed.
    #[error("API request failed: {message}")]
    ApiRequest {
        /// Provider-reported error message.
        message: String,
        /// HTTP status code, when one was received.
        status: Option<u16>,
    },

    /// A single search request failed. Transient: the retry loop in
    /// `SearchClient` consumes these and only surfaces
    /// [`AgentError::RetriesExhausted`] to callers.
    #[error("search request failed: {message}")]
    SearchRequest {
        /// Transport or server error message.
        message: String,
        /// HTTP status code, when one was received.
        status: Option<u16>,
    },

    /// Every allowed search attempt failed.
    #[error("search failed after {attempts} attempts: {last_error}")]
    RetriesExhausted {
        /// Number of attempts made.
        attempts: u32,
        /// Message from the final attempt's error.
        last_error: String,
    },

    /// The model supplied arguments a tool could not parse or validate.
    /// Fatal: the conversation state is not trustworthy past this point.
    #[error("invalid arguments for tool '{name}': {message}")]
    ToolArguments {
        /// Name of the tool that rejected the arguments.
        name: String,
        /// What was wrong with them.
        message: String,
    },

    /// The model kept requesting tools beyond the round-trip cap.
    #[error("tool loop exceeded {max_iterations} iterations without a final answer")]
    ToolLoopExceeded {
        /// The configured cap that was hit.
        max_iterations: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_missing_display() {
        let err = AgentError::ApiKeyMissing {
            var: "OPENAI_API_KEY",
        };
        assert_eq!(
            err.to_string(),
            "missing API key: set the OPENAI_API_KEY environment variable"
        );
    }

    #[test]
    fn test_retries_exhausted_display() {
        let err = AgentError::RetriesExhausted {
            attempts: 3,
            last_error: "HTTP 503: unavailable".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "search failed after 3 attempts: HTTP 503: unavailable"
        );
    }

    #[test]
    fn test_tool_arguments_display() {
        let err = AgentError::ToolArguments {
            name: "search_web".to_string(),
            message: "query must not be empty".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid arguments for tool 'search_web': query must not be empty"
        );
    }
}
