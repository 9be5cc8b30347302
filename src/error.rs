use thiserror::Error;

/// Unified error type for relcut operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version error: {0}")]
    Version(String),

    #[error("{tool} failed: {message}")]
    Tool { tool: String, message: String },

    #[error("Package layout error: {0}")]
    Layout(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in relcut
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        ReleaseError::Version(msg.into())
    }

    /// Create an external-tool error, naming the tool that failed
    pub fn tool(tool: impl Into<String>, msg: impl Into<String>) -> Self {
        ReleaseError::Tool {
            tool: tool.into(),
            message: msg.into(),
        }
    }

    /// Create a package layout error with context
    pub fn layout(msg: impl Into<String>) -> Self {
        ReleaseError::Layout(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ReleaseError::config("test config issue");
        assert_eq!(err.to_string(), "Configuration error: test config issue");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ReleaseError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_tool_error_names_tool() {
        let err = ReleaseError::tool("git-cliff", "exit status 1");
        assert_eq!(err.to_string(), "git-cliff failed: exit status 1");
    }

    #[test]
    fn test_error_constructors() {
        assert!(ReleaseError::version("test")
            .to_string()
            .contains("Version"));
        assert!(ReleaseError::layout("test").to_string().contains("layout"));
    }

    #[test]
    fn test_error_all_variants_nonempty() {
        let errors = vec![
            ReleaseError::config("config issue"),
            ReleaseError::version("version issue"),
            ReleaseError::tool("uv", "lock issue"),
            ReleaseError::layout("layout issue"),
        ];

        for err in errors {
            assert!(!err.to_string().is_empty());
        }
    }
}
