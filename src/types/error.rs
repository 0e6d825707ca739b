use thiserror::Error;

/// cost-report error types
#[derive(Error, Debug)]
pub enum ReportError {
    /// Invalid or incomplete configuration
    #[error("config error: {0}")]
    Config(String),

    /// File I/O error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Billing API call failed (network, auth, throttling)
    #[error("fetch error: {0}")]
    Fetch(String),

    /// Billing API response could not be interpreted
    #[error("parse error: {0}")]
    Parse(String),

    /// Mail relay unreachable or rejected the message
    #[error("mail error: {0}")]
    Mail(String),
}

impl ReportError {
    /// Whether this error must abort the whole run.
    ///
    /// Fetch and parse failures only cost one account its report; a mail
    /// failure stops everything.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ReportError::Mail(_))
    }
}

/// Result type alias for cost-report
pub type Result<T> = std::result::Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ReportError::Parse("missing amount".into());
        assert_eq!(err.to_string(), "parse error: missing amount");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ReportError = io_err.into();
        assert!(err.to_string().contains("io error"));
    }

    #[test]
    fn test_only_mail_errors_are_fatal() {
        assert!(ReportError::Mail("connection refused".into()).is_fatal());
        assert!(!ReportError::Fetch("AccessDenied".into()).is_fatal());
        assert!(!ReportError::Parse("bad amount".into()).is_fatal());
        assert!(!ReportError::Config("no accounts".into()).is_fatal());
    }
}
