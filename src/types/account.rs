//! Account and mail relay settings, resolved once at startup

use lettre::message::Mailbox;
use std::fmt;

/// Static AWS access key pair for one account
#[derive(Clone, PartialEq, Eq)]
pub struct AwsCredentials {
    pub access_key: String,
    pub secret_key: String,
}

// Keep secrets out of logs and panic messages
impl fmt::Debug for AwsCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AwsCredentials")
            .field("access_key", &"***")
            .field("secret_key", &"***")
            .finish()
    }
}

/// One cloud account to report on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub name: String,
    pub account_id: String,
    pub region: String,
    /// `None` when either key was absent or empty in the environment
    pub credentials: Option<AwsCredentials>,
}

/// SMTP relay settings (unauthenticated, unencrypted)
#[derive(Debug, Clone)]
pub struct SmtpSettings {
    pub host: String,
    pub port: u16,
    pub sender: Mailbox,
    pub recipients: Vec<Mailbox>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_is_redacted() {
        let creds = AwsCredentials {
            access_key: "AKIAEXAMPLE".to_string(),
            secret_key: "very-secret".to_string(),
        };
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("AKIAEXAMPLE"));
        assert!(!debug.contains("very-secret"));
    }
}
