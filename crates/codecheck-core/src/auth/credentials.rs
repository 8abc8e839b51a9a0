use anyhow::{Context, Result};
use keyring::Entry;

const SERVICE_NAME: &str = "codecheck";

/// Login credentials for the CodeChecker server.
///
/// Ephemeral input to `SessionClient::login`; the library never persists
/// these. No validation happens here - empty or malformed values are
/// passed through to the server as-is.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub name: String,
    pub password: String,
}

impl Credentials {
    pub fn new(name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            password: password.into(),
        }
    }
}

pub struct CredentialStore;

impl CredentialStore {
    /// Store username and password in the OS keychain
    pub fn store(username: &str, password: &str) -> Result<()> {
        let entry =
            Entry::new(SERVICE_NAME, username).context("Failed to create keyring entry")?;
        entry
            .set_password(password)
            .context("Failed to store password in keychain")?;
        Ok(())
    }

    /// Retrieve password for a username from the OS keychain
    pub fn get_password(username: &str) -> Result<String> {
        let entry =
            Entry::new(SERVICE_NAME, username).context("Failed to create keyring entry")?;
        entry
            .get_password()
            .context("Failed to retrieve password from keychain")
    }

    /// Check if credentials exist for a username
    pub fn has_credentials(username: &str) -> bool {
        if let Ok(entry) = Entry::new(SERVICE_NAME, username) {
            entry.get_password().is_ok()
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_new() {
        let creds = Credentials::new("alice", "hunter2");
        assert_eq!(creds.name, "alice");
        assert_eq!(creds.password, "hunter2");
    }
}
