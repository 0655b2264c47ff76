//! Login credentials collected by the form.

use std::fmt;

/// Email and password for a single login attempt.
///
/// Lives only for the duration of the request; never stored or logged.
#[derive(Clone)]
pub struct Credentials {
    email: String,
    password: String,
}

impl Credentials {
    /// Builds credentials, trimming surrounding whitespace from the email.
    pub fn new(email: &str, password: impl Into<String>) -> Self {
        Self {
            email: email.trim().to_string(),
            password: password.into(),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Returns true when either field is empty.
    pub fn is_incomplete(&self) -> bool {
        self.email.is_empty() || self.password.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_is_trimmed() {
        let creds = Credentials::new("  john.doe@example.com \n", "SecurePass123");
        assert_eq!(creds.email(), "john.doe@example.com");
        assert_eq!(creds.password(), "SecurePass123");
    }

    #[test]
    fn test_incomplete() {
        assert!(Credentials::new("   ", "x").is_incomplete());
        assert!(Credentials::new("a@b.co", "").is_incomplete());
        assert!(!Credentials::new("a@b.co", "x").is_incomplete());
    }

    #[test]
    fn test_debug_hides_password() {
        let rendered = format!("{:?}", Credentials::new("a@b.co", "hunter2"));
        assert!(!rendered.contains("hunter2"));
    }
}
