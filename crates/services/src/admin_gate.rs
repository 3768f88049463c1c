use std::fmt;

/// Shared-password check guarding destructive admin actions.
#[derive(Clone, Default)]
pub struct AdminGate {
    password: String,
}

impl AdminGate {
    #[must_use]
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
        }
    }

    /// True when `attempt` equals the configured password.
    #[must_use]
    pub fn verify(&self, attempt: &str) -> bool {
        attempt == self.password
    }
}

impl fmt::Debug for AdminGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminGate")
            .field("password", &"<redacted>")
            .finish()
    }
}
