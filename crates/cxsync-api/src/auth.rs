use secrecy::SecretString;

/// Username/password pair used for the switch session login.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<SecretString>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// `true` when either half of the pair is blank.
    pub fn is_incomplete(&self) -> bool {
        use secrecy::ExposeSecret;
        self.username.trim().is_empty() || self.password.expose_secret().is_empty()
    }
}
