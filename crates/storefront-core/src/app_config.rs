#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Store origin the cart endpoints are resolved against.
    pub store_url: String,
    pub env: Environment,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// How long a notification stays fully visible before it starts hiding.
    pub notification_display_ms: u64,
    /// Length of the hide transition before the notification is removed.
    pub notification_fade_ms: u64,
    /// How long the cart counter keeps its highlight after an update.
    pub counter_highlight_ms: u64,
}
