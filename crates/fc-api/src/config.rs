use serde::Deserialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub const fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Service configuration, read from environment variables.
///
/// Generation is only enabled when `OPENAI_API_KEY` is set; web search
/// context additionally needs `SERPAPI_KEY`.
#[derive(Clone, Debug, Deserialize)]
pub struct ApiConfig {
    pub database_url: String,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub env: Environment,
    /// Comma separated
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
    /// Username that owns decks created through save
    #[serde(default = "default_deck_owner")]
    pub deck_owner: String,
    pub openai_api_key: Option<String>,
    #[serde(default = "default_openai_base_url")]
    pub openai_base_url: String,
    #[serde(default = "default_openai_model")]
    pub openai_model: String,
    pub serpapi_key: Option<String>,
    #[serde(default = "default_serpapi_url")]
    pub serpapi_base_url: String,
    #[serde(default = "default_max_db_connections")]
    pub max_db_connections: u32,
    /// Apply the schema and seed the admin before serving
    #[serde(default)]
    pub bootstrap_on_start: bool,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    8000
}

fn default_allowed_origins() -> Vec<String> {
    vec!["http://localhost:8081".to_string()]
}

fn default_deck_owner() -> String {
    "admin".to_string()
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_openai_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_serpapi_url() -> String {
    "https://serpapi.com/search.json".to_string()
}

const fn default_max_db_connections() -> u32 {
    10
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::from_env()
    }

    /// Same as [`ApiConfig::from_env`], reading from the given key/value pairs
    pub fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter(vars)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Whether an LLM key is present
    pub fn generation_enabled(&self) -> bool {
        self.openai_api_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }
}
