use serde::{Deserialize, Serialize};

const DEFAULT_API_BASE: &str = "/api";
const DEFAULT_DOMAIN: &str = "localhost:8000";

/// Where the client finds the API and which domain share links point at.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ClientConfig {
    pub api_base: String,
    pub domain: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            domain: DEFAULT_DOMAIN.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    fn base(&self) -> &str {
        self.api_base.trim_end_matches('/')
    }

    pub fn files_url(&self) -> String {
        format!("{}/file", self.base())
    }

    pub fn file_url(&self, key: &str) -> String {
        format!("{}/file/{}", self.base(), key)
    }

    pub fn login_url(&self) -> String {
        format!("{}/auth/login", self.base())
    }

    pub fn share_link(&self, key: &str) -> String {
        format!("{}/f/{}", self.domain.trim_end_matches('/'), key)
    }
}
