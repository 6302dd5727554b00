//! Configuration for the tool adapters
//!
//! The configuration is constructed once at process start (from a TOML file
//! or from defaults) and passed by reference into tool construction. The
//! file stores the *names* of environment variables holding credentials;
//! the values themselves are resolved through getters so secrets never land
//! in the config file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Top-level configuration handed to the tool registry.
///
/// Every section is optional in the file; omitted sections fall back to
/// their defaults, so `AgentConfig::default()` is a valid configuration
/// (one that resolves credentials from the conventional variables).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AgentConfig {
    #[serde(default)]
    pub search: SearchSection,
    #[serde(default)]
    pub arxiv: ArxivSection,
    #[serde(default)]
    pub chat: ChatSection,
}

/// Web search settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchSection {
    /// Environment variable containing the search API key
    #[serde(default = "default_search_api_key_env")]
    pub api_key_env: String,
    /// Optional domain restriction appended to every query as `site:<domain>`
    pub site: Option<String>,
    /// Search API endpoint
    #[serde(default = "default_search_base_url")]
    pub base_url: String,
}

/// Arxiv paper search settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArxivSection {
    /// Arxiv export endpoint
    #[serde(default = "default_arxiv_base_url")]
    pub base_url: String,
}

/// Chat relay settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatSection {
    /// Environment variable containing the chat service email
    #[serde(default = "default_chat_email_env")]
    pub email_env: String,
    /// Environment variable containing the chat service password
    #[serde(default = "default_chat_password_env")]
    pub password_env: String,
    /// Request streamed delivery of the answer
    #[serde(default)]
    pub streaming: bool,
    /// Ask the service to augment the answer with its own web search
    #[serde(default)]
    pub web_search: bool,
    /// Directory where the session cookie snapshot is written
    #[serde(default = "default_cookie_dir")]
    pub cookie_dir: PathBuf,
    /// Chat service endpoint
    #[serde(default = "default_chat_base_url")]
    pub base_url: String,
}

fn default_search_api_key_env() -> String {
    "SERPER_API_KEY".to_string()
}

fn default_search_base_url() -> String {
    "https://google.serper.dev".to_string()
}

fn default_arxiv_base_url() -> String {
    "http://export.arxiv.org".to_string()
}

fn default_chat_email_env() -> String {
    "HUGCHAT_EMAIL".to_string()
}

fn default_chat_password_env() -> String {
    "HUGCHAT_PASS".to_string()
}

fn default_cookie_dir() -> PathBuf {
    PathBuf::from("./cookies_snapshot")
}

fn default_chat_base_url() -> String {
    "https://huggingface.co".to_string()
}

impl Default for SearchSection {
    fn default() -> Self {
        Self {
            api_key_env: default_search_api_key_env(),
            site: None,
            base_url: default_search_base_url(),
        }
    }
}

impl Default for ArxivSection {
    fn default() -> Self {
        Self {
            base_url: default_arxiv_base_url(),
        }
    }
}

impl Default for ChatSection {
    fn default() -> Self {
        Self {
            email_env: default_chat_email_env(),
            password_env: default_chat_password_env(),
            streaming: false,
            web_search: false,
            cookie_dir: default_cookie_dir(),
            base_url: default_chat_base_url(),
        }
    }
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl AgentConfig {
    /// Load configuration from a TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: AgentConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Helper method to get an optional environment variable
    fn get_env_var_optional(env_var_name: &str) -> Option<String> {
        std::env::var(env_var_name).ok().filter(|v| !v.is_empty())
    }

    /// Get the search API key from the environment, if set.
    pub fn search_api_key(&self) -> Option<String> {
        Self::get_env_var_optional(&self.search.api_key_env)
    }

    /// Get the chat service email from the environment, if set.
    pub fn chat_email(&self) -> Option<String> {
        Self::get_env_var_optional(&self.chat.email_env)
    }

    /// Get the chat service password from the environment, if set.
    pub fn chat_password(&self) -> Option<String> {
        Self::get_env_var_optional(&self.chat.password_env)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config() {
        let toml_content = r#"
[search]
api_key_env = "MY_SEARCH_KEY"
site = "example.com"

[arxiv]
base_url = "http://localhost:9999"

[chat]
email_env = "MY_CHAT_EMAIL"
password_env = "MY_CHAT_PASS"
streaming = true
web_search = true
cookie_dir = "/tmp/cookies"
"#;

        let config: AgentConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.search.api_key_env, "MY_SEARCH_KEY");
        assert_eq!(config.search.site.as_deref(), Some("example.com"));
        assert_eq!(config.search.base_url, "https://google.serper.dev");
        assert_eq!(config.arxiv.base_url, "http://localhost:9999");
        assert_eq!(config.chat.email_env, "MY_CHAT_EMAIL");
        assert!(config.chat.streaming);
        assert!(config.chat.web_search);
        assert_eq!(config.chat.cookie_dir, PathBuf::from("/tmp/cookies"));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AgentConfig = toml::from_str("").unwrap();
        assert_eq!(config, AgentConfig::default());
        assert_eq!(config.search.api_key_env, "SERPER_API_KEY");
        assert_eq!(config.chat.email_env, "HUGCHAT_EMAIL");
        assert_eq!(config.chat.password_env, "HUGCHAT_PASS");
        assert!(!config.chat.streaming);
        assert!(!config.chat.web_search);
        assert_eq!(config.chat.cookie_dir, PathBuf::from("./cookies_snapshot"));
        assert_eq!(config.chat.base_url, "https://huggingface.co");
        assert_eq!(config.arxiv.base_url, "http://export.arxiv.org");
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let toml_content = r#"
[search]
site = "docs.rs"
"#;

        let config: AgentConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.search.site.as_deref(), Some("docs.rs"));
        assert_eq!(config.search.api_key_env, "SERPER_API_KEY");
    }

    #[test]
    fn test_env_resolution() {
        let mut config = AgentConfig::default();
        config.search.api_key_env = "TOOLBELT_TEST_SEARCH_KEY_PRESENT".to_string();
        std::env::set_var("TOOLBELT_TEST_SEARCH_KEY_PRESENT", "abc123");
        assert_eq!(config.search_api_key().as_deref(), Some("abc123"));

        config.search.api_key_env = "TOOLBELT_TEST_SEARCH_KEY_ABSENT".to_string();
        assert_eq!(config.search_api_key(), None);
    }

    #[test]
    fn test_empty_env_value_counts_as_unset() {
        let mut config = AgentConfig::default();
        config.chat.email_env = "TOOLBELT_TEST_EMPTY_EMAIL".to_string();
        std::env::set_var("TOOLBELT_TEST_EMPTY_EMAIL", "");
        assert_eq!(config.chat_email(), None);
    }
}
