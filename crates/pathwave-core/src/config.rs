//! Configuration management
//!
//! 設定は以下の優先順位で読み込まれます:
//! 1. 環境変数
//! 2. pathwave.toml 設定ファイル
//! 3. デフォルト値
//!
//! 設定ファイル内では `${VAR_NAME}` 形式で環境変数を展開できます。

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Environment variable holding the caller identity
pub const USER_SID_ENV: &str = "PATHWAVE_USER_SID";

/// Environment variable overriding the API base URL
pub const BASE_URL_ENV: &str = "PATHWAVE_BASE_URL";

/// Default config file looked up by [`PathwaveConfig::load`]
pub const DEFAULT_CONFIG_FILE: &str = "pathwave.toml";

/// Pathwave client configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PathwaveConfig {
    /// Caller identity embedded in every request path
    pub user_sid: String,

    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "https://api.pathwave.io".to_string()
}

impl PathwaveConfig {
    /// Create a configuration for the given identity with the default base URL
    pub fn new(user_sid: impl Into<String>) -> Self {
        Self {
            user_sid: user_sid.into(),
            base_url: default_base_url(),
        }
    }

    /// Override the base URL (for testing or self-hosted endpoints)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Check that the identity is present and not blank
    pub fn validate(&self) -> Result<()> {
        if self.user_sid.trim().is_empty() {
            return Err(missing_user_sid());
        }
        Ok(())
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let user_sid = lookup(USER_SID_ENV).ok_or_else(missing_user_sid)?;

        let mut config = Self::new(user_sid);
        if let Some(base_url) = lookup(BASE_URL_ENV).filter(|url| !url.trim().is_empty()) {
            config = config.with_base_url(base_url);
        }

        config.validate()?;
        Ok(config)
    }

    /// デフォルトパスから設定を読み込む
    ///
    /// `./pathwave.toml` があればそれを使い、なければ環境変数のみを使います。
    pub fn load() -> Result<Self> {
        if Path::new(DEFAULT_CONFIG_FILE).exists() {
            return Self::from_toml_file(DEFAULT_CONFIG_FILE);
        }

        Self::from_env()
    }

    /// TOML 設定ファイルから設定を読み込む
    ///
    /// # 引数
    /// * `path` - TOML ファイルのパス
    ///
    /// # 環境変数展開
    /// 設定ファイル内の `${VAR_NAME}` は環境変数の値に置換されます。
    /// 読み込み後、環境変数が設定されていればそちらが優先されます。
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let toml_content = std::fs::read_to_string(path).map_err(|e| {
            Error::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read config file {}: {}", path.display(), e),
            ))
        })?;

        let mut config = Self::from_toml_str(&toml_content)?;
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Parse TOML content after `${VAR}` expansion. Not validated.
    fn from_toml_str(content: &str) -> Result<Self> {
        let expanded = expand_env_vars(content);

        let toml: TomlConfig = toml::from_str(&expanded)
            .map_err(|e| Error::Config(format!("Failed to parse TOML: {}", e)))?;

        let section = toml.pathwave.unwrap_or_default();
        let mut config = Self::new(section.user_sid.unwrap_or_default());
        if let Some(base_url) = section.base_url.filter(|url| !url.trim().is_empty()) {
            config = config.with_base_url(base_url);
        }

        Ok(config)
    }

    /// 環境変数で設定を上書きする
    fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(user_sid) = lookup(USER_SID_ENV) {
            if !user_sid.trim().is_empty() {
                self.user_sid = user_sid;
            }
        }

        if let Some(base_url) = lookup(BASE_URL_ENV) {
            if !base_url.trim().is_empty() {
                self.base_url = base_url.trim_end_matches('/').to_string();
            }
        }
    }
}

fn missing_user_sid() -> Error {
    Error::Config(format!(
        "{} environment variable is required but was not provided. \
         Please set it before initializing the PathwaveClient.",
        USER_SID_ENV
    ))
}

/// 設定ファイルから環境変数を展開する
///
/// `${VAR_NAME}` 形式の文字列を環境変数の値に置換します。
/// 環境変数が存在しない場合は空文字列になります。
fn expand_env_vars(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '$' && chars.peek() == Some(&'{') {
            chars.next();

            let mut var_name = String::new();
            for c in chars.by_ref() {
                if c == '}' {
                    break;
                }
                var_name.push(c);
            }

            if let Ok(env_value) = std::env::var(&var_name) {
                result.push_str(&env_value);
            }
        } else {
            result.push(c);
        }
    }

    result
}

// ============================================================================
// TOML 構造体定義（ファイル解析用）
// ============================================================================

#[derive(Debug, Deserialize)]
struct TomlConfig {
    pathwave: Option<TomlPathwaveConfig>,
}

#[derive(Debug, Deserialize, Default)]
struct TomlPathwaveConfig {
    #[serde(default)]
    user_sid: Option<String>,
    #[serde(default)]
    base_url: Option<String>,
}
