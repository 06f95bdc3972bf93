#[cfg(feature = "cli")]
pub mod cli;

use crate::core::store::DEFAULT_CART_KEY;
use crate::core::ConfigProvider;
use crate::utils::error::{CartError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3333";
pub const DEFAULT_STORAGE_PATH: &str = "./.cart";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartConfig {
    pub api: ApiConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_seconds: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_seconds: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub path: String,
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: DEFAULT_STORAGE_PATH.to_string(),
            key: DEFAULT_CART_KEY.to_string(),
        }
    }
}

impl CartConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CartError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CartError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${STORE_API_URL})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| CartError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for CartConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("api.base_url", &self.api.base_url)?;
        if let Some(timeout) = self.api.timeout_seconds {
            validation::validate_at_least("api.timeout_seconds", timeout, 1)?;
        }
        validation::validate_path("storage.path", &self.storage.path)?;
        validation::validate_non_empty_string("storage.key", &self.storage.key)?;
        Ok(())
    }
}

impl ConfigProvider for CartConfig {
    fn api_base_url(&self) -> &str {
        &self.api.base_url
    }

    fn storage_path(&self) -> &str {
        &self.storage.path
    }

    fn storage_key(&self) -> &str {
        &self.storage.key
    }

    fn request_timeout_seconds(&self) -> Option<u64> {
        self.api.timeout_seconds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[api]
base_url = "https://shop.example.com/api"
timeout_seconds = 10

[storage]
path = "/tmp/cart"
key = "@Shop:cart"
"#;

        let config = CartConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.api_base_url(), "https://shop.example.com/api");
        assert_eq!(config.request_timeout_seconds(), Some(10));
        assert_eq!(config.storage_path(), "/tmp/cart");
        assert_eq!(config.storage_key(), "@Shop:cart");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = CartConfig::from_toml_str("[api]\ntimeout_seconds = 3\n").unwrap();
        assert_eq!(config.api.base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.storage, StorageConfig::default());
        assert_eq!(config.storage.key, "@RocketShoes:cart");
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("STOREFRONT_CART_TEST_API", "https://stock.example.com");
        let toml_content = r#"
[api]
base_url = "${STOREFRONT_CART_TEST_API}"

[storage]
path = "${STOREFRONT_CART_UNSET_VAR}"
"#;

        let config = CartConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.api.base_url, "https://stock.example.com");
        assert_eq!(config.storage.path, "${STOREFRONT_CART_UNSET_VAR}");
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[storage]\npath = \"./carts\"").unwrap();

        let config = CartConfig::from_file(file.path()).unwrap();
        assert_eq!(config.storage.path, "./carts");
        assert_eq!(config.api.base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn test_invalid_toml_reports_parsing_error() {
        let err = CartConfig::from_toml_str("[api\nbase_url = 1").unwrap_err();
        assert!(matches!(err, CartError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = CartConfig::default();
        assert!(config.validate().is_ok());

        config.api.base_url = "ftp://shop.example.com".to_string();
        assert!(config.validate().is_err());

        config = CartConfig::default();
        config.api.timeout_seconds = Some(0);
        assert!(config.validate().is_err());

        config = CartConfig::default();
        config.storage.key = "   ".to_string();
        assert!(config.validate().is_err());
    }
}
