//! アプリケーション設定ファイルの管理
//!
//! 検索件数・対象ユーザー・ベンダーごとの検索キーワードを order_mail_config.json で管理する。

use crate::parsers::Vendor;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "order_mail_config.json";

/// アプリケーション設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub listing: ListingConfig,
    #[serde(default = "default_vendors")]
    pub vendors: Vec<VendorConfig>,
}

/// メール一覧取得の設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingConfig {
    /// 1 回の検索で取得する最大件数
    pub max_results: u32,
    /// Gmail API の userId（通常は "me"）
    #[serde(default = "default_user_id")]
    pub user_id: String,
}

/// ベンダー（パターン系統）ごとの検索キーワード
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorConfig {
    pub vendor: Vendor,
    pub keywords: Vec<String>,
}

fn default_user_id() -> String {
    "me".to_string()
}

fn default_vendors() -> Vec<VendorConfig> {
    vec![
        VendorConfig {
            vendor: Vendor::Generic,
            keywords: vec!["sipariş".to_string(), "order".to_string()],
        },
        VendorConfig {
            vendor: Vendor::Trendyol,
            keywords: vec!["trendyol".to_string()],
        },
    ]
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listing: ListingConfig {
                max_results: 100,
                user_id: default_user_id(),
            },
            vendors: default_vendors(),
        }
    }
}

/// 設定を読み込む。ファイルが存在しない場合はデフォルトを返し、保存する。
pub fn load(config_dir: &Path) -> Result<AppConfig, String> {
    let path = config_dir.join(CONFIG_FILENAME);

    if path.exists() {
        let contents = fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        serde_json::from_str(&contents).map_err(|e| format!("Invalid config JSON: {e}"))
    } else {
        let config = AppConfig::default();
        save(config_dir, &config)?;
        log::info!("Default config written to {}", path.display());
        Ok(config)
    }
}

/// 設定を保存する。
pub fn save(config_dir: &Path, config: &AppConfig) -> Result<(), String> {
    fs::create_dir_all(config_dir).map_err(|e| format!("Failed to create config dir: {e}"))?;

    let path = config_dir.join(CONFIG_FILENAME);
    let contents = serde_json::to_string_pretty(config)
        .map_err(|e| format!("Failed to serialize config: {e}"))?;

    fs::write(&path, contents).map_err(|e| format!("Failed to write config file: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_creates_default_when_missing() {
        let dir = TempDir::new().unwrap();
        let config = load(dir.path()).unwrap();
        assert_eq!(config.listing.max_results, 100);
        assert_eq!(config.listing.user_id, "me");
        assert_eq!(config.vendors.len(), 2);
        assert_eq!(config.vendors[0].vendor, Vendor::Generic);
        assert_eq!(config.vendors[1].vendor, Vendor::Trendyol);
        assert_eq!(config.vendors[1].keywords, vec!["trendyol".to_string()]);

        // ファイルが作成されている
        assert!(dir.path().join(CONFIG_FILENAME).exists());
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig {
            listing: ListingConfig {
                max_results: 25,
                user_id: "someone@example.com".to_string(),
            },
            vendors: vec![VendorConfig {
                vendor: Vendor::Trendyol,
                keywords: vec!["from:trendyol.com".to_string()],
            }],
        };

        save(dir.path(), &config).unwrap();
        let loaded = load(dir.path()).unwrap();
        assert_eq!(loaded.listing.max_results, 25);
        assert_eq!(loaded.listing.user_id, "someone@example.com");
        assert_eq!(loaded.vendors.len(), 1);
        assert_eq!(loaded.vendors[0].keywords[0], "from:trendyol.com");
    }

    #[test]
    fn test_load_fills_missing_optional_fields() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILENAME),
            r#"{"listing": {"max_results": 10}}"#,
        )
        .unwrap();

        let loaded = load(dir.path()).unwrap();
        assert_eq!(loaded.listing.max_results, 10);
        assert_eq!(loaded.listing.user_id, "me");
        assert_eq!(loaded.vendors.len(), 2);
    }

    #[test]
    fn test_load_invalid_json_returns_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        fs::write(&path, "invalid json").unwrap();

        let result = load(dir.path());
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Invalid config"));
    }

    #[test]
    fn test_load_unknown_vendor_returns_error() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILENAME),
            r#"{"listing": {"max_results": 10}, "vendors": [{"vendor": "amazon", "keywords": []}]}"#,
        )
        .unwrap();

        assert!(load(dir.path()).is_err());
    }
}
