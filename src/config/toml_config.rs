use crate::content::images::{GcpConfig, ImageEnv, ImageResolver, LOCAL_BASE_PATH};
use crate::utils::error::{ContentError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 覆寫圖片環境的環境變數
pub const IMAGE_ENV_VAR: &str = "IMAGE_ENV";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub images: ImageSettings,
    pub data: DataSettings,
    pub notifications: NotificationSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageSettings {
    pub env: ImageEnv,
    pub local_base_path: String,
    pub gcp: GcpConfig,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            env: ImageEnv::default(),
            local_base_path: LOCAL_BASE_PATH.to_string(),
            gcp: GcpConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSettings {
    pub dir: String,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            dir: "data".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationSettings {
    pub enabled: bool,
    pub couple_email: Option<String>,
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ContentError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ContentError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 有指定路徑就載入該檔，否則使用預設值
    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        match path {
            Some(path) if path.as_ref().exists() => Self::from_file(path),
            Some(path) => Err(ContentError::ConfigError {
                message: format!("config file not found: {}", path.as_ref().display()),
            }),
            None => Ok(Self::default()),
        }
    }

    /// 替換環境變數 (例如 ${BUCKET_NAME})，未設定的保留原字串
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ContentError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 套用 IMAGE_ENV 覆寫
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(value) = std::env::var(IMAGE_ENV_VAR) {
            self.images.env = value.parse()?;
            tracing::debug!("image environment overridden by {}: {}", IMAGE_ENV_VAR, self.images.env);
        }
        Ok(())
    }

    pub fn image_resolver(&self) -> ImageResolver {
        self.images.resolver(self.images.env)
    }

    pub fn data_dir(&self) -> &str {
        &self.data.dir
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_path("images.local_base_path", &self.images.local_base_path)?;
        validation::validate_non_empty_string("images.gcp.bucket_name", &self.images.gcp.bucket_name)?;
        validation::validate_url("images.gcp.bucket_name", &self.images.gcp.base_url())?;
        validation::validate_path("data.dir", &self.data.dir)?;

        if self.notifications.enabled {
            let email = validation::validate_required_field(
                "notifications.couple_email",
                &self.notifications.couple_email,
            )?;
            if !email.contains('@') {
                return Err(ContentError::InvalidConfigValueError {
                    field: "notifications.couple_email".to_string(),
                    value: email.clone(),
                    reason: "Not an email address".to_string(),
                });
            }
        }

        Ok(())
    }
}

impl ImageSettings {
    pub fn resolver(&self, env: ImageEnv) -> ImageResolver {
        match env {
            ImageEnv::Local => ImageResolver::new(env, self.local_base_path.clone()),
            ImageEnv::Production => ImageResolver::new(env, self.gcp.base_url()),
        }
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
