use crate::utils::error::{ContentError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 本機開發使用的圖片根目錄
pub const LOCAL_BASE_PATH: &str = "./images/";

/// 以 (key, filename) 表示，順序即輸出順序
pub type ImageTable = &'static [(&'static str, &'static str)];

const LOCAL_IMAGES: ImageTable = &[
    ("proshot", "proshot.jpg"),
    ("party_red_black", "party_red_black.jpg"),
    ("champ_keke_red_black", "champ-keke-red-black.jpg"),
    ("cowboy_beige_white", "cowboy_beige_white.jpg"),
    ("jeep_life_red", "jeep_life_red.jpg"),
    ("marriage_license", "marriage-license.jpg"),
    ("vacation_swimsuit", "vacation_swimsuit.jpg"),
];

const PRODUCTION_IMAGES: ImageTable = &[
    ("proshot", "proshot.jpg"),
    ("party_red_black", "party_red_black.jpg"),
    ("champ_keke_red_black", "champ-keke-red-black.jpg"),
    ("cowboy_beige_white", "cowboy_beige_white.jpg"),
    ("jeep_life_red", "jeep_life_red.jpg"),
    ("marriage_license", "marriage-license.jpg"),
    ("vacation_swimsuit", "vacation_swimsuit.jpg"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageEnv {
    Local,
    #[default]
    #[serde(alias = "prod")]
    Production,
}

impl ImageEnv {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageEnv::Local => "local",
            ImageEnv::Production => "production",
        }
    }

    pub fn images(&self) -> ImageTable {
        match self {
            ImageEnv::Local => LOCAL_IMAGES,
            ImageEnv::Production => PRODUCTION_IMAGES,
        }
    }
}

impl fmt::Display for ImageEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageEnv {
    type Err = ContentError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(ImageEnv::Local),
            "production" | "prod" => Ok(ImageEnv::Production),
            other => Err(ContentError::InvalidConfigValueError {
                field: "images.env".to_string(),
                value: other.to_string(),
                reason: "Valid environments: local, production".to_string(),
            }),
        }
    }
}

/// GCP bucket 設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GcpConfig {
    pub bucket_name: String,
    pub region: String,
    pub project_id: String,
}

impl Default for GcpConfig {
    fn default() -> Self {
        Self {
            bucket_name: "wedding-website-2025-regdev-1752188684".to_string(),
            region: "us-central1".to_string(),
            project_id: "wedding-website-2025".to_string(),
        }
    }
}

impl GcpConfig {
    pub fn base_url(&self) -> String {
        format!("https://storage.googleapis.com/{}/", self.bucket_name)
    }
}

/// 依環境把圖片 key 轉成完整 URL
#[derive(Debug, Clone)]
pub struct ImageResolver {
    env: ImageEnv,
    base_path: String,
    images: ImageTable,
}

impl ImageResolver {
    pub fn new(env: ImageEnv, base_path: impl Into<String>) -> Self {
        Self {
            env,
            base_path: base_path.into(),
            images: env.images(),
        }
    }

    pub fn for_env(env: ImageEnv, gcp: &GcpConfig) -> Self {
        match env {
            ImageEnv::Local => Self::new(env, LOCAL_BASE_PATH),
            ImageEnv::Production => Self::new(env, gcp.base_url()),
        }
    }

    pub fn env(&self) -> ImageEnv {
        self.env
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.images.iter().map(|(key, _)| *key)
    }

    pub fn filename(&self, key: &str) -> Option<&'static str> {
        self.images
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, file)| *file)
    }

    pub fn resolve(&self, key: &str) -> Option<String> {
        self.filename(key)
            .map(|file| format!("{}{}", self.base_path, file))
    }

    pub fn resolve_all(&self) -> Vec<(&'static str, String)> {
        self.images
            .iter()
            .map(|(key, file)| (*key, format!("{}{}", self.base_path, file)))
            .collect()
    }
}

/// 檢查兩個環境的 key 集合一致，回傳不一致的 key
pub fn key_parity_mismatches() -> Vec<&'static str> {
    let in_local = |k: &str| LOCAL_IMAGES.iter().any(|(key, _)| *key == k);
    let in_production = |k: &str| PRODUCTION_IMAGES.iter().any(|(key, _)| *key == k);

    let mut mismatches: Vec<&'static str> = LOCAL_IMAGES
        .iter()
        .map(|(key, _)| *key)
        .filter(|key| !in_production(key))
        .collect();
    mismatches.extend(
        PRODUCTION_IMAGES
            .iter()
            .map(|(key, _)| *key)
            .filter(|key| !in_local(key)),
    );
    mismatches
}
