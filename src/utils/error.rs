use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[error("Not found: {what}")]
    NotFound { what: String },
}

impl ContentError {
    pub fn missing_field(field: &str) -> Self {
        ContentError::ValidationError {
            message: format!("Missing required field: {}", field),
        }
    }

    /// 給使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            ContentError::IoError(_) => "Could not read or write a data file".to_string(),
            ContentError::SerializationError(_) => "A data file contains invalid JSON".to_string(),
            ContentError::ConfigError { .. }
            | ContentError::ConfigValidationError { .. }
            | ContentError::InvalidConfigValueError { .. }
            | ContentError::MissingConfigError { .. } => {
                format!("Configuration problem: {}", self)
            }
            ContentError::ValidationError { message } => message.clone(),
            ContentError::NotFound { what } => format!("{} does not exist", what),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ContentError::IoError(_) => "Check that the data directory exists and is writable",
            ContentError::SerializationError(_) => {
                "Fix or remove the corrupted JSON file; it will be recreated"
            }
            ContentError::ConfigError { .. } | ContentError::ConfigValidationError { .. } => {
                "Check the TOML syntax of the configuration file"
            }
            ContentError::InvalidConfigValueError { .. } => {
                "Correct the value in the configuration file or environment"
            }
            ContentError::MissingConfigError { .. } => "Add the missing field to the configuration",
            ContentError::ValidationError { .. } => "Provide all required fields and retry",
            ContentError::NotFound { .. } => "List the available entries and pick an existing one",
        }
    }
}

pub type Result<T> = std::result::Result<T, ContentError>;
