use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ComposeError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to load env file {}: {source}", path.display())]
    EnvFileLoadError {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },

    #[error("Malformed compose document {document}: {message}")]
    MalformedDocumentError { document: String, message: String },

    #[error("Profile parsing error in {field}: {message}")]
    ProfileError { field: String, message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

pub type Result<T> = std::result::Result<T, ComposeError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Processing,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    High,
    Critical,
}

impl ComposeError {
    pub fn malformed(document: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedDocumentError {
            document: document.into(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::EnvFileLoadError { .. }
            | Self::ProfileError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::MalformedDocumentError { .. } => ErrorCategory::Input,
            Self::YamlError(_) => ErrorCategory::Processing,
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::System => ErrorSeverity::Critical,
            // 所有輸入與設定錯誤都會中止本次產生，沒有可重試的情況
            _ => ErrorSeverity::High,
        }
    }

    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::IoError(e) => format!("File system error: {}", e),
            Self::YamlError(e) => format!("Could not read or write compose YAML: {}", e),
            Self::EnvFileLoadError { path, .. } => {
                format!("Env file '{}' could not be loaded", path.display())
            }
            Self::MalformedDocumentError { document, message } => {
                format!("Compose file '{}' is malformed: {}", document, message)
            }
            Self::ProfileError { message, .. } => format!("Rules profile is invalid: {}", message),
            Self::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid {}: {}", field, reason)
            }
            Self::MissingConfigError { field } => format!("Missing {}", field),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::IoError(_) => "Check that the paths exist and that you have permission to read and write them",
            Self::YamlError(_) => "Check the compose files for YAML syntax errors",
            Self::EnvFileLoadError { .. } => {
                "Make sure every env_file path is correct relative to the compose file that declares it"
            }
            Self::MalformedDocumentError { .. } => {
                "Every compose file needs a top-level 'services' mapping of service name to settings"
            }
            Self::ProfileError { .. } => "Check the profile for TOML syntax errors",
            Self::InvalidConfigValueError { .. } | Self::MissingConfigError { .. } => {
                "Run with --help to see the expected arguments"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_file_error_is_configuration_error() {
        let err = ComposeError::EnvFileLoadError {
            path: PathBuf::from("docker/gms.env"),
            source: dotenvy::Error::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "missing",
            )),
        };

        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.user_friendly_message().contains("docker/gms.env"));
    }

    #[test]
    fn test_io_error_is_critical() {
        let err = ComposeError::from(std::io::Error::other("disk full"));
        assert_eq!(err.category(), ErrorCategory::System);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }

    #[test]
    fn test_malformed_constructor() {
        let err = ComposeError::malformed("base.yml", "missing 'services' mapping");
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(
            err.to_string(),
            "Malformed compose document base.yml: missing 'services' mapping"
        );
    }
}
