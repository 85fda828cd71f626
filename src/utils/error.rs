use thiserror::Error;

#[derive(Error, Debug)]
pub enum MergeError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Spreadsheet is missing required column: {column}")]
    MissingColumnError { column: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },

    #[cfg(feature = "lambda")]
    #[error("S3 operation failed: {message}")]
    S3Error { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Config,
    Data,
    Io,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl MergeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            MergeError::ConfigError { .. }
            | MergeError::ConfigValidationError { .. }
            | MergeError::InvalidConfigValueError { .. }
            | MergeError::MissingConfigError { .. } => ErrorCategory::Config,
            MergeError::CsvError(_)
            | MergeError::MissingColumnError { .. }
            | MergeError::ProcessingError { .. }
            | MergeError::ValidationError { .. }
            | MergeError::SerializationError(_) => ErrorCategory::Data,
            MergeError::IoError(_) | MergeError::ZipError(_) => ErrorCategory::Io,
            #[cfg(feature = "lambda")]
            MergeError::S3Error { .. } => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            MergeError::ConfigError { .. }
            | MergeError::ConfigValidationError { .. }
            | MergeError::InvalidConfigValueError { .. }
            | MergeError::MissingConfigError { .. } => ErrorSeverity::High,
            MergeError::MissingColumnError { .. } | MergeError::ValidationError { .. } => {
                ErrorSeverity::High
            }
            MergeError::CsvError(_)
            | MergeError::ProcessingError { .. }
            | MergeError::SerializationError(_) => ErrorSeverity::Medium,
            MergeError::IoError(_) | MergeError::ZipError(_) => ErrorSeverity::Critical,
            #[cfg(feature = "lambda")]
            MergeError::S3Error { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            MergeError::ConfigError { .. }
            | MergeError::ConfigValidationError { .. }
            | MergeError::InvalidConfigValueError { .. } => {
                "Check the settings file and command line flags for the reported field".to_string()
            }
            MergeError::MissingConfigError { field } => {
                format!("Provide a value for '{}' via flag, settings file, or environment", field)
            }
            MergeError::MissingColumnError { column } => format!(
                "Add a '{}' column to the guest list, or fix the header spelling",
                column
            ),
            MergeError::CsvError(_) => {
                "Verify the guest list is a well-formed CSV with a header row".to_string()
            }
            MergeError::ProcessingError { .. } | MergeError::ValidationError { .. } => {
                "Inspect the offending row in the guest list and correct its values".to_string()
            }
            MergeError::IoError(_) => {
                "Check that the input file exists and the output directory is writable".to_string()
            }
            MergeError::ZipError(_) => {
                "Re-run the merge; if it persists, check free disk space".to_string()
            }
            MergeError::SerializationError(_) => {
                "Re-run the merge; the run summary could not be serialized".to_string()
            }
            #[cfg(feature = "lambda")]
            MergeError::S3Error { .. } => {
                "Check the bucket name, key, and the function's IAM permissions".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            MergeError::MissingColumnError { column } => {
                format!("The guest list has no '{}' column", column)
            }
            MergeError::CsvError(e) => format!("The guest list could not be read: {}", e),
            MergeError::IoError(e) => format!("File access failed: {}", e),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MergeError>;
