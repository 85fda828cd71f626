#[cfg(feature = "lambda")]
use crate::config::MergeSettings;
#[cfg(feature = "lambda")]
use crate::core::{ConfigProvider, Storage};
#[cfg(feature = "lambda")]
use crate::domain::model::{GroupTemplates, GroupValues, LetterSpec};
#[cfg(feature = "lambda")]
use crate::utils::error::{MergeError, Result};
#[cfg(feature = "lambda")]
use aws_sdk_s3::Client as S3Client;
#[cfg(feature = "lambda")]
use std::env;

#[cfg(feature = "lambda")]
#[derive(Debug, Clone)]
pub struct LambdaConfig {
    pub spreadsheet_key: String,
    pub s3_bucket: String,
    pub s3_prefix: String,
    pub s3_region: String,
    pub settings: MergeSettings,
}

#[cfg(feature = "lambda")]
impl LambdaConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            spreadsheet_key: env::var("SPREADSHEET_KEY")
                .unwrap_or_else(|_| "guests.csv".to_string()),
            s3_bucket: env::var("S3_BUCKET").map_err(|_| MergeError::ConfigError {
                message: "S3_BUCKET environment variable is required".to_string(),
            })?,
            s3_prefix: env::var("S3_PREFIX").unwrap_or_else(|_| "letters-output".to_string()),
            s3_region: env::var("S3_REGION").unwrap_or_else(|_| "ap-southeast-2".to_string()),
            settings: MergeSettings::default(),
        })
    }

    /// Applies a TOML settings document fetched from the bucket (SETTINGS_KEY).
    pub fn apply_settings_toml(&mut self, content: &str) -> Result<()> {
        let file = crate::config::toml_config::MergeFileConfig::from_toml_str(content)?;
        let mut config = crate::config::MergeConfig {
            spreadsheet_path: self.spreadsheet_key.clone(),
            output_path: self.s3_prefix.clone(),
            settings: self.settings.clone(),
            monitoring: false,
        };
        file.apply_to(&mut config);
        self.settings = config.settings;
        Ok(())
    }
}

#[cfg(feature = "lambda")]
impl ConfigProvider for LambdaConfig {
    fn spreadsheet_path(&self) -> &str {
        &self.spreadsheet_key
    }

    fn output_path(&self) -> &str {
        &self.s3_prefix
    }

    fn archive_name(&self) -> &str {
        &self.settings.archive_name
    }

    fn group_values(&self) -> &GroupValues {
        &self.settings.group_values
    }

    fn templates(&self) -> &GroupTemplates {
        &self.settings.templates
    }

    fn letter(&self) -> &LetterSpec {
        &self.settings.letter
    }
}

#[cfg(feature = "lambda")]
impl crate::utils::validation::Validate for LambdaConfig {
    fn validate(&self) -> Result<()> {
        use crate::utils::validation::*;

        validate_non_empty_string("spreadsheet_key", &self.spreadsheet_key)?;
        validate_s3_bucket_name("s3_bucket", &self.s3_bucket)?;
        validate_non_empty_string("s3_prefix", &self.s3_prefix)?;
        validate_aws_region("s3_region", &self.s3_region)?;
        self.settings.validate()?;

        tracing::info!("✅ Lambda configuration validation passed");
        Ok(())
    }
}

#[cfg(feature = "lambda")]
fn validate_s3_bucket_name(field_name: &str, bucket_name: &str) -> Result<()> {
    if bucket_name.is_empty() {
        return Err(MergeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: bucket_name.to_string(),
            reason: "S3 bucket name cannot be empty".to_string(),
        });
    }

    if bucket_name.len() < 3 || bucket_name.len() > 63 {
        return Err(MergeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: bucket_name.to_string(),
            reason: "S3 bucket name must be between 3 and 63 characters".to_string(),
        });
    }

    if !bucket_name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.')
    {
        return Err(MergeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: bucket_name.to_string(),
            reason: "S3 bucket name can only contain lowercase letters, numbers, hyphens, and dots"
                .to_string(),
        });
    }

    if bucket_name.starts_with('-') || bucket_name.ends_with('-') {
        return Err(MergeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: bucket_name.to_string(),
            reason: "S3 bucket name cannot start or end with a hyphen".to_string(),
        });
    }

    Ok(())
}

#[cfg(feature = "lambda")]
fn validate_aws_region(field_name: &str, region: &str) -> Result<()> {
    use crate::utils::validation::validate_non_empty_string;

    validate_non_empty_string(field_name, region)?;

    if !region
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(MergeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: region.to_string(),
            reason: "AWS region can only contain lowercase letters, numbers, and hyphens"
                .to_string(),
        });
    }

    Ok(())
}

#[cfg(feature = "lambda")]
#[derive(Debug, Clone)]
pub struct S3Storage {
    client: S3Client,
    bucket: String,
}

#[cfg(feature = "lambda")]
impl S3Storage {
    pub fn new(client: S3Client, bucket: String) -> Self {
        Self { client, bucket }
    }
}

#[cfg(feature = "lambda")]
impl Storage for S3Storage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let resp = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(path)
            .send()
            .await
            .map_err(|e| MergeError::S3Error {
                message: format!("Failed to read '{}' from S3: {}", path, e),
            })?;

        let data = resp.body.collect().await.map_err(|e| MergeError::S3Error {
            message: format!("Failed to collect S3 data: {}", e),
        })?;

        Ok(data.into_bytes().to_vec())
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(path)
            .body(data.to_vec().into())
            .send()
            .await
            .map_err(|e| MergeError::S3Error {
                message: format!("Failed to write '{}' to S3: {}", path, e),
            })?;

        Ok(())
    }
}
