use crate::config::MergeConfig;
use crate::utils::error::{MergeError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// TOML 設定檔。每個區段都是選填的，缺漏的欄位使用內建預設值。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeFileConfig {
    pub source: Option<SourceSection>,
    pub load: Option<LoadSection>,
    pub groups: Option<GroupsSection>,
    pub templates: Option<TemplatesSection>,
    pub letter: Option<LetterSection>,
    pub monitoring: Option<MonitoringSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSection {
    pub spreadsheet: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadSection {
    pub output_path: Option<String>,
    pub archive_name: Option<String>,
}

/// 每個組別在試算表 Group 欄中的值
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupsSection {
    pub blue: Option<String>,
    pub green: Option<String>,
    pub yellow: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplatesSection {
    pub blue: Option<String>,
    pub green: Option<String>,
    pub yellow: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LetterSection {
    pub salutation: Option<String>,
    pub header_fields: Option<Vec<String>>,
    pub filename_pattern: Option<String>,
    pub style: Option<StyleSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleSection {
    pub font_name: Option<String>,
    pub font_size_pt: Option<u32>,
    pub margins: Option<MarginsSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarginsSection {
    pub left: Option<f32>,
    pub right: Option<f32>,
    pub top: Option<f32>,
    pub bottom: Option<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringSection {
    pub enabled: bool,
}

impl MergeFileConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(MergeError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| MergeError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SALUTATION})
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    /// 把檔案中的設定套用到現有配置上，缺漏欄位保持不變
    pub fn apply_to(&self, config: &mut MergeConfig) {
        if let Some(source) = &self.source {
            if let Some(spreadsheet) = &source.spreadsheet {
                config.spreadsheet_path = spreadsheet.clone();
            }
        }

        if let Some(load) = &self.load {
            if let Some(output_path) = &load.output_path {
                config.output_path = output_path.clone();
            }
            if let Some(archive_name) = &load.archive_name {
                config.settings.archive_name = archive_name.clone();
            }
        }

        if let Some(groups) = &self.groups {
            let values = &mut config.settings.group_values;
            if let Some(blue) = &groups.blue {
                values.blue = blue.clone();
            }
            if let Some(green) = &groups.green {
                values.green = green.clone();
            }
            if let Some(yellow) = &groups.yellow {
                values.yellow = yellow.clone();
            }
        }

        if let Some(templates) = &self.templates {
            let bodies = &mut config.settings.templates;
            if let Some(blue) = &templates.blue {
                bodies.blue = blue.clone();
            }
            if let Some(green) = &templates.green {
                bodies.green = green.clone();
            }
            if let Some(yellow) = &templates.yellow {
                bodies.yellow = yellow.clone();
            }
        }

        if let Some(letter) = &self.letter {
            let spec = &mut config.settings.letter;
            if let Some(salutation) = &letter.salutation {
                spec.salutation = salutation.clone();
            }
            if let Some(header_fields) = &letter.header_fields {
                spec.header_fields = header_fields.clone();
            }
            if let Some(filename_pattern) = &letter.filename_pattern {
                spec.filename_pattern = filename_pattern.clone();
            }
            if let Some(style) = &letter.style {
                if let Some(font_name) = &style.font_name {
                    spec.style.font_name = font_name.clone();
                }
                if let Some(font_size_pt) = style.font_size_pt {
                    spec.style.font_size_pt = font_size_pt;
                }
                if let Some(margins) = &style.margins {
                    let m = &mut spec.style.margins;
                    if let Some(left) = margins.left {
                        m.left = left;
                    }
                    if let Some(right) = margins.right {
                        m.right = right;
                    }
                    if let Some(top) = margins.top {
                        m.top = top;
                    }
                    if let Some(bottom) = margins.bottom {
                        m.bottom = bottom;
                    }
                }
            }
        }

        if let Some(monitoring) = &self.monitoring {
            config.monitoring = monitoring.enabled;
        }
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const FULL_CONFIG: &str = r#"
[source]
spreadsheet = "guests.csv"

[load]
output_path = "./letters"
archive_name = "letters_{timestamp}.zip"

[groups]
blue = "כחול"
green = "ירוק"
yellow = "צהוב"

[templates]
blue = "Hello {{FullName}}, blue letter."
green = "Hello {{FullName}}, green letter."
yellow = "Hello {{FullName}}, yellow letter."

[letter]
salutation = "To,"
header_fields = ["FullName", "Address", "Institution"]
filename_pattern = "{FullName} - {Group}"

[letter.style]
font_name = "Rubik"
font_size_pt = 14

[letter.style.margins]
left = 1.0
right = 1.0
top = 0.5
bottom = 1.0

[monitoring]
enabled = true
"#;

    #[test]
    fn test_parse_full_config() {
        let file = MergeFileConfig::from_toml_str(FULL_CONFIG).unwrap();
        let mut config = MergeConfig::default();
        file.apply_to(&mut config);

        assert_eq!(config.output_path, "./letters");
        assert_eq!(config.settings.archive_name, "letters_{timestamp}.zip");
        assert_eq!(config.settings.group_values.blue, "כחול");
        assert!(config.settings.templates.green.contains("green letter"));
        assert_eq!(config.settings.letter.style.font_name, "Rubik");
        assert_eq!(config.settings.letter.style.font_size_pt, 14);
        assert_eq!(config.settings.letter.style.margins.top, 0.5);
        assert!(config.monitoring);
        assert!(file.monitoring_enabled());
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let file = MergeFileConfig::from_toml_str(
            r#"
[letter]
salutation = "Dear guest,"
"#,
        )
        .unwrap();
        let mut config = MergeConfig::default();
        file.apply_to(&mut config);

        assert_eq!(config.settings.letter.salutation, "Dear guest,");
        // untouched defaults survive
        assert_eq!(config.settings.letter.filename_pattern, "{FullName} - {Group}");
        assert_eq!(config.settings.archive_name, "letters_output.zip");
        assert_eq!(config.settings.group_values.blue, "Blue");
        assert!(!file.monitoring_enabled());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("GUEST_LETTERS_TEST_SALUTATION", "Shalom,");
        let file = MergeFileConfig::from_toml_str(
            r#"
[letter]
salutation = "${GUEST_LETTERS_TEST_SALUTATION}"
"#,
        )
        .unwrap();
        let mut config = MergeConfig::default();
        file.apply_to(&mut config);

        assert_eq!(config.settings.letter.salutation, "Shalom,");
    }

    #[test]
    fn test_unset_env_var_left_verbatim() {
        let file = MergeFileConfig::from_toml_str(
            r#"
[letter]
salutation = "${GUEST_LETTERS_TEST_NOT_SET}"
"#,
        )
        .unwrap();
        let mut config = MergeConfig::default();
        file.apply_to(&mut config);

        assert_eq!(
            config.settings.letter.salutation,
            "${GUEST_LETTERS_TEST_NOT_SET}"
        );
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = MergeFileConfig::from_toml_str("not [valid toml").unwrap_err();
        match err {
            MergeError::ConfigValidationError { field, .. } => {
                assert_eq!(field, "toml_parsing")
            }
            other => panic!("expected ConfigValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(FULL_CONFIG.as_bytes()).unwrap();

        let parsed = MergeFileConfig::from_file(file.path()).unwrap();
        assert!(parsed.monitoring_enabled());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = MergeFileConfig::from_file("/no/such/settings.toml").unwrap_err();
        assert!(matches!(err, MergeError::IoError(_)));
    }
}
