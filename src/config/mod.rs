pub mod cli;
#[cfg(feature = "lambda")]
pub mod lambda;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::domain::model::{GroupTemplates, GroupValues, LetterSpec};
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_file_extension, validate_non_empty_string, validate_path, validate_range, Validate,
};
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
use clap::Parser;

/// Merge settings shared by every surface: how rows map to groups, what each
/// group's letter says, and how letters are styled and named.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeSettings {
    pub archive_name: String,
    pub group_values: GroupValues,
    pub templates: GroupTemplates,
    pub letter: LetterSpec,
}

impl Default for MergeSettings {
    fn default() -> Self {
        Self {
            archive_name: "letters_output.zip".to_string(),
            group_values: GroupValues::default(),
            templates: GroupTemplates::default(),
            letter: LetterSpec::default(),
        }
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "guest-letters")]
#[command(about = "Generates per-guest letters from a spreadsheet and per-group templates")]
pub struct CliConfig {
    /// Path to the guest list CSV
    #[arg(long)]
    pub spreadsheet: Option<String>,

    /// Directory the letters archive is written to
    #[arg(long)]
    pub output_path: Option<String>,

    /// Path to a TOML settings file (templates, groups, letter style)
    #[arg(long)]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Enable system monitoring")]
    pub monitor: bool,
}

/// Fully resolved configuration: CLI flags take precedence over the settings
/// file, which takes precedence over the built-in defaults.
#[derive(Debug, Clone)]
pub struct MergeConfig {
    pub spreadsheet_path: String,
    pub output_path: String,
    pub settings: MergeSettings,
    pub monitoring: bool,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            spreadsheet_path: "guests.csv".to_string(),
            output_path: "./output".to_string(),
            settings: MergeSettings::default(),
            monitoring: false,
        }
    }
}

#[cfg(feature = "cli")]
impl MergeConfig {
    pub fn resolve(cli: &CliConfig) -> Result<Self> {
        let mut config = MergeConfig::default();

        if let Some(path) = &cli.config {
            let file = toml_config::MergeFileConfig::from_file(path)?;
            file.apply_to(&mut config);
        }

        if let Some(spreadsheet) = &cli.spreadsheet {
            config.spreadsheet_path = spreadsheet.clone();
        }
        if let Some(output_path) = &cli.output_path {
            config.output_path = output_path.clone();
        }
        if cli.monitor {
            config.monitoring = true;
        }

        Ok(config)
    }
}

impl ConfigProvider for MergeConfig {
    fn spreadsheet_path(&self) -> &str {
        &self.spreadsheet_path
    }

    fn output_path(&self) -> &str {
        &self.output_path
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

impl Validate for MergeConfig {
    fn validate(&self) -> Result<()> {
        validate_path("spreadsheet", &self.spreadsheet_path)?;
        validate_file_extension("spreadsheet", &self.spreadsheet_path, &["csv"])?;
        validate_path("output_path", &self.output_path)?;
        self.settings.validate()
    }
}

impl Validate for MergeSettings {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("archive_name", &self.archive_name)?;

        validate_non_empty_string("groups.blue", &self.group_values.blue)?;
        validate_non_empty_string("groups.green", &self.group_values.green)?;
        validate_non_empty_string("groups.yellow", &self.group_values.yellow)?;

        validate_non_empty_string("templates.blue", &self.templates.blue)?;
        validate_non_empty_string("templates.green", &self.templates.green)?;
        validate_non_empty_string("templates.yellow", &self.templates.yellow)?;

        validate_non_empty_string("letter.filename_pattern", &self.letter.filename_pattern)?;
        validate_non_empty_string("letter.style.font_name", &self.letter.style.font_name)?;
        validate_range(
            "letter.style.font_size_pt",
            self.letter.style.font_size_pt,
            8,
            24,
        )?;

        let margins = &self.letter.style.margins;
        validate_range("letter.style.margins.left", margins.left, 0.1, 2.0)?;
        validate_range("letter.style.margins.right", margins.right, 0.1, 2.0)?;
        validate_range("letter.style.margins.top", margins.top, 0.1, 2.0)?;
        validate_range("letter.style.margins.bottom", margins.bottom, 0.1, 2.0)?;

        Ok(())
    }
}
