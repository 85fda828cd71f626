use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

pub const COLUMN_FULL_NAME: &str = "FullName";
pub const COLUMN_ADDRESS: &str = "Address";
pub const COLUMN_INSTITUTION: &str = "Institution";
pub const COLUMN_GROUP: &str = "Group";

/// Columns every guest list must carry. Extra columns are allowed and usable as placeholders.
pub const EXPECTED_COLUMNS: [&str; 4] = [
    COLUMN_FULL_NAME,
    COLUMN_ADDRESS,
    COLUMN_INSTITUTION,
    COLUMN_GROUP,
];

/// The three letter groups. Each group has exactly one template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Group {
    Blue,
    Green,
    Yellow,
}

impl Group {
    pub fn name(&self) -> &'static str {
        match self {
            Group::Blue => "Blue",
            Group::Green => "Green",
            Group::Yellow => "Yellow",
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One guest list row. All spreadsheet columns are kept so any `{{Column}}`
/// placeholder can resolve, not just the four expected ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuestRecord {
    pub fields: HashMap<String, String>,
}

impl GuestRecord {
    /// Field value by column name; missing columns read as empty.
    pub fn field(&self, name: &str) -> &str {
        self.fields.get(name).map(|v| v.as_str()).unwrap_or("")
    }

    pub fn full_name(&self) -> &str {
        self.field(COLUMN_FULL_NAME)
    }

    pub fn group_value(&self) -> &str {
        self.field(COLUMN_GROUP)
    }
}

/// Spreadsheet value that selects each group. The values are configurable
/// (the Group column may carry localized labels); resolution falls back to
/// the English color names, case-insensitively.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupValues {
    pub blue: String,
    pub green: String,
    pub yellow: String,
}

impl Default for GroupValues {
    fn default() -> Self {
        Self {
            blue: "Blue".to_string(),
            green: "Green".to_string(),
            yellow: "Yellow".to_string(),
        }
    }
}

impl GroupValues {
    pub fn resolve(&self, value: &str) -> Option<Group> {
        let value = value.trim();
        if value == self.blue {
            return Some(Group::Blue);
        }
        if value == self.green {
            return Some(Group::Green);
        }
        if value == self.yellow {
            return Some(Group::Yellow);
        }
        match value.to_ascii_lowercase().as_str() {
            "blue" => Some(Group::Blue),
            "green" => Some(Group::Green),
            "yellow" => Some(Group::Yellow),
            _ => None,
        }
    }
}

/// Letter body text per group, with `{{Column}}` placeholders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupTemplates {
    pub blue: String,
    pub green: String,
    pub yellow: String,
}

impl Default for GroupTemplates {
    fn default() -> Self {
        Self {
            blue: "Hello {{FullName}},\n\nWe are delighted to invite you to our upcoming event at {{Institution}}.\nWe'd be honored to see you there.\n\nWarm regards,\nEvent Team".to_string(),
            green: "Hello {{FullName}},\n\nYou are part of Group Green. The event will take place at: {{Address}}.\nPlease confirm your attendance.\n\nBest,\nEvent Team".to_string(),
            yellow: "Hello {{FullName}},\n\nWe look forward to hosting you. Our representatives from {{Institution}} will be available for questions.\nSee you soon!\n\nBest regards,\nEvent Team".to_string(),
        }
    }
}

impl GroupTemplates {
    pub fn body_for(&self, group: Group) -> &str {
        match group {
            Group::Blue => &self.blue,
            Group::Green => &self.green,
            Group::Yellow => &self.yellow,
        }
    }
}

/// Page margins in inches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Margins {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            left: 1.0,
            right: 1.0,
            top: 0.35,
            bottom: 1.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LetterStyle {
    pub font_name: String,
    pub font_size_pt: u32,
    pub margins: Margins,
}

impl Default for LetterStyle {
    fn default() -> Self {
        Self {
            font_name: "Arial".to_string(),
            font_size_pt: 12,
            margins: Margins::default(),
        }
    }
}

/// How each letter is composed: a bold salutation, a header block of selected
/// field values in order, then the filled template body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LetterSpec {
    pub salutation: String,
    pub header_fields: Vec<String>,
    pub filename_pattern: String,
    pub style: LetterStyle,
}

impl Default for LetterSpec {
    fn default() -> Self {
        Self {
            salutation: "To,".to_string(),
            header_fields: vec![
                COLUMN_FULL_NAME.to_string(),
                COLUMN_ADDRESS.to_string(),
                COLUMN_INSTITUTION.to_string(),
            ],
            filename_pattern: "{FullName} - {Group}".to_string(),
            style: LetterStyle::default(),
        }
    }
}

/// One generated DOCX letter, held in memory until it lands in the archive.
#[derive(Debug, Clone)]
pub struct GeneratedLetter {
    pub file_name: String,
    pub content: Vec<u8>,
    pub group: Group,
}

/// Row that produced no letter because its group value matched no group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedRow {
    pub full_name: String,
    pub group_value: String,
}

#[derive(Debug, Clone)]
pub struct MergeResult {
    pub letters: Vec<GeneratedLetter>,
    pub skipped: Vec<SkippedRow>,
}
