use crate::domain::model::GuestRecord;
use regex::Regex;

/// Replaces `{{Column}}` tokens with the record's values. A token naming a
/// column the record does not carry resolves to the empty string, so templates
/// may reference any spreadsheet column without failing the row.
pub fn render_placeholders(template: &str, record: &GuestRecord) -> String {
    let re = Regex::new(r"\{\{([^}]+)\}\}").unwrap();
    re.replace_all(template, |caps: &regex::Captures| {
        let key = caps[1].trim();
        record.field(key).to_string()
    })
    .to_string()
}

/// Builds a letter filename from a `{Column}` pattern, sanitizes it, and
/// appends `.docx` when missing. Unknown column names become empty.
pub fn render_filename(pattern: &str, record: &GuestRecord) -> String {
    let re = Regex::new(r"\{([^{}]+)\}").unwrap();
    let raw = re.replace_all(pattern, |caps: &regex::Captures| {
        record.field(caps[1].trim()).to_string()
    });

    let mut name = sanitize_filename(&raw);
    if !name.to_lowercase().ends_with(".docx") {
        name.push_str(".docx");
    }
    name
}

/// Strips filesystem-hostile characters; an empty result falls back to "letter".
pub fn sanitize_filename(name: &str) -> String {
    let re = Regex::new(r#"[\\/*?:"<>|]+"#).unwrap();
    let cleaned = re.replace_all(name, "_").trim().to_string();
    if cleaned.is_empty() {
        "letter".to_string()
    } else {
        cleaned
    }
}

/// Expands `{timestamp}` in archive names to the current UTC time.
pub fn expand_timestamp(name: &str) -> String {
    name.replace(
        "{timestamp}",
        &chrono::Utc::now().format("%Y%m%d_%H%M%S").to_string(),
    )
}
