use crate::core::template;
use crate::core::{ConfigProvider, GuestRecord, MergeResult, Pipeline, Storage};
use crate::domain::model::{GeneratedLetter, SkippedRow, EXPECTED_COLUMNS};
use crate::utils::error::{MergeError, Result};
use std::collections::HashMap;
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

pub struct MergePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> MergePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for MergePipeline<S, C> {
    async fn extract(&self) -> Result<Vec<GuestRecord>> {
        // 從存儲讀取賓客名單
        tracing::debug!("Reading guest list from: {}", self.config.spreadsheet_path());
        let data = self.storage.read_file(self.config.spreadsheet_path()).await?;

        let mut reader = csv::Reader::from_reader(data.as_slice());
        let headers = reader.headers()?.clone();

        // 檢查四個必要欄位
        for expected in EXPECTED_COLUMNS {
            if !headers.iter().any(|h| h == expected) {
                return Err(MergeError::MissingColumnError {
                    column: expected.to_string(),
                });
            }
        }

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            let mut fields = HashMap::new();
            for (header, value) in headers.iter().zip(row.iter()) {
                fields.insert(header.to_string(), value.to_string());
            }
            records.push(GuestRecord { fields });
        }

        tracing::debug!("Guest list loaded: {} rows", records.len());
        Ok(records)
    }

    async fn transform(&self, records: Vec<GuestRecord>) -> Result<MergeResult> {
        let mut letters = Vec::new();
        let mut skipped = Vec::new();

        for record in records {
            let group_value = record.group_value().to_string();

            // 未知組別：跳過並警告，不中斷整批
            let group = match self.config.group_values().resolve(&group_value) {
                Some(group) => group,
                None => {
                    tracing::warn!(
                        "Skipping '{}' - unknown group value: {}",
                        record.full_name(),
                        group_value
                    );
                    skipped.push(SkippedRow {
                        full_name: record.full_name().to_string(),
                        group_value,
                    });
                    continue;
                }
            };

            let body =
                template::render_placeholders(self.config.templates().body_for(group), &record);
            let content = crate::core::docx::build_letter(&record, self.config.letter(), &body)?;
            let file_name =
                template::render_filename(&self.config.letter().filename_pattern, &record);

            tracing::debug!("Generated letter '{}' ({:?})", file_name, group);
            letters.push(GeneratedLetter {
                file_name,
                content,
                group,
            });
        }

        Ok(MergeResult { letters, skipped })
    }

    async fn load(&self, result: MergeResult) -> Result<String> {
        let archive_name = template::expand_timestamp(self.config.archive_name());
        let output_path = format!("{}/{}", self.config.output_path(), archive_name);

        tracing::debug!(
            "Creating ZIP archive with {} letters",
            result.letters.len()
        );

        // 建立ZIP檔案
        let zip_data = {
            let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

            for letter in &result.letters {
                zip.start_file::<_, ()>(&letter.file_name, FileOptions::default())?;
                zip.write_all(&letter.content)?;
            }

            // 被跳過的列記錄在摘要檔
            if !result.skipped.is_empty() {
                zip.start_file::<_, ()>("skipped.json", FileOptions::default())?;
                let json_data = serde_json::to_string_pretty(&result.skipped)?;
                zip.write_all(json_data.as_bytes())?;
            }

            let cursor = zip.finish()?;
            cursor.into_inner()
        };

        tracing::debug!("Writing ZIP archive ({} bytes) to storage", zip_data.len());
        self.storage.write_file(&output_path, &zip_data).await?;

        tracing::info!(
            "Created {} letters, skipped {} rows",
            result.letters.len(),
            result.skipped.len()
        );
        Ok(output_path)
    }
}
