use crate::domain::model::{GroupTemplates, GroupValues, GuestRecord, LetterSpec, MergeResult};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn spreadsheet_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn archive_name(&self) -> &str;
    fn group_values(&self) -> &GroupValues;
    fn templates(&self) -> &GroupTemplates;
    fn letter(&self) -> &LetterSpec;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<GuestRecord>>;
    async fn transform(&self, records: Vec<GuestRecord>) -> Result<MergeResult>;
    async fn load(&self, result: MergeResult) -> Result<String>;
}
