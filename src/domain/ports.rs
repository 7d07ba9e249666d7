use crate::domain::model::{InputRow, OutputRecord};
use crate::utils::error::{Result, RowResult};
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    /// Replaces any existing content at `path`.
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn location(&self, path: &str) -> String;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn viewer_prefix(&self) -> &str;
    fn api_prefix(&self) -> &str;
    fn has_headers(&self) -> bool;
    fn delimiter(&self) -> u8;
    fn request_timeout(&self) -> Option<Duration>;
    fn report_path(&self) -> Option<&str>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    /// Reads every row of the source table, in table order.
    async fn extract(&self) -> Result<Vec<InputRow>>;
    async fn transform(&self, row: &InputRow) -> RowResult<OutputRecord>;
    /// Persists one record and returns where it was written.
    async fn load(&self, row: &InputRow, record: &OutputRecord) -> RowResult<String>;
}
