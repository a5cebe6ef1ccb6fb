use crate::domain::model::{ComposeDocument, EnvironmentTable, SourceDocument};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

pub trait Storage: Send + Sync {
    /// 儲存位置上的實際路徑，用來決定 env_file 的基準目錄
    fn locate(&self, path: &str) -> PathBuf;
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn compose_files(&self) -> &[String];
    fn output_file(&self) -> &str;
}

/// 讀取 env 檔案的外部能力，檔案不存在或無法解析時回傳錯誤
pub trait EnvLoader: Send + Sync {
    fn load(&self, path: &Path) -> Result<EnvironmentTable>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<SourceDocument>>;
    async fn transform(&self, documents: Vec<SourceDocument>) -> Result<ComposeDocument>;
    async fn load(&self, merged: ComposeDocument) -> Result<String>;
}
