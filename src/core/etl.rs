use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("🚀 Starting compose generation");

        // Extract
        let documents = self.pipeline.extract().await?;
        tracing::info!("📥 Loaded {} compose file(s)", documents.len());

        // Transform
        let merged = self.pipeline.transform(documents).await?;
        tracing::info!(
            "🔀 Merged into {} service(s)",
            merged.services().map_or(0, |s| s.len())
        );

        // Load
        let output_path = self.pipeline.load(merged).await?;
        tracing::info!("💾 Output saved to: {}", output_path);

        Ok(output_path)
    }

    /// 執行 extract 與 transform，回傳合併後的 YAML 而不寫檔
    pub async fn preview(&self) -> Result<String> {
        let documents = self.pipeline.extract().await?;
        tracing::info!("📥 Loaded {} compose file(s)", documents.len());

        let merged = self.pipeline.transform(documents).await?;
        merged.to_yaml_string()
    }
}
