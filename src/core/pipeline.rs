use crate::core::merge::merge_documents;
use crate::core::normalize::Normalizer;
use crate::core::{ComposeDocument, ConfigProvider, EnvLoader, Pipeline, SourceDocument, Storage};
use crate::domain::rules::TransformRules;
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

/// 讀入多份 compose 檔案、正規化、合併後寫出單一檔案
pub struct ComposePipeline<S: Storage, C: ConfigProvider, L: EnvLoader> {
    storage: S,
    config: C,
    rules: TransformRules,
    loader: L,
}

impl<S: Storage, C: ConfigProvider, L: EnvLoader> ComposePipeline<S, C, L> {
    pub fn new(storage: S, config: C, loader: L) -> Self {
        Self {
            storage,
            config,
            rules: TransformRules::default(),
            loader,
        }
    }

    pub fn with_rules(mut self, rules: TransformRules) -> Self {
        self.rules = rules;
        self
    }
}

/// 檔案所在目錄；沒有上層目錄時使用目前目錄
fn base_dir_of(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider, L: EnvLoader> Pipeline for ComposePipeline<S, C, L> {
    async fn extract(&self) -> Result<Vec<SourceDocument>> {
        let mut documents = Vec::with_capacity(self.config.compose_files().len());

        for file in self.config.compose_files() {
            tracing::debug!("📥 Reading compose file: {}", file);
            let bytes = self.storage.read_file(file).await?;
            let document = ComposeDocument::from_yaml_slice(file, &bytes)?;

            documents.push(SourceDocument {
                name: file.clone(),
                base_dir: base_dir_of(&self.storage.locate(file)),
                document,
            });
        }

        Ok(documents)
    }

    async fn transform(&self, documents: Vec<SourceDocument>) -> Result<ComposeDocument> {
        let normalizer = Normalizer::new(&self.rules, &self.loader);
        let mut normalized = Vec::with_capacity(documents.len());

        for mut source in documents {
            normalizer.normalize(&source.name, &source.base_dir, &mut source.document)?;
            tracing::debug!(
                "🔧 Normalized {} ({} service(s))",
                source.name,
                source.document.services().map_or(0, |s| s.len())
            );
            normalized.push(source.document);
        }

        Ok(merge_documents(normalized))
    }

    async fn load(&self, merged: ComposeDocument) -> Result<String> {
        let output_file = self.config.output_file();
        let yaml = merged.to_yaml_string()?;

        self.storage.write_file(output_file, yaml.as_bytes()).await?;

        Ok(output_file.to_string())
    }
}
