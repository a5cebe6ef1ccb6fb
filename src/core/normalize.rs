use crate::domain::model::{ComposeDocument, EnvironmentTable, SERVICES_KEY, VERSION_KEY};
use crate::domain::ports::EnvLoader;
use crate::domain::rules::TransformRules;
use crate::utils::error::{ComposeError, Result};
use serde_yaml::{Mapping, Value};
use std::path::Path;

const ENV_FILE_KEY: &str = "env_file";
const ENVIRONMENT_KEY: &str = "environment";
const BUILD_KEY: &str = "build";
const MEM_LIMIT_KEY: &str = "mem_limit";

/// 單一 compose 文件的正規化：移除排除的服務、內嵌 env 檔案、移除 build、套用記憶體上限
pub struct Normalizer<'a, L: EnvLoader> {
    rules: &'a TransformRules,
    loader: &'a L,
}

impl<'a, L: EnvLoader> Normalizer<'a, L> {
    pub fn new(rules: &'a TransformRules, loader: &'a L) -> Self {
        Self { rules, loader }
    }

    /// `name` 只用於錯誤訊息；`base_path` 是相對 env_file 的基準目錄
    pub fn normalize(
        &self,
        name: &str,
        base_path: &Path,
        document: &mut ComposeDocument,
    ) -> Result<()> {
        let services = match document.root.get_mut(SERVICES_KEY) {
            Some(Value::Mapping(services)) => services,
            Some(_) => {
                return Err(ComposeError::malformed(name, "'services' must be a mapping"))
            }
            None => return Err(ComposeError::malformed(name, "missing 'services' mapping")),
        };

        // 先過濾，被排除的服務不會被後續步驟處理
        let before = services.len();
        services.retain(|key, _| key.as_str().map_or(true, |svc| !self.rules.is_omitted(svc)));
        if services.len() < before {
            tracing::debug!(
                "🧹 {}: dropped {} omitted service(s)",
                name,
                before - services.len()
            );
        }

        for (key, spec) in services.iter_mut() {
            let service_name = key.as_str().ok_or_else(|| {
                ComposeError::malformed(name, format!("service name {:?} is not a string", key))
            })?;

            // `svc:` 沒有內容時視為空設定
            if spec.is_null() {
                *spec = Value::Mapping(Mapping::new());
            }
            let Value::Mapping(service) = spec else {
                return Err(ComposeError::malformed(
                    name,
                    format!("service '{}' must be a mapping", service_name),
                ));
            };

            self.normalize_service(name, base_path, service_name, service)?;
        }

        document.root.insert(
            Value::from(VERSION_KEY),
            Value::from(self.rules.version.as_str()),
        );

        Ok(())
    }

    fn normalize_service(
        &self,
        name: &str,
        base_path: &Path,
        service_name: &str,
        service: &mut Mapping,
    ) -> Result<()> {
        if let Some(env_file) = service.get(ENV_FILE_KEY) {
            let relative_paths = env_file_paths(name, service_name, env_file)?;

            let mut table = EnvironmentTable::new();
            for relative in &relative_paths {
                let path = base_path.join(relative);
                tracing::debug!("📄 {}: inlining {}", service_name, path.display());
                table.extend(self.loader.load(&path)?);
            }

            let environment = table
                .to_assignments()
                .into_iter()
                .map(Value::from)
                .collect();
            service.insert(Value::from(ENVIRONMENT_KEY), Value::Sequence(environment));
            tracing::debug!(
                "🔐 {}: inlined {} environment variable(s)",
                service_name,
                table.len()
            );
        }

        service.shift_remove(ENV_FILE_KEY);
        service.shift_remove(BUILD_KEY);

        if let Some(limit) = self.rules.mem_limit(service_name) {
            service.insert(Value::from(MEM_LIMIT_KEY), Value::from(limit));
            tracing::debug!("📏 {}: mem_limit set to {}", service_name, limit);
        }

        Ok(())
    }
}

/// `env_file` 可以是單一路徑或路徑清單
fn env_file_paths(name: &str, service_name: &str, env_file: &Value) -> Result<Vec<String>> {
    let invalid = || {
        ComposeError::malformed(
            name,
            format!(
                "env_file of service '{}' must be a path or a list of paths",
                service_name
            ),
        )
    };

    match env_file {
        Value::String(path) => Ok(vec![path.clone()]),
        Value::Sequence(entries) => entries
            .iter()
            .map(|entry| entry.as_str().map(str::to_owned).ok_or_else(invalid))
            .collect(),
        _ => Err(invalid()),
    }
}
