use crate::domain::model::EnvironmentTable;
use crate::domain::ports::EnvLoader;
use crate::utils::error::{ComposeError, Result};
use std::path::Path;

/// 使用 dotenvy 解析 `.env` 格式檔案，不會修改行程的環境變數
#[derive(Debug, Clone, Copy, Default)]
pub struct DotenvLoader;

impl EnvLoader for DotenvLoader {
    fn load(&self, path: &Path) -> Result<EnvironmentTable> {
        let to_error = |source: dotenvy::Error| ComposeError::EnvFileLoadError {
            path: path.to_path_buf(),
            source,
        };

        let mut table = EnvironmentTable::new();
        for item in dotenvy::from_path_iter(path).map_err(to_error)? {
            let (key, value) = item.map_err(to_error)?;
            table.insert(key, value);
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_preserves_file_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("docker.env");
        std::fs::write(
            &path,
            "# datahub-gms\nEBEAN_DATASOURCE_USERNAME=datahub\nEBEAN_DATASOURCE_HOST=mysql:3306\n\nKAFKA_BOOTSTRAP_SERVER=broker:29092\n",
        )
        .unwrap();

        let table = DotenvLoader.load(&path).unwrap();

        assert_eq!(
            table.to_assignments(),
            vec![
                "EBEAN_DATASOURCE_USERNAME=datahub",
                "EBEAN_DATASOURCE_HOST=mysql:3306",
                "KAFKA_BOOTSTRAP_SERVER=broker:29092",
            ]
        );
    }

    #[test]
    fn test_load_handles_quotes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("quoted.env");
        std::fs::write(&path, "GREETING=\"hello world\"\nSINGLE='a=b'\n").unwrap();

        let table = DotenvLoader.load(&path).unwrap();

        assert_eq!(table.get("GREETING"), Some("hello world"));
        assert_eq!(table.get("SINGLE"), Some("a=b"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.env");

        let err = DotenvLoader.load(&path).unwrap_err();

        assert!(matches!(err, ComposeError::EnvFileLoadError { .. }));
    }

    #[test]
    fn test_bare_key_line_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bare.env");
        std::fs::write(&path, "HOST=db\nDEBUG\n").unwrap();

        let err = DotenvLoader.load(&path).unwrap_err();

        assert!(matches!(err, ComposeError::EnvFileLoadError { .. }));
    }
}
