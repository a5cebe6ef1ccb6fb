use crate::utils::error::{ComposeError, Result};
use indexmap::IndexMap;
use serde_yaml::{Mapping, Value};
use std::path::PathBuf;

pub const SERVICES_KEY: &str = "services";
pub const VERSION_KEY: &str = "version";

/// 一份 compose 文件的頂層 mapping
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComposeDocument {
    pub root: Mapping,
}

impl ComposeDocument {
    /// 頂層必須是 mapping，空檔案也視為格式錯誤
    pub fn from_value(name: &str, value: Value) -> Result<Self> {
        match value {
            Value::Mapping(root) => Ok(Self { root }),
            Value::Null => Err(ComposeError::malformed(name, "document is empty")),
            _ => Err(ComposeError::malformed(
                name,
                "top level must be a mapping",
            )),
        }
    }

    /// 解析時一併展開 `<<: *anchor` merge key
    pub fn from_yaml_str(name: &str, content: &str) -> Result<Self> {
        let mut value: Value = serde_yaml::from_str(content)?;
        value.apply_merge()?;
        Self::from_value(name, value)
    }

    /// 非 UTF-8 內容直接視為錯誤
    pub fn from_yaml_slice(name: &str, bytes: &[u8]) -> Result<Self> {
        let mut value: Value = serde_yaml::from_slice(bytes)?;
        value.apply_merge()?;
        Self::from_value(name, value)
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&self.root)?)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.root.get(key)
    }

    pub fn version(&self) -> Option<&str> {
        self.get(VERSION_KEY).and_then(Value::as_str)
    }

    pub fn services(&self) -> Option<&Mapping> {
        self.get(SERVICES_KEY).and_then(Value::as_mapping)
    }

    pub fn service(&self, name: &str) -> Option<&Mapping> {
        self.services()
            .and_then(|services| services.get(name))
            .and_then(Value::as_mapping)
    }
}

/// 已解析、尚未正規化的輸入文件
#[derive(Debug, Clone)]
pub struct SourceDocument {
    /// 原始檔案路徑，用於錯誤訊息
    pub name: String,
    /// 解析相對 env_file 路徑時的基準目錄
    pub base_dir: PathBuf,
    pub document: ComposeDocument,
}

/// env 檔案解析後的有序鍵值表。重複的鍵保留第一次出現的位置、採用最後的值。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentTable {
    entries: IndexMap<String, String>,
}

impl EnvironmentTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    /// 後面的表覆蓋前面的值
    pub fn extend(&mut self, other: EnvironmentTable) {
        self.entries.extend(other.entries);
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// 轉成 compose `environment` 區塊使用的 `KEY=VALUE` 字串
    pub fn to_assignments(&self) -> Vec<String> {
        self.iter().map(|(key, value)| format!("{}={}", key, value)).collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvironmentTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (key, value) in iter {
            table.insert(key, value);
        }
        table
    }
}
