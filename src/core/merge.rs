//! compose 文件的深層合併
//!
//! - Mapping: 依鍵遞迴合併
//! - Sequence: 整個取代（後者為準）
//! - Scalar 或型別不同: 後者為準

use crate::domain::model::ComposeDocument;
use serde_yaml::{Mapping, Value};

/// 把 `source` 合併進 `target`
pub fn merge_mappings(target: &mut Mapping, source: Mapping) {
    for (key, source_value) in source {
        match source_value {
            Value::Mapping(source_map) => {
                if let Some(Value::Mapping(target_map)) = target.get_mut(&key) {
                    merge_mappings(target_map, source_map);
                    continue;
                }
                target.insert(key, Value::Mapping(source_map));
            }
            other => {
                target.insert(key, other);
            }
        }
    }
}

pub fn merge(target: &mut ComposeDocument, source: ComposeDocument) {
    merge_mappings(&mut target.root, source.root);
}

/// 依輸入順序左摺疊，第一份文件為基底
pub fn merge_documents<I>(documents: I) -> ComposeDocument
where
    I: IntoIterator<Item = ComposeDocument>,
{
    documents
        .into_iter()
        .fold(ComposeDocument::default(), |mut merged, document| {
            merge(&mut merged, document);
            merged
        })
}
