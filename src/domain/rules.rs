use std::collections::{BTreeMap, BTreeSet};

/// 不應出現在產生結果中的服務
pub const OMITTED_SERVICES: [&str; 4] = [
    "kafka-rest-proxy",
    "kafka-topics-ui",
    "schema-registry-ui",
    "kibana",
];

/// 依服務名稱強制套用的記憶體上限
pub const MEM_LIMITS: [(&str, &str); 4] = [
    ("datahub-gms", "768m"),
    ("datahub-mae-consumer", "256m"),
    ("datahub-mce-consumer", "256m"),
    ("elasticsearch", "1536m"),
];

pub const OUTPUT_VERSION: &str = "2";

/// 正規化時使用的固定規則，由呼叫端注入
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformRules {
    pub omitted_services: BTreeSet<String>,
    pub mem_limits: BTreeMap<String, String>,
    pub version: String,
}

impl TransformRules {
    pub fn is_omitted(&self, service: &str) -> bool {
        self.omitted_services.contains(service)
    }

    pub fn mem_limit(&self, service: &str) -> Option<&str> {
        self.mem_limits.get(service).map(String::as_str)
    }
}

impl Default for TransformRules {
    fn default() -> Self {
        Self {
            omitted_services: OMITTED_SERVICES.iter().map(|s| s.to_string()).collect(),
            mem_limits: MEM_LIMITS
                .iter()
                .map(|(name, limit)| (name.to_string(), limit.to_string()))
                .collect(),
            version: OUTPUT_VERSION.to_string(),
        }
    }
}
