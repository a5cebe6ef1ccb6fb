use crate::domain::rules::TransformRules;
use crate::utils::error::{ComposeError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// 規則設定檔，未填的欄位沿用內建值
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileConfig {
    pub version: Option<String>,
    pub omitted_services: Option<Vec<String>>,
    pub mem_limits: Option<BTreeMap<String, String>>,
}

impl ProfileConfig {
    /// 從 TOML 檔案載入設定
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ComposeError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析設定
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ComposeError::ProfileError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${ES_MEM_LIMIT})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ComposeError::ProfileError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(version) = &self.version {
            validation::validate_non_empty_string("version", version)?;
        }

        if let Some(limits) = &self.mem_limits {
            for (service, limit) in limits {
                validation::validate_non_empty_string(&format!("mem_limits.{}", service), limit)?;
            }
        }

        Ok(())
    }

    /// 套用到內建規則上
    pub fn apply_to(&self, mut rules: TransformRules) -> TransformRules {
        if let Some(version) = &self.version {
            rules.version = version.clone();
        }
        if let Some(omitted) = &self.omitted_services {
            rules.omitted_services = omitted.iter().cloned().collect();
        }
        if let Some(limits) = &self.mem_limits {
            rules.mem_limits = limits.clone();
        }
        rules
    }

    pub fn to_rules(&self) -> TransformRules {
        self.apply_to(TransformRules::default())
    }
}

impl Validate for ProfileConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_profile_keeps_defaults() {
        let profile = ProfileConfig::from_toml_str("").unwrap();
        assert_eq!(profile.to_rules(), TransformRules::default());
    }

    #[test]
    fn test_profile_overrides_rules() {
        let toml_content = r#"
version = "2.4"
omitted_services = ["kibana", "neo4j"]

[mem_limits]
elasticsearch = "1g"
"#;

        let rules = ProfileConfig::from_toml_str(toml_content).unwrap().to_rules();

        assert_eq!(rules.version, "2.4");
        assert!(rules.is_omitted("neo4j"));
        assert!(!rules.is_omitted("kafka-rest-proxy"));
        assert_eq!(rules.mem_limit("elasticsearch"), Some("1g"));
        assert_eq!(rules.mem_limit("datahub-gms"), None);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("COMPOSE_GEN_TEST_ES_LIMIT", "2g");

        let toml_content = r#"
[mem_limits]
elasticsearch = "${COMPOSE_GEN_TEST_ES_LIMIT}"
datahub-gms = "${COMPOSE_GEN_TEST_UNSET_VAR}"
"#;

        let profile = ProfileConfig::from_toml_str(toml_content).unwrap();
        let limits = profile.mem_limits.unwrap();
        assert_eq!(limits["elasticsearch"], "2g");
        assert_eq!(limits["datahub-gms"], "${COMPOSE_GEN_TEST_UNSET_VAR}");

        std::env::remove_var("COMPOSE_GEN_TEST_ES_LIMIT");
    }

    #[test]
    fn test_config_validation() {
        let profile = ProfileConfig::from_toml_str("[mem_limits]\nelasticsearch = \" \"\n").unwrap();
        assert!(profile.validate().is_err());

        let profile = ProfileConfig::from_toml_str("version = \"\"\n").unwrap();
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        assert!(ProfileConfig::from_toml_str("mem_limit = \"1g\"\n").is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"omitted_services = []\n")
            .unwrap();

        let rules = ProfileConfig::from_file(temp_file.path()).unwrap().to_rules();
        assert!(rules.omitted_services.is_empty());
    }
}
