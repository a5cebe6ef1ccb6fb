pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::domain::ports::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

pub const COMPOSE_EXTENSIONS: [&str; 2] = ["yml", "yaml"];

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "compose-gen")]
#[command(about = "Merge docker-compose files and inline their env files into one compose file")]
pub struct CliConfig {
    /// Compose files in merge order: the base file first, then overrides
    #[arg(required = true, num_args = 1.., value_name = "COMPOSE_FILES")]
    pub compose_files: Vec<String>,

    /// Where to write the merged compose file
    #[arg(value_name = "OUTPUT_FILE")]
    pub output_file: String,

    /// TOML profile overriding the omitted services, memory limits or version
    #[arg(short, long)]
    pub profile: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit log lines as JSON")]
    pub json_logs: bool,

    #[arg(long, help = "Print the merged compose file instead of writing it")]
    pub dry_run: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn compose_files(&self) -> &[String] {
        &self.compose_files
    }

    fn output_file(&self) -> &str {
        &self.output_file
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_list("compose_files", &self.compose_files)?;
        validation::validate_file_extensions(
            "compose_files",
            &self.compose_files,
            &COMPOSE_EXTENSIONS,
        )?;
        validation::validate_existing_files("compose_files", &self.compose_files)?;
        validation::validate_path("output_file", &self.output_file)?;

        if let Some(profile) = &self.profile {
            validation::validate_existing_files("profile", std::slice::from_ref(profile))?;
        }

        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_positional_arguments() {
        let config = CliConfig::parse_from([
            "compose-gen",
            "docker-compose.yml",
            "docker-compose.override.yml",
            "quickstart/docker-compose.quickstart.yml",
            "--verbose",
        ]);

        assert_eq!(
            config.compose_files,
            vec!["docker-compose.yml", "docker-compose.override.yml"]
        );
        assert_eq!(config.output_file, "quickstart/docker-compose.quickstart.yml");
        assert!(config.verbose);
        assert!(!config.dry_run);
        assert!(config.profile.is_none());
    }

    #[test]
    fn test_output_file_is_required() {
        assert!(CliConfig::try_parse_from(["compose-gen", "docker-compose.yml"]).is_err());
    }

    #[test]
    fn test_validate() {
        let dir = TempDir::new().unwrap();
        let base = dir.path().join("docker-compose.yml");
        std::fs::write(&base, "services: {}\n").unwrap();
        let output = dir.path().join("out/merged.yml");

        let mut config = CliConfig {
            compose_files: vec![base.to_str().unwrap().to_string()],
            output_file: output.to_str().unwrap().to_string(),
            profile: None,
            verbose: false,
            json_logs: false,
            dry_run: false,
        };
        assert!(config.validate().is_ok());

        config.compose_files.push(dir.path().join("missing.yml").to_str().unwrap().to_string());
        assert!(config.validate().is_err());

        config.compose_files = vec![base.to_str().unwrap().to_string()];
        config.profile = Some(dir.path().join("profile.toml").to_str().unwrap().to_string());
        assert!(config.validate().is_err());
    }
}
