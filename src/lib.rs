pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::DotenvLoader;
pub use config::{cli::LocalStorage, toml_config::ProfileConfig};
pub use core::{
    etl::EtlEngine,
    merge::{merge, merge_documents},
    normalize::Normalizer,
    pipeline::ComposePipeline,
};
pub use domain::{
    model::{ComposeDocument, EnvironmentTable, SourceDocument},
    rules::TransformRules,
};
pub use utils::error::{ComposeError, Result};
