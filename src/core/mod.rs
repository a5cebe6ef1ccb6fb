pub mod etl;
pub mod merge;
pub mod normalize;
pub mod pipeline;

pub use crate::domain::model::{ComposeDocument, EnvironmentTable, SourceDocument};
pub use crate::domain::ports::{ConfigProvider, EnvLoader, Pipeline, Storage};
pub use crate::utils::error::Result;
