// Adapters layer: concrete implementations of the domain ports.

pub mod env_file;

pub use env_file::DotenvLoader;
