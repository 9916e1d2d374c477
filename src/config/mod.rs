mod env_overrides;
mod loader;
pub mod schema;
#[cfg(test)]
pub(crate) mod test_env;

pub use schema::{
    Config, ExportConfig, HistoryConfig, ObservabilityConfig, ProviderConfig, StorageBackend,
    StorageConfig,
};
