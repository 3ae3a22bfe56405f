mod loader;

pub use loader::{Config, ExtensionConfig, ProviderConfig, ReportConfig};
