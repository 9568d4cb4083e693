//! I/O adapters: the catalog HTTP client and local configuration files.

pub mod catalog_client;
pub mod http;
pub mod paths;
pub mod settings;
pub mod storage;

pub use catalog_client::CatalogClient;
pub use paths::AgendaPaths;
pub use settings::Settings;
