//! Infrastructure layer for glp1-advisor
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the live diagnosis client and its offline
//! stand-in, configuration file loading, bundle export and exchange logging.

pub mod config;
pub mod endless_medical;
pub mod export;
pub mod logging;
pub mod mock;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileApiConfig, FileConfig, FileExportConfig, FileFallbackConfig,
    FileOutputConfig,
};
pub use endless_medical::{
    DEFAULT_BASE_URL, EndlessMedicalClient, EndlessMedicalConfig, HttpTransport,
    ReqwestTransport, RetryPolicy, TransportError,
};
pub use export::{JsonBundleExporter, read_bundle};
pub use logging::JsonlExchangeLogger;
pub use mock::{MOCK_LAST_ERROR, MockDiagnosisApi};
