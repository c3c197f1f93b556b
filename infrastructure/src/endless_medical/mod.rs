//! Live EndlessMedical diagnosis service

pub mod client;
pub mod retry;
pub mod transport;

#[cfg(test)]
pub(crate) mod test_support;

pub use client::{DEFAULT_BASE_URL, EndlessMedicalClient, EndlessMedicalConfig, TERMS_PASSPHRASE};
pub use retry::{RetryPolicy, send_with_retry};
pub use transport::{
    HttpMethod, HttpReply, HttpRequest, HttpTransport, ReqwestTransport, TransportError,
};
