//! External API integrations

pub mod backoffice;

pub use backoffice::BackofficeClient;
