//! # wingpay - Wing online payment gateway client
//!
//! A Rust client for the Wing online payment gateway. The library
//! exchanges client credentials for a bearer token, validates and
//! signs transaction requests, and normalizes the gateway's error
//! shapes into a single error type.
//!
//! ```no_run
//! use wingpay::{ClientConfig, CreateTransactionOptions, PaymentCode, PaymentOptions, WingPayClient};
//!
//! # async fn run() -> wingpay::Result<()> {
//! let config = ClientConfig::new("https://api.example.com", "client-id", "client-secret");
//! let mut client = WingPayClient::new(config)?;
//!
//! let record = client
//!     .create_transaction(CreateTransactionOptions::new(
//!         "ORDER-1",
//!         "10.00",
//!         2,
//!         PaymentCode::Aba,
//!         PaymentOptions::default(),
//!     ))
//!     .await?;
//! println!("created {} ({})", record.txid, record.state);
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod crypto;
pub mod error;
pub mod types;
pub mod validator;

// Re-exports for convenience
pub use client::WingPayClient;
pub use error::{Result, WingPayError};
pub use types::*;

/// Current version of the wingpay library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_constant() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_currency_constant() {
        assert_eq!(CURRENCY_CODE, "USD");
    }
}
