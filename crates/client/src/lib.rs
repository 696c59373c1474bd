//! Typed HTTP client for the CourtBook API.
//!
//! ```no_run
//! # async fn run() -> Result<(), courtbook_client::ClientError> {
//! use courtbook_client::ApiClient;
//!
//! let mut client = ApiClient::new("http://localhost:5000")?;
//! client.login("alice@example.com", "secret1").await?;
//! let bookings = client.list_bookings().await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod session;

pub use client::ApiClient;
pub use error::ClientError;
pub use session::Session;
