//! # meater-cloud
//!
//! An async Rust client for the MEATER Cloud public API.
//!
//! The client logs in once, then fetches probe readings and any active
//! cook on demand. Every call is a single request: there is no polling,
//! caching or retrying inside the crate. Callers drive their own loop and
//! decide how to react to each [`Error`] kind.
//!
//! ## Features
//!
//! - **Login**: exchange account credentials for a bearer token
//! - **Device listing**: every probe on the account, in response order
//! - **Single device**: one probe by its cloud identifier
//! - **Typed errors**: HTTP statuses and malformed payloads mapped to a flat enum
//! - **Pluggable transport**: bring your own [`HttpTransport`] or use `reqwest`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use meater_cloud::{ClientConfig, MeaterClient, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = MeaterClient::new(&ClientConfig::default())?;
//!     client.authenticate("cook@example.com", "password").await?;
//!
//!     for probe in client.list_devices().await? {
//!         println!(
//!             "Probe {}: {:.1}°C (ambient {:.1}°C)",
//!             probe.index(),
//!             probe.internal_temperature(),
//!             probe.ambient_temperature()
//!         );
//!         if let Some(cook) = probe.cook() {
//!             println!("  cooking {} to {:.1}°C", cook.name().unwrap_or("?"), cook.target_temperature());
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `serialize`: Enable serialization/deserialization for [`Probe`] and [`Cook`]

// Public modules
pub mod client;
pub mod config;
pub mod data;
pub mod error;
pub mod probe;
pub mod protocol;
pub mod transport;
pub mod utils;

// Re-exports for convenience
pub use client::MeaterClient;
pub use config::ClientConfig;
pub use data::Cook;
pub use error::{Error, Result};
pub use probe::Probe;
pub use transport::{HttpResponse, HttpTransport, ReqwestTransport};
pub use utils::{celsius_to_fahrenheit, fahrenheit_to_celsius, TemperatureUnit};
