//! # greenmind-client
//!
//! Async HTTP client for the GreenMind demo backend: the bottle factory
//! endpoints (layout, readings, analysis) and the chat copilot endpoints
//! (suggestions, chat).
//!
//! All endpoints are treated as untrusted. A non-2xx status, an undecodable
//! body, or a `success: false` envelope all come back as a [`ClientError`]
//! that callers can recover from.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use greenmind_client::DemoClient;
//! use greenmind_types::Language;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = DemoClient::builder()
//!         .endpoint("http://localhost:3002/api")
//!         .build()?;
//!
//!     let (factory, readings) = client.factory_and_readings().await?;
//!     println!("{}: {} zones, {:.1} kW", factory.name, factory.zones.len(),
//!         readings.summary.total_power_kw);
//!
//!     let analysis = client.analyze(Language::En).await?;
//!     println!("{:?}", analysis.analysis.and_then(|a| a.overall_assessment));
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;

pub use client::{DemoClient, DemoClientBuilder, DEFAULT_API_URL, DEFAULT_TIMEOUT};
pub use error::{ClientError, ErrorKind};
