//! # greenmind-types
//!
//! Types for the GreenMind bottle factory demo API. This crate defines both
//! the shapes the backend puts on the wire and the UI-facing domain types the
//! dashboard works with.
//!
//! ## Design Goals
//!
//! - **Zero required dependencies**: Types work without any serialization framework
//! - **Optional serialization**: Enable the `serde` feature to decode API payloads
//! - **Tolerant decoding**: Every field the backend may omit is an `Option` or
//!   defaults to empty, so a missing field is never a decode error
//!
//! ## Features
//!
//! - `serde`: JSON serialization via serde
//!
//! ## Example
//!
//! ```rust
//! use greenmind_types::{Factory, Severity, Zone};
//!
//! let factory = Factory::builder("bottle-1", "Bottle Factory")
//!     .zone(Zone::new("filling", "Filling Line", 10.0, 10.0, 30.0, 20.0))
//!     .zone(Zone::new("labeling", "Labeling", 50.0, 10.0, 30.0, 20.0))
//!     .build();
//!
//! assert_eq!(factory.zone_ids().count(), 2);
//! assert!(Severity::Critical > Severity::Warning);
//! ```

mod analysis;
mod chat;
mod envelope;
mod factory;
mod language;
mod readings;

pub use analysis::*;
pub use chat::*;
pub use envelope::*;
pub use factory::*;
pub use language::*;
pub use readings::*;
