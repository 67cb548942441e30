//! # greenmind-demo
//!
//! A terminal dashboard for the GreenMind bottle factory demo.
//!
//! The dashboard loads the factory layout and live sensor readings from the
//! GreenMind backend, requests an AI energy analysis, maps the reported
//! issues onto zones by severity, and hosts a chat with the factory copilot.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐ │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal│ │
//! │  │ (state) │    │(dashboard)    │(rendering)   │         │ │
//! │  └────┬────┘    └──────────┘    └─────────┘    └─────────┘ │
//! │       │ ApiWorker (tokio tasks, mpsc events)                │
//! │       ▼                                                     │
//! │  ┌─────────┐                                                │
//! │  │ backend │◀── DemoClient (HTTP) | FixtureApi (files)      │
//! │  └─────────┘                                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Application state, view navigation, chat input and
//!   handling of backend results
//! - **[`backend`]**: The [`DemoApi`] trait, its HTTP and fixture
//!   implementations, and the [`ApiWorker`] that runs requests off the UI thread
//! - **[`data`]**: Dashboard model, analysis normalization, severity
//!   aggregation, metric formatting and JSON export
//! - **[`ui`]**: Terminal rendering using ratatui: floor plan, readings,
//!   analysis, chat and overlays
//! - **[`config`]**, **[`logging`]**, **[`i18n`]**: Layered settings,
//!   tracing setup and the en/ru/uz message catalog
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Against a running backend
//! greenmind-demo --api-url http://localhost:3002/api
//!
//! # Offline, from a directory of canned responses
//! greenmind-demo --fixtures ./fixtures --language ru
//!
//! # Write a JSON report and exit
//! greenmind-demo --fixtures ./fixtures --export report.json
//! ```
//!
//! ### As a library
//!
//! ```no_run
//! use std::sync::Arc;
//! use greenmind_demo::{App, ApiWorker, FixtureApi, Theme};
//! use greenmind_types::Language;
//!
//! let rt = tokio::runtime::Runtime::new().unwrap();
//! let worker = ApiWorker::new(Arc::new(FixtureApi::new("fixtures")), rt.handle().clone());
//! let mut app = App::new(worker, Language::En, Theme::dark());
//! app.start();
//! ```

pub mod app;
pub mod backend;
pub mod config;
pub mod data;
pub mod events;
pub mod i18n;
pub mod logging;
pub mod ui;

// Re-export main types for convenience
pub use app::{App, View};
pub use backend::{ApiEvent, ApiWorker, BackendError, DemoApi, FixtureApi};
pub use config::AppConfig;
pub use data::{ChatSession, Dashboard};
pub use ui::Theme;
