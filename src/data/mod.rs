//! Data models and processing for the factory dashboard.
//!
//! This module turns backend responses into the state the UI renders.
//!
//! ## Submodules
//!
//! - [`normalize`]: Backend analysis envelope to [`AnalysisResult`](greenmind_types::AnalysisResult)
//! - [`severity`]: Worst-severity-per-zone aggregation ([`ZoneSeverityMap`])
//! - [`metric`]: Unit inference and display formatting for metric values
//! - [`dashboard`]: Immutable container for layout, readings and analysis ([`Dashboard`])
//! - [`chat`]: Copilot transcript and in-flight state ([`ChatSession`])
//! - [`report`]: JSON export of a dashboard
//! - [`duration`]: Parsing of timeout strings (e.g., "30s", "500ms")
//!
//! ## Data Flow
//!
//! ```text
//! FactoryResponse + ReadingsResponse
//!        │
//!        ▼
//! Dashboard::new()  (every zone Ok)
//!        │
//! AnalysisResponse ──▶ normalize_analysis()
//!        │
//!        ▼
//! Dashboard::with_analysis()
//!        │
//!        └──▶ ZoneSeverityMap::aggregate()
//! ```

pub mod chat;
pub mod dashboard;
pub mod duration;
pub mod metric;
pub mod normalize;
pub mod report;
pub mod severity;

pub use chat::{ChatMessage, ChatSession};
pub use dashboard::{Dashboard, UNKNOWN_ZONE};
pub use metric::{format_metric_label, format_metric_value, unit_for, Unit};
pub use normalize::{normalize_analysis, NormalizeError};
pub use report::{export_report, Report};
pub use severity::ZoneSeverityMap;
