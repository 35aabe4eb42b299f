//! Wellness Studio - Analytics core for a personal sport & wellbeing journal
//!
//! The engine turns a flat set of logged sessions into dashboard results
//! through a deterministic pipeline: period windowing → metric aggregation
//! → composite scoring → period-over-period comparison → insight generation.
//!
//! The presentation layer is an external collaborator: it supplies a
//! [`types::DashboardQuery`] and renders the plain structured results of
//! [`dashboard::compute_dashboard`]. The engine holds no state between
//! calls; only the record file persists, through [`store::RecordStore`].

pub mod dashboard;
pub mod error;
pub mod insights;
pub mod metrics;
pub mod score;
pub mod store;
pub mod trend;
pub mod types;
pub mod window;

pub use dashboard::{compute_dashboard, DashboardOutcome, DashboardResult};
pub use error::EngineError;
pub use insights::{InsightReport, TrendDirection};
pub use metrics::MetricSnapshot;
pub use score::{compute_score, Score, ScoreStatus};
pub use store::RecordStore;
pub use trend::{DeltaSet, MetricDelta, TrendFlag};
pub use types::{Activity, DashboardQuery, DateRange, SessionRecord};

/// Engine version reported by the CLI
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
