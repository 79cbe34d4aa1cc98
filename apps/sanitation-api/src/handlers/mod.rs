//! Handlers 模块

pub mod alerts;
pub mod analytics;
pub mod cleaning_logs;
pub mod dashboard;
pub mod feedback;
pub mod health;
pub mod metrics;

pub use alerts::*;
pub use analytics::*;
pub use cleaning_logs::*;
pub use dashboard::*;
pub use feedback::*;
pub use health::*;
pub use metrics::*;
