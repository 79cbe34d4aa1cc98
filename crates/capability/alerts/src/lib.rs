//! # Sanimon Alerts
//!
//! 告警规则引擎。每次调用都从存储重新计算，没有跨请求状态：
//!
//! | 规则 | 条件 | 级别 |
//! |---|---|---|
//! | LOW_RATING | 24h 内评分 ≤ 2 | 1 分 critical，2 分 high |
//! | MISSED_CLEANING | ACTIVE 且 next_cleaning_due < now | 超时 > 4h 为 high，否则 medium |
//! | MULTIPLE_COMPLAINTS | 24h 内同一厕位低分 > 2 条 | high |
//! | NO_CLEANING_LOG | ACTIVE 且 24h 未保洁，且间隔 > 频率 × 2 | medium |
//! | EMERGENCY_ISSUE | 1h 内报告 NO_WATER / BROKEN_FIXTURES | critical |
//!
//! 合并阶段：拼接 → 统计 summary（过滤前）→ 按级别过滤 → 级别降序、时间降序排序。

pub mod engine;
pub mod error;
pub mod merge;
pub mod model;
pub mod rules;

pub use engine::{AlertEngine, parse_severity};
pub use error::AlertError;
pub use merge::{merge, sort_alerts, summarize};
pub use model::{Acknowledgement, Alert, AlertData, AlertFeed, AlertSummary, ManualAlertInput};
