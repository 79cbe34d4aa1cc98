//! # Sanimon Analytics
//!
//! 统计聚合：按周期窗口（7d/30d/90d，缺省 7d）和作用域生成报表。
//!
//! - `overview`：反馈总量、平均分、保洁次数、低分数、问题分布、日趋势
//! - `ratings`：评分分布与每日评分分布
//! - `cleaning`：员工保洁次数与对应厕位平均分
//! - `issues`：每日问题分布与低分厕位排行
//!
//! 另有 `dashboard`：当日/24 小时运营指标与最近反馈。
//!
//! 日趋势序列覆盖窗口内每一天，没有数据的日子计数为 0。

pub mod dashboard;
pub mod engine;
pub mod error;
pub mod report;
pub mod trends;

pub use dashboard::{RECENT_FEEDBACK_LIMIT, utc_day_of};
pub use engine::{AnalyticsEngine, LOW_RATING_MAX, PROBLEMATIC_TOILET_LIMIT};
pub use error::AnalyticsError;
pub use report::*;
pub use trends::{daily_trends, issue_trends, rating_trends};
