//! # Sanimon Intake
//!
//! 两条写入链路：
//!
//! - `log_cleaning`：写保洁记录，同一事务内推进厕位的 last_cleaned_at / next_cleaning_due
//! - `submit_feedback`：写用户反馈，低分反馈计数并记录 warn 日志
//!
//! 以及对应的分页列表查询。

pub mod error;
pub mod model;
pub mod service;

pub use error::IntakeError;
pub use model::{
    ChecklistInput, CleaningLogQuery, DEFAULT_PAGE_LIMIT, FeedbackQuery, MAX_PAGE_LIMIT,
    NewCleaningLog, NewFeedback, Paged,
};
pub use service::{IntakeService, LOW_RATING_MAX, parse_checklist, resolve_page};
