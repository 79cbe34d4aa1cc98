//! 存储接口 Trait 定义
//!
//! 定义所有实体存储的异步接口：
//! - ToiletStore：厕位（含层级路径）
//! - FeedbackStore：用户反馈及其分组统计
//! - CleaningLogStore：保洁记录（写入时推进厕位排期）
//! - StaffStore：员工
//!
//! 设计原则：
//! - 范围类查询显式接收 ScopeFilter
//! - 所有接口返回 StorageError
//! - 列表按稳定顺序返回，同一数据多次查询结果一致
//! - 使用 async_trait 支持动态分发

use crate::error::StorageError;
use crate::models::{
    CleaningLogDetail, CleaningLogFilter, CleaningLogRecord, CleaningOutcome, FeedbackDetail,
    FeedbackFilter, FeedbackRecord, IssueCount, Page, RatingCount, StaffFilter, StaffRecord,
    ToiletCount, ToiletDetail, ToiletFilter,
};
use async_trait::async_trait;
use domain::ScopeFilter;

/// 厕位存储接口
#[async_trait]
pub trait ToiletStore: Send + Sync {
    /// 按 ID 查找厕位（不限作用域）
    async fn find_toilet(&self, toilet_id: &str) -> Result<Option<ToiletDetail>, StorageError>;

    /// 列出作用域内满足条件的厕位，按 toilet_id 排序
    async fn list_toilets(
        &self,
        scope: &ScopeFilter,
        filter: &ToiletFilter,
    ) -> Result<Vec<ToiletDetail>, StorageError>;

    /// 统计作用域内满足条件的厕位数
    async fn count_toilets(
        &self,
        scope: &ScopeFilter,
        filter: &ToiletFilter,
    ) -> Result<u64, StorageError>;
}

/// 反馈存储接口
#[async_trait]
pub trait FeedbackStore: Send + Sync {
    /// 写入一条反馈
    async fn create_feedback(&self, record: FeedbackRecord) -> Result<FeedbackRecord, StorageError>;

    /// 列出反馈，按 created_at 倒序（同一时刻按 feedback_id）
    async fn list_feedback(
        &self,
        scope: &ScopeFilter,
        filter: &FeedbackFilter,
        page: Option<Page>,
    ) -> Result<Vec<FeedbackDetail>, StorageError>;

    async fn count_feedback(
        &self,
        scope: &ScopeFilter,
        filter: &FeedbackFilter,
    ) -> Result<u64, StorageError>;

    /// 平均评分；没有匹配记录时返回 None
    async fn average_rating(
        &self,
        scope: &ScopeFilter,
        filter: &FeedbackFilter,
    ) -> Result<Option<f64>, StorageError>;

    /// 按评分分组计数，仅返回出现过的评分，按评分升序
    async fn count_by_rating(
        &self,
        scope: &ScopeFilter,
        filter: &FeedbackFilter,
    ) -> Result<Vec<RatingCount>, StorageError>;

    /// 按问题类型分组计数（忽略未填问题类型的反馈），按问题类型排序
    async fn count_by_issue_type(
        &self,
        scope: &ScopeFilter,
        filter: &FeedbackFilter,
    ) -> Result<Vec<IssueCount>, StorageError>;

    /// 按厕位分组计数，只保留计数严格大于 `more_than` 的分组
    ///
    /// 按计数倒序、toilet_id 升序返回。
    async fn count_by_toilet(
        &self,
        scope: &ScopeFilter,
        filter: &FeedbackFilter,
        more_than: u64,
    ) -> Result<Vec<ToiletCount>, StorageError>;
}

/// 保洁记录存储接口
#[async_trait]
pub trait CleaningLogStore: Send + Sync {
    /// 写入保洁记录并推进厕位排期（同一事务）
    ///
    /// 厕位的 last_cleaned_at 设为 `record.cleaned_at`，
    /// next_cleaning_due 设为 `cleaned_at + 保洁频率`。
    /// 厕位不存在时不写入任何数据，返回 None。
    async fn record_cleaning(
        &self,
        record: CleaningLogRecord,
    ) -> Result<Option<CleaningOutcome>, StorageError>;

    /// 列出保洁记录，按 cleaned_at 倒序（同一时刻按 log_id）
    async fn list_cleaning_logs(
        &self,
        scope: &ScopeFilter,
        filter: &CleaningLogFilter,
        page: Option<Page>,
    ) -> Result<Vec<CleaningLogDetail>, StorageError>;

    async fn count_cleaning_logs(
        &self,
        scope: &ScopeFilter,
        filter: &CleaningLogFilter,
    ) -> Result<u64, StorageError>;
}

/// 员工存储接口
#[async_trait]
pub trait StaffStore: Send + Sync {
    async fn find_staff(&self, staff_id: &str) -> Result<Option<StaffRecord>, StorageError>;

    /// 列出员工，按姓名、staff_id 排序
    async fn list_staff(&self, filter: &StaffFilter) -> Result<Vec<StaffRecord>, StorageError>;
}
