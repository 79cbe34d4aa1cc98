//! 写入链路：保洁记录与用户反馈。
//!
//! 所有字段校验都在访问存储之前完成；引用的厕位/员工不存在时返回 NotFound。

use crate::error::IntakeError;
use crate::model::{
    ChecklistInput, CleaningLogQuery, DEFAULT_PAGE_LIMIT, FeedbackQuery, MAX_PAGE_LIMIT,
    NewCleaningLog, NewFeedback, Paged,
};
use chrono::{DateTime, Utc};
use domain::{ChecklistItem, IssueType, ScopeFilter};
use sanimon_storage::{
    CleaningLogDetail, CleaningLogFilter, CleaningLogRecord, CleaningLogStore, CleaningOutcome,
    FeedbackDetail, FeedbackFilter, FeedbackRecord, FeedbackStore, Page, StaffStore, ToiletStore,
};
use sanimon_telemetry::{
    record_cleaning_logged, record_feedback_submitted, record_low_rating_feedback,
};
use std::sync::Arc;
use tracing::{info, warn};

/// 低分阈值（含），触发告警日志。
pub const LOW_RATING_MAX: u8 = 2;

#[derive(Clone)]
pub struct IntakeService {
    toilets: Arc<dyn ToiletStore>,
    staff: Arc<dyn StaffStore>,
    feedback: Arc<dyn FeedbackStore>,
    cleaning_logs: Arc<dyn CleaningLogStore>,
}

impl IntakeService {
    pub fn new(
        toilets: Arc<dyn ToiletStore>,
        staff: Arc<dyn StaffStore>,
        feedback: Arc<dyn FeedbackStore>,
        cleaning_logs: Arc<dyn CleaningLogStore>,
    ) -> Self {
        Self {
            toilets,
            staff,
            feedback,
            cleaning_logs,
        }
    }

    /// 记录保洁并推进厕位排期。
    ///
    /// 写入成功后 `last_cleaned_at = now`，`next_cleaning_due = now + 保洁频率`。
    pub async fn log_cleaning(
        &self,
        request: NewCleaningLog,
        now: DateTime<Utc>,
    ) -> Result<CleaningOutcome, IntakeError> {
        let (Some(toilet_id), Some(staff_id)) =
            (non_blank(request.toilet_id), non_blank(request.staff_id))
        else {
            return Err(IntakeError::Validation(
                "missing required fields: toiletId, staffId".to_string(),
            ));
        };
        let checklist = parse_checklist(&request.checklist)?;

        if self.toilets.find_toilet(&toilet_id).await?.is_none() {
            return Err(IntakeError::NotFound("toilet"));
        }
        if self.staff.find_staff(&staff_id).await?.is_none() {
            return Err(IntakeError::NotFound("staff"));
        }

        let record = CleaningLogRecord {
            log_id: uuid::Uuid::new_v4().to_string(),
            toilet_id,
            staff_id,
            checklist,
            notes: non_blank_opt(request.notes),
            photo_url: non_blank_opt(request.photo_url),
            cleaned_at: now,
        };
        // 校验之后厕位仍可能被删除，此时存储层不写入任何数据
        let Some(outcome) = self.cleaning_logs.record_cleaning(record).await? else {
            return Err(IntakeError::NotFound("toilet"));
        };
        record_cleaning_logged();
        info!(
            target: "sanimon.intake",
            log_id = %outcome.log.log_id,
            toilet_id = %outcome.log.toilet_id,
            staff_id = %outcome.log.staff_id,
            checklist_items = outcome.log.checklist.len(),
            next_cleaning_due = ?outcome.toilet.next_cleaning_due,
            "cleaning_logged"
        );
        Ok(outcome)
    }

    /// 提交用户反馈。评分 ≤ 2 时记录告警日志。
    pub async fn submit_feedback(
        &self,
        request: NewFeedback,
        now: DateTime<Utc>,
    ) -> Result<FeedbackRecord, IntakeError> {
        let (Some(toilet_id), Some(rating)) = (non_blank(request.toilet_id), request.rating) else {
            return Err(IntakeError::Validation(
                "missing required fields: toiletId, rating".to_string(),
            ));
        };
        let rating = u8::try_from(rating)
            .ok()
            .filter(|rating| (1..=5).contains(rating))
            .ok_or_else(|| IntakeError::Validation("rating must be between 1 and 5".to_string()))?;
        let issue_type = non_blank_opt(request.issue_type)
            .map(|value| value.parse::<IssueType>())
            .transpose()
            .map_err(|err| IntakeError::Validation(err.to_string()))?;

        if self.toilets.find_toilet(&toilet_id).await?.is_none() {
            return Err(IntakeError::NotFound("toilet"));
        }

        let record = FeedbackRecord {
            feedback_id: uuid::Uuid::new_v4().to_string(),
            toilet_id,
            rating,
            issue_type,
            comment: non_blank_opt(request.comment),
            photo_url: non_blank_opt(request.photo_url),
            user_agent: non_blank_opt(request.user_agent),
            ip_address: non_blank_opt(request.ip_address),
            created_at: now,
        };
        let record = self.feedback.create_feedback(record).await?;
        record_feedback_submitted();
        info!(
            target: "sanimon.intake",
            feedback_id = %record.feedback_id,
            toilet_id = %record.toilet_id,
            rating = record.rating,
            issue_type = ?record.issue_type,
            "feedback_submitted"
        );
        if record.rating <= LOW_RATING_MAX {
            record_low_rating_feedback();
            warn!(
                target: "sanimon.intake",
                feedback_id = %record.feedback_id,
                toilet_id = %record.toilet_id,
                rating = record.rating,
                "low_rating_received"
            );
        }
        Ok(record)
    }

    /// 反馈列表，最新的在前。
    pub async fn list_feedback(
        &self,
        scope: &ScopeFilter,
        query: FeedbackQuery,
    ) -> Result<Paged<FeedbackDetail>, IntakeError> {
        let page = resolve_page(query.limit, query.offset)?;
        let filter = FeedbackFilter {
            toilet_id: non_blank_opt(query.toilet_id),
            ..FeedbackFilter::default()
        };
        let items = self.feedback.list_feedback(scope, &filter, Some(page)).await?;
        let total = self.feedback.count_feedback(scope, &filter).await?;
        Ok(Paged {
            items,
            total,
            limit: page.limit,
            offset: page.offset,
        })
    }

    /// 保洁记录列表，最新的在前。
    pub async fn list_cleaning_logs(
        &self,
        scope: &ScopeFilter,
        query: CleaningLogQuery,
    ) -> Result<Paged<CleaningLogDetail>, IntakeError> {
        let page = resolve_page(query.limit, query.offset)?;
        let filter = CleaningLogFilter {
            toilet_id: non_blank_opt(query.toilet_id),
            staff_id: non_blank_opt(query.staff_id),
            ..CleaningLogFilter::default()
        };
        let items = self
            .cleaning_logs
            .list_cleaning_logs(scope, &filter, Some(page))
            .await?;
        let total = self.cleaning_logs.count_cleaning_logs(scope, &filter).await?;
        Ok(Paged {
            items,
            total,
            limit: page.limit,
            offset: page.offset,
        })
    }
}

/// 分页参数：limit 缺省 50，范围 1..=200；offset 缺省 0，不能为负。
pub fn resolve_page(limit: Option<i64>, offset: Option<i64>) -> Result<Page, IntakeError> {
    let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT);
    let offset = offset.unwrap_or(0);
    if !(1..=MAX_PAGE_LIMIT).contains(&limit) {
        return Err(IntakeError::Validation(format!(
            "limit must be between 1 and {MAX_PAGE_LIMIT}"
        )));
    }
    if offset < 0 {
        return Err(IntakeError::Validation("offset must not be negative".to_string()));
    }
    Ok(Page::new(limit, offset))
}

/// 解析保洁清单，按首次出现的顺序去重。
pub fn parse_checklist(input: &ChecklistInput) -> Result<Vec<ChecklistItem>, IntakeError> {
    let decoded: Vec<String>;
    let tags: &[String] = match input {
        ChecklistInput::Tags(tags) => tags,
        ChecklistInput::Encoded(text) if text.trim().is_empty() => &[],
        ChecklistInput::Encoded(text) => {
            decoded = serde_json::from_str(text)
                .map_err(|err| IntakeError::Validation(format!("invalid checklist: {err}")))?;
            &decoded
        }
    };
    let mut items = Vec::with_capacity(tags.len());
    for tag in tags {
        let item = tag
            .parse::<ChecklistItem>()
            .map_err(|err| IntakeError::Validation(err.to_string()))?;
        if !items.contains(&item) {
            items.push(item);
        }
    }
    Ok(items)
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn non_blank_opt(value: Option<String>) -> Option<String> {
    value.and_then(non_blank)
}
