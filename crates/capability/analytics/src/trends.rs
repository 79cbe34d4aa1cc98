//! 按日趋势。
//!
//! 每个日桶独立查询一次（O(天数) 次往返），每个桶都产出一条记录，
//! 序列长度恒等于 `window.days()` 的长度。换成单条按日分组查询时
//! 只需替换这里的实现。

use crate::error::AnalyticsError;
use crate::report::{IssueTrend, IssueTypeCount, RatingBucket, RatingTrend, TrendPoint};
use domain::{ScopeFilter, Window};
use sanimon_storage::{CleaningLogFilter, CleaningLogStore, FeedbackFilter, FeedbackStore};

/// 反馈数、平均分、保洁数的日趋势。
pub async fn daily_trends(
    feedback: &dyn FeedbackStore,
    cleaning_logs: &dyn CleaningLogStore,
    scope: &ScopeFilter,
    window: &Window,
) -> Result<Vec<TrendPoint>, AnalyticsError> {
    let days = window.days();
    let mut points = Vec::with_capacity(days.len());
    for day in days {
        let feedback_filter = FeedbackFilter::within(day.range());
        let cleaning_filter = CleaningLogFilter::within(day.range());
        let (count, average, cleanings) = tokio::try_join!(
            feedback.count_feedback(scope, &feedback_filter),
            feedback.average_rating(scope, &feedback_filter),
            cleaning_logs.count_cleaning_logs(scope, &cleaning_filter),
        )?;
        points.push(TrendPoint {
            date: day.date_label(),
            feedback: count,
            average_rating: average.unwrap_or(0.0),
            cleanings,
        });
    }
    Ok(points)
}

/// 每日评分分布（只包含出现过的评分）。
pub async fn rating_trends(
    feedback: &dyn FeedbackStore,
    scope: &ScopeFilter,
    window: &Window,
) -> Result<Vec<RatingTrend>, AnalyticsError> {
    let days = window.days();
    let mut trends = Vec::with_capacity(days.len());
    for day in days {
        let groups = feedback
            .count_by_rating(scope, &FeedbackFilter::within(day.range()))
            .await?;
        trends.push(RatingTrend {
            date: day.date_label(),
            ratings: groups
                .into_iter()
                .map(|group| RatingBucket {
                    rating: group.rating,
                    count: group.count,
                })
                .collect(),
        });
    }
    Ok(trends)
}

/// 每日问题类型分布（忽略未填问题类型的反馈）。
pub async fn issue_trends(
    feedback: &dyn FeedbackStore,
    scope: &ScopeFilter,
    window: &Window,
) -> Result<Vec<IssueTrend>, AnalyticsError> {
    let days = window.days();
    let mut trends = Vec::with_capacity(days.len());
    for day in days {
        let groups = feedback
            .count_by_issue_type(scope, &FeedbackFilter::within(day.range()))
            .await?;
        trends.push(IssueTrend {
            date: day.date_label(),
            issues: groups
                .into_iter()
                .map(|group| IssueTypeCount {
                    issue_type: group.issue_type,
                    count: group.count,
                })
                .collect(),
        });
    }
    Ok(trends)
}
