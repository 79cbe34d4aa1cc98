//! 运营看板。

use crate::engine::{AnalyticsEngine, LOW_RATING_MAX};
use crate::error::AnalyticsError;
use crate::report::{
    Dashboard, DashboardStats, IssueShare, RecentFeedback, RecentToilet, StaffToday,
};
use chrono::{DateTime, Duration, NaiveTime, TimeZone, Utc};
use domain::{ScopeFilter, TimeRange, lookback};
use sanimon_storage::{
    CleaningLogFilter, FeedbackFilter, Page, StaffFilter, ToiletFilter,
};
use sanimon_telemetry::record_analytics_report;
use tracing::info;

/// 最近反馈条数。
pub const RECENT_FEEDBACK_LIMIT: i64 = 10;

/// 当天（UTC）的 `[00:00, 次日 00:00)`。
pub fn utc_day_of(now: DateTime<Utc>) -> TimeRange {
    let midnight = Utc.from_utc_datetime(&now.date_naive().and_time(NaiveTime::MIN));
    TimeRange::between(midnight, midnight + Duration::days(1))
}

impl AnalyticsEngine {
    /// 看板数据。只有给出 company_id 时才返回员工当日保洁数。
    pub async fn dashboard(
        &self,
        scope: &ScopeFilter,
        now: DateTime<Utc>,
    ) -> Result<Dashboard, AnalyticsError> {
        let today = utc_day_of(now);
        let all_toilets = ToiletFilter::default();
        let all_time = FeedbackFilter::default();
        let todays_feedback = FeedbackFilter::within(today);
        let overdue = ToiletFilter {
            due_before: Some(now),
            ..ToiletFilter::active()
        };
        let last_day = FeedbackFilter::within(lookback(now, Duration::hours(24)));
        let low_rated = FeedbackFilter {
            max_rating: Some(LOW_RATING_MAX),
            ..last_day.clone()
        };
        let todays_cleaning = CleaningLogFilter::within(today);

        let feedback = self.feedback.as_ref();
        let (
            total_toilets,
            average,
            total_feedback,
            todays_feedback,
            overdue_cleanings,
            low_rating_alerts,
            todays_cleaning,
            recent,
            issues,
        ) = tokio::try_join!(
            self.toilets.count_toilets(scope, &all_toilets),
            feedback.average_rating(scope, &all_time),
            feedback.count_feedback(scope, &all_time),
            feedback.count_feedback(scope, &todays_feedback),
            self.toilets.count_toilets(scope, &overdue),
            feedback.count_feedback(scope, &low_rated),
            self.cleaning_logs.count_cleaning_logs(scope, &todays_cleaning),
            feedback.list_feedback(scope, &all_time, Some(Page::first(RECENT_FEEDBACK_LIMIT))),
            feedback.count_by_issue_type(scope, &last_day),
        )?;

        let staff_performance = match scope.company_id.as_deref() {
            Some(company_id) => self.staff_today(scope, company_id, today).await?,
            None => Vec::new(),
        };

        let recent_feedback = recent
            .into_iter()
            .map(|item| RecentFeedback {
                toilet: RecentToilet {
                    id: item.feedback.toilet_id.clone(),
                    toilet_number: item.toilet_number,
                    location: format!(
                        "{} - Floor {}",
                        item.path.location_name, item.path.floor_number
                    ),
                },
                id: item.feedback.feedback_id,
                rating: item.feedback.rating,
                issue_type: item.feedback.issue_type,
                comment: item.feedback.comment,
                created_at: item.feedback.created_at,
            })
            .collect();

        record_analytics_report();
        info!(
            target: "sanimon.analytics",
            company_id = ?scope.company_id,
            location_id = ?scope.location_id,
            total_toilets,
            overdue_cleanings,
            "dashboard_built"
        );
        Ok(Dashboard {
            stats: DashboardStats {
                total_toilets,
                average_rating: average.unwrap_or(0.0),
                total_feedback,
                todays_feedback,
                overdue_cleanings,
                low_rating_alerts,
                todays_cleaning,
            },
            recent_feedback,
            staff_performance,
            issue_distribution: issues
                .into_iter()
                .map(|item| IssueShare {
                    issue: item.issue_type,
                    count: item.count,
                })
                .collect(),
            last_updated: now,
        })
    }

    async fn staff_today(
        &self,
        scope: &ScopeFilter,
        company_id: &str,
        today: TimeRange,
    ) -> Result<Vec<StaffToday>, AnalyticsError> {
        let staff = self
            .staff
            .list_staff(&StaffFilter {
                company_id: Some(company_id.to_string()),
                active_only: true,
            })
            .await?;
        let mut rows = Vec::with_capacity(staff.len());
        for member in staff {
            let filter = CleaningLogFilter {
                staff_id: Some(member.staff_id.clone()),
                ..CleaningLogFilter::within(today)
            };
            let today_cleanings = self.cleaning_logs.count_cleaning_logs(scope, &filter).await?;
            rows.push(StaffToday {
                id: member.staff_id,
                name: member.name,
                role: member.role,
                today_cleanings,
            });
        }
        Ok(rows)
    }
}
