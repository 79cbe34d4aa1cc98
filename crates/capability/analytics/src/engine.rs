//! 统计聚合引擎。
//!
//! 四种报表都按 ScopeFilter 过滤、按周期窗口取数，每次调用都从存储重新计算。

use crate::error::AnalyticsError;
use crate::report::{
    AnalyticsReport, CleaningReport, IssueShare, IssuesReport, OverviewReport, ProblematicToilet,
    RatingBucket, RatingsReport, ReportKind, StaffPerformance, round1,
};
use crate::trends::{daily_trends, issue_trends, rating_trends};
use chrono::{DateTime, Utc};
use domain::{ScopeFilter, Window, resolve_window};
use sanimon_storage::{
    CleaningLogFilter, CleaningLogStore, FeedbackFilter, FeedbackStore, StaffFilter, StaffStore,
    ToiletStore,
};
use sanimon_telemetry::{record_analytics_report, record_report_latency_ms};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// 低分阈值（含）。
pub const LOW_RATING_MAX: u8 = 2;
/// 问题厕位排行长度。
pub const PROBLEMATIC_TOILET_LIMIT: usize = 10;

pub struct AnalyticsEngine {
    pub(crate) toilets: Arc<dyn ToiletStore>,
    pub(crate) feedback: Arc<dyn FeedbackStore>,
    pub(crate) cleaning_logs: Arc<dyn CleaningLogStore>,
    pub(crate) staff: Arc<dyn StaffStore>,
}

impl AnalyticsEngine {
    pub fn new(
        toilets: Arc<dyn ToiletStore>,
        feedback: Arc<dyn FeedbackStore>,
        cleaning_logs: Arc<dyn CleaningLogStore>,
        staff: Arc<dyn StaffStore>,
    ) -> Self {
        Self {
            toilets,
            feedback,
            cleaning_logs,
            staff,
        }
    }

    /// 按类型生成报表。周期标记无法识别时按 7 天处理。
    pub async fn report(
        &self,
        kind: ReportKind,
        scope: &ScopeFilter,
        period: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<AnalyticsReport, AnalyticsError> {
        let started_at = Instant::now();
        let window = resolve_window(period, now);
        let report = match kind {
            ReportKind::Overview => AnalyticsReport::Overview(self.overview(scope, &window).await?),
            ReportKind::Ratings => AnalyticsReport::Ratings(self.ratings(scope, &window).await?),
            ReportKind::Cleaning => AnalyticsReport::Cleaning(self.cleaning(scope, &window).await?),
            ReportKind::Issues => AnalyticsReport::Issues(self.issues(scope, &window).await?),
        };
        let elapsed_ms = started_at.elapsed().as_millis() as u64;
        record_analytics_report();
        record_report_latency_ms(elapsed_ms);
        info!(
            target: "sanimon.analytics",
            report = kind.as_str(),
            company_id = ?scope.company_id,
            location_id = ?scope.location_id,
            window_start = %window.start,
            days = window.days().len(),
            elapsed_ms,
            "analytics_report_built"
        );
        Ok(report)
    }

    /// 概览：总量、平均分、低分数、问题分布、日趋势。
    pub async fn overview(
        &self,
        scope: &ScopeFilter,
        window: &Window,
    ) -> Result<OverviewReport, AnalyticsError> {
        let in_window = FeedbackFilter::within(window.range());
        let low_rated = FeedbackFilter {
            max_rating: Some(LOW_RATING_MAX),
            ..in_window.clone()
        };
        let cleanings = CleaningLogFilter::within(window.range());
        let feedback = self.feedback.as_ref();
        let (total_feedback, average, total_cleanings, low_rating_count, issues) = tokio::try_join!(
            feedback.count_feedback(scope, &in_window),
            feedback.average_rating(scope, &in_window),
            self.cleaning_logs.count_cleaning_logs(scope, &cleanings),
            feedback.count_feedback(scope, &low_rated),
            feedback.count_by_issue_type(scope, &in_window),
        )?;
        let daily_trends =
            daily_trends(feedback, self.cleaning_logs.as_ref(), scope, window).await?;
        Ok(OverviewReport {
            total_feedback,
            average_rating: average.unwrap_or(0.0),
            total_cleanings,
            low_rating_count,
            issue_distribution: issues
                .into_iter()
                .map(|item| IssueShare {
                    issue: item.issue_type,
                    count: item.count,
                })
                .collect(),
            daily_trends,
        })
    }

    /// 评分分布（不补零）与每日评分分布。
    pub async fn ratings(
        &self,
        scope: &ScopeFilter,
        window: &Window,
    ) -> Result<RatingsReport, AnalyticsError> {
        let distribution = self
            .feedback
            .count_by_rating(scope, &FeedbackFilter::within(window.range()))
            .await?;
        let trends = rating_trends(self.feedback.as_ref(), scope, window).await?;
        Ok(RatingsReport {
            distribution: distribution
                .into_iter()
                .map(|item| RatingBucket {
                    rating: item.rating,
                    count: item.count,
                })
                .collect(),
            trends,
        })
    }

    /// 员工保洁表现。
    ///
    /// 每条保洁记录取其厕位在窗口内全部反馈的平均分（无反馈记 0），
    /// 员工平均分 = 各记录平均分之和 / max(记录数, 1)。
    pub async fn cleaning(
        &self,
        scope: &ScopeFilter,
        window: &Window,
    ) -> Result<CleaningReport, AnalyticsError> {
        let staff_filter = StaffFilter {
            company_id: scope.company_id.clone(),
            active_only: true,
        };
        let log_filter = CleaningLogFilter::within(window.range());
        let feedback_filter = FeedbackFilter::within(window.range());
        let (staff, logs, toilet_groups) = tokio::try_join!(
            self.staff.list_staff(&staff_filter),
            self.cleaning_logs.list_cleaning_logs(scope, &log_filter, None),
            self.feedback.count_by_toilet(scope, &feedback_filter, 0),
        )?;

        let toilet_means: HashMap<&str, f64> = toilet_groups
            .iter()
            .map(|group| (group.toilet_id.as_str(), group.average_rating))
            .collect();
        let mut per_staff: HashMap<&str, (u64, f64)> = HashMap::new();
        for item in &logs {
            let mean = toilet_means
                .get(item.log.toilet_id.as_str())
                .copied()
                .unwrap_or(0.0);
            let entry = per_staff.entry(item.log.staff_id.as_str()).or_default();
            entry.0 += 1;
            entry.1 += mean;
        }

        let mut staff_performance: Vec<StaffPerformance> = staff
            .iter()
            .map(|member| {
                let (cleanings, sum) = per_staff
                    .get(member.staff_id.as_str())
                    .copied()
                    .unwrap_or((0, 0.0));
                StaffPerformance {
                    staff_id: member.staff_id.clone(),
                    staff_name: member.name.clone(),
                    cleanings,
                    average_rating: round1(sum / cleanings.max(1) as f64),
                }
            })
            .collect();
        staff_performance.sort_by(|a, b| b.cleanings.cmp(&a.cleanings));

        let total_cleanings: u64 = staff_performance.iter().map(|item| item.cleanings).sum();
        let average_cleanings_per_staff = if staff_performance.is_empty() {
            0.0
        } else {
            round1(total_cleanings as f64 / staff_performance.len() as f64)
        };
        Ok(CleaningReport {
            staff_performance,
            total_cleanings,
            average_cleanings_per_staff,
        })
    }

    /// 每日问题分布与低分厕位排行（前 10）。
    pub async fn issues(
        &self,
        scope: &ScopeFilter,
        window: &Window,
    ) -> Result<IssuesReport, AnalyticsError> {
        let trends = issue_trends(self.feedback.as_ref(), scope, window).await?;
        let low_rated = FeedbackFilter {
            max_rating: Some(LOW_RATING_MAX),
            ..FeedbackFilter::within(window.range())
        };
        let groups = self.feedback.count_by_toilet(scope, &low_rated, 0).await?;
        let mut problematic_toilets = Vec::with_capacity(PROBLEMATIC_TOILET_LIMIT);
        for group in groups {
            if problematic_toilets.len() == PROBLEMATIC_TOILET_LIMIT {
                break;
            }
            let Some(detail) = self.toilets.find_toilet(&group.toilet_id).await? else {
                continue;
            };
            problematic_toilets.push(ProblematicToilet {
                toilet_id: group.toilet_id,
                toilet_number: detail.toilet.toilet_number,
                location: detail.path.label(),
                issue_count: group.count,
                average_rating: group.average_rating,
            });
        }
        Ok(IssuesReport {
            trends,
            problematic_toilets,
        })
    }
}
