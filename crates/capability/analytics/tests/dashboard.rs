use chrono::{DateTime, Duration, TimeZone, Utc};
use domain::{ScopeFilter, StaffRole};
use sanimon_analytics::{AnalyticsEngine, utc_day_of};
use sanimon_storage::{DEMO_CLEANER_ID, DEMO_COMPANY_ID, InMemoryFacilityStore};
use std::sync::Arc;

fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 15, hour, minute, 0).unwrap()
}

fn engine(now: DateTime<Utc>) -> AnalyticsEngine {
    let store = Arc::new(InMemoryFacilityStore::with_demo_fleet(now).expect("demo fleet"));
    AnalyticsEngine::new(store.clone(), store.clone(), store.clone(), store)
}

#[test]
fn utc_day_starts_at_midnight() {
    let day = utc_day_of(at(10, 30));
    assert_eq!(day.from, at(0, 0));
    assert_eq!(day.to, Some(at(0, 0) + Duration::days(1)));
}

#[tokio::test]
async fn dashboard_summarizes_company() {
    let now = at(10, 30);
    let dashboard = engine(now)
        .dashboard(&ScopeFilter::for_company(DEMO_COMPANY_ID), now)
        .await
        .expect("dashboard");

    let stats = &dashboard.stats;
    assert_eq!(stats.total_toilets, 6);
    assert_eq!(stats.average_rating, 3.0);
    assert_eq!(stats.total_feedback, 5);
    assert_eq!(stats.todays_feedback, 5);
    assert_eq!(stats.overdue_cleanings, 0);
    assert_eq!(stats.low_rating_alerts, 2);
    assert_eq!(stats.todays_cleaning, 3);

    assert_eq!(dashboard.recent_feedback.len(), 5);
    let newest = &dashboard.recent_feedback[0];
    assert_eq!(newest.id, "feedback-demo-1");
    assert_eq!(newest.toilet.toilet_number, "T-001");
    assert_eq!(newest.toilet.location, "Main Building - Floor 0");

    assert_eq!(dashboard.staff_performance.len(), 2);
    let cleaner = &dashboard.staff_performance[0];
    assert_eq!(cleaner.id, DEMO_CLEANER_ID);
    assert_eq!(cleaner.role, StaffRole::Cleaner);
    assert_eq!(cleaner.today_cleanings, 3);
    assert_eq!(dashboard.staff_performance[1].today_cleanings, 0);

    assert_eq!(dashboard.issue_distribution.len(), 3);
    assert_eq!(dashboard.last_updated, now);
}

#[tokio::test]
async fn dashboard_without_company_has_no_staff_rows() {
    let now = at(10, 30);
    let dashboard = engine(now)
        .dashboard(&ScopeFilter::all(), now)
        .await
        .expect("dashboard");
    assert!(dashboard.staff_performance.is_empty());
    assert_eq!(dashboard.stats.total_toilets, 6);
}

#[tokio::test]
async fn dashboard_today_counts_stop_at_midnight() {
    // 演示反馈在 00:20、00:10、00:00、前一天 23:50、23:40
    let now = at(0, 30);
    let dashboard = engine(now)
        .dashboard(&ScopeFilter::all(), now)
        .await
        .expect("dashboard");
    assert_eq!(dashboard.stats.todays_feedback, 3);
    assert_eq!(dashboard.stats.low_rating_alerts, 2);
    // 演示保洁时间为前一天 22:30
    assert_eq!(dashboard.stats.todays_cleaning, 0);
}

#[tokio::test]
async fn dashboard_serializes_camel_case() {
    let now = at(10, 30);
    let dashboard = engine(now)
        .dashboard(&ScopeFilter::for_company(DEMO_COMPANY_ID), now)
        .await
        .expect("dashboard");
    let value = serde_json::to_value(&dashboard).expect("serialize");
    assert_eq!(value["stats"]["totalToilets"], 6);
    assert_eq!(value["recentFeedback"][0]["toilet"]["toiletNumber"], "T-001");
    assert_eq!(value["staffPerformance"][0]["todayCleanings"], 3);
    assert!(value["lastUpdated"].is_string());
}
