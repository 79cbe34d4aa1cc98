use chrono::{DateTime, Duration, TimeZone, Utc};
use domain::{AlertType, IssueType, ScopeFilter, Severity, ToiletStatus};
use sanimon_alerts::{AlertData, AlertEngine, AlertError, ManualAlertInput, parse_severity};
use sanimon_storage::{
    CleaningLogRecord, CleaningLogStore, CompanyRecord, FeedbackRecord, FloorRecord,
    InMemoryFacilityStore, LocationRecord, ToiletRecord,
};
use std::sync::Arc;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 15, 10, 30, 0).unwrap()
}

/// 一家公司一个位置一层楼；另有 company-b 下的 toilet-b。
fn fleet() -> Arc<InMemoryFacilityStore> {
    let store = InMemoryFacilityStore::new();
    for (company_id, location_id) in [("company-a", "location-a"), ("company-b", "location-b")] {
        store
            .insert_company(CompanyRecord {
                company_id: company_id.to_string(),
                name: company_id.to_string(),
            })
            .expect("company");
        store
            .insert_location(LocationRecord {
                location_id: location_id.to_string(),
                company_id: company_id.to_string(),
                name: "Main Building".to_string(),
                address: None,
            })
            .expect("location");
        store
            .insert_floor(FloorRecord {
                floor_id: format!("floor-{location_id}"),
                location_id: location_id.to_string(),
                floor_number: "0".to_string(),
                name: "Ground Floor".to_string(),
            })
            .expect("floor");
    }
    Arc::new(store)
}

/// 刚保洁过、排期在未来的厕位（不会触发任何规则）。
fn clean_toilet(toilet_id: &str, number: &str) -> ToiletRecord {
    ToiletRecord {
        toilet_id: toilet_id.to_string(),
        floor_id: "floor-location-a".to_string(),
        toilet_number: number.to_string(),
        qr_code: format!("qr-{toilet_id}"),
        cleaning_frequency_hours: 2,
        last_cleaned_at: Some(now() - Duration::hours(1)),
        next_cleaning_due: Some(now() + Duration::hours(1)),
        status: ToiletStatus::Active,
    }
}

fn feedback(
    id: &str,
    toilet_id: &str,
    rating: u8,
    issue_type: Option<IssueType>,
    age: Duration,
) -> FeedbackRecord {
    FeedbackRecord {
        feedback_id: id.to_string(),
        toilet_id: toilet_id.to_string(),
        rating,
        issue_type,
        comment: Some(format!("comment {id}")),
        photo_url: None,
        user_agent: None,
        ip_address: None,
        created_at: now() - age,
    }
}

fn engine(store: &Arc<InMemoryFacilityStore>) -> AlertEngine {
    AlertEngine::new(store.clone(), store.clone())
}

#[tokio::test]
async fn low_rating_severity_follows_rating() {
    let store = fleet();
    store.insert_toilet(clean_toilet("toilet-1", "T-001")).expect("toilet");
    store.insert_feedback(feedback("f1", "toilet-1", 1, None, Duration::hours(2))).expect("f1");
    store.insert_feedback(feedback("f2", "toilet-1", 2, None, Duration::hours(3))).expect("f2");
    store.insert_feedback(feedback("f3", "toilet-1", 3, None, Duration::hours(1))).expect("f3");
    store.insert_feedback(feedback("f4", "toilet-1", 1, None, Duration::hours(25))).expect("f4");

    let feed = engine(&store)
        .get_alerts(&ScopeFilter::all(), None, now())
        .await
        .expect("alerts");
    let low: Vec<_> = feed
        .alerts
        .iter()
        .filter(|alert| alert.alert_type == AlertType::LowRating)
        .collect();
    assert_eq!(low.len(), 2);
    assert_eq!(low[0].id, "low-rating-f1");
    assert_eq!(low[0].severity, Severity::Critical);
    assert_eq!(low[0].message, "Toilet T-001 received a 1-star rating");
    assert_eq!(low[0].location_label, "Main Building - Ground Floor");
    assert_eq!(low[1].id, "low-rating-f2");
    assert_eq!(low[1].severity, Severity::High);
    assert_eq!(low[1].created_at, now() - Duration::hours(3));
}

#[tokio::test]
async fn missed_cleaning_escalates_after_four_hours() {
    let store = fleet();
    let mut late = clean_toilet("toilet-late", "T-002");
    late.next_cleaning_due = Some(now() - Duration::minutes(5 * 60 + 30));
    late.last_cleaned_at = Some(now() - Duration::hours(7));
    late.cleaning_frequency_hours = 24;
    store.insert_toilet(late).expect("late");
    let mut recent = clean_toilet("toilet-recent", "T-003");
    recent.next_cleaning_due = Some(now() - Duration::hours(3));
    store.insert_toilet(recent).expect("recent");
    let mut closed = clean_toilet("toilet-closed", "T-004");
    closed.status = ToiletStatus::Inactive;
    closed.next_cleaning_due = Some(now() - Duration::hours(10));
    store.insert_toilet(closed).expect("closed");

    let feed = engine(&store)
        .get_alerts(&ScopeFilter::all(), None, now())
        .await
        .expect("alerts");
    let missed: Vec<_> = feed
        .alerts
        .iter()
        .filter(|alert| alert.alert_type == AlertType::MissedCleaning)
        .collect();
    assert_eq!(missed.len(), 2);
    let late = missed
        .iter()
        .find(|alert| alert.toilet_id == "toilet-late")
        .expect("late alert");
    assert_eq!(late.severity, Severity::High);
    assert_eq!(late.message, "Toilet T-002 is 5 hours overdue for cleaning");
    assert_eq!(late.created_at, now() - Duration::minutes(5 * 60 + 30));
    match late.data.as_ref().expect("data") {
        AlertData::MissedCleaning {
            hours_overdue,
            cleaning_frequency,
            ..
        } => {
            assert_eq!(*hours_overdue, 5);
            assert_eq!(*cleaning_frequency, 24);
        }
        other => panic!("unexpected payload {other:?}"),
    }
    let recent = missed
        .iter()
        .find(|alert| alert.toilet_id == "toilet-recent")
        .expect("recent alert");
    assert_eq!(recent.severity, Severity::Medium);
}

#[tokio::test]
async fn multiple_complaints_needs_more_than_two() {
    let store = fleet();
    store.insert_toilet(clean_toilet("toilet-1", "T-001")).expect("toilet");
    store.insert_toilet(clean_toilet("toilet-2", "T-002")).expect("toilet");
    for index in 0..3 {
        store
            .insert_feedback(feedback(&format!("a{index}"), "toilet-1", 2, None, Duration::hours(1)))
            .expect("insert");
    }
    for index in 0..2 {
        store
            .insert_feedback(feedback(&format!("b{index}"), "toilet-2", 1, None, Duration::hours(1)))
            .expect("insert");
    }

    let feed = engine(&store)
        .get_alerts(&ScopeFilter::all(), None, now())
        .await
        .expect("alerts");
    let complaints: Vec<_> = feed
        .alerts
        .iter()
        .filter(|alert| alert.alert_type == AlertType::MultipleComplaints)
        .collect();
    assert_eq!(complaints.len(), 1);
    assert_eq!(complaints[0].id, "multiple-complaints-toilet-1");
    assert_eq!(complaints[0].severity, Severity::High);
    assert_eq!(complaints[0].created_at, now());
    assert_eq!(
        complaints[0].data,
        Some(AlertData::MultipleComplaints { complaint_count: 3 })
    );
}

#[tokio::test]
async fn multiple_complaints_skips_vanished_toilet() {
    let store = fleet();
    store.insert_toilet(clean_toilet("toilet-gone", "T-009")).expect("toilet");
    for index in 0..3 {
        store
            .insert_feedback(feedback(&format!("g{index}"), "toilet-gone", 1, None, Duration::hours(1)))
            .expect("insert");
    }
    assert!(store.remove_toilet("toilet-gone").expect("remove"));

    let before = sanimon_telemetry::metrics().snapshot().alert_toilets_missing;
    let feed = engine(&store)
        .get_alerts(&ScopeFilter::all(), None, now())
        .await
        .expect("alerts");
    assert!(
        feed.alerts
            .iter()
            .all(|alert| alert.alert_type != AlertType::MultipleComplaints)
    );
    let after = sanimon_telemetry::metrics().snapshot().alert_toilets_missing;
    assert!(after > before);
}

#[tokio::test]
async fn never_cleaned_toilet_uses_sentinel_hours() {
    let store = fleet();
    let mut never = clean_toilet("toilet-never", "T-010");
    never.last_cleaned_at = None;
    never.next_cleaning_due = None;
    store.insert_toilet(never).expect("never");
    let mut daily = clean_toilet("toilet-daily", "T-011");
    daily.last_cleaned_at = Some(now() - Duration::hours(30));
    daily.next_cleaning_due = Some(now() + Duration::hours(1));
    daily.cleaning_frequency_hours = 24;
    store.insert_toilet(daily).expect("daily");
    let mut twice = clean_toilet("toilet-twice", "T-012");
    twice.last_cleaned_at = Some(now() - Duration::hours(30));
    twice.next_cleaning_due = Some(now() + Duration::hours(1));
    twice.cleaning_frequency_hours = 12;
    store.insert_toilet(twice).expect("twice");

    let feed = engine(&store)
        .get_alerts(&ScopeFilter::all(), None, now())
        .await
        .expect("alerts");
    let stale: Vec<_> = feed
        .alerts
        .iter()
        .filter(|alert| alert.alert_type == AlertType::NoCleaningLog)
        .collect();
    assert_eq!(stale.len(), 2);
    let never = stale
        .iter()
        .find(|alert| alert.toilet_id == "toilet-never")
        .expect("never alert");
    assert_eq!(never.severity, Severity::Medium);
    assert_eq!(never.created_at, DateTime::<Utc>::UNIX_EPOCH);
    assert_eq!(never.message, "Toilet T-010 hasn't been cleaned in 999 hours");
    assert_eq!(
        never.data,
        Some(AlertData::NoCleaningLog {
            hours_since_cleaning: 999,
            last_cleaned_at: None,
        })
    );
    assert!(stale.iter().any(|alert| alert.toilet_id == "toilet-twice"));
}

#[tokio::test]
async fn emergency_issues_within_the_hour_are_critical() {
    let store = fleet();
    store.insert_toilet(clean_toilet("toilet-1", "T-001")).expect("toilet");
    store
        .insert_feedback(feedback("w1", "toilet-1", 4, Some(IssueType::NoWater), Duration::minutes(30)))
        .expect("w1");
    store
        .insert_feedback(feedback("w2", "toilet-1", 4, Some(IssueType::BrokenFixtures), Duration::hours(2)))
        .expect("w2");
    store
        .insert_feedback(feedback("w3", "toilet-1", 4, Some(IssueType::NoSoap), Duration::minutes(10)))
        .expect("w3");

    let feed = engine(&store)
        .get_alerts(&ScopeFilter::all(), None, now())
        .await
        .expect("alerts");
    assert_eq!(feed.alerts.len(), 1);
    let alert = &feed.alerts[0];
    assert_eq!(alert.id, "emergency-w1");
    assert_eq!(alert.severity, Severity::Critical);
    assert_eq!(alert.message, "Toilet T-001 has NO WATER");
}

#[tokio::test]
async fn logging_a_cleaning_clears_missed_cleaning() {
    let store = fleet();
    let mut overdue = clean_toilet("toilet-1", "T-001");
    overdue.next_cleaning_due = Some(now() - Duration::hours(1));
    store.insert_toilet(overdue).expect("toilet");
    let engine = engine(&store);

    let before = engine
        .get_alerts(&ScopeFilter::all(), None, now())
        .await
        .expect("alerts");
    assert!(before.alerts.iter().any(|alert| alert.alert_type == AlertType::MissedCleaning));

    store
        .record_cleaning(CleaningLogRecord {
            log_id: "log-1".to_string(),
            toilet_id: "toilet-1".to_string(),
            staff_id: "staff-1".to_string(),
            checklist: Vec::new(),
            notes: None,
            photo_url: None,
            cleaned_at: now(),
        })
        .await
        .expect("record")
        .expect("toilet");

    let after = engine
        .get_alerts(&ScopeFilter::all(), None, now() + Duration::minutes(1))
        .await
        .expect("alerts");
    assert!(after.alerts.iter().all(|alert| alert.alert_type != AlertType::MissedCleaning));
}

#[tokio::test]
async fn severity_filter_keeps_full_summary() {
    let store = fleet();
    store.insert_toilet(clean_toilet("toilet-1", "T-001")).expect("toilet");
    store.insert_feedback(feedback("f1", "toilet-1", 1, None, Duration::hours(1))).expect("f1");
    store.insert_feedback(feedback("f2", "toilet-1", 2, None, Duration::hours(2))).expect("f2");
    let mut overdue = clean_toilet("toilet-2", "T-002");
    overdue.next_cleaning_due = Some(now() - Duration::hours(1));
    store.insert_toilet(overdue).expect("toilet");

    let feed = engine(&store)
        .get_alerts(&ScopeFilter::all(), Some(Severity::Critical), now())
        .await
        .expect("alerts");
    assert_eq!(feed.alerts.len(), 1);
    assert!(feed.alerts.iter().all(|alert| alert.severity == Severity::Critical));
    assert_eq!(feed.summary.total, 3);
    assert_eq!(feed.summary.critical, 1);
    assert_eq!(feed.summary.high, 1);
    assert_eq!(feed.summary.medium, 1);
}

#[tokio::test]
async fn repeated_evaluation_is_identical() {
    let store = Arc::new(InMemoryFacilityStore::with_demo_fleet(now()).expect("seed"));
    let engine = engine(&store);
    let first = engine
        .get_alerts(&ScopeFilter::all(), None, now())
        .await
        .expect("first");
    let second = engine
        .get_alerts(&ScopeFilter::all(), None, now())
        .await
        .expect("second");
    assert_eq!(first, second);
    assert_eq!(first.summary.total, 2);
}

#[tokio::test]
async fn scope_limits_every_rule() {
    let store = fleet();
    let mut other = clean_toilet("toilet-b", "T-B1");
    other.floor_id = "floor-location-b".to_string();
    other.next_cleaning_due = Some(now() - Duration::hours(2));
    store.insert_toilet(other).expect("toilet");
    store.insert_feedback(feedback("fb", "toilet-b", 1, Some(IssueType::NoWater), Duration::minutes(5))).expect("fb");

    let engine = engine(&store);
    let scoped = engine
        .get_alerts(&ScopeFilter::for_company("company-a"), None, now())
        .await
        .expect("alerts");
    assert!(scoped.alerts.is_empty());
    assert_eq!(scoped.summary.total, 0);

    let other = engine
        .get_alerts(&ScopeFilter::for_location("location-b"), None, now())
        .await
        .expect("alerts");
    assert_eq!(other.summary.total, 3);
    assert_eq!(other.alerts[0].severity, Severity::Critical);
}

#[tokio::test]
async fn manual_alert_defaults_to_medium() {
    let store = fleet();
    store.insert_toilet(clean_toilet("toilet-1", "T-001")).expect("toilet");
    let alert = engine(&store)
        .create_manual_alert(
            ManualAlertInput {
                alert_type: Some("MISSED_CLEANING".to_string()),
                toilet_id: Some("toilet-1".to_string()),
                message: Some("Please check".to_string()),
                severity: None,
            },
            now(),
        )
        .await
        .expect("manual");
    assert!(alert.is_manual);
    assert!(alert.id.starts_with("manual-"));
    assert_eq!(alert.severity, Severity::Medium);
    assert_eq!(alert.title, "Manual Alert: MISSED_CLEANING");
    assert_eq!(alert.toilet_number, "T-001");
    assert_eq!(alert.created_at, now());
}

#[tokio::test]
async fn manual_alert_validates_before_lookup() {
    let store = fleet();
    let engine = engine(&store);
    let missing = engine
        .create_manual_alert(
            ManualAlertInput {
                alert_type: Some("LOW_RATING".to_string()),
                toilet_id: Some("  ".to_string()),
                message: Some("x".to_string()),
                severity: None,
            },
            now(),
        )
        .await
        .expect_err("missing toilet id");
    assert!(matches!(missing, AlertError::Validation(_)));

    let unknown = engine
        .create_manual_alert(
            ManualAlertInput {
                alert_type: Some("SOMETHING".to_string()),
                toilet_id: Some("toilet-1".to_string()),
                message: Some("x".to_string()),
                severity: None,
            },
            now(),
        )
        .await
        .expect_err("unknown type");
    assert!(matches!(unknown, AlertError::Validation(_)));

    let not_found = engine
        .create_manual_alert(
            ManualAlertInput {
                alert_type: Some("LOW_RATING".to_string()),
                toilet_id: Some("toilet-404".to_string()),
                message: Some("x".to_string()),
                severity: Some("high".to_string()),
            },
            now(),
        )
        .await
        .expect_err("not found");
    assert!(matches!(not_found, AlertError::NotFound("toilet")));
}

#[test]
fn severity_filter_parsing() {
    assert_eq!(parse_severity(None).expect("none"), None);
    assert_eq!(parse_severity(Some(" ")).expect("blank"), None);
    assert_eq!(parse_severity(Some("high")).expect("high"), Some(Severity::High));
    assert!(matches!(parse_severity(Some("urgent")), Err(AlertError::Validation(_))));
}

#[tokio::test]
async fn acknowledge_is_accepted() {
    let store = fleet();
    let ack = engine(&store).acknowledge(Some("low-rating-f1"));
    assert!(ack.acknowledged);
    assert_eq!(ack.alert_id.as_deref(), Some("low-rating-f1"));
}
