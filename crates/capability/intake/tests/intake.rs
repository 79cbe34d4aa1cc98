use chrono::{DateTime, Duration, TimeZone, Utc};
use domain::{AlertType, ChecklistItem, IssueType, ScopeFilter};
use sanimon_alerts::AlertEngine;
use sanimon_intake::{
    ChecklistInput, CleaningLogQuery, FeedbackQuery, IntakeError, IntakeService, NewCleaningLog,
    NewFeedback, Paged, parse_checklist, resolve_page,
};
use sanimon_storage::{
    CleaningLogFilter, CleaningLogStore, DEMO_CLEANER_ID, InMemoryFacilityStore, ToiletStore,
};
use sanimon_telemetry::metrics;
use std::sync::Arc;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 15, 10, 30, 0).unwrap()
}

fn setup() -> (Arc<InMemoryFacilityStore>, IntakeService) {
    let store = Arc::new(InMemoryFacilityStore::with_demo_fleet(now()).expect("demo fleet"));
    let service = IntakeService::new(store.clone(), store.clone(), store.clone(), store.clone());
    (store, service)
}

fn cleaning(toilet_id: &str, staff_id: &str) -> NewCleaningLog {
    NewCleaningLog {
        toilet_id: toilet_id.to_string(),
        staff_id: staff_id.to_string(),
        checklist: vec!["FLOOR_CLEANED", "SUPPLIES_REFILLED"].into(),
        notes: Some("  restocked soap ".to_string()),
        photo_url: None,
    }
}

fn feedback(toilet_id: &str, rating: Option<i64>) -> NewFeedback {
    NewFeedback {
        toilet_id: toilet_id.to_string(),
        rating,
        ..NewFeedback::default()
    }
}

#[tokio::test]
async fn log_cleaning_advances_schedule() {
    let (store, service) = setup();
    let cleaned_at = now() + Duration::hours(5);
    let outcome = service
        .log_cleaning(cleaning("toilet-101", DEMO_CLEANER_ID), cleaned_at)
        .await
        .expect("log cleaning");

    assert_eq!(outcome.log.toilet_id, "toilet-101");
    assert_eq!(outcome.log.cleaned_at, cleaned_at);
    assert_eq!(
        outcome.log.checklist,
        vec![ChecklistItem::FloorCleaned, ChecklistItem::SuppliesRefilled]
    );
    assert_eq!(outcome.log.notes.as_deref(), Some("restocked soap"));
    assert_eq!(outcome.toilet.last_cleaned_at, Some(cleaned_at));
    assert_eq!(outcome.toilet.next_cleaning_due, Some(cleaned_at + Duration::hours(2)));

    let stored = store
        .find_toilet("toilet-101")
        .await
        .expect("find")
        .expect("toilet");
    assert_eq!(stored.toilet.next_cleaning_due, outcome.toilet.next_cleaning_due);
}

#[tokio::test]
async fn logged_cleaning_clears_missed_cleaning_alert() {
    let (store, service) = setup();
    let alerts = AlertEngine::new(store.clone(), store.clone());
    // 演示厕位在 now + 2h 到期；三小时后它已超时
    let later = now() + Duration::hours(3);
    let before = alerts
        .get_alerts(&ScopeFilter::all(), None, later)
        .await
        .expect("alerts");
    assert!(before.alerts.iter().any(|alert| {
        alert.alert_type == AlertType::MissedCleaning && alert.toilet_id == "toilet-102"
    }));

    service
        .log_cleaning(cleaning("toilet-102", DEMO_CLEANER_ID), later)
        .await
        .expect("log cleaning");
    let after = alerts
        .get_alerts(&ScopeFilter::all(), None, later + Duration::minutes(1))
        .await
        .expect("alerts");
    assert!(!after.alerts.iter().any(|alert| {
        alert.alert_type == AlertType::MissedCleaning && alert.toilet_id == "toilet-102"
    }));
}

#[tokio::test]
async fn log_cleaning_rejects_missing_fields_before_store_access() {
    let (store, service) = setup();
    let err = service
        .log_cleaning(cleaning("  ", DEMO_CLEANER_ID), now())
        .await
        .expect_err("blank toilet");
    assert!(matches!(err, IntakeError::Validation(_)));

    let mut bad_checklist = cleaning("toilet-001", DEMO_CLEANER_ID);
    bad_checklist.checklist = vec!["FLOOR_CLEANED", "POLISHED"].into();
    let err = service
        .log_cleaning(bad_checklist, now())
        .await
        .expect_err("unknown checklist item");
    assert!(matches!(err, IntakeError::Validation(message) if message.contains("POLISHED")));

    let total = store
        .count_cleaning_logs(&ScopeFilter::all(), &CleaningLogFilter::default())
        .await
        .expect("count");
    assert_eq!(total, 3);
}

#[tokio::test]
async fn log_cleaning_reports_unknown_references() {
    let (_store, service) = setup();
    let err = service
        .log_cleaning(cleaning("toilet-404", DEMO_CLEANER_ID), now())
        .await
        .expect_err("unknown toilet");
    assert!(matches!(err, IntakeError::NotFound("toilet")));

    let err = service
        .log_cleaning(cleaning("toilet-001", "staff-404"), now())
        .await
        .expect_err("unknown staff");
    assert!(matches!(err, IntakeError::NotFound("staff")));
}

#[tokio::test]
async fn submit_feedback_validates_rating() {
    let (_store, service) = setup();
    for rating in [None, Some(0), Some(6), Some(-1)] {
        let err = service
            .submit_feedback(feedback("toilet-001", rating), now())
            .await
            .expect_err("invalid rating");
        assert!(matches!(err, IntakeError::Validation(_)), "rating {rating:?}");
    }

    let mut unknown_issue = feedback("toilet-001", Some(3));
    unknown_issue.issue_type = Some("LEAKY_ROOF".to_string());
    let err = service
        .submit_feedback(unknown_issue, now())
        .await
        .expect_err("unknown issue type");
    assert!(matches!(err, IntakeError::Validation(_)));

    let err = service
        .submit_feedback(feedback("toilet-404", Some(4)), now())
        .await
        .expect_err("unknown toilet");
    assert!(matches!(err, IntakeError::NotFound("toilet")));
}

#[tokio::test]
async fn low_rating_feedback_is_counted() {
    let (_store, service) = setup();
    let before = metrics().snapshot();
    let mut request = feedback("toilet-002", Some(1));
    request.issue_type = Some("NO_WATER".to_string());
    request.comment = Some(String::new());
    let record = service
        .submit_feedback(request, now())
        .await
        .expect("submit");
    assert_eq!(record.rating, 1);
    assert_eq!(record.issue_type, Some(IssueType::NoWater));
    assert_eq!(record.comment, None);
    assert_eq!(record.created_at, now());

    let after = metrics().snapshot();
    assert!(after.feedback_submitted > before.feedback_submitted);
    assert!(after.low_rating_feedback > before.low_rating_feedback);
}

#[tokio::test]
async fn list_feedback_paginates_newest_first() {
    let (_store, service) = setup();
    let page = service
        .list_feedback(
            &ScopeFilter::all(),
            FeedbackQuery {
                limit: Some(2),
                ..FeedbackQuery::default()
            },
        )
        .await
        .expect("first page");
    assert_eq!(page.total, 5);
    assert!(page.has_more());
    let ids: Vec<&str> = page
        .items
        .iter()
        .map(|item| item.feedback.feedback_id.as_str())
        .collect();
    assert_eq!(ids, vec!["feedback-demo-1", "feedback-demo-2"]);

    let last = service
        .list_feedback(
            &ScopeFilter::all(),
            FeedbackQuery {
                limit: Some(2),
                offset: Some(4),
                ..FeedbackQuery::default()
            },
        )
        .await
        .expect("last page");
    assert_eq!(last.items.len(), 1);
    assert!(!last.has_more());

    let one_toilet = service
        .list_feedback(
            &ScopeFilter::all(),
            FeedbackQuery {
                toilet_id: Some("toilet-003".to_string()),
                ..FeedbackQuery::default()
            },
        )
        .await
        .expect("toilet filter");
    assert_eq!(one_toilet.total, 1);
    assert_eq!(one_toilet.limit, 50);
}

#[tokio::test]
async fn list_cleaning_logs_filters_by_staff() {
    let (_store, service) = setup();
    let page = service
        .list_cleaning_logs(
            &ScopeFilter::all(),
            CleaningLogQuery {
                staff_id: Some(DEMO_CLEANER_ID.to_string()),
                ..CleaningLogQuery::default()
            },
        )
        .await
        .expect("cleaner logs");
    assert_eq!(page.total, 3);
    assert!(!page.has_more());
    assert!(page.items.iter().all(|item| item.staff_name.as_deref() == Some("Ramesh Kumar")));

    let none = service
        .list_cleaning_logs(
            &ScopeFilter::all(),
            CleaningLogQuery {
                staff_id: Some("staff-sita".to_string()),
                ..CleaningLogQuery::default()
            },
        )
        .await
        .expect("supervisor logs");
    assert_eq!(none.total, 0);
    assert!(none.items.is_empty());
}

#[test]
fn resolve_page_defaults_and_bounds() {
    let page = resolve_page(None, None).expect("defaults");
    assert_eq!((page.limit, page.offset), (50, 0));
    assert!(resolve_page(Some(0), None).is_err());
    assert!(resolve_page(Some(201), None).is_err());
    assert!(resolve_page(Some(10), Some(-1)).is_err());
}

#[tokio::test]
async fn log_cleaning_accepts_encoded_checklist() {
    let (_store, service) = setup();
    let mut request = cleaning("toilet-102", DEMO_CLEANER_ID);
    request.checklist =
        ChecklistInput::Encoded(r#"["SEAT_SANITIZED","TRASH_CLEARED","SEAT_SANITIZED"]"#.to_string());
    let outcome = service
        .log_cleaning(request, now())
        .await
        .expect("log cleaning");
    assert_eq!(
        outcome.log.checklist,
        vec![ChecklistItem::SeatSanitized, ChecklistItem::TrashCleared]
    );
}

#[test]
fn checklist_parsing_dedupes_and_validates() {
    let tags = ChecklistInput::from(vec!["WATER_AVAILABLE", "FLOOR_CLEANED", "WATER_AVAILABLE"]);
    let items = parse_checklist(&tags).expect("tags");
    assert_eq!(items, vec![ChecklistItem::WaterAvailable, ChecklistItem::FloorCleaned]);

    let items = parse_checklist(&ChecklistInput::Encoded("  ".to_string())).expect("blank");
    assert!(items.is_empty());

    let err = parse_checklist(&ChecklistInput::Encoded("FLOOR_CLEANED".to_string()))
        .expect_err("not a json array");
    assert!(
        matches!(err, IntakeError::Validation(message) if message.starts_with("invalid checklist"))
    );

    let err = parse_checklist(&ChecklistInput::Encoded(r#"["MOPPED"]"#.to_string()))
        .expect_err("unknown item");
    assert!(matches!(err, IntakeError::Validation(message) if message.contains("MOPPED")));
}

#[tokio::test]
async fn far_offset_returns_empty_page() {
    let (_store, service) = setup();
    let page = service
        .list_feedback(
            &ScopeFilter::all(),
            FeedbackQuery {
                offset: Some(i64::MAX),
                ..FeedbackQuery::default()
            },
        )
        .await
        .expect("list feedback");
    assert!(page.items.is_empty());
    assert_eq!(page.total, 5);
    assert!(!page.has_more());

    let page = service
        .list_cleaning_logs(
            &ScopeFilter::all(),
            CleaningLogQuery {
                limit: Some(200),
                offset: Some(i64::MAX - 1),
                ..CleaningLogQuery::default()
            },
        )
        .await
        .expect("list cleaning logs");
    assert!(page.items.is_empty());
    assert!(!page.has_more());
}

#[test]
fn has_more_compares_next_offset_with_total() {
    let page = |offset, total| Paged::<()> {
        items: Vec::new(),
        total,
        limit: 2,
        offset,
    };
    assert!(page(0, 3).has_more());
    assert!(!page(1, 3).has_more());
    assert!(!page(i64::MAX, 5).has_more());
}
