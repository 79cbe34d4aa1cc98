use api_contract::{
    AlertActionRequest, AnalyticsQuery, ChecklistField, CleaningLogDto, CleaningLogEntryDto, LogCleaningRequest,
    PaginationDto, ToiletSummaryDto,
};
use serde_json::Value;

#[test]
fn alert_action_reads_type_field() {
    let payload = r#"{"action":"create","type":"LOW_RATING","toiletId":"toilet-1","message":"mop"}"#;
    let req: AlertActionRequest = serde_json::from_str(payload).expect("parse");
    assert_eq!(req.action.as_deref(), Some("create"));
    assert_eq!(req.alert_type.as_deref(), Some("LOW_RATING"));
    assert_eq!(req.toilet_id.as_deref(), Some("toilet-1"));
    assert!(req.severity.is_none());
    assert!(req.alert_id.is_none());
}

#[test]
fn analytics_query_reads_type_field() {
    let payload = r#"{"type":"cleaning","period":"30d","companyId":"company-1"}"#;
    let query: AnalyticsQuery = serde_json::from_str(payload).expect("parse");
    assert_eq!(query.report_type.as_deref(), Some("cleaning"));
    assert_eq!(query.period.as_deref(), Some("30d"));
    assert_eq!(query.company_id.as_deref(), Some("company-1"));
}

#[test]
fn log_cleaning_checklist_defaults_to_empty() {
    let payload = r#"{"toiletId":"toilet-1","staffId":"staff-1"}"#;
    let req: LogCleaningRequest = serde_json::from_str(payload).expect("parse");
    assert!(req.checklist.is_none());
    assert_eq!(req.staff_id.as_deref(), Some("staff-1"));

    let req: LogCleaningRequest = serde_json::from_str(r#"{"checklist":null}"#).expect("parse");
    assert!(req.checklist.is_none());
}

#[test]
fn log_cleaning_checklist_accepts_both_forms() {
    let payload = r#"{"checklist":["FLOOR_CLEANED","TRASH_CLEARED"]}"#;
    let req: LogCleaningRequest = serde_json::from_str(payload).expect("parse");
    assert_eq!(
        req.checklist,
        Some(ChecklistField::Items(vec![
            "FLOOR_CLEANED".to_string(),
            "TRASH_CLEARED".to_string()
        ]))
    );

    let payload = r#"{"checklist":"[\"FLOOR_CLEANED\"]"}"#;
    let req: LogCleaningRequest = serde_json::from_str(payload).expect("parse");
    assert_eq!(
        req.checklist,
        Some(ChecklistField::Encoded(r#"["FLOOR_CLEANED"]"#.to_string()))
    );
}

#[test]
fn pagination_is_camel_case() {
    let dto = PaginationDto {
        total: 12,
        limit: 5,
        offset: 10,
        has_more: false,
    };
    let value = serde_json::to_value(dto).expect("serialize");
    assert_eq!(value.get("hasMore"), Some(&Value::Bool(false)));
    assert!(value.get("has_more").is_none());
}

#[test]
fn cleaning_log_entry_flattens_log_fields() {
    let dto = CleaningLogEntryDto {
        log: CleaningLogDto {
            id: "log-1".to_string(),
            toilet_id: "toilet-1".to_string(),
            staff_id: "staff-1".to_string(),
            checklist: vec!["FLOOR_CLEANED".to_string()],
            notes: None,
            photo_url: None,
            cleaned_at: "2024-03-15T10:30:00.000Z".to_string(),
        },
        staff_name: Some("Ramesh Kumar".to_string()),
        toilet: ToiletSummaryDto {
            id: "toilet-1".to_string(),
            toilet_number: "T-001".to_string(),
            location: "Main Building - Ground Floor".to_string(),
            location_id: "location-main".to_string(),
        },
    };
    let value = serde_json::to_value(dto).expect("serialize");
    assert_eq!(value["id"], "log-1");
    assert_eq!(value["cleanedAt"], "2024-03-15T10:30:00.000Z");
    assert_eq!(value["staffName"], "Ramesh Kumar");
    assert_eq!(value["toilet"]["toiletNumber"], "T-001");
}
