//! 演示数据
//!
//! 一家公司、一个位置、两层楼、六个厕位（保洁频率 2 小时）、两名员工、
//! 五条反馈和三条保洁记录。所有时间相对传入的 `now` 计算，便于测试复现。

use super::facility::InMemoryFacilityStore;
use crate::error::StorageError;
use crate::models::{
    CleaningLogRecord, CompanyRecord, FeedbackRecord, FloorRecord, LocationRecord, StaffRecord,
    ToiletRecord,
};
use chrono::{DateTime, Duration, Utc};
use domain::{ChecklistItem, IssueType, StaffRole, ToiletStatus};

pub const DEMO_COMPANY_ID: &str = "company-demo";
pub const DEMO_LOCATION_ID: &str = "location-main";
pub const DEMO_CLEANER_ID: &str = "staff-ramesh";
pub const DEMO_SUPERVISOR_ID: &str = "staff-sita";

const DEMO_FEEDBACK: [(u8, Option<IssueType>, &str); 5] = [
    (5, None, "Very clean and well maintained!"),
    (4, None, "Good condition, could be better"),
    (2, Some(IssueType::NoSoap), "No soap in the dispenser"),
    (3, Some(IssueType::WetFloor), "Floor was wet, need to put up a sign"),
    (1, Some(IssueType::DirtyFloor), "Very dirty, needs immediate attention"),
];

impl InMemoryFacilityStore {
    /// 带演示数据的存储
    pub fn with_demo_fleet(now: DateTime<Utc>) -> Result<Self, StorageError> {
        let store = Self::new();
        store.seed_demo_fleet(now)?;
        Ok(store)
    }

    pub fn seed_demo_fleet(&self, now: DateTime<Utc>) -> Result<(), StorageError> {
        self.insert_company(CompanyRecord {
            company_id: DEMO_COMPANY_ID.to_string(),
            name: "Demo Facility Management".to_string(),
        })?;
        self.insert_location(LocationRecord {
            location_id: DEMO_LOCATION_ID.to_string(),
            company_id: DEMO_COMPANY_ID.to_string(),
            name: "Main Building".to_string(),
            address: Some("123 Demo Street, Mumbai".to_string()),
        })?;
        for (floor_number, name) in [("0", "Ground Floor"), ("1", "First Floor")] {
            self.insert_floor(FloorRecord {
                floor_id: format!("floor-{floor_number}"),
                location_id: DEMO_LOCATION_ID.to_string(),
                floor_number: floor_number.to_string(),
                name: name.to_string(),
            })?;
        }
        for (staff_id, name, phone, role) in [
            (DEMO_CLEANER_ID, "Ramesh Kumar", "+91-9876543211", StaffRole::Cleaner),
            (DEMO_SUPERVISOR_ID, "Sita Sharma", "+91-9876543212", StaffRole::Supervisor),
        ] {
            self.insert_staff(StaffRecord {
                staff_id: staff_id.to_string(),
                company_id: DEMO_COMPANY_ID.to_string(),
                name: name.to_string(),
                phone: Some(phone.to_string()),
                role,
                is_active: true,
            })?;
        }

        let last_cleaned = now - Duration::hours(2);
        let mut toilet_ids = Vec::new();
        for floor_number in ["0", "1"] {
            for index in 1..=3 {
                let suffix = format!("{floor_number}{index:02}");
                let toilet_id = format!("toilet-{suffix}");
                self.insert_toilet(ToiletRecord {
                    toilet_id: toilet_id.clone(),
                    floor_id: format!("floor-{floor_number}"),
                    toilet_number: format!("T-{suffix}"),
                    qr_code: format!("QR-{suffix}"),
                    cleaning_frequency_hours: 2,
                    last_cleaned_at: Some(last_cleaned),
                    next_cleaning_due: Some(now + Duration::hours(2)),
                    status: ToiletStatus::Active,
                })?;
                toilet_ids.push(toilet_id);
            }
        }

        for (index, (rating, issue_type, comment)) in DEMO_FEEDBACK.into_iter().enumerate() {
            self.insert_feedback(FeedbackRecord {
                feedback_id: format!("feedback-demo-{}", index + 1),
                toilet_id: toilet_ids[index].clone(),
                rating,
                issue_type,
                comment: Some(comment.to_string()),
                photo_url: None,
                user_agent: Some("Mozilla/5.0 (Demo Browser)".to_string()),
                ip_address: Some("192.168.1.100".to_string()),
                created_at: now - Duration::minutes(10 * (index as i64 + 1)),
            })?;
        }

        for (index, toilet_id) in toilet_ids.iter().take(3).enumerate() {
            self.insert_cleaning_log(CleaningLogRecord {
                log_id: format!("cleaning-demo-{}", index + 1),
                toilet_id: toilet_id.clone(),
                staff_id: DEMO_CLEANER_ID.to_string(),
                checklist: vec![
                    ChecklistItem::FloorCleaned,
                    ChecklistItem::SeatSanitized,
                    ChecklistItem::TrashCleared,
                ],
                notes: Some("Regular cleaning completed".to_string()),
                photo_url: None,
                cleaned_at: last_cleaned,
            })?;
        }
        Ok(())
    }
}
