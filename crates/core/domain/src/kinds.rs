//! 封闭枚举：告警类型、严重级别、问题类型、保洁清单项、厕位状态、员工角色。
//!
//! 所有枚举与其字符串形式一一对应（存储列、查询参数、JSON 字段均使用同一形式），
//! 未知字符串一律解析失败，避免拼写错误静默地变成"匹配不到任何记录"的过滤条件。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 枚举字符串解析失败。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind}: {value}")]
pub struct ParseKindError {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! string_kind {
    (
        $(#[$meta:meta])*
        $name:ident, $label:literal, $rename:literal {
            $($variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = $rename)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseKindError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                match value.trim() {
                    $($text => Ok($name::$variant),)+
                    other => Err(ParseKindError {
                        kind: $label,
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

string_kind! {
    /// 告警严重级别（critical > high > medium > low）。
    Severity, "severity", "lowercase" {
        Low => "low",
        Medium => "medium",
        High => "high",
        Critical => "critical",
    }
}

impl Severity {
    /// 排序权重：critical=4, high=3, medium=2, low=1。
    pub fn rank(&self) -> u8 {
        match self {
            Severity::Critical => 4,
            Severity::High => 3,
            Severity::Medium => 2,
            Severity::Low => 1,
        }
    }
}

string_kind! {
    /// 告警类型。
    AlertType, "alert type", "SCREAMING_SNAKE_CASE" {
        LowRating => "LOW_RATING",
        MissedCleaning => "MISSED_CLEANING",
        MultipleComplaints => "MULTIPLE_COMPLAINTS",
        NoCleaningLog => "NO_CLEANING_LOG",
        EmergencyIssue => "EMERGENCY_ISSUE",
        Manual => "MANUAL",
    }
}

string_kind! {
    /// 用户反馈中的问题类型。
    IssueType, "issue type", "SCREAMING_SNAKE_CASE" {
        NoWater => "NO_WATER",
        BrokenFixtures => "BROKEN_FIXTURES",
        NoSoap => "NO_SOAP",
        NoTissue => "NO_TISSUE",
        DirtyFloor => "DIRTY_FLOOR",
        WetFloor => "WET_FLOOR",
        BadSmell => "BAD_SMELL",
        TrashOverflow => "TRASH_OVERFLOW",
        Other => "OTHER",
    }
}

impl IssueType {
    /// 需要在一小时内升级为紧急告警的问题。
    pub const EMERGENCY: &'static [IssueType] = &[IssueType::NoWater, IssueType::BrokenFixtures];

    pub fn is_emergency(&self) -> bool {
        Self::EMERGENCY.contains(self)
    }

    /// 面向展示的文本，例如 `NO WATER`。
    pub fn label(&self) -> String {
        self.as_str().replace('_', " ")
    }
}

string_kind! {
    /// 保洁清单项。
    ChecklistItem, "checklist item", "SCREAMING_SNAKE_CASE" {
        FloorCleaned => "FLOOR_CLEANED",
        SeatSanitized => "SEAT_SANITIZED",
        TrashCleared => "TRASH_CLEARED",
        SuppliesRefilled => "SUPPLIES_REFILLED",
        MirrorCleaned => "MIRROR_CLEANED",
        DoorHandlesSanitized => "DOOR_HANDLES_SANITIZED",
        WaterAvailable => "WATER_AVAILABLE",
    }
}

string_kind! {
    /// 厕位运行状态。
    ToiletStatus, "toilet status", "SCREAMING_SNAKE_CASE" {
        Active => "ACTIVE",
        Inactive => "INACTIVE",
        Maintenance => "MAINTENANCE",
    }
}

string_kind! {
    /// 员工角色。
    StaffRole, "staff role", "SCREAMING_SNAKE_CASE" {
        Cleaner => "CLEANER",
        Supervisor => "SUPERVISOR",
        Manager => "MANAGER",
    }
}
