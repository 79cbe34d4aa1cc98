//! 写入与列表请求模型。
//!
//! 字段保持调用方给出的原始形态（字符串、可选数值），由 `IntakeService` 统一校验与解析。

/// 列表默认条数。
pub const DEFAULT_PAGE_LIMIT: i64 = 50;
/// 列表单页上限。
pub const MAX_PAGE_LIMIT: i64 = 200;

/// 记录一次保洁。
#[derive(Debug, Clone, Default)]
pub struct NewCleaningLog {
    pub toilet_id: String,
    pub staff_id: String,
    pub checklist: ChecklistInput,
    pub notes: Option<String>,
    pub photo_url: Option<String>,
}

/// 清单项输入：字符串数组，或扫码页提交的 JSON 数组字符串。
///
/// 两种形态解析结果相同；未知项为校验错误，重复项只保留一次。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChecklistInput {
    Tags(Vec<String>),
    Encoded(String),
}

impl Default for ChecklistInput {
    fn default() -> Self {
        ChecklistInput::Tags(Vec::new())
    }
}

impl From<Vec<&str>> for ChecklistInput {
    fn from(tags: Vec<&str>) -> Self {
        ChecklistInput::Tags(tags.into_iter().map(str::to_string).collect())
    }
}

/// 提交一条用户反馈。
#[derive(Debug, Clone, Default)]
pub struct NewFeedback {
    pub toilet_id: String,
    pub rating: Option<i64>,
    pub issue_type: Option<String>,
    pub comment: Option<String>,
    pub photo_url: Option<String>,
    pub user_agent: Option<String>,
    pub ip_address: Option<String>,
}

/// 反馈列表条件。
#[derive(Debug, Clone, Default)]
pub struct FeedbackQuery {
    pub toilet_id: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// 保洁记录列表条件。
#[derive(Debug, Clone, Default)]
pub struct CleaningLogQuery {
    pub toilet_id: Option<String>,
    pub staff_id: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// 一页结果及总数。
#[derive(Debug, Clone)]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub limit: i64,
    pub offset: i64,
}

impl<T> Paged<T> {
    pub fn has_more(&self) -> bool {
        let next = self.offset.saturating_add(self.limit);
        u64::try_from(next).is_ok_and(|next| next < self.total)
    }
}
