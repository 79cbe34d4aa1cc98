//! 时间窗口计算。
//!
//! - resolve_window：周期标记（7d/30d/90d）→ [start, now]
//! - enumerate_days：把 [start, end] 切成连续的 24 小时日桶
//! - lookback：规则使用的固定回看窗口（24h、1h）
//!
//! 所有函数显式接收 `now`，不读取系统时钟。

use chrono::{DateTime, Duration, Utc};

/// 统计周期。未识别或缺省的标记一律视为 7 天。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    #[default]
    Days7,
    Days30,
    Days90,
}

impl Period {
    pub fn from_token(token: Option<&str>) -> Self {
        match token.map(str::trim) {
            Some("30d") => Period::Days30,
            Some("90d") => Period::Days90,
            _ => Period::Days7,
        }
    }

    pub fn days(&self) -> i64 {
        match self {
            Period::Days7 => 7,
            Period::Days30 => 30,
            Period::Days90 => 90,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Days7 => "7d",
            Period::Days30 => "30d",
            Period::Days90 => "90d",
        }
    }
}

/// 半开时间区间 `[from, to)`；`to` 为空表示不设上界。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub from: DateTime<Utc>,
    pub to: Option<DateTime<Utc>>,
}

impl TimeRange {
    pub fn since(from: DateTime<Utc>) -> Self {
        Self { from, to: None }
    }

    pub fn between(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self { from, to: Some(to) }
    }

    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        ts >= self.from && self.to.is_none_or(|to| ts < to)
    }
}

/// 统计窗口 `[start, end]`，end 即调用时的 now。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Window {
    /// 窗口范围查询条件（下界闭合，不设上界）。
    pub fn range(&self) -> TimeRange {
        TimeRange::since(self.start)
    }

    pub fn days(&self) -> Vec<DayBucket> {
        enumerate_days(self.start, self.end)
    }
}

/// 一个日桶：`[start, start + 24h)`。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayBucket {
    pub start: DateTime<Utc>,
}

impl DayBucket {
    pub fn end(&self) -> DateTime<Utc> {
        self.start + Duration::days(1)
    }

    pub fn range(&self) -> TimeRange {
        TimeRange::between(self.start, self.end())
    }

    /// 日期标签（UTC，`YYYY-MM-DD`）。
    pub fn date_label(&self) -> String {
        self.start.format("%Y-%m-%d").to_string()
    }
}

/// 根据周期标记计算窗口。
pub fn resolve_window(token: Option<&str>, now: DateTime<Utc>) -> Window {
    let period = Period::from_token(token);
    Window {
        start: now - Duration::days(period.days()),
        end: now,
    }
}

/// 枚举 [start, end] 内的日桶，首尾均包含。
///
/// 从 start 开始每次前进 24 小时，直到桶起点超过 end，
/// 长度为 `floor(跨度天数) + 1`：不足一天的尾段不单独成桶，
/// 它落在最后一个桶的 `[start, start + 24h)` 内。
/// resolve_window 只产生整天跨度，此时长度即 `天数 + 1`。
/// start > end 时返回空序列。
pub fn enumerate_days(start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<DayBucket> {
    let mut buckets = Vec::new();
    let mut cursor = start;
    while cursor <= end {
        buckets.push(DayBucket { start: cursor });
        cursor += Duration::days(1);
    }
    buckets
}

/// 固定回看窗口：`[now - span, ∞)`。
pub fn lookback(now: DateTime<Utc>, span: Duration) -> TimeRange {
    TimeRange::since(now - span)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 10, 30, 0).unwrap()
    }

    #[test]
    fn period_tokens_default_to_seven_days() {
        assert_eq!(Period::from_token(Some("30d")), Period::Days30);
        assert_eq!(Period::from_token(Some("90d")), Period::Days90);
        assert_eq!(Period::from_token(Some("7d")), Period::Days7);
        assert_eq!(Period::from_token(Some("1y")), Period::Days7);
        assert_eq!(Period::from_token(None), Period::Days7);
    }

    #[test]
    fn resolve_window_subtracts_whole_days() {
        let window = resolve_window(Some("30d"), now());
        assert_eq!(window.end, now());
        assert_eq!(window.start, Utc.with_ymd_and_hms(2024, 2, 14, 10, 30, 0).unwrap());
    }

    #[test]
    fn enumerate_days_includes_both_endpoints() {
        let window = resolve_window(Some("7d"), now());
        let days = window.days();
        assert_eq!(days.len(), 8);
        assert_eq!(days[0].start, window.start);
        assert_eq!(days[7].start, window.end);
        assert_eq!(days[0].date_label(), "2024-03-08");
        assert_eq!(days[7].date_label(), "2024-03-15");
        for pair in days.windows(2) {
            assert_eq!(pair[0].end(), pair[1].start);
        }
    }

    #[test]
    fn enumerate_days_is_restartable() {
        let window = resolve_window(Some("90d"), now());
        assert_eq!(window.days(), window.days());
        assert_eq!(window.days().len(), 91);
    }

    #[test]
    fn enumerate_days_handles_inverted_range() {
        assert!(enumerate_days(now(), now() - Duration::hours(1)).is_empty());
        assert_eq!(enumerate_days(now(), now()).len(), 1);
    }

    #[test]
    fn partial_trailing_day_shares_the_last_bucket() {
        let start = now();
        let days = enumerate_days(start, start + Duration::hours(60));
        assert_eq!(days.len(), 3);
        assert!(days[2].range().contains(start + Duration::hours(60)));
        assert_eq!(enumerate_days(start, start + Duration::hours(23)).len(), 1);
    }

    #[test]
    fn time_range_is_half_open() {
        let bucket = DayBucket { start: now() };
        let range = bucket.range();
        assert!(range.contains(now()));
        assert!(range.contains(now() + Duration::hours(23)));
        assert!(!range.contains(bucket.end()));
        assert!(lookback(now(), Duration::hours(24)).contains(now() + Duration::days(3)));
    }
}
