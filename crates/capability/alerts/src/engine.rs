//! 告警引擎：并发执行五条规则，合并输出；人工告警与确认。

use crate::error::AlertError;
use crate::merge::merge;
use crate::model::{Acknowledgement, Alert, AlertFeed, ManualAlertInput};
use crate::rules;
use chrono::{DateTime, Utc};
use domain::{AlertType, ScopeFilter, Severity};
use sanimon_storage::{FeedbackStore, ToiletStore};
use sanimon_telemetry::{record_alert_evaluation, record_alerts_emitted};
use std::sync::Arc;
use tracing::info;

/// 解析可选的严重级别过滤条件，空白视为未提供。
pub fn parse_severity(value: Option<&str>) -> Result<Option<Severity>, AlertError> {
    match value.map(str::trim).filter(|value| !value.is_empty()) {
        None => Ok(None),
        Some(value) => value
            .parse::<Severity>()
            .map(Some)
            .map_err(|err| AlertError::Validation(err.to_string())),
    }
}

fn required(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub struct AlertEngine {
    feedback: Arc<dyn FeedbackStore>,
    toilets: Arc<dyn ToiletStore>,
}

impl AlertEngine {
    pub fn new(feedback: Arc<dyn FeedbackStore>, toilets: Arc<dyn ToiletStore>) -> Self {
        Self { feedback, toilets }
    }

    /// 计算当前告警。
    ///
    /// 任一规则失败则整体失败，不返回残缺列表。
    pub async fn get_alerts(
        &self,
        scope: &ScopeFilter,
        severity: Option<Severity>,
        now: DateTime<Utc>,
    ) -> Result<AlertFeed, AlertError> {
        record_alert_evaluation();
        let feedback = self.feedback.as_ref();
        let toilets = self.toilets.as_ref();
        let (low_rating, missed, complaints, no_cleaning, emergency) = tokio::try_join!(
            rules::low_rating(feedback, scope, now),
            rules::missed_cleaning(toilets, scope, now),
            rules::multiple_complaints(feedback, toilets, scope, now),
            rules::no_cleaning_log(toilets, scope, now),
            rules::emergency_issue(feedback, scope, now),
        )?;
        let alerts: Vec<Alert> = [low_rating, missed, complaints, no_cleaning, emergency]
            .into_iter()
            .flatten()
            .collect();
        let feed = merge(alerts, severity);
        record_alerts_emitted(feed.summary.total);
        info!(
            target: "sanimon.alerts",
            company_id = ?scope.company_id,
            location_id = ?scope.location_id,
            severity = ?severity.map(|severity| severity.as_str()),
            total = feed.summary.total,
            critical = feed.summary.critical,
            high = feed.summary.high,
            returned = feed.alerts.len(),
            "alerts_evaluated"
        );
        Ok(feed)
    }

    /// 创建人工告警（不落库）。
    ///
    /// 字段校验先于任何存储访问；厕位不存在时返回 NotFound。
    pub async fn create_manual_alert(
        &self,
        input: ManualAlertInput,
        now: DateTime<Utc>,
    ) -> Result<Alert, AlertError> {
        let (Some(alert_type), Some(toilet_id), Some(message)) = (
            required(input.alert_type),
            required(input.toilet_id),
            required(input.message),
        ) else {
            return Err(AlertError::Validation(
                "missing required fields: type, toiletId, message".to_string(),
            ));
        };
        let alert_type = alert_type
            .parse::<AlertType>()
            .map_err(|err| AlertError::Validation(err.to_string()))?;
        let severity = parse_severity(input.severity.as_deref())?.unwrap_or(Severity::Medium);

        let Some(detail) = self.toilets.find_toilet(&toilet_id).await? else {
            return Err(AlertError::NotFound("toilet"));
        };
        let suffix = uuid::Uuid::new_v4().simple().to_string();
        let alert = Alert {
            id: format!("manual-{}-{}", now.timestamp_millis(), &suffix[..8]),
            alert_type,
            severity,
            title: format!("Manual Alert: {alert_type}"),
            message,
            toilet_id,
            location_label: detail.path.label(),
            toilet_number: detail.toilet.toilet_number,
            created_at: now,
            data: None,
            is_manual: true,
        };
        info!(
            target: "sanimon.alerts",
            alert_id = %alert.id,
            alert_type = %alert.alert_type,
            severity = %alert.severity,
            toilet_id = %alert.toilet_id,
            "manual_alert_created"
        );
        Ok(alert)
    }

    /// 确认告警：无条件接受，不修改任何存储。
    pub fn acknowledge(&self, alert_id: Option<&str>) -> Acknowledgement {
        let alert_id = alert_id
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::to_string);
        info!(target: "sanimon.alerts", alert_id = ?alert_id, "alert_acknowledged");
        Acknowledgement {
            alert_id,
            acknowledged: true,
            message: "Alert acknowledged successfully".to_string(),
        }
    }
}
