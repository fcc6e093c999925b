// Insight domain model
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightKind {
    Prediction,
    Anomaly,
    Action,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// A short AI-produced observation about the telemetry window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_service_payload() {
        let text = r#"[{"type":"anomaly","title":"Voltage dip","description":"Check feeder 3","severity":"high"}]"#;
        let insights: Vec<Insight> = serde_json::from_str(text).unwrap();

        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].kind, InsightKind::Anomaly);
        assert_eq!(insights[0].severity, Severity::High);
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let text = r#"[{"type":"rumour","title":"x","description":"y","severity":"low"}]"#;
        assert!(serde_json::from_str::<Vec<Insight>>(text).is_err());
    }
}
