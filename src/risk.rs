use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use tracing::warn;

// Embedded English fallback, used when no language file is on disk.
const DEFAULT_LABELS_JSON: &str = include_str!("../lang/en.json");

/// Localized names for the four risk buckets.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct RiskLabels {
    #[serde(default)]
    pub low: String,
    #[serde(default)]
    pub medium: String,
    #[serde(default)]
    pub high: String,
    #[serde(default)]
    pub critical: String,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct Labels {
    #[serde(default)]
    pub risk: RiskLabels,
}

/// One named percentage metric in [0, 100] fed to the risk average.
#[derive(Debug, Clone)]
pub struct RiskMetric {
    pub name: String,
    pub value: f64,
}

impl RiskMetric {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
    /// Sentinel for an empty metric list.
    NotApplicable,
}

impl RiskLevel {
    pub fn from_score(score: f64) -> Self {
        if score < 25.0 {
            RiskLevel::Low
        } else if score < 50.0 {
            RiskLevel::Medium
        } else if score < 75.0 {
            RiskLevel::High
        } else {
            RiskLevel::Critical
        }
    }

    pub fn label(self, labels: &Labels) -> String {
        match self {
            RiskLevel::Low => labels.risk.low.clone(),
            RiskLevel::Medium => labels.risk.medium.clone(),
            RiskLevel::High => labels.risk.high.clone(),
            RiskLevel::Critical => labels.risk.critical.clone(),
            RiskLevel::NotApplicable => "N/A".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    pub label: String,
    pub score: f64,
}

/// Average the supplied percentage metrics unweighted, round to two
/// decimals and bucket the result: <25 Low, <50 Medium, <75 High,
/// otherwise Critical. An empty metric list yields the NotApplicable
/// sentinel with score 0.
pub fn evaluate_risk(labels: &Labels, metrics: &[RiskMetric]) -> RiskAssessment {
    if metrics.is_empty() {
        return RiskAssessment {
            level: RiskLevel::NotApplicable,
            label: RiskLevel::NotApplicable.label(labels),
            score: 0.0,
        };
    }

    let sum: f64 = metrics.iter().map(|metric| metric.value).sum();
    let score = (sum / metrics.len() as f64 * 100.0).round() / 100.0;
    let level = RiskLevel::from_score(score);

    RiskAssessment {
        level,
        label: level.label(labels),
        score,
    }
}

/// Load the label set for a locale from `lang/<locale>.json`. A missing or
/// unreadable file is a degraded case, not an error: the embedded English
/// labels are used for "en" and empty labels otherwise, with a warning.
pub fn load_labels(locale: &str) -> Labels {
    let path = PathBuf::from(format!("lang/{locale}.json"));
    match fs::read_to_string(&path) {
        Ok(content) => match serde_json::from_str(&content) {
            Ok(labels) => labels,
            Err(e) => {
                warn!(action = "parse", component = "labels", path = ?path, error = %e, "Invalid language file, proceeding with empty labels");
                Labels::default()
            }
        },
        Err(_) if locale == "en" => serde_json::from_str(DEFAULT_LABELS_JSON).unwrap_or_default(),
        Err(e) => {
            warn!(action = "load", component = "labels", path = ?path, error = %e, "Language file unavailable, proceeding with empty labels");
            Labels::default()
        }
    }
}

/// Convenience entry point: load the locale's labels (degrading when the
/// file is unavailable) and evaluate the metrics against them.
pub fn evaluate_risk_for_locale(locale: &str, metrics: &[RiskMetric]) -> RiskAssessment {
    let labels = load_labels(locale);
    evaluate_risk(&labels, metrics)
}
