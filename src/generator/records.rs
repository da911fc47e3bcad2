//! Record types for the generated datasets.
//!
//! Every record is a plain value: created once by a generator, never
//! updated afterwards. Field names serialize in snake_case so the JSON
//! API and CSV output share one schema.

use std::fmt;

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

// ---------------------------------------------------------------------------
// Period
// ---------------------------------------------------------------------------

/// A calendar month, rendered as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    /// Build a period. Returns `None` for a month outside `1..=12`.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u32 {
        self.month
    }

    /// The month immediately after this one.
    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// First day of the month.
    pub fn first_day(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for Period {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// ---------------------------------------------------------------------------
// Usage
// ---------------------------------------------------------------------------

/// One company's API usage for one month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageRecord {
    pub company: String,
    pub period: Period,
    pub api_calls: u64,
    /// Always `api_calls * revenue_per_call`.
    pub revenue: f64,
    /// Active use cases, `1..=5`.
    pub use_cases: u8,
}

// ---------------------------------------------------------------------------
// Strategy board
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StrategyStatus {
    Planning,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    #[serde(rename = "On Hold")]
    OnHold,
}

impl StrategyStatus {
    pub const ALL: [Self; 4] = [
        Self::Planning,
        Self::InProgress,
        Self::Completed,
        Self::OnHold,
    ];
}

impl fmt::Display for StrategyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Planning => write!(f, "Planning"),
            Self::InProgress => write!(f, "In Progress"),
            Self::Completed => write!(f, "Completed"),
            Self::OnHold => write!(f, "On Hold"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::Critical];
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "Low"),
            Self::Medium => write!(f, "Medium"),
            Self::High => write!(f, "High"),
            Self::Critical => write!(f, "Critical"),
        }
    }
}

/// One entry on the strategy board.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategyRecord {
    pub account: String,
    pub strategy: String,
    pub status: StrategyStatus,
    pub priority: Priority,
    pub expected_revenue: u64,
    /// Quarter label, e.g. `Q2 2024`.
    pub timeline: String,
    pub stakeholder: String,
    pub description: String,
}

// ---------------------------------------------------------------------------
// Executive relationships
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum InfluenceLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for InfluenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "Low"),
            Self::Medium => write!(f, "Medium"),
            Self::High => write!(f, "High"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutiveRecord {
    pub name: String,
    pub title: String,
    pub company: String,
    /// `0..=100`.
    pub relationship_score: u8,
    pub last_meeting: NaiveDate,
    pub next_meeting: NaiveDate,
    pub strategic_initiatives: u32,
    pub influence_level: InfluenceLevel,
    pub decision_maker: bool,
}

// ---------------------------------------------------------------------------
// Account planning
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Risk implied by an account health score.
    pub fn from_health(score: u8) -> Self {
        match score {
            75..=u8::MAX => Self::Low,
            50..=74 => Self::Medium,
            _ => Self::High,
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => write!(f, "Low"),
            Self::Medium => write!(f, "Medium"),
            Self::High => write!(f, "High"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountPlanningRecord {
    pub account: String,
    /// `0..=100`.
    pub health_score: u8,
    pub api_usage: f64,
    /// Fractional quarter-over-quarter growth, may be negative.
    pub growth_rate: f64,
    pub expansion_opportunities: String,
    pub risk_level: RiskLevel,
    pub next_quarter_goal: String,
    pub strategic_initiatives: u32,
    pub key_stakeholders: String,
    pub last_qbr: NaiveDate,
    pub next_qbr: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_formats_zero_padded() {
        assert_eq!(Period::new(2024, 3).unwrap().to_string(), "2024-03");
        assert_eq!(Period::new(2024, 12).unwrap().to_string(), "2024-12");
    }

    #[test]
    fn period_rejects_invalid_month() {
        assert!(Period::new(2024, 0).is_none());
        assert!(Period::new(2024, 13).is_none());
    }

    #[test]
    fn period_next_rolls_over_year() {
        let dec = Period::new(2024, 12).unwrap();
        assert_eq!(dec.next(), Period::new(2025, 1).unwrap());
        let jun = Period::new(2024, 6).unwrap();
        assert_eq!(jun.next(), Period::new(2024, 7).unwrap());
    }

    #[test]
    fn period_serializes_as_string() {
        let json = serde_json::to_string(&Period::new(2024, 1).unwrap()).unwrap();
        assert_eq!(json, "\"2024-01\"");
    }

    #[test]
    fn status_serializes_with_display_names() {
        let json = serde_json::to_string(&StrategyStatus::InProgress).unwrap();
        assert_eq!(json, "\"In Progress\"");
        assert_eq!(StrategyStatus::OnHold.to_string(), "On Hold");
    }

    #[test]
    fn risk_from_health_thresholds() {
        assert_eq!(RiskLevel::from_health(100), RiskLevel::Low);
        assert_eq!(RiskLevel::from_health(75), RiskLevel::Low);
        assert_eq!(RiskLevel::from_health(74), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_health(50), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_health(49), RiskLevel::High);
        assert_eq!(RiskLevel::from_health(0), RiskLevel::High);
    }
}
