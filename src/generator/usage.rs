//! Monthly API-usage trends.
//!
//! Each company in the catalog gets one base magnitude, then its growth
//! profile scales that base across the fixed horizon. Revenue is derived
//! from the clamped call count, never from the raw float.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::records::{Period, UsageRecord};
use super::rng::DataRng;
use crate::config::schema::GeneratorConfig;

/// Number of monthly periods generated per company.
pub const HORIZON_MONTHS: u32 = 12;

/// Per-month growth applied by [`GrowthProfile::Growing`].
const GROWTH_PER_MONTH: f64 = 0.15;

/// Per-month decline applied by [`GrowthProfile::Declining`].
const DECLINE_PER_MONTH: f64 = 0.05;

/// Bound on the per-month swing drawn by [`GrowthProfile::RandomWalk`].
const WALK_BOUND: f64 = 0.10;

/// How a company's usage evolves across the horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GrowthProfile {
    /// `base * (1 + 0.15 * m)`
    Growing,
    /// `base * (1 - 0.05 * m)`
    Declining,
    /// `base * (1 + u * m)` with `u` drawn from `[-0.1, 0.1]` each month.
    RandomWalk,
}

impl GrowthProfile {
    /// Multiplier for month `m` (1-based).
    pub fn factor(self, m: u32, rng: &mut DataRng) -> f64 {
        let m = f64::from(m);
        match self {
            Self::Growing => 1.0 + GROWTH_PER_MONTH * m,
            Self::Declining => 1.0 - DECLINE_PER_MONTH * m,
            Self::RandomWalk => 1.0 + rng.uniform(-WALK_BOUND, WALK_BOUND) * m,
        }
    }
}

impl fmt::Display for GrowthProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Growing => write!(f, "growing"),
            Self::Declining => write!(f, "declining"),
            Self::RandomWalk => write!(f, "random-walk"),
        }
    }
}

/// One row of the `company -> growth profile` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub name: String,
    pub growth: GrowthProfile,
}

impl CompanyProfile {
    pub fn new(name: impl Into<String>, growth: GrowthProfile) -> Self {
        Self {
            name: name.into(),
            growth,
        }
    }
}

/// The default demo catalog.
pub fn default_companies() -> Vec<CompanyProfile> {
    vec![
        CompanyProfile::new("Acme Corp", GrowthProfile::Growing),
        CompanyProfile::new("Zenith PLC", GrowthProfile::Declining),
        CompanyProfile::new("Global Dynamics", GrowthProfile::RandomWalk),
        CompanyProfile::new("TechStart Inc", GrowthProfile::RandomWalk),
        CompanyProfile::new("DataFlow Ltd", GrowthProfile::RandomWalk),
    ]
}

/// Generate usage rows, company-major then period-ascending.
pub(crate) fn generate(config: &GeneratorConfig, rng: &mut DataRng) -> Vec<UsageRecord> {
    let Some(start) = Period::new(config.year, 1) else {
        return Vec::new();
    };

    let mut records = Vec::with_capacity(config.companies.len() * HORIZON_MONTHS as usize);

    for company in &config.companies {
        let base = rng.range_u64(config.base_usage_min, config.base_usage_max) as f64;
        let mut period = start;

        for m in 1..=HORIZON_MONTHS {
            let usage = base * company.growth.factor(m, rng);
            let api_calls = usage.max(0.0) as u64;

            records.push(UsageRecord {
                company: company.name.clone(),
                period,
                api_calls,
                revenue: api_calls as f64 * config.revenue_per_call,
                use_cases: rng.range_u64(1, 5) as u8,
            });

            period = period.next();
        }
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::rng::DatasetSlot;

    fn rng() -> DataRng {
        DataRng::for_slot(99, DatasetSlot::Usage)
    }

    #[test]
    fn growing_factor_is_linear() {
        let mut r = rng();
        assert!((GrowthProfile::Growing.factor(1, &mut r) - 1.15).abs() < 1e-12);
        assert!((GrowthProfile::Growing.factor(12, &mut r) - 2.8).abs() < 1e-12);
    }

    #[test]
    fn declining_factor_is_linear() {
        let mut r = rng();
        assert!((GrowthProfile::Declining.factor(1, &mut r) - 0.95).abs() < 1e-12);
        assert!((GrowthProfile::Declining.factor(12, &mut r) - 0.4).abs() < 1e-12);
    }

    #[test]
    fn random_walk_factor_is_bounded() {
        let mut r = rng();
        for m in 1..=HORIZON_MONTHS {
            let f = GrowthProfile::RandomWalk.factor(m, &mut r);
            let bound = WALK_BOUND * f64::from(m);
            assert!(f >= 1.0 - bound - 1e-12 && f <= 1.0 + bound + 1e-12);
        }
    }

    #[test]
    fn growing_company_is_monotonic() {
        let config = GeneratorConfig {
            companies: vec![CompanyProfile::new("Up", GrowthProfile::Growing)],
            ..GeneratorConfig::default()
        };
        let rows = generate(&config, &mut rng());
        assert_eq!(rows.len(), HORIZON_MONTHS as usize);
        assert!(rows.windows(2).all(|w| w[1].api_calls >= w[0].api_calls));
    }

    #[test]
    fn zero_base_yields_zero_calls_and_revenue() {
        let config = GeneratorConfig {
            base_usage_min: 0,
            base_usage_max: 0,
            ..GeneratorConfig::default()
        };
        let rows = generate(&config, &mut rng());
        assert!(rows.iter().all(|row| row.api_calls == 0 && row.revenue == 0.0));
    }

    #[test]
    fn revenue_tracks_clamped_calls() {
        let config = GeneratorConfig::default();
        for row in generate(&config, &mut rng()) {
            let expected = row.api_calls as f64 * config.revenue_per_call;
            assert!((row.revenue - expected).abs() < 1e-9);
            assert!((1..=5).contains(&row.use_cases));
        }
    }

    #[test]
    fn empty_catalog_yields_no_rows() {
        let config = GeneratorConfig {
            companies: Vec::new(),
            ..GeneratorConfig::default()
        };
        assert!(generate(&config, &mut rng()).is_empty());
    }

    #[test]
    fn profile_table_round_trips_through_toml() {
        let toml_str = r#"
name = "Acme Corp"
growth = "random-walk"
"#;
        let profile: CompanyProfile = toml::from_str(toml_str).unwrap();
        assert_eq!(profile.growth, GrowthProfile::RandomWalk);
    }
}
