//! Synthetic dataset generator.
//!
//! Produces the four in-memory tables the dashboard renders:
//!
//! - **Usage trends**: monthly API calls and revenue per company
//! - **Strategy board**: a fixed hand-authored catalog
//! - **Executive relationships**: catalog contacts with perturbed scores
//! - **Account planning**: per-account health, growth and QBR dates
//!
//! All randomness flows through a [`DatasetGenerator`] built from one
//! master seed. Two generators with the same seed, config and reference
//! date produce identical tables. The free `generate_*` functions seed
//! from entropy, so every call returns fresh values.
//!
//! Generation cannot fail and performs no I/O.

mod accounts;
pub mod catalog;
pub mod records;
pub mod rng;
pub mod usage;

use chrono::NaiveDate;

use crate::config::schema::GeneratorConfig;
use rng::{DataRng, DatasetSlot};

pub use records::{
    AccountPlanningRecord, ExecutiveRecord, InfluenceLevel, Period, Priority, RiskLevel,
    StrategyRecord, StrategyStatus, UsageRecord,
};
pub use usage::{CompanyProfile, GrowthProfile, HORIZON_MONTHS};

/// Seeded generator for every dataset.
#[derive(Debug, Clone)]
pub struct DatasetGenerator {
    config: GeneratorConfig,
    seed: u64,
    as_of: NaiveDate,
}

impl DatasetGenerator {
    /// Build a generator from config. Uses `config.seed` when set,
    /// otherwise a fresh entropy seed. Dates are relative to today.
    ///
    /// A config that fails [`GeneratorConfig::validate`] is replaced by the
    /// built-in defaults (keeping its seed) with a warning.
    pub fn new(config: GeneratorConfig) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(e) => {
                log::warn!("invalid generator settings, using defaults: {e:#}");
                config.defaults_with_seed()
            }
        };
        let seed = config.seed.unwrap_or_else(rng::entropy_seed);
        Self {
            config,
            seed,
            as_of: chrono::Local::now().date_naive(),
        }
    }

    /// Override the master seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Override the reference date used for meeting and QBR dates.
    pub fn with_as_of(mut self, as_of: NaiveDate) -> Self {
        self.as_of = as_of;
        self
    }

    /// The master seed, for reproducing a run.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn as_of(&self) -> NaiveDate {
        self.as_of
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    fn stream(&self, slot: DatasetSlot) -> DataRng {
        log::debug!("generating {} dataset (seed {})", slot.name(), self.seed);
        DataRng::for_slot(self.seed, slot)
    }

    /// Monthly usage for every catalog company, company-major then
    /// period-ascending.
    pub fn usage_trends(&self) -> Vec<UsageRecord> {
        usage::generate(&self.config, &mut self.stream(DatasetSlot::Usage))
    }

    /// The fixed strategy board.
    pub fn strategies(&self) -> Vec<StrategyRecord> {
        catalog::strategies()
    }

    pub fn executives(&self) -> Vec<ExecutiveRecord> {
        accounts::generate_executives(self.as_of, &mut self.stream(DatasetSlot::Executives))
    }

    pub fn account_planning(&self) -> Vec<AccountPlanningRecord> {
        accounts::generate_account_planning(
            &self.config,
            self.as_of,
            &mut self.stream(DatasetSlot::AccountPlanning),
        )
    }
}

impl Default for DatasetGenerator {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Free functions: fresh entropy-seeded output on every call
// ---------------------------------------------------------------------------

/// Usage trends over the default catalog with a fresh random seed.
pub fn generate_usage_trends() -> Vec<UsageRecord> {
    fresh().usage_trends()
}

/// The fixed strategy board.
pub fn generate_strategy_data() -> Vec<StrategyRecord> {
    catalog::strategies()
}

/// Executive relationships with a fresh random seed.
pub fn generate_executive_data() -> Vec<ExecutiveRecord> {
    fresh().executives()
}

/// Account planning rows with a fresh random seed.
pub fn generate_account_planning_data() -> Vec<AccountPlanningRecord> {
    fresh().account_planning()
}

fn fresh() -> DatasetGenerator {
    DatasetGenerator::default().with_seed(rng::entropy_seed())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(seed: u64) -> DatasetGenerator {
        DatasetGenerator::default()
            .with_seed(seed)
            .with_as_of(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
    }

    #[test]
    fn same_seed_reproduces_every_dataset() {
        let a = fixed(1234);
        let b = fixed(1234);
        assert_eq!(a.usage_trends(), b.usage_trends());
        assert_eq!(a.executives(), b.executives());
        assert_eq!(a.account_planning(), b.account_planning());
        assert_eq!(a.strategies(), b.strategies());
    }

    #[test]
    fn different_seeds_diverge() {
        assert_ne!(fixed(1).usage_trends(), fixed(2).usage_trends());
    }

    #[test]
    fn config_seed_is_used_when_present() {
        let config = GeneratorConfig {
            seed: Some(77),
            ..GeneratorConfig::default()
        };
        assert_eq!(DatasetGenerator::new(config).seed(), 77);
    }

    #[test]
    fn invalid_config_falls_back_to_defaults() {
        let config = GeneratorConfig {
            seed: Some(11),
            revenue_per_call: -0.5,
            companies: vec![
                CompanyProfile::new("Acme", GrowthProfile::Growing),
                CompanyProfile::new("Acme", GrowthProfile::Declining),
            ],
            ..GeneratorConfig::default()
        };
        let generator = DatasetGenerator::new(config);
        assert_eq!(generator.seed(), 11);
        assert_eq!(generator.config(), &GeneratorConfig {
            seed: Some(11),
            ..GeneratorConfig::default()
        });

        let rows = generator.usage_trends();
        assert_eq!(rows.len(), 60);
        assert!(rows.iter().all(|r| r.revenue >= 0.0));
    }

    #[test]
    fn datasets_do_not_share_a_stream() {
        // Regenerating executives must not change the usage table.
        let generator = fixed(5);
        let before = generator.usage_trends();
        let _ = generator.executives();
        assert_eq!(before, generator.usage_trends());
    }
}
