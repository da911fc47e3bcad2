/// Configuration schema and defaults for etsm.
///
/// Defines the TOML-serializable configuration structure with the
/// `[generator]`, `[insight]`, `[logging]` and `[web]` sections.
///
/// Every field has a built-in default. Users only need to set the values
/// they want to override. The API credential is not part of the file. It is
/// read from `ANTHROPIC_API_KEY` (see [`crate::insight::credential`]).
use std::collections::HashSet;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use crate::generator::usage::{CompanyProfile, default_companies};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level etsm configuration.
///
/// Maps directly to the `~/.etsm/config.toml` and `.etsm.toml` file
/// schemas. All sections and fields are optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EtsmConfig {
    pub generator: GeneratorConfig,
    pub insight: InsightConfig,
    pub logging: LoggingConfig,
    pub web: WebConfig,
}

// ---------------------------------------------------------------------------
// [generator]
// ---------------------------------------------------------------------------

/// Synthetic dataset settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Master seed. Unset means a fresh random seed per run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Calendar year of the 12 generated periods.
    pub year: i32,
    /// Lower bound (inclusive) of each company's base monthly usage.
    pub base_usage_min: u64,
    /// Upper bound (inclusive) of each company's base monthly usage.
    pub base_usage_max: u64,
    /// Revenue per API call.
    pub revenue_per_call: f64,
    /// `company -> growth profile` table, in display order.
    pub companies: Vec<CompanyProfile>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: None,
            year: 2024,
            base_usage_min: 50_000,
            base_usage_max: 2_000_000,
            revenue_per_call: 0.001,
            companies: default_companies(),
        }
    }
}

impl GeneratorConfig {
    /// Reject settings that would produce malformed tables: negative or
    /// non-finite revenue, years that don't render as `YYYY`, an empty or
    /// ambiguous company table.
    pub fn validate(&self) -> Result<()> {
        if !self.revenue_per_call.is_finite() || self.revenue_per_call < 0.0 {
            bail!(
                "revenue_per_call must be a finite number >= 0 (got {})",
                self.revenue_per_call
            );
        }
        if !(1..=9999).contains(&self.year) {
            bail!("year must be between 1 and 9999 (got {})", self.year);
        }
        if self.base_usage_min > self.base_usage_max {
            bail!(
                "base_usage_min ({}) exceeds base_usage_max ({})",
                self.base_usage_min,
                self.base_usage_max
            );
        }
        if self.companies.is_empty() {
            bail!("companies must list at least one company");
        }

        let mut seen = HashSet::new();
        for company in &self.companies {
            let name = company.name.trim();
            if name.is_empty() {
                bail!("company names must not be blank");
            }
            if !seen.insert(name) {
                bail!("company {name:?} is listed more than once");
            }
        }

        Ok(())
    }

    /// Built-in defaults that keep this config's seed.
    pub fn defaults_with_seed(&self) -> Self {
        Self {
            seed: self.seed,
            ..Self::default()
        }
    }
}

// ---------------------------------------------------------------------------
// [insight]
// ---------------------------------------------------------------------------

/// External text-generation endpoint settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightConfig {
    /// Messages endpoint URL.
    pub api_url: String,
    /// Value of the `anthropic-version` header.
    pub api_version: String,
    /// Default model identifier.
    pub model: String,
    /// Response length cap sent as `max_tokens`.
    pub max_tokens: u32,
    /// Request timeout. Unset means the call may block indefinitely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.anthropic.com/v1/messages".to_string(),
            api_version: "2023-06-01".to_string(),
            model: "claude-sonnet-4-20250514".to_string(),
            max_tokens: 1000,
            timeout_ms: None,
        }
    }
}

// ---------------------------------------------------------------------------
// [logging]
// ---------------------------------------------------------------------------

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default `env_logger` filter: `"error"`, `"warn"`, `"info"`, `"debug"`,
    /// or any full filter directive. `ETSM_LOG` overrides it.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// [web]
// ---------------------------------------------------------------------------

/// Local dashboard settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    /// Bind address for `etsm serve`.
    pub addr: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:8750".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default TOML content
// ---------------------------------------------------------------------------

impl EtsmConfig {
    /// Generate the annotated default TOML config file content.
    ///
    /// Used by `etsm config init` to create a starting config file with
    /// all settings documented.
    pub fn default_toml() -> String {
        r#"# etsm Configuration
# Enterprise Technical Success Manager dashboard
#
# Configuration hierarchy (highest precedence wins):
#   1. Environment variables (ETSM_*)
#   2. Project config (.etsm.toml in current directory)
#   3. User global config (~/.etsm/config.toml)
#   4. Built-in defaults
#
# The API key is never read from this file. Export ANTHROPIC_API_KEY
# (get one from https://console.anthropic.com/).

[generator]
# seed = 42                           # Fixed seed for reproducible datasets
year = 2024
base_usage_min = 50000
base_usage_max = 2000000
revenue_per_call = 0.001

[[generator.companies]]
name = "Acme Corp"
growth = "growing"                    # growing | declining | random-walk

[[generator.companies]]
name = "Zenith PLC"
growth = "declining"

[[generator.companies]]
name = "Global Dynamics"
growth = "random-walk"

[[generator.companies]]
name = "TechStart Inc"
growth = "random-walk"

[[generator.companies]]
name = "DataFlow Ltd"
growth = "random-walk"

[insight]
api_url = "https://api.anthropic.com/v1/messages"
api_version = "2023-06-01"
model = "claude-sonnet-4-20250514"
max_tokens = 1000
# timeout_ms = 60000                  # Unset: wait indefinitely

[logging]
level = "warn"                        # error | warn | info | debug

[web]
addr = "127.0.0.1:8750"
"#
        .to_string()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::GrowthProfile;

    #[test]
    fn default_config_has_expected_values() {
        let config = EtsmConfig::default();
        assert!(config.generator.seed.is_none());
        assert_eq!(config.generator.year, 2024);
        assert_eq!(config.generator.base_usage_min, 50_000);
        assert_eq!(config.generator.base_usage_max, 2_000_000);
        assert_eq!(config.generator.companies.len(), 5);
        assert_eq!(config.insight.max_tokens, 1000);
        assert_eq!(config.insight.api_version, "2023-06-01");
        assert!(config.insight.timeout_ms.is_none());
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn default_toml_matches_built_in_defaults() {
        let parsed: EtsmConfig = toml::from_str(&EtsmConfig::default_toml()).unwrap();
        let defaults = EtsmConfig::default();
        assert_eq!(parsed.generator, defaults.generator);
        assert_eq!(parsed.insight, defaults.insight);
        assert_eq!(parsed.web.addr, defaults.web.addr);
    }

    #[test]
    fn deserialize_minimal_toml() {
        let toml_str = r#"
[insight]
model = "claude-3-5-haiku-latest"
"#;
        let config: EtsmConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.insight.model, "claude-3-5-haiku-latest");
        // Everything else falls back to defaults
        assert_eq!(config.insight.max_tokens, 1000);
        assert_eq!(config.generator.companies.len(), 5);
    }

    #[test]
    fn deserialize_custom_company_table() {
        let toml_str = r#"
[generator]
seed = 7
year = 2025

[[generator.companies]]
name = "Initech"
growth = "declining"
"#;
        let config: EtsmConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.generator.seed, Some(7));
        assert_eq!(config.generator.year, 2025);
        assert_eq!(config.generator.companies.len(), 1);
        assert_eq!(config.generator.companies[0].name, "Initech");
        assert_eq!(config.generator.companies[0].growth, GrowthProfile::Declining);
    }

    fn generator_toml(body: &str) -> GeneratorConfig {
        let config: EtsmConfig = toml::from_str(&format!("[generator]\n{body}")).unwrap();
        config.generator
    }

    #[test]
    fn defaults_are_valid() {
        assert!(GeneratorConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_negative_or_nan_rate() {
        let err = generator_toml("revenue_per_call = -0.5").validate().unwrap_err();
        assert!(err.to_string().contains("revenue_per_call"));
        let err = generator_toml("revenue_per_call = nan").validate().unwrap_err();
        assert!(err.to_string().contains("revenue_per_call"));
        assert!(generator_toml("revenue_per_call = 0.0").validate().is_ok());
    }

    #[test]
    fn validate_rejects_years_outside_four_digits() {
        assert!(generator_toml("year = -3").validate().is_err());
        assert!(generator_toml("year = 0").validate().is_err());
        assert!(generator_toml("year = 10000").validate().is_err());
        assert!(generator_toml("year = 9999").validate().is_ok());
    }

    #[test]
    fn validate_rejects_inverted_usage_range() {
        let config = generator_toml("base_usage_min = 10\nbase_usage_max = 5");
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_company_table() {
        let config = GeneratorConfig {
            companies: Vec::new(),
            ..GeneratorConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("at least one company"));
    }

    #[test]
    fn validate_rejects_duplicate_and_blank_names() {
        let config = GeneratorConfig {
            companies: vec![
                CompanyProfile::new("Acme", GrowthProfile::Growing),
                CompanyProfile::new("Acme", GrowthProfile::Declining),
            ],
            ..GeneratorConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("\"Acme\""));

        let config = GeneratorConfig {
            companies: vec![CompanyProfile::new("  ", GrowthProfile::Growing)],
            ..GeneratorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn defaults_with_seed_keeps_only_the_seed() {
        let config = GeneratorConfig {
            seed: Some(9),
            year: -3,
            companies: Vec::new(),
            ..GeneratorConfig::default()
        };
        let fallback = config.defaults_with_seed();
        assert_eq!(fallback.seed, Some(9));
        assert_eq!(fallback.year, 2024);
        assert_eq!(fallback.companies.len(), 5);
    }

    #[test]
    fn serialized_defaults_round_trip() {
        let toml_str = toml::to_string_pretty(&EtsmConfig::default()).unwrap();
        let parsed: EtsmConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.generator, GeneratorConfig::default());
    }
}
