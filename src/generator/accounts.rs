//! Executive-relationship and account-planning datasets.
//!
//! Both start from the fixed seeds in [`super::catalog`] and perturb
//! their baselines. Bounded scores are clamped to `0..=100` and counts to
//! `>= 0` after perturbation.

use chrono::{Days, NaiveDate};

use super::catalog::{ACCOUNTS, EXECUTIVES};
use super::records::{AccountPlanningRecord, ExecutiveRecord, RiskLevel};
use super::rng::DataRng;
use crate::config::schema::GeneratorConfig;

/// Swing applied to an executive's baseline relationship score.
const RELATIONSHIP_JITTER: i64 = 15;

/// Swing applied to an account's baseline health score.
const HEALTH_JITTER: i64 = 10;

/// Swing applied to an account's baseline growth rate.
const GROWTH_JITTER: f64 = 0.05;

/// Days between quarterly business reviews.
const QBR_INTERVAL_DAYS: u64 = 91;

fn clamp_score(value: i64) -> u8 {
    value.clamp(0, 100) as u8
}

fn clamp_count(value: i64) -> u32 {
    value.max(0) as u32
}

fn days_before(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_sub_days(Days::new(days)).unwrap_or(date)
}

fn days_after(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(Days::new(days)).unwrap_or(date)
}

pub(crate) fn generate_executives(as_of: NaiveDate, rng: &mut DataRng) -> Vec<ExecutiveRecord> {
    EXECUTIVES
        .iter()
        .map(|seed| {
            let score =
                seed.baseline_score + rng.range_i64(-RELATIONSHIP_JITTER, RELATIONSHIP_JITTER);
            let initiatives = seed.baseline_initiatives + rng.range_i64(-2, 2);

            ExecutiveRecord {
                name: seed.name.to_string(),
                title: seed.title.to_string(),
                company: seed.company.to_string(),
                relationship_score: clamp_score(score),
                last_meeting: days_before(as_of, rng.range_u64(3, 60)),
                next_meeting: days_after(as_of, rng.range_u64(7, 45)),
                strategic_initiatives: clamp_count(initiatives),
                influence_level: seed.influence_level,
                decision_maker: seed.decision_maker,
            }
        })
        .collect()
}

pub(crate) fn generate_account_planning(
    config: &GeneratorConfig,
    as_of: NaiveDate,
    rng: &mut DataRng,
) -> Vec<AccountPlanningRecord> {
    ACCOUNTS
        .iter()
        .map(|seed| {
            let health =
                clamp_score(seed.baseline_health + rng.range_i64(-HEALTH_JITTER, HEALTH_JITTER));
            let api_usage = rng.range_u64(config.base_usage_min, config.base_usage_max) as f64;
            let growth_rate = seed.baseline_growth + rng.uniform(-GROWTH_JITTER, GROWTH_JITTER);
            let initiatives = seed.baseline_initiatives + rng.range_i64(-1, 2);
            let last_qbr = days_before(as_of, rng.range_u64(10, 80));

            AccountPlanningRecord {
                account: seed.account.to_string(),
                health_score: health,
                api_usage,
                growth_rate,
                expansion_opportunities: seed.expansion_opportunities.to_string(),
                risk_level: RiskLevel::from_health(health),
                next_quarter_goal: seed.next_quarter_goal.to_string(),
                strategic_initiatives: clamp_count(initiatives),
                key_stakeholders: seed.key_stakeholders.to_string(),
                last_qbr,
                next_qbr: days_after(last_qbr, QBR_INTERVAL_DAYS),
            }
        })
        .collect()
}
