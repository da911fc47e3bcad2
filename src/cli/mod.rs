//! CLI command implementations for etsm.
//!
//! Provides subcommand handlers for:
//! - `etsm usage`: monthly API usage, headline metrics, growth by company
//! - `etsm strategies`: strategy board and pipeline overview
//! - `etsm executives`: executive relationship table
//! - `etsm planning`: account planning table
//! - `etsm overview`: per-account totals and health indicators
//! - `etsm analyze`: send an account-analysis prompt to the model
//! - `etsm health`: credential and config status
//! - `etsm config show|init|path`: configuration management

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use crate::analytics::{self, HealthIndicator};
use crate::config::{self, EtsmConfig};
use crate::generator::{
    AccountPlanningRecord, DatasetGenerator, ExecutiveRecord, StrategyRecord, StrategyStatus,
    UsageRecord,
};
use crate::insight::{self, credential::ApiKey, prompts};

/// Output format for dataset commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl OutputFormat {
    pub fn from_str_opt(s: Option<&str>) -> Self {
        match s {
            Some("json") => Self::Json,
            Some("csv") => Self::Csv,
            _ => Self::Table,
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_seed(generator: &DatasetGenerator) {
    println!(
        "  {}",
        format!("seed {} (pass --seed to reproduce)", generator.seed()).dimmed()
    );
    println!();
}

// ---------------------------------------------------------------------------
// etsm usage
// ---------------------------------------------------------------------------

/// Show generated API usage.
pub fn run_usage(generator: &DatasetGenerator, format: OutputFormat) -> Result<()> {
    let records = generator.usage_trends();

    match format {
        OutputFormat::Json => print_json(&serde_json::json!({
            "seed": generator.seed(),
            "metrics": analytics::usage_metrics(&records),
            "growth": analytics::company_growth(&records),
            "records": records,
        }))?,
        OutputFormat::Csv => print_usage_csv(&records),
        OutputFormat::Table => print_usage_table(generator, &records),
    }

    Ok(())
}

fn print_usage_table(generator: &DatasetGenerator, records: &[UsageRecord]) {
    let metrics = analytics::usage_metrics(records);

    println!("{}", "API Usage Analytics".bold().cyan());
    println!("{}", "=".repeat(60));
    print_seed(generator);

    println!(
        "  {} {}",
        "Total API calls:".bold(),
        format_number(metrics.total_api_calls)
    );
    println!(
        "  {} {}",
        "Average growth: ".bold(),
        format_growth(metrics.average_growth)
    );
    println!("  {} {}", "Active accounts:".bold(), metrics.active_accounts);
    println!(
        "  {} ${}",
        "Total revenue:  ".bold(),
        format_number(metrics.total_revenue.round() as u64)
    );
    println!();

    println!("{}", "Growth by Company".bold().cyan());
    println!(
        "  {:<20} {:>14} {:>14} {:>10}",
        "Company", "First month", "Latest month", "Growth"
    );
    println!("  {}", "-".repeat(61));
    for g in analytics::company_growth(records) {
        println!(
            "  {:<20} {:>14} {:>14} {:>10}",
            truncate(&g.company, 20),
            format_number(g.first_calls),
            format_number(g.latest_calls),
            format_growth(g.growth_rate),
        );
    }
    println!();

    println!("{}", "Monthly Usage".bold().cyan());
    println!(
        "  {:<20} {:<8} {:>14} {:>12} {:>9}",
        "Company", "Month", "API calls", "Revenue", "Use cases"
    );
    println!("  {}", "-".repeat(67));
    for (i, r) in records.iter().enumerate() {
        let line = format!(
            "  {:<20} {:<8} {:>14} {:>12} {:>9}",
            truncate(&r.company, 20),
            r.period,
            format_number(r.api_calls),
            format!("${:.2}", r.revenue),
            r.use_cases,
        );
        if i % 2 == 0 {
            println!("{line}");
        } else {
            println!("{}", line.dimmed());
        }
    }
}

fn print_usage_csv(records: &[UsageRecord]) {
    println!("company,period,api_calls,revenue,use_cases");
    for r in records {
        println!(
            "{},{},{},{:.3},{}",
            csv_field(&r.company),
            r.period,
            r.api_calls,
            r.revenue,
            r.use_cases
        );
    }
}

// ---------------------------------------------------------------------------
// etsm strategies
// ---------------------------------------------------------------------------

/// Show the strategy board.
pub fn run_strategies(generator: &DatasetGenerator, format: OutputFormat) -> Result<()> {
    let strategies = generator.strategies();

    match format {
        OutputFormat::Json => print_json(&serde_json::json!({
            "overview": analytics::strategy_overview(&strategies),
            "strategies": strategies,
        }))?,
        OutputFormat::Csv => print_strategies_csv(&strategies),
        OutputFormat::Table => print_strategies_table(&strategies),
    }

    Ok(())
}

fn print_strategies_table(strategies: &[StrategyRecord]) {
    let overview = analytics::strategy_overview(strategies);

    println!("{}", "Strategy Boards".bold().cyan());
    println!("{}", "=".repeat(60));
    println!(
        "  {} ${}",
        "Total pipeline:".bold(),
        format_number(overview.total_pipeline)
    );
    println!("  {} {}", "In progress:   ".bold(), overview.in_progress);
    println!("  {} {}", "Completed:     ".bold(), overview.completed);
    println!();

    println!("{}", "Active Strategies".bold().cyan());
    for s in strategies {
        println!();
        println!("  {} - {}", s.account.bold(), s.strategy);
        println!(
            "    Status: {}  Priority: {}",
            colorize_status(s.status),
            s.priority
        );
        println!(
            "    Expected revenue: ${}  Timeline: {}",
            format_number(s.expected_revenue),
            s.timeline
        );
        println!("    Key stakeholder: {}", s.stakeholder);
        println!("    {}", s.description.dimmed());
    }
    println!();

    println!("{}", "Status Distribution".bold().cyan());
    for c in &overview.by_status {
        println!("  {:<14} {}", c.status.to_string(), c.count);
    }
    println!();
    println!("{}", "Priority Distribution".bold().cyan());
    for c in &overview.by_priority {
        println!("  {:<14} {}", c.priority.to_string(), c.count);
    }
}

fn print_strategies_csv(strategies: &[StrategyRecord]) {
    println!("account,strategy,status,priority,expected_revenue,timeline,stakeholder,description");
    for s in strategies {
        println!(
            "{},{},{},{},{},{},{},{}",
            csv_field(&s.account),
            csv_field(&s.strategy),
            s.status,
            s.priority,
            s.expected_revenue,
            csv_field(&s.timeline),
            csv_field(&s.stakeholder),
            csv_field(&s.description),
        );
    }
}

// ---------------------------------------------------------------------------
// etsm executives
// ---------------------------------------------------------------------------

/// Show executive relationships.
pub fn run_executives(generator: &DatasetGenerator, format: OutputFormat) -> Result<()> {
    let executives = generator.executives();

    match format {
        OutputFormat::Json => print_json(&serde_json::json!({
            "seed": generator.seed(),
            "as_of": generator.as_of(),
            "executives": executives,
        }))?,
        OutputFormat::Csv => print_executives_csv(&executives),
        OutputFormat::Table => {
            println!("{}", "Executive Relationships".bold().cyan());
            println!("{}", "=".repeat(60));
            print_seed(generator);
            print_executives_table(&executives);
        }
    }

    Ok(())
}

fn print_executives_table(executives: &[ExecutiveRecord]) {
    println!(
        "  {:<16} {:<22} {:<16} {:>5} {:<10} {:<10} {:>4} {:<6} DM",
        "Name", "Title", "Company", "Score", "Last", "Next", "Init", "Infl."
    );
    println!("  {}", "-".repeat(100));
    for e in executives {
        let score = format!("{:>5}", e.relationship_score);
        let score = match e.relationship_score {
            75..=100 => score.green(),
            50..=74 => score.yellow(),
            _ => score.red(),
        };
        println!(
            "  {:<16} {:<22} {:<16} {} {:<10} {:<10} {:>4} {:<6} {}",
            truncate(&e.name, 16),
            truncate(&e.title, 22),
            truncate(&e.company, 16),
            score,
            e.last_meeting,
            e.next_meeting,
            e.strategic_initiatives,
            e.influence_level.to_string(),
            if e.decision_maker { "yes" } else { "no" },
        );
    }
}

fn print_executives_csv(executives: &[ExecutiveRecord]) {
    println!(
        "name,title,company,relationship_score,last_meeting,next_meeting,strategic_initiatives,influence_level,decision_maker"
    );
    for e in executives {
        println!(
            "{},{},{},{},{},{},{},{},{}",
            csv_field(&e.name),
            csv_field(&e.title),
            csv_field(&e.company),
            e.relationship_score,
            e.last_meeting,
            e.next_meeting,
            e.strategic_initiatives,
            e.influence_level,
            e.decision_maker,
        );
    }
}

// ---------------------------------------------------------------------------
// etsm planning
// ---------------------------------------------------------------------------

/// Show account planning rows.
pub fn run_planning(generator: &DatasetGenerator, format: OutputFormat) -> Result<()> {
    let rows = generator.account_planning();

    match format {
        OutputFormat::Json => print_json(&serde_json::json!({
            "seed": generator.seed(),
            "as_of": generator.as_of(),
            "accounts": rows,
        }))?,
        OutputFormat::Csv => print_planning_csv(&rows),
        OutputFormat::Table => {
            println!("{}", "Account Planning".bold().cyan());
            println!("{}", "=".repeat(60));
            print_seed(generator);
            print_planning_table(&rows);
        }
    }

    Ok(())
}

fn print_planning_table(rows: &[AccountPlanningRecord]) {
    for r in rows {
        println!(
            "  {}  health {}  risk {}",
            r.account.bold(),
            r.health_score,
            r.risk_level
        );
        println!(
            "    API usage {}  growth {}  initiatives {}",
            format_number(r.api_usage.round() as u64),
            format_growth(Some(r.growth_rate)),
            r.strategic_initiatives
        );
        println!("    Expansion: {}", r.expansion_opportunities);
        println!("    Next quarter: {}", r.next_quarter_goal);
        println!("    Stakeholders: {}", r.key_stakeholders);
        println!(
            "    {}",
            format!("Last QBR {}  Next QBR {}", r.last_qbr, r.next_qbr).dimmed()
        );
        println!();
    }
}

fn print_planning_csv(rows: &[AccountPlanningRecord]) {
    println!(
        "account,health_score,api_usage,growth_rate,expansion_opportunities,risk_level,next_quarter_goal,strategic_initiatives,key_stakeholders,last_qbr,next_qbr"
    );
    for r in rows {
        println!(
            "{},{},{:.0},{:.4},{},{},{},{},{},{},{}",
            csv_field(&r.account),
            r.health_score,
            r.api_usage,
            r.growth_rate,
            csv_field(&r.expansion_opportunities),
            r.risk_level,
            csv_field(&r.next_quarter_goal),
            r.strategic_initiatives,
            csv_field(&r.key_stakeholders),
            r.last_qbr,
            r.next_qbr,
        );
    }
}

// ---------------------------------------------------------------------------
// etsm overview
// ---------------------------------------------------------------------------

/// Show per-account totals and health indicators.
pub fn run_overview(generator: &DatasetGenerator, format: OutputFormat) -> Result<()> {
    let records = generator.usage_trends();
    let summary = analytics::account_overview(&records);
    let health = analytics::account_health(&records);

    match format {
        OutputFormat::Json => print_json(&serde_json::json!({
            "seed": generator.seed(),
            "accounts": summary,
            "health": health,
        }))?,
        OutputFormat::Csv => {
            println!("company,total_api_calls,avg_monthly_calls,total_revenue,use_cases,growth_rate,health");
            for (s, h) in summary.iter().zip(&health) {
                println!(
                    "{},{},{:.2},{:.2},{},{},{}",
                    csv_field(&s.company),
                    s.total_api_calls,
                    s.avg_monthly_calls,
                    s.total_revenue,
                    s.use_cases,
                    h.growth_rate.map(|g| format!("{g:.4}")).unwrap_or_default(),
                    h.indicator,
                );
            }
        }
        OutputFormat::Table => {
            println!("{}", "Account Overview".bold().cyan());
            println!("{}", "=".repeat(60));
            print_seed(generator);
            println!(
                "  {:<20} {:>14} {:>14} {:>12} {:>9}",
                "Company", "Total calls", "Avg monthly", "Revenue", "Use cases"
            );
            println!("  {}", "-".repeat(73));
            for s in &summary {
                println!(
                    "  {:<20} {:>14} {:>14} {:>12} {:>9}",
                    truncate(&s.company, 20),
                    format_number(s.total_api_calls),
                    format!("{:.2}", s.avg_monthly_calls),
                    format!("${:.2}", s.total_revenue),
                    s.use_cases,
                );
            }
            println!();

            println!("{}", "Account Health Indicators".bold().cyan());
            for h in &health {
                println!(
                    "  {:<20} {:>14} {:>10}  {}",
                    truncate(&h.company, 20),
                    format_number(h.current_usage),
                    format_growth(h.growth_rate),
                    colorize_health(h.indicator),
                );
            }
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// etsm analyze
// ---------------------------------------------------------------------------

/// Send an account-analysis prompt and print the response.
///
/// Failures are printed as text, never returned as errors: a missing key
/// or an API failure is something to read, not a crash.
pub fn run_analyze(
    config: &EtsmConfig,
    generator: &DatasetGenerator,
    api_key: Option<&ApiKey>,
    prompt: Option<String>,
    model: Option<String>,
    show_prompt: bool,
) -> Result<()> {
    let prompt = match prompt {
        Some(p) => p,
        None => prompts::account_analysis_prompt(&generator.usage_trends()),
    };
    let model = model.unwrap_or_else(|| config.insight.model.clone());

    let prompt = match prompts::validate_prompt(&prompt) {
        Ok(p) => p,
        Err(e) => {
            println!("{}", e.to_string().red());
            return Ok(());
        }
    };

    if show_prompt {
        println!("{}", "Prompt".bold().cyan());
        println!("  {} {}", "Model:".bold(), model);
        println!("{prompt}");
        println!();
    }

    match insight::request_insight(&config.insight, prompt, &model, api_key) {
        Ok(text) => {
            println!("{}", "Strategic Analysis".bold().cyan());
            println!("{}", "=".repeat(60));
            println!("{text}");
        }
        Err(e) if e.is_configuration() => {
            println!("{} {}", "API Key Missing!".red().bold(), e);
        }
        Err(e) => {
            println!("{}", e.to_string().red());
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// etsm health
// ---------------------------------------------------------------------------

/// Check credential and configuration status. Makes no network call.
pub fn run_health(config: &EtsmConfig, api_key: Option<&ApiKey>) -> Result<()> {
    println!("{}", "etsm Health Check".bold().cyan());
    println!("{}", "=".repeat(50));

    print_health_item(
        "API key",
        api_key.is_some(),
        if api_key.is_some() {
            "ANTHROPIC_API_KEY is set"
        } else {
            "ANTHROPIC_API_KEY missing (https://console.anthropic.com/)"
        },
    );
    print_health_item("Endpoint", true, &config.insight.api_url);
    print_health_item("Model", true, &config.insight.model);
    print_health_item(
        "Timeout",
        true,
        &config
            .insight
            .timeout_ms
            .map(|ms| format!("{ms} ms"))
            .unwrap_or_else(|| "none".to_string()),
    );
    print_health_item(
        "Companies",
        !config.generator.companies.is_empty(),
        &format!("{} in catalog", config.generator.companies.len()),
    );

    let global_exists = config::global_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    print_health_item(
        "Global config",
        true,
        if global_exists {
            "~/.etsm/config.toml"
        } else {
            "not found (built-in defaults)"
        },
    );

    Ok(())
}

fn print_health_item(name: &str, ok: bool, detail: &str) {
    let status = if ok {
        "✓".green().bold()
    } else {
        "✗".red().bold()
    };
    println!("  {} {:<16} {}", status, name, detail.dimmed());
}

// ---------------------------------------------------------------------------
// etsm config show | init | path
// ---------------------------------------------------------------------------

/// Show the effective (merged) configuration as TOML.
pub fn run_config_show(config: &EtsmConfig) -> Result<()> {
    let toml_str = config::to_toml(config)?;
    println!("{}", "Effective etsm Configuration".bold().cyan());
    println!("{}", "=".repeat(50));
    println!();
    println!("{toml_str}");

    let global_exists = config::global_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    let project_exists = config::project_config_file()
        .map(|p| p.exists())
        .unwrap_or(false);
    println!("{}", "Sources (highest priority last):".dimmed());
    println!("  {} built-in defaults", "·".dimmed());
    print_source("~/.etsm/config.toml", global_exists);
    print_source(".etsm.toml", project_exists);
    println!("  {} {}", "·".dimmed(), "ETSM_* environment variables".dimmed());

    Ok(())
}

fn print_source(label: &str, exists: bool) {
    if exists {
        println!("  {} {}", "✓".green(), label.dimmed());
    } else {
        println!("  {} {}", "·".dimmed(), format!("{label} (not found)").dimmed());
    }
}

/// Initialize a default config file at `~/.etsm/config.toml`.
pub fn run_config_init(force: bool) -> Result<()> {
    let path = config::init_config(force)?;
    println!(
        "{} Config written to {}",
        "✓".green().bold(),
        path.display()
    );
    println!("  {}", "Edit the file to customize the datasets and model.".dimmed());
    Ok(())
}

/// Print the config file locations.
pub fn run_config_path() -> Result<()> {
    if let Some(global) = config::global_config_file() {
        println!("global:  {}", global.display());
    }
    if let Some(project) = config::project_config_file() {
        println!("project: {}", project.display());
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

/// Format a number with comma separators for readability.
fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

/// Format a growth fraction as a signed percentage.
fn format_growth(growth: Option<f64>) -> String {
    match growth {
        Some(g) => format!("{:+.1}%", g * 100.0),
        None => "n/a".to_string(),
    }
}

/// Truncate a string to `max_len` characters, appending "…" if truncated.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{head}…")
    }
}

/// Quote a CSV field when it contains a delimiter, quote or newline.
fn csv_field(s: &str) -> String {
    if s.contains([',', '"', '\n']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

fn colorize_status(status: StrategyStatus) -> colored::ColoredString {
    let label = status.to_string();
    match status {
        StrategyStatus::InProgress => label.blue(),
        StrategyStatus::Planning => label.yellow(),
        StrategyStatus::Completed => label.green(),
        StrategyStatus::OnHold => label.red(),
    }
}

fn colorize_health(indicator: HealthIndicator) -> colored::ColoredString {
    let label = indicator.to_string();
    match indicator {
        HealthIndicator::HealthyGrowth => label.green(),
        HealthIndicator::StableUsage => label.yellow(),
        HealthIndicator::DecliningUsage => label.red(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
