//! JSON API handlers for the web dashboard.
//!
//! Each `get_*`/`post_*` handler wraps a payload builder that returns a
//! plain serializable struct. The page does all formatting client-side.

use std::io::Cursor;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tiny_http::Response;

use crate::analytics::{
    self, AccountHealth, AccountSummary, CompanyGrowth, StrategyOverview, UsageMetrics,
};
use crate::config;
use crate::error::InsightError;
use crate::generator::{
    AccountPlanningRecord, ExecutiveRecord, StrategyRecord, UsageRecord,
};
use crate::insight::{self, credential, prompts};

use super::{DashboardState, json_bytes};

// ---------------------------------------------------------------------------
// JSON response types
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct UsageResponse {
    seed: u64,
    metrics: UsageMetrics,
    growth: Vec<CompanyGrowth>,
    records: Vec<UsageRecord>,
}

#[derive(Serialize)]
struct StrategiesResponse {
    overview: StrategyOverview,
    strategies: Vec<StrategyRecord>,
}

#[derive(Serialize)]
struct ExecutivesResponse {
    seed: u64,
    as_of: NaiveDate,
    executives: Vec<ExecutiveRecord>,
}

#[derive(Serialize)]
struct PlanningResponse {
    seed: u64,
    as_of: NaiveDate,
    accounts: Vec<AccountPlanningRecord>,
}

#[derive(Serialize)]
struct OverviewResponse {
    seed: u64,
    accounts: Vec<AccountSummary>,
    health: Vec<AccountHealth>,
}

#[derive(Serialize)]
struct PromptResponse {
    seed: u64,
    model: String,
    prompt: String,
}

/// `POST /api/analyze` body.
#[derive(Deserialize)]
struct AnalyzeRequest {
    prompt: String,
    #[serde(default)]
    model: Option<String>,
}

#[derive(Serialize)]
struct AnalyzeResponse {
    model: String,
    prompt: String,
    response: String,
    ok: bool,
}

#[derive(Serialize)]
struct HealthResponse {
    api_key_configured: bool,
    api_url: String,
    model: String,
    companies: usize,
    config_exists: bool,
    /// How to set the key, present only while it is missing.
    api_key_help: Option<String>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build a JSON response with the given status.
fn json_response<T: Serialize>(data: &T, status: u16) -> Result<Response<Cursor<Vec<u8>>>> {
    let body = serde_json::to_vec(data).context("failed to serialize JSON response")?;
    Ok(json_bytes(body, status))
}

/// Parse the `?seed=N` query parameter from a URL.
pub(super) fn parse_seed_param(url: &str) -> Option<u64> {
    url.split('?').nth(1)?.split('&').find_map(|pair| {
        let (k, v) = pair.split_once('=')?;
        if k == "seed" { v.parse().ok() } else { None }
    })
}

// ---------------------------------------------------------------------------
// Payload builders
// ---------------------------------------------------------------------------

fn usage_payload(state: &DashboardState, url: &str) -> UsageResponse {
    let generator = state.generator(url);
    let records = generator.usage_trends();
    UsageResponse {
        seed: generator.seed(),
        metrics: analytics::usage_metrics(&records),
        growth: analytics::company_growth(&records),
        records,
    }
}

fn strategies_payload(state: &DashboardState, url: &str) -> StrategiesResponse {
    let strategies = state.generator(url).strategies();
    StrategiesResponse {
        overview: analytics::strategy_overview(&strategies),
        strategies,
    }
}

fn executives_payload(state: &DashboardState, url: &str) -> ExecutivesResponse {
    let generator = state.generator(url);
    ExecutivesResponse {
        seed: generator.seed(),
        as_of: generator.as_of(),
        executives: generator.executives(),
    }
}

fn planning_payload(state: &DashboardState, url: &str) -> PlanningResponse {
    let generator = state.generator(url);
    PlanningResponse {
        seed: generator.seed(),
        as_of: generator.as_of(),
        accounts: generator.account_planning(),
    }
}

fn overview_payload(state: &DashboardState, url: &str) -> OverviewResponse {
    let generator = state.generator(url);
    let records = generator.usage_trends();
    OverviewResponse {
        seed: generator.seed(),
        accounts: analytics::account_overview(&records),
        health: analytics::account_health(&records),
    }
}

fn prompt_payload(state: &DashboardState, url: &str) -> PromptResponse {
    let generator = state.generator(url);
    PromptResponse {
        seed: generator.seed(),
        model: state.config.insight.model.clone(),
        prompt: prompts::account_analysis_prompt(&generator.usage_trends()),
    }
}

/// Run one analysis. Requester failures come back as `ok: false` with the
/// failure text as the response, mirroring the text-only contract.
fn analyze_payload(state: &DashboardState, req: AnalyzeRequest) -> Result<AnalyzeResponse> {
    let prompt = prompts::validate_prompt(&req.prompt)?.to_string();
    let model = req
        .model
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| state.config.insight.model.clone());

    let result = insight::request_insight(
        &state.config.insight,
        &prompt,
        &model,
        state.api_key.as_ref(),
    );
    let ok = result.is_ok();

    Ok(AnalyzeResponse {
        model,
        prompt,
        response: insight::into_text(result),
        ok,
    })
}

fn health_payload(state: &DashboardState) -> HealthResponse {
    HealthResponse {
        api_key_configured: state.api_key.is_some(),
        api_url: state.config.insight.api_url.clone(),
        model: state.config.insight.model.clone(),
        companies: state.config.generator.companies.len(),
        config_exists: config::global_config_file()
            .map(|p| p.exists())
            .unwrap_or(false),
        api_key_help: state.api_key.is_none().then(|| {
            InsightError::Configuration {
                var: credential::API_KEY_VAR,
            }
            .to_string()
        }),
    }
}

// ---------------------------------------------------------------------------
// API Handlers
// ---------------------------------------------------------------------------

/// `GET /api/usage?seed=N`: monthly usage, metrics and growth.
pub fn get_usage(state: &DashboardState, url: &str) -> Result<Response<Cursor<Vec<u8>>>> {
    json_response(&usage_payload(state, url), 200)
}

/// `GET /api/strategies`: strategy board and overview.
pub fn get_strategies(state: &DashboardState, url: &str) -> Result<Response<Cursor<Vec<u8>>>> {
    json_response(&strategies_payload(state, url), 200)
}

/// `GET /api/executives?seed=N`: executive relationships.
pub fn get_executives(state: &DashboardState, url: &str) -> Result<Response<Cursor<Vec<u8>>>> {
    json_response(&executives_payload(state, url), 200)
}

/// `GET /api/planning?seed=N`: account planning rows.
pub fn get_planning(state: &DashboardState, url: &str) -> Result<Response<Cursor<Vec<u8>>>> {
    json_response(&planning_payload(state, url), 200)
}

/// `GET /api/overview?seed=N`: per-account totals and health.
pub fn get_overview(state: &DashboardState, url: &str) -> Result<Response<Cursor<Vec<u8>>>> {
    json_response(&overview_payload(state, url), 200)
}

/// `GET /api/prompt?seed=N`: the default analysis prompt and model.
pub fn get_prompt(state: &DashboardState, url: &str) -> Result<Response<Cursor<Vec<u8>>>> {
    json_response(&prompt_payload(state, url), 200)
}

/// `POST /api/analyze`: send a prompt to the model.
///
/// Expects JSON body: `{ "prompt": "...", "model": "claude-..." }`. A
/// malformed body or a blank prompt is a 400; every requester outcome is a
/// 200.
pub fn post_analyze(state: &DashboardState, body: &str) -> Result<Response<Cursor<Vec<u8>>>> {
    let req: AnalyzeRequest = match serde_json::from_str(body) {
        Ok(req) => req,
        Err(e) => {
            let error = format!("invalid JSON in analyze request: {e}");
            return json_response(&serde_json::json!({ "error": error }), 400);
        }
    };

    match analyze_payload(state, req) {
        Ok(resp) => json_response(&resp, 200),
        Err(e) => json_response(&serde_json::json!({ "error": e.to_string() }), 400),
    }
}

/// `GET /api/health`: credential and config summary.
pub fn get_health(state: &DashboardState) -> Result<Response<Cursor<Vec<u8>>>> {
    json_response(&health_payload(state), 200)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
