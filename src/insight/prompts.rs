/// Prompt construction for account analysis.
///
/// The default prompt embeds a summary of the usage table: the company
/// list, each company's first-to-latest growth, and latest-period usage.
/// Users may edit it freely before sending; only blank prompts are refused.
use std::fmt::Write as _;

use anyhow::Result;

use crate::analytics::company_growth;
use crate::generator::UsageRecord;

/// Message shown when a blank prompt is submitted.
pub const EMPTY_PROMPT_MESSAGE: &str = "Please enter a prompt before generating.";

/// Analysis areas requested from the model, in order.
const ANALYSIS_AREAS: &[(&str, &str)] = &[
    ("Resource Allocation", "Where to invest time and budget"),
    ("Risk Management", "Which accounts need immediate attention"),
    ("Growth Strategy", "Which opportunities to prioritize"),
    ("Strategic Action", "Single most important next step"),
    ("Timeline", "When to act (Immediate/30 days/90 days)"),
];

/// Build the default account-analysis prompt from a usage table.
pub fn account_analysis_prompt(records: &[UsageRecord]) -> String {
    let growth = company_growth(records);
    let mut prompt = String::new();

    prompt.push_str("As an ETSM, analyze these accounts and provide strategic insights:\n\n");

    let names: Vec<&str> = growth.iter().map(|g| g.company.as_str()).collect();
    let _ = writeln!(prompt, "Companies: {}", names.join(", "));

    prompt.push_str("Usage Patterns (growth from first to latest month):\n");
    for g in &growth {
        match g.growth_rate {
            Some(rate) => {
                let _ = writeln!(prompt, "- {}: {:+.1}%", g.company, rate * 100.0);
            }
            None => {
                let _ = writeln!(prompt, "- {}: n/a (no usage in first month)", g.company);
            }
        }
    }

    prompt.push_str("Current Usage (API calls in latest month):\n");
    for g in &growth {
        let _ = writeln!(prompt, "- {}: {}", g.company, g.latest_calls);
    }

    prompt.push_str("\nProvide strategic analysis on:\n");
    for (i, (area, detail)) in ANALYSIS_AREAS.iter().enumerate() {
        let _ = writeln!(prompt, "{}. **{area}**: {detail}", i + 1);
    }

    prompt.push_str("\nFormat as a strategic account analysis for ETSM decision-making.\n");
    prompt
}

/// Reject blank prompts before they reach the requester. A prompt with
/// content is returned exactly as given.
pub fn validate_prompt(prompt: &str) -> Result<&str> {
    if prompt.trim().is_empty() {
        anyhow::bail!(EMPTY_PROMPT_MESSAGE);
    }
    Ok(prompt)
}
