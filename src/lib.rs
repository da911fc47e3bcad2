//! etsm: synthetic account-manager dashboard data plus model-backed
//! strategic analysis.
//!
//! - **generator**: seeded synthetic datasets (usage, strategies,
//!   executives, account planning)
//! - **analytics**: the aggregates each dashboard page shows
//! - **insight**: prompt construction and the Messages API requester
//! - **config**: layered TOML configuration
//! - **cli** / **web**: terminal and browser front ends

pub mod analytics;
pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod insight;
pub mod web;
