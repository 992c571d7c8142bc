//! CLI defaults from environment.

use skygraph_core::{PlannerConfig, DEFAULT_SKIP_ROWS};
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub drone_altitude: f64,
    pub skip_rows: usize,
    pub parallel_filter: bool,
    pub log_json: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unset or unparsable values fall back
    /// to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            drone_altitude: lookup("SKYGRAPH_ALTITUDE")
                .and_then(|s| s.parse().ok())
                .unwrap_or(5.0),
            skip_rows: lookup("SKYGRAPH_SKIP_ROWS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_SKIP_ROWS),
            parallel_filter: lookup("SKYGRAPH_PARALLEL")
                .map(|s| parse_flag(&s))
                .unwrap_or(false),
            log_json: lookup("SKYGRAPH_LOG_JSON")
                .map(|s| parse_flag(&s))
                .unwrap_or(false),
        }
    }

    pub fn planner(&self) -> PlannerConfig {
        PlannerConfig {
            drone_altitude: self.drone_altitude,
            parallel_filter: self.parallel_filter,
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
