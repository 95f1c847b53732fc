//! Run configuration: solver settings and resale term handling
//!
//! Layered as defaults, then a JSON file, then environment variables:
//!   IRR_GUESS, IRR_MAX_ITERATIONS, IRR_TOLERANCE, RESALE_TERM_FALLBACK=1

use serde::{Deserialize, Serialize};
use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::assumptions::{Assumptions, TermPolicy};
use crate::error::LoadError;
use crate::projection::SolverConfig;
use crate::scenario::Evaluator;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub solver: SolverConfig,
    pub term_policy: TermPolicy,
}

impl RunConfig {
    /// Load from a JSON file; missing fields keep their defaults
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    /// Apply overrides from the process environment
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| env::var(key).ok())
    }

    /// Apply overrides from any key lookup; unparsable values are ignored
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(guess) = lookup("IRR_GUESS").and_then(|s| s.parse().ok()) {
            self.solver.guess = guess;
        }
        if let Some(max_iterations) = lookup("IRR_MAX_ITERATIONS").and_then(|s| s.parse().ok()) {
            self.solver.max_iterations = max_iterations;
        }
        if let Some(tolerance) = lookup("IRR_TOLERANCE").and_then(|s| s.parse().ok()) {
            self.solver.tolerance = tolerance;
        }
        if let Some(flag) = lookup("RESALE_TERM_FALLBACK") {
            self.term_policy = match flag.trim() {
                "1" | "true" | "yes" => TermPolicy::FallbackToLongest,
                _ => TermPolicy::Strict,
            };
        }
        self
    }

    pub fn evaluator(&self) -> Evaluator {
        Evaluator::new(Assumptions::standard().with_term_policy(self.term_policy), self.solver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = RunConfig::default();
        assert_eq!(config.solver, SolverConfig::default());
        assert_eq!(config.term_policy, TermPolicy::Strict);
    }

    #[test]
    fn test_partial_json() {
        let config: RunConfig =
            serde_json::from_str(r#"{"solver": {"guess": 0.05}, "term_policy": "fallback_to_longest"}"#).unwrap();
        assert_eq!(config.solver.guess, 0.05);
        assert_eq!(config.solver.max_iterations, 1000);
        assert_eq!(config.term_policy, TermPolicy::FallbackToLongest);
    }

    #[test]
    fn test_overrides() {
        let vars: HashMap<&str, &str> = [
            ("IRR_GUESS", "0.2"),
            ("IRR_MAX_ITERATIONS", "50"),
            ("IRR_TOLERANCE", "not-a-number"),
            ("RESALE_TERM_FALLBACK", "1"),
        ]
        .into_iter()
        .collect();

        let config = RunConfig::default().with_overrides_from(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config.solver.guess, 0.2);
        assert_eq!(config.solver.max_iterations, 50);
        assert_eq!(config.solver.tolerance, 1e-6);
        assert_eq!(config.term_policy, TermPolicy::FallbackToLongest);
        assert_eq!(config.evaluator().assumptions().term_policy, TermPolicy::FallbackToLongest);
    }
}
