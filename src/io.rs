//! Text framing for callers
//!
//! Input: the step count `k` on the first line, the whitespace-separated
//! sequence on the second. A missing or blank second line is an empty
//! sequence. Output: the sequence from the pointer, space-separated, on one
//! line (empty for an empty sequence).

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use thiserror::Error;

use crate::{CyclicSequenceSimulator, SimulationConfig};

/// Parsed problem text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProblemInput {
    /// Number of steps `k`
    pub steps: usize,

    /// Initial sequence
    pub values: Vec<i64>,
}

/// Malformed problem text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// No first line at all
    #[error("missing step count")]
    MissingStepCount,

    /// First line is not a non-negative integer
    #[error("invalid step count '{0}'")]
    InvalidStepCount(String),

    /// A sequence token is not an integer
    #[error("invalid value '{token}' at position {position}")]
    InvalidValue {
        /// Zero-based token position on the sequence line
        position: usize,
        /// Offending token
        token: String,
    },
}

/// Parse `k` and the initial sequence
pub fn parse_problem(text: &str) -> Result<ProblemInput, InputError> {
    let mut lines = text.lines();

    let first = lines.next().ok_or(InputError::MissingStepCount)?.trim();
    if first.is_empty() {
        return Err(InputError::MissingStepCount);
    }
    let steps = first
        .parse::<usize>()
        .map_err(|_| InputError::InvalidStepCount(first.to_string()))?;

    let values = match lines.next() {
        Some(line) => line
            .split_whitespace()
            .enumerate()
            .map(|(position, token)| {
                token.parse::<i64>().map_err(|_| InputError::InvalidValue {
                    position,
                    token: token.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?,
        None => Vec::new(),
    };

    Ok(ProblemInput { steps, values })
}

/// Join values with single spaces
pub fn render_line(values: &[i64]) -> String {
    values
        .iter()
        .map(i64::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse, simulate and render in one go
pub fn solve(text: &str, config: SimulationConfig) -> Result<String> {
    let problem = parse_problem(text)?;
    let mut sim = CyclicSequenceSimulator::with_config(problem.values, config);
    sim.run(problem.steps)?;
    Ok(render_line(&sim.render_from_pointer()))
}

/// Read a problem file and solve it
pub fn solve_file(path: &Path, config: SimulationConfig) -> Result<String> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read problem file {}", path.display()))?;
    solve(&text, config).with_context(|| format!("failed to solve {}", path.display()))
}
