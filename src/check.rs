//! Batch checking of problem files against expected outputs
//!
//! Every file in the inputs directory is paired with the file of the same
//! name in the outputs directory, with `input` replaced by `out`
//! (`input3.txt` → `out3.txt`). A case that cannot be read or solved is
//! recorded as failed and the batch moves on.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::io::solve_file;
use crate::SimulationConfig;

/// How one case ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseOutcome {
    /// Output matched the first line of the expected file
    Passed,

    /// Output differed from the expected line
    Mismatch {
        /// Expected line (trailing whitespace trimmed)
        expected: String,
        /// Rendered output
        got: String,
    },

    /// Input or expected file could not be read, or the input was malformed
    Error(String),
}

/// One paired case
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseReport {
    /// Input file name
    pub name: String,

    /// Result of the case
    pub outcome: CaseOutcome,
}

/// Result of a whole batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckReport {
    /// Paired cases in input-name order
    pub cases: Vec<CaseReport>,

    /// Input names with no expected-output file (not counted)
    pub unpaired: Vec<String>,
}

impl CheckReport {
    /// Cases that passed
    pub fn passed(&self) -> usize {
        self.cases
            .iter()
            .filter(|case| case.outcome == CaseOutcome::Passed)
            .count()
    }

    /// Paired cases run
    pub fn total(&self) -> usize {
        self.cases.len()
    }

    /// True when every paired case passed
    pub fn all_passed(&self) -> bool {
        self.passed() == self.total()
    }

    /// Print `Test <name>: PASSED|FAILED` per case, then the totals line
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for case in &self.cases {
            match &case.outcome {
                CaseOutcome::Passed => writeln!(out, "Test {}: PASSED", case.name)?,
                CaseOutcome::Mismatch { expected, got } => {
                    writeln!(out, "Test {}: FAILED", case.name)?;
                    writeln!(out, "Expected: {}", expected)?;
                    writeln!(out, "Got:      {}", got)?;
                }
                CaseOutcome::Error(message) => {
                    writeln!(out, "Test {}: FAILED", case.name)?;
                    writeln!(out, "Error:    {}", message)?;
                }
            }
        }
        writeln!(out, "Passed {} out of {} tests.", self.passed(), self.total())
    }
}

/// Run every input file in `inputs` against its pair in `outputs`.
///
/// Only failing to list `inputs` is an error; per-case failures are
/// recorded in the report.
pub fn check_dir(inputs: &Path, outputs: &Path, config: &SimulationConfig) -> Result<CheckReport> {
    let mut files: Vec<PathBuf> = fs::read_dir(inputs)
        .with_context(|| format!("failed to list inputs in {}", inputs.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<io::Result<_>>()?;
    files.sort();

    let mut report = CheckReport::default();

    for input in files.iter().filter(|p| p.is_file()) {
        let Some(name) = input.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let expected_path = outputs.join(name.replace("input", "out"));
        if !expected_path.exists() {
            warn!(input = name, "no corresponding output file");
            report.unpaired.push(name.to_string());
            continue;
        }

        let outcome = run_case(input, &expected_path, config);
        debug!(input = name, ?outcome, "case finished");
        report.cases.push(CaseReport {
            name: name.to_string(),
            outcome,
        });
    }

    Ok(report)
}

fn run_case(input: &Path, expected_path: &Path, config: &SimulationConfig) -> CaseOutcome {
    let expected = match fs::read_to_string(expected_path) {
        Ok(text) => text.lines().next().unwrap_or("").trim_end().to_string(),
        Err(err) => {
            return CaseOutcome::Error(format!(
                "failed to read {}: {}",
                expected_path.display(),
                err
            ))
        }
    };

    match solve_file(input, config.clone()) {
        Ok(got) if got == expected => CaseOutcome::Passed,
        Ok(got) => CaseOutcome::Mismatch { expected, got },
        Err(err) => CaseOutcome::Error(format!("{:#}", err)),
    }
}
