//! # Cyclic sequence simulation over an order-statistics tree
//!
//! A sequence of integers is read through a movable pointer, and every step
//! either grows it (odd value under the pointer) or shrinks it (even value).
//! The sequence lives in a height-balanced tree keyed by in-order position,
//! so each step costs O(log n) no matter where the edit lands.
//!
//! ## Components
//!
//! 1. **[`OrderStatisticTree`]**: AVL tree with cached subtree sizes;
//!    positional `get` / `insert_at` / `remove_at`
//! 2. **[`CyclicSequenceSimulator`]**: the step rule and pointer arithmetic
//! 3. **[`io`]**: text framing for callers (`k` line + sequence line)
//! 4. **[`check`]**: batch runs of problem files against expected outputs
//!
//! ## Usage Example
//!
//! ```
//! use ringwalk::build_simulator;
//!
//! let mut sim = build_simulator([1, 2]);
//! sim.run(1)?;
//! assert_eq!(sim.render_from_pointer(), vec![0, 2, 1]);
//! # Ok::<(), ringwalk::SimulationError>(())
//! ```

#![warn(missing_docs, missing_debug_implementations)]

pub mod check;
pub mod io;
pub mod simulator;
pub mod tree;

pub use simulator::{build_simulator, CyclicSequenceSimulator, StepKind, StepRecord};
pub use tree::{InvariantViolation, OrderStatisticTree, TreeError, TreeShape};

use thiserror::Error;

/// Simulation options
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationConfig {
    /// Keep a [`StepRecord`] for every non-idle step in the [`RunSummary`]
    pub record_trace: bool,

    /// Re-verify the whole tree after every step (O(n) per step)
    pub verify_invariants: bool,
}

/// Outcome of [`CyclicSequenceSimulator::run`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunSummary {
    /// Steps requested (always all performed)
    pub steps: usize,

    /// Steps that inserted
    pub adds: usize,

    /// Steps that removed
    pub deletes: usize,

    /// Steps taken while the sequence was already empty
    pub idle: usize,

    /// Sequence length after the run
    pub final_len: usize,

    /// Pointer after the run
    pub final_pointer: usize,

    /// Per-step records (only with [`SimulationConfig::record_trace`])
    pub trace: Vec<StepRecord>,
}

/// Errors that can surface from a simulation step
///
/// Either one means the pointer arithmetic or the tree is broken; nothing
/// in the crate recovers from them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    /// Positional tree access was rejected
    #[error("tree access failed: {0}")]
    Tree(#[from] TreeError),

    /// Post-step verification found a corrupted tree
    #[error("tree invariant violated: {0}")]
    Invariant(#[from] InvariantViolation),
}
