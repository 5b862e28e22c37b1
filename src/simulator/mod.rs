//! Cyclic sequence simulator
//!
//! Holds one [`OrderStatisticTree`] and a pointer into its in-order sequence.
//! Each step reads the value `x` under the pointer:
//!   - odd `x`  → insert `x - 1` right after the pointer, advance by `x`
//!   - even `x` → remove the element after the pointer (cyclically), keep the
//!     pointer on the same element, then advance by the removed value
//!
//! An empty sequence makes every further step a no-op.

mod step;

pub use step::{StepKind, StepRecord};

use std::fmt;

use tracing::{debug, trace};

use crate::tree::OrderStatisticTree;
use crate::{RunSummary, SimulationConfig, SimulationError};

/// Build a simulator over `values` with the default configuration
pub fn build_simulator<I>(values: I) -> CyclicSequenceSimulator
where
    I: IntoIterator<Item = i64>,
{
    CyclicSequenceSimulator::new(values)
}

/// Sequence plus pointer, advanced one step at a time
#[derive(Debug, Clone)]
pub struct CyclicSequenceSimulator {
    tree: OrderStatisticTree<i64>,

    /// Index into the in-order sequence; `< len` when non-empty, else 0
    pointer: usize,

    config: SimulationConfig,
}

impl CyclicSequenceSimulator {
    /// Append `values` in order and start with the pointer on the first one
    pub fn new<I>(values: I) -> Self
    where
        I: IntoIterator<Item = i64>,
    {
        Self::with_config(values, SimulationConfig::default())
    }

    /// Same as [`new`](Self::new) with explicit configuration
    pub fn with_config<I>(values: I, config: SimulationConfig) -> Self
    where
        I: IntoIterator<Item = i64>,
    {
        Self {
            tree: values.into_iter().collect(),
            pointer: 0,
            config,
        }
    }

    /// Current pointer
    pub fn pointer(&self) -> usize {
        self.pointer
    }

    /// Current sequence length
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// True once every element has been deleted (or none were given)
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Value under the pointer
    pub fn current(&self) -> Option<i64> {
        self.tree.get(self.pointer).ok().copied()
    }

    /// Read-only view of the backing tree
    pub fn tree(&self) -> &OrderStatisticTree<i64> {
        &self.tree
    }

    /// Perform one tick. Returns `None` when the sequence is empty.
    pub fn step(&mut self) -> Result<Option<StepRecord>, SimulationError> {
        if self.tree.is_empty() {
            return Ok(None);
        }

        self.pointer %= self.tree.len();
        let current = *self.tree.get(self.pointer)?;

        let record = match StepKind::for_value(current) {
            StepKind::Add => self.add(current)?,
            StepKind::Delete => self.delete(current)?,
        };

        if self.config.verify_invariants {
            self.tree.verify()?;
        }

        trace!(
            kind = ?record.kind,
            trigger = record.trigger,
            position = record.position,
            operand = record.operand,
            pointer = record.pointer,
            len = record.len,
            "step"
        );

        Ok(Some(record))
    }

    /// Run exactly `steps` ticks (no-ops once empty).
    pub fn run(&mut self, steps: usize) -> Result<RunSummary, SimulationError> {
        debug!(steps, len = self.tree.len(), "starting run");

        let mut summary = RunSummary {
            steps,
            ..RunSummary::default()
        };

        for _ in 0..steps {
            match self.step()? {
                Some(record) => {
                    match record.kind {
                        StepKind::Add => summary.adds += 1,
                        StepKind::Delete => summary.deletes += 1,
                    }
                    if self.config.record_trace {
                        summary.trace.push(record);
                    }
                }
                None => summary.idle += 1,
            }
        }

        summary.final_len = self.tree.len();
        summary.final_pointer = self.pointer;

        debug!(
            adds = summary.adds,
            deletes = summary.deletes,
            idle = summary.idle,
            final_len = summary.final_len,
            "run complete"
        );

        Ok(summary)
    }

    /// Contents starting at the pointer, wrapping once around
    pub fn render_from_pointer(&self) -> Vec<i64> {
        self.cyclic_iter().copied().collect()
    }

    /// Elements from the pointer to the end, then from the front up to it
    fn cyclic_iter(&self) -> impl Iterator<Item = &i64> + '_ {
        self.tree
            .iter_from(self.pointer)
            .chain(self.tree.iter().take(self.pointer))
    }

    fn add(&mut self, value: i64) -> Result<StepRecord, SimulationError> {
        let position = step::insert_position(self.pointer, self.tree.len());
        let inserted = value - 1;

        self.tree.insert_at(position, inserted)?;
        self.pointer = step::advance(self.pointer, value, self.tree.len());

        Ok(StepRecord {
            kind: StepKind::Add,
            trigger: value,
            position,
            operand: inserted,
            pointer: self.pointer,
            len: self.tree.len(),
        })
    }

    fn delete(&mut self, trigger: i64) -> Result<StepRecord, SimulationError> {
        let position = step::remove_position(self.pointer, self.tree.len());
        let removed = self.tree.remove_at(position)?;

        let len = self.tree.len();
        if len == 0 {
            self.pointer = 0;
        } else {
            // Removal at or before the pointer shifts its element left by one
            if position <= self.pointer {
                self.pointer = step::retreat(self.pointer, len);
            }
            self.pointer = step::advance(self.pointer, removed, len);
        }

        Ok(StepRecord {
            kind: StepKind::Delete,
            trigger,
            position,
            operand: removed,
            pointer: self.pointer,
            len,
        })
    }
}

impl fmt::Display for CyclicSequenceSimulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for value in self.cyclic_iter() {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{}", value)?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_odd_step() {
        // [1, 2]: 1 is odd → insert 0 at 1 → [1, 0, 2], pointer (0 + 1) % 3
        let mut sim = build_simulator([1, 2]);
        let record = sim.step().unwrap().unwrap();

        assert_eq!(record.kind, StepKind::Add);
        assert_eq!(record.position, 1);
        assert_eq!(record.operand, 0);
        assert_eq!(sim.tree().to_vec(), vec![1, 0, 2]);
        assert_eq!(sim.pointer(), 1);
        assert_eq!(sim.render_from_pointer(), vec![0, 2, 1]);
    }

    #[test]
    fn test_delete_last_element_empties() {
        let mut sim = build_simulator([4]);
        let record = sim.step().unwrap().unwrap();

        assert_eq!(record.kind, StepKind::Delete);
        assert_eq!(record.position, 0);
        assert_eq!(record.operand, 4);
        assert!(sim.is_empty());
        assert_eq!(sim.pointer(), 0);
        assert_eq!(sim.step().unwrap(), None);
        assert!(sim.render_from_pointer().is_empty());
    }

    #[test]
    fn test_delete_wrapping_to_front_keeps_pointer_on_element() {
        // [3, 5, 2] with pointer on 2 (last): removes position 0 (value 3),
        // pointer slides to 1 (still on 2), then advances by 3 → (1 + 3) % 2
        let mut sim = build_simulator([3, 5, 2]);
        sim.pointer = 2;
        let record = sim.step().unwrap().unwrap();

        assert_eq!(record.position, 0);
        assert_eq!(record.operand, 3);
        assert_eq!(sim.tree().to_vec(), vec![5, 2]);
        assert_eq!(sim.pointer(), 0);
    }

    #[test]
    fn test_run_counts_idle_steps() {
        let mut sim = build_simulator([4]);
        let summary = sim.run(5).unwrap();
        assert_eq!(summary.steps, 5);
        assert_eq!(summary.deletes, 1);
        assert_eq!(summary.idle, 4);
        assert_eq!(summary.final_len, 0);
    }

    #[test]
    fn test_trace_recorded_when_enabled() {
        let config = SimulationConfig {
            record_trace: true,
            verify_invariants: true,
        };
        let mut sim = CyclicSequenceSimulator::with_config([1, 2], config);
        let summary = sim.run(3).unwrap();
        assert_eq!(summary.trace.len(), summary.adds + summary.deletes);
        assert!(!summary.trace.is_empty());
    }

    #[test]
    fn test_display_matches_render() {
        let mut sim = build_simulator([7, 3, 8, 1]);
        sim.run(4).unwrap();
        let rendered: Vec<String> = sim
            .render_from_pointer()
            .iter()
            .map(|v| v.to_string())
            .collect();
        assert_eq!(sim.to_string(), rendered.join(" "));
    }
}
