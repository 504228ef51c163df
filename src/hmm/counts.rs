//!
//! Sufficient statistics of an HMM collected from labeled sequences
//!
use crate::common::{Labeled, Outcome, State};
use crate::distribution::MultinomialCounts;
use crate::error::{check_id, HmmError, IdKind, Result};
use log::info;
use rayon::prelude::*;
use std::ops::AddAssign;

///
/// Start/transition/emission counts of an HMM with fixed sizes.
///
/// * `start` counts the first state of each sequence
/// * `transitions[s]` counts the next state after `s`
/// * `emissions[s]` counts the outcomes emitted from `s`
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HMMCounts {
    num_states: usize,
    num_outcomes: usize,
    start: MultinomialCounts,
    transitions: Vec<MultinomialCounts>,
    emissions: Vec<MultinomialCounts>,
}

impl HMMCounts {
    ///
    /// Empty counts for `num_states` states and `num_outcomes` outcomes.
    /// Both should be positive.
    ///
    pub fn new(num_states: usize, num_outcomes: usize) -> Result<HMMCounts> {
        if num_states == 0 || num_outcomes == 0 {
            return Err(HmmError::Configuration(format!(
                "num_states={} and num_outcomes={} must be positive",
                num_states, num_outcomes
            )));
        }
        Ok(HMMCounts {
            num_states,
            num_outcomes,
            start: MultinomialCounts::with_size(num_states),
            transitions: vec![MultinomialCounts::with_size(num_states); num_states],
            emissions: vec![MultinomialCounts::with_size(num_outcomes); num_states],
        })
    }
    pub fn num_states(&self) -> usize {
        self.num_states
    }
    pub fn num_outcomes(&self) -> usize {
        self.num_outcomes
    }
    pub fn start(&self) -> &MultinomialCounts {
        &self.start
    }
    ///
    /// Counts of next states from `state`
    ///
    /// # Panics
    /// if `state >= num_states`
    pub fn transition(&self, state: State) -> &MultinomialCounts {
        &self.transitions[state]
    }
    ///
    /// Counts of outcomes emitted from `state`
    ///
    /// # Panics
    /// if `state >= num_states`
    pub fn emission(&self, state: State) -> &MultinomialCounts {
        &self.emissions[state]
    }
    fn check_state(&self, state: State) -> Result<()> {
        check_id(IdKind::State, state, self.num_states)
    }
    fn check_outcome(&self, outcome: Outcome) -> Result<()> {
        check_id(IdKind::Outcome, outcome, self.num_outcomes)
    }
    pub fn inc_start(&mut self, state: State) -> Result<()> {
        self.check_state(state)?;
        self.start.inc(state);
        Ok(())
    }
    pub fn inc_transition(&mut self, state: State, next_state: State) -> Result<()> {
        self.check_state(state)?;
        self.check_state(next_state)?;
        self.transitions[state].inc(next_state);
        Ok(())
    }
    pub fn inc_emission(&mut self, state: State, outcome: Outcome) -> Result<()> {
        self.check_state(state)?;
        self.check_outcome(outcome)?;
        self.emissions[state].inc(outcome);
        Ok(())
    }
    ///
    /// Count a single aligned sequence `[(s_0, o_0), ..., (s_n-1, o_n-1)]`
    ///
    /// * `s_0` as start state
    /// * `s_i -> s_i+1` as transitions
    /// * `s_i -> o_i` as emissions
    ///
    /// All ids are checked before counting, so an invalid sequence
    /// leaves the counts unchanged.
    ///
    pub fn add_sequence(&mut self, seq: &[Labeled]) -> Result<()> {
        for &(state, outcome) in seq {
            self.check_state(state)?;
            self.check_outcome(outcome)?;
        }
        if let Some(&(first, _)) = seq.first() {
            self.start.inc(first);
        }
        for pair in seq.windows(2) {
            self.transitions[pair[0].0].inc(pair[1].0);
        }
        for &(state, outcome) in seq {
            self.emissions[state].inc(outcome);
        }
        Ok(())
    }
    ///
    /// Counts of all sequences
    ///
    pub fn from_sequences<T>(num_states: usize, num_outcomes: usize, seqs: T) -> Result<HMMCounts>
    where
        T: IntoIterator,
        T::Item: AsRef<[Labeled]>,
    {
        let mut counts = HMMCounts::new(num_states, num_outcomes)?;
        let mut n_seqs = 0;
        for seq in seqs {
            counts.add_sequence(seq.as_ref())?;
            n_seqs += 1;
        }
        info!(
            "counted n_seqs={} n_starts={}",
            n_seqs,
            counts.start.total()
        );
        Ok(counts)
    }
    ///
    /// Counts of all sequences, with rayon parallel calculation.
    ///
    /// Each worker fills its own `HMMCounts`, and they are merged at the end.
    /// The result is the same as `from_sequences`.
    ///
    pub fn from_sequences_parallel<T>(
        num_states: usize,
        num_outcomes: usize,
        seqs: T,
    ) -> Result<HMMCounts>
    where
        T: IntoParallelIterator,
        T::Item: AsRef<[Labeled]>,
    {
        let empty = HMMCounts::new(num_states, num_outcomes)?;
        let counts = seqs
            .into_par_iter()
            .try_fold(
                || empty.clone(),
                |mut counts, seq| {
                    counts.add_sequence(seq.as_ref())?;
                    Ok::<_, HmmError>(counts)
                },
            )
            .try_reduce(
                || empty.clone(),
                |mut a, b| {
                    a += &b;
                    Ok(a)
                },
            )?;
        info!("counted n_starts={} (parallel)", counts.start.total());
        Ok(counts)
    }
    fn has_same_shape(&self, other: &HMMCounts) -> bool {
        self.num_states == other.num_states && self.num_outcomes == other.num_outcomes
    }
}

///
/// Elementwise sum of two counts of the same shape
///
/// Used to reduce the counts of partitioned corpus shards.
///
pub fn merge_counts(a: &HMMCounts, b: &HMMCounts) -> Result<HMMCounts> {
    if !a.has_same_shape(b) {
        return Err(HmmError::Configuration(format!(
            "cannot merge counts of shape ({}, {}) and ({}, {})",
            a.num_states, a.num_outcomes, b.num_states, b.num_outcomes
        )));
    }
    let mut merged = a.clone();
    merged += b;
    Ok(merged)
}

/// In-place sum of same-shaped counts
///
/// # Panics
/// if the shapes differ. Use `merge_counts` to get an error instead.
impl<'a> AddAssign<&'a HMMCounts> for HMMCounts {
    fn add_assign(&mut self, other: &'a HMMCounts) {
        assert!(self.has_same_shape(other), "shape mismatch in HMMCounts");
        self.start += &other.start;
        for (a, b) in self.transitions.iter_mut().zip(other.transitions.iter()) {
            *a += b;
        }
        for (a, b) in self.emissions.iter_mut().zip(other.emissions.iter()) {
            *a += b;
        }
    }
}

impl std::fmt::Display for HMMCounts {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "start\t{}", self.start)?;
        for s in 0..self.num_states {
            writeln!(f, "trans[{}]\t{}", s, self.transitions[s])?;
        }
        for s in 0..self.num_states {
            writeln!(f, "emit[{}]\t{}", s, self.emissions[s])?;
        }
        Ok(())
    }
}
