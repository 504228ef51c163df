//!
//! Trained HMM and its maximum likelihood estimation
//!
use super::counts::HMMCounts;
use crate::common::{Outcome, State};
use crate::distribution::Multinomial;
use crate::error::{check_id, HmmError, IdKind, Result};
use crate::prob::Prob;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

///
/// Immutable HMM with `num_states` hidden states and `num_outcomes` outcomes.
///
/// `transitions.len() == emissions.len() == num_states` always holds.
///
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "HMMRaw")]
pub struct HMM {
    num_outcomes: usize,
    start: Multinomial,
    transitions: Vec<Multinomial>,
    emissions: Vec<Multinomial>,
}

/// Unchecked form of `HMM` used while deserializing
#[derive(Deserialize)]
struct HMMRaw {
    num_outcomes: usize,
    start: Multinomial,
    transitions: Vec<Multinomial>,
    emissions: Vec<Multinomial>,
}

impl TryFrom<HMMRaw> for HMM {
    type Error = HmmError;
    fn try_from(raw: HMMRaw) -> Result<HMM> {
        HMM::new(raw.num_outcomes, raw.start, raw.transitions, raw.emissions)
    }
}

/// Which table of the HMM a distribution belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Row {
    Start,
    Transition(State),
    Emission(State),
}

impl std::fmt::Display for Row {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Row::Start => write!(f, "start"),
            Row::Transition(s) => write!(f, "trans[{}]", s),
            Row::Emission(s) => write!(f, "emit[{}]", s),
        }
    }
}

impl HMM {
    ///
    /// HMM from explicit distributions.
    ///
    /// `transitions[s]` is the distribution of the next state of `s` and
    /// `emissions[s]` is the distribution of outcomes of `s`.
    ///
    /// Rows over states must not be wider than the number of states, and
    /// emission rows not wider than `num_outcomes`.
    ///
    pub fn new(
        num_outcomes: usize,
        start: Multinomial,
        transitions: Vec<Multinomial>,
        emissions: Vec<Multinomial>,
    ) -> Result<HMM> {
        if transitions.len() != emissions.len() {
            return Err(HmmError::Configuration(format!(
                "{} transition rows but {} emission rows",
                transitions.len(),
                emissions.len()
            )));
        }
        let num_states = transitions.len();
        let rows = std::iter::once((Row::Start, &start, num_states))
            .chain(
                transitions
                    .iter()
                    .enumerate()
                    .map(|(s, row)| (Row::Transition(s), row, num_states)),
            )
            .chain(
                emissions
                    .iter()
                    .enumerate()
                    .map(|(s, row)| (Row::Emission(s), row, num_outcomes)),
            );
        for (row, dist, bound) in rows {
            if dist.len() > bound {
                return Err(HmmError::Configuration(format!(
                    "{} has {} entries but the bound is {}",
                    row,
                    dist.len(),
                    bound
                )));
            }
        }
        Ok(HMM {
            num_outcomes,
            start,
            transitions,
            emissions,
        })
    }
    pub fn num_states(&self) -> usize {
        self.transitions.len()
    }
    pub fn num_outcomes(&self) -> usize {
        self.num_outcomes
    }
    pub fn start(&self) -> &Multinomial {
        &self.start
    }
    ///
    /// Distribution of next states from `state`
    ///
    /// # Panics
    /// if `state >= num_states`
    pub fn transition(&self, state: State) -> &Multinomial {
        &self.transitions[state]
    }
    ///
    /// Distribution of outcomes emitted from `state`
    ///
    /// # Panics
    /// if `state >= num_states`
    pub fn emission(&self, state: State) -> &Multinomial {
        &self.emissions[state]
    }
    /// `P(start = state)`
    #[inline]
    pub fn p_start(&self, state: State) -> Prob {
        self.start.log_prob(state)
    }
    /// `P(state -> next_state)`
    ///
    /// # Panics
    /// if `state >= num_states`
    #[inline]
    pub fn p_trans(&self, state: State, next_state: State) -> Prob {
        self.transitions[state].log_prob(next_state)
    }
    /// `P(state emits outcome)`
    ///
    /// # Panics
    /// if `state >= num_states`
    #[inline]
    pub fn p_emit(&self, state: State, outcome: Outcome) -> Prob {
        self.emissions[state].log_prob(outcome)
    }
    ///
    /// List of all-zero distributions in this model
    ///
    pub fn degenerate_rows(&self) -> Vec<Row> {
        let mut rows = Vec::new();
        if self.start.is_degenerate() {
            rows.push(Row::Start);
        }
        for s in 0..self.num_states() {
            if self.transitions[s].is_degenerate() {
                rows.push(Row::Transition(s));
            }
        }
        for s in 0..self.num_states() {
            if self.emissions[s].is_degenerate() {
                rows.push(Row::Emission(s));
            }
        }
        rows
    }
    ///
    /// Strict check that every distribution has been estimated from
    /// at least one observation.
    ///
    pub fn validate(&self) -> Result<()> {
        match self.degenerate_rows().first() {
            None => Ok(()),
            Some(row) => Err(HmmError::DegenerateDistribution(format!(
                "{} of the model has no observations",
                row
            ))),
        }
    }
    ///
    /// Joint probability `P(states, outcomes)` of an aligned path
    ///
    /// ```text
    /// P(s_0) P(o_0|s_0) \prod_{t>0} P(s_t-1 -> s_t) P(o_t|s_t)
    /// ```
    ///
    /// The empty path has probability 1.
    ///
    pub fn log_prob_path(&self, outcomes: &[Outcome], states: &[State]) -> Result<Prob> {
        if outcomes.len() != states.len() {
            return Err(HmmError::InvalidInput(format!(
                "{} outcomes but {} states",
                outcomes.len(),
                states.len()
            )));
        }
        for (&state, &outcome) in states.iter().zip(outcomes.iter()) {
            check_id(IdKind::State, state, self.num_states())?;
            check_id(IdKind::Outcome, outcome, self.num_outcomes)?;
        }
        let mut p = Prob::one();
        for t in 0..states.len() {
            let from = if t == 0 {
                self.p_start(states[t])
            } else {
                self.p_trans(states[t - 1], states[t])
            };
            p *= from * self.p_emit(states[t], outcomes[t]);
        }
        Ok(p)
    }
}

///
/// Estimate the HMM whose distributions are the relative frequencies
/// of the counts.
///
/// States that were never observed get degenerate (all-zero) rows.
///
pub fn maximum_likelihood_hmm(counts: &HMMCounts) -> HMM {
    let num_states = counts.num_states();
    let hmm = HMM {
        num_outcomes: counts.num_outcomes(),
        start: counts.start().maximum_likelihood(),
        transitions: (0..num_states)
            .map(|s| counts.transition(s).maximum_likelihood())
            .collect(),
        emissions: (0..num_states)
            .map(|s| counts.emission(s).maximum_likelihood())
            .collect(),
    };
    let degenerate = hmm.degenerate_rows();
    if !degenerate.is_empty() {
        warn!(
            "estimated hmm has {} degenerate rows (first: {})",
            degenerate.len(),
            degenerate[0]
        );
    }
    info!(
        "estimated hmm num_states={} num_outcomes={}",
        num_states,
        hmm.num_outcomes
    );
    hmm
}

impl HMMCounts {
    /// shorthand of `maximum_likelihood_hmm`
    pub fn to_hmm(&self) -> HMM {
        maximum_likelihood_hmm(self)
    }
}

impl std::fmt::Display for HMM {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(
            f,
            "num_states: {} num_outcomes: {}",
            self.num_states(),
            self.num_outcomes
        )?;
        writeln!(f, "start\t{}", self.start)?;
        for s in 0..self.num_states() {
            writeln!(f, "trans[{}]\t{}", s, self.transitions[s])?;
        }
        for s in 0..self.num_states() {
            writeln!(f, "emit[{}]\t{}", s, self.emissions[s])?;
        }
        Ok(())
    }
}
