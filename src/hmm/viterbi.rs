//!
//! Viterbi algorithm definitions
//!
//! ```text
//! V[0][s] = P(start=s) e_s(x[0])
//! V[t][s] = max_{s'} ( V[t-1][s'] a_{s's} ) e_s(x[t])      (t = 1..n-1)
//! Ptr[t][s] = argmax_{s'} V[t-1][s'] a_{s's}
//! ```
//!
//! all in log space (`Prob`). The best path ends at `argmax_s V[n-1][s]`
//! and is traced back through `Ptr`.
//!
//! Each argmax scans state ids in ascending order and replaces the
//! candidate only on a strictly larger score, so ties resolve to the
//! smallest id and decoding is reproducible.
//!
//! If every cell of `V[t]` drops to zero while `V[t-1]` had a live cell,
//! and the drop went through a degenerate (never observed) transition or
//! emission row, decoding fails with `DegenerateDistribution` instead of
//! returning a path of probability zero.
//!
use super::model::{Row, HMM};
use super::table::{ViterbiResult, ViterbiTable};
use crate::common::{Outcome, State};
use crate::error::{HmmError, Result};
use crate::prob::Prob;
use log::{debug, trace};

impl HMM {
    ///
    /// Check that `outcomes` can be decoded with this model
    ///
    fn check_decodable(&self, outcomes: &[Outcome]) -> Result<()> {
        if self.num_states() == 0 {
            return Err(HmmError::InvalidInput(
                "cannot decode with an hmm of zero states".to_string(),
            ));
        }
        if let Some(t) = outcomes.iter().position(|&o| o >= self.num_outcomes()) {
            return Err(HmmError::InvalidInput(format!(
                "outcome {} at position {} is out of range (num_outcomes={})",
                outcomes[t],
                t,
                self.num_outcomes()
            )));
        }
        if !outcomes.is_empty() && self.start().is_degenerate() {
            return Err(HmmError::DegenerateDistribution(
                "start distribution of the model has no observations".to_string(),
            ));
        }
        Ok(())
    }
    ///
    /// Run Viterbi algorithm to the outcomes and return the whole chart
    ///
    pub fn viterbi(&self, outcomes: &[Outcome]) -> Result<ViterbiResult> {
        self.check_decodable(outcomes)?;
        let mut tables: Vec<ViterbiTable> = Vec::with_capacity(outcomes.len());
        for (t, &outcome) in outcomes.iter().enumerate() {
            let table = match tables.last() {
                None => self.v_init(outcome),
                Some(prev) => self.v_step(outcome, prev),
            };
            trace!("viterbi t={}\n{}", t, table);
            if table.is_dead() {
                if let Some(row) = self.degenerate_row_at(tables.last()) {
                    return Err(HmmError::DegenerateDistribution(format!(
                        "{} of the model has no observations but is needed at position {}",
                        row, t
                    )));
                }
            }
            tables.push(table);
        }
        Ok(ViterbiResult::new(tables))
    }
    ///
    /// Most probable state path for the outcomes and its log probability.
    ///
    /// `states.len() == outcomes.len()` always. Empty outcomes give an empty
    /// path with `Prob::one()` (log 0). If no path has a nonzero probability
    /// and no degenerate row is to blame, the score is `Prob::zero()` and the
    /// path is the smallest-id one.
    ///
    pub fn run_viterbi(&self, outcomes: &[Outcome]) -> Result<(Prob, Vec<State>)> {
        let result = self.viterbi(outcomes)?;
        let (score, states) = result.to_path();
        debug!(
            "viterbi n={} num_states={} score={}",
            outcomes.len(),
            self.num_states(),
            score
        );
        Ok((score, states))
    }
    ///
    /// Degenerate row that killed every cell of the next table, given the
    /// previous table (`None` at position 0).
    ///
    /// `None` if the previous table was already dead, or if no degenerate
    /// row is involved (the probability is genuinely zero).
    ///
    fn degenerate_row_at(&self, prev: Option<&ViterbiTable>) -> Option<Row> {
        let n = self.num_states();
        // states entered with a nonzero score before emission
        let entered: Vec<State> = match prev {
            None => (0..n).filter(|&s| !self.p_start(s).is_zero()).collect(),
            Some(prev) => {
                let live: Vec<State> = (0..n).filter(|&s| !prev.scores[s].is_zero()).collect();
                if let Some(&s) = live.iter().find(|&&s| self.transition(s).is_degenerate()) {
                    return Some(Row::Transition(s));
                }
                (0..n)
                    .filter(|&s| live.iter().any(|&s_prev| !self.p_trans(s_prev, s).is_zero()))
                    .collect()
            }
        };
        entered
            .into_iter()
            .find(|&s| self.emission(s).is_degenerate())
            .map(Row::Emission)
    }
    ///
    /// `V[0][s] = P(start=s) e_s(x[0])`
    ///
    fn v_init(&self, outcome: Outcome) -> ViterbiTable {
        let mut table = ViterbiTable::zero(self.num_states());
        for s in 0..self.num_states() {
            table.scores[s] = self.p_start(s) * self.p_emit(s, outcome);
        }
        table
    }
    ///
    /// `V[t][s]` and `Ptr[t][s]` from `V[t-1]`
    ///
    fn v_step(&self, outcome: Outcome, prev: &ViterbiTable) -> ViterbiTable {
        let n = self.num_states();
        let mut table = ViterbiTable::zero(n);
        for s in 0..n {
            let mut best_prev = 0;
            let mut best_score = prev.scores[0] * self.p_trans(0, s);
            for s_prev in 1..n {
                let score = prev.scores[s_prev] * self.p_trans(s_prev, s);
                if score > best_score {
                    best_prev = s_prev;
                    best_score = score;
                }
            }
            table.scores[s] = best_score * self.p_emit(s, outcome);
            table.backptrs[s] = best_prev;
        }
        table
    }
}

///
/// Free function form of `HMM::run_viterbi`
///
pub fn run_viterbi(hmm: &HMM, outcomes: &[Outcome]) -> Result<(Prob, Vec<State>)> {
    hmm.run_viterbi(outcomes)
}
