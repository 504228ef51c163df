//!
//! Table definitions of the Viterbi chart
//!
//! ## ViterbiTable
//!
//! the best score and its predecessor assigned for each state at a position
//!
//! V[t][s] and Ptr[t][s]
//!
use crate::common::State;
use crate::prob::Prob;
use derive_new::new;

/// Chart row for a single position `t`
///
/// * `scores[s]`
///     max probability of `s_0,...,s_t` emitting `x[0..=t]` with `s_t = s`
/// * `backptrs[s]`
///     the state at `t-1` of that best path (unused at `t=0`)
#[derive(Debug, Clone, PartialEq)]
pub struct ViterbiTable {
    pub scores: Vec<Prob>,
    pub backptrs: Vec<State>,
}

impl ViterbiTable {
    /// Table with every score zero and every backptr `0`
    pub fn zero(n_states: usize) -> ViterbiTable {
        ViterbiTable {
            scores: vec![Prob::zero(); n_states],
            backptrs: vec![0; n_states],
        }
    }
    pub fn n_states(&self) -> usize {
        self.scores.len()
    }
    /// No state has a nonzero score
    pub fn is_dead(&self) -> bool {
        self.scores.iter().all(|score| score.is_zero())
    }
    ///
    /// State with the maximum score and the score.
    /// Ties are broken by the smallest state id.
    ///
    /// Returns `None` if the table has no states.
    ///
    pub fn argmax(&self) -> Option<(State, Prob)> {
        let mut best: Option<(State, Prob)> = None;
        for (s, &score) in self.scores.iter().enumerate() {
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((s, score)),
            }
        }
        best
    }
}

impl std::fmt::Display for ViterbiTable {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for s in 0..self.n_states() {
            writeln!(f, "{}\t{}\t<-{}", s, self.scores[s], self.backptrs[s])?;
        }
        Ok(())
    }
}

/// Chart of one Viterbi run, one `ViterbiTable` per emission
///
/// Owned by the caller of a single decode; never shared between calls.
#[derive(Debug, Clone, new)]
pub struct ViterbiResult {
    pub tables: Vec<ViterbiTable>,
}

impl ViterbiResult {
    /// The number of emissions that this chart stores.
    pub fn n_emissions(&self) -> usize {
        self.tables.len()
    }
    pub fn table(&self, t: usize) -> &ViterbiTable {
        &self.tables[t]
    }
    ///
    /// Best final score and the state path recovered by following
    /// backptrs from the best final state.
    ///
    /// Empty chart gives `(Prob::one(), [])`.
    ///
    pub fn to_path(&self) -> (Prob, Vec<State>) {
        let last = match self.tables.last() {
            Some(last) => last,
            None => return (Prob::one(), Vec::new()),
        };
        let (best, score) = match last.argmax() {
            Some(x) => x,
            None => return (Prob::zero(), Vec::new()),
        };
        let n = self.tables.len();
        let mut states = vec![0; n];
        states[n - 1] = best;
        for t in (1..n).rev() {
            states[t - 1] = self.tables[t].backptrs[states[t]];
        }
        (score, states)
    }
}
