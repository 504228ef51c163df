//!
//! Sample labeled sequences from an HMM
//!
use super::model::HMM;
use crate::common::{Labeled, Outcome, State};
use crate::distribution::Multinomial;
use crate::error::{HmmError, Result};
use log::trace;
use rand::prelude::*;
use rand_xoshiro::Xoshiro256PlusPlus;

///
/// pick a key randomly from the multinomial with its own probability.
///
/// Only keys with nonzero probability are candidates; an all-zero
/// distribution cannot be sampled.
///
pub fn pick_with_prob<R: Rng>(rng: &mut R, dist: &Multinomial, what: &str) -> Result<usize> {
    let choices: Vec<(usize, f64)> = dist.iter().map(|(k, p)| (k, p.to_value())).collect();
    choices
        .choose_weighted(rng, |item| item.1)
        .map(|item| item.0)
        .map_err(|e| HmmError::DegenerateDistribution(format!("cannot sample {}: {}", what, e)))
}

impl HMM {
    ///
    /// Generate an aligned sequence `[(s_0, o_0), ..., ]` of `length` from the model.
    ///
    /// The same seed gives the same sequence.
    ///
    pub fn sample(&self, length: usize, seed: u64) -> Result<Vec<Labeled>> {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        let mut seq = Vec::with_capacity(length);
        let mut state: Option<State> = None;
        for i in 0..length {
            let next: State = match state {
                None => pick_with_prob(&mut rng, self.start(), "start")?,
                Some(s) => pick_with_prob(&mut rng, self.transition(s), "transition")?,
            };
            let outcome: Outcome = pick_with_prob(&mut rng, self.emission(next), "emission")?;
            trace!("sample i={} state={} outcome={}", i, next, outcome);
            seq.push((next, outcome));
            state = Some(next);
        }
        Ok(seq)
    }
    ///
    /// Generate `n` sequences of `length`, the i-th one with seed `seed + i`
    /// (wrapping around `u64::MAX`).
    ///
    pub fn sample_many(&self, n: usize, length: usize, seed: u64) -> Result<Vec<Vec<Labeled>>> {
        (0..n)
            .map(|i| self.sample(length, seed.wrapping_add(i as u64)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hmm::counts::HMMCounts;
    use crate::hmm::mocks::{mock_single_state_hmm, mock_two_state_hmm};

    #[test]
    fn sample_is_reproducible() {
        let hmm = mock_two_state_hmm();
        let a = hmm.sample(50, 3).unwrap();
        let b = hmm.sample(50, 3).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 50);
        assert!(a.iter().all(|&(s, o)| s < 2 && o < 2));
        assert!(hmm.sample(0, 3).unwrap().is_empty());
    }

    #[test]
    fn sample_many_seeds_wrap_around() {
        let hmm = mock_two_state_hmm();
        let seqs = hmm.sample_many(2, 5, u64::MAX).unwrap();
        assert_eq!(seqs[0], hmm.sample(5, u64::MAX).unwrap());
        assert_eq!(seqs[1], hmm.sample(5, 0).unwrap());
    }

    #[test]
    fn single_state_samples_constant() {
        let seq = mock_single_state_hmm().sample(10, 0).unwrap();
        assert_eq!(seq, vec![(0, 0); 10]);
    }

    #[test]
    fn sample_then_estimate_recovers_model() {
        let hmm = mock_two_state_hmm();
        let seqs = hmm.sample_many(2000, 20, 0).unwrap();
        let est = HMMCounts::from_sequences(2, 2, &seqs).unwrap().to_hmm();
        for s in 0..2 {
            assert_abs_diff_eq!(est.start().prob(s), hmm.start().prob(s), epsilon = 0.05);
            for t in 0..2 {
                assert_abs_diff_eq!(
                    est.transition(s).prob(t),
                    hmm.transition(s).prob(t),
                    epsilon = 0.05
                );
                assert_abs_diff_eq!(
                    est.emission(s).prob(t),
                    hmm.emission(s).prob(t),
                    epsilon = 0.05
                );
            }
        }
    }

    #[test]
    fn degenerate_row_cannot_be_sampled() {
        let mut counts = HMMCounts::new(2, 1).unwrap();
        counts.add_sequence(&[(0, 0), (1, 0)]).unwrap();
        let hmm = counts.to_hmm();
        // state 1 has no outgoing transitions
        assert!(hmm.sample(2, 0).is_ok());
        assert!(matches!(
            hmm.sample(3, 0),
            Err(HmmError::DegenerateDistribution(_))
        ));
    }
}
