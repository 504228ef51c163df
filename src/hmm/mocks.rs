//!
//! Mock HMMs for testing
//!
use super::counts::HMMCounts;
use super::model::HMM;
use crate::distribution::Multinomial;

///
/// Textbook two-state HMM over outcomes `{a=0, b=1}`
///
/// ```text
/// start:  P(0)=0.6     P(1)=0.4
/// trans:  P(0->0)=0.7  P(0->1)=0.3
///         P(1->0)=0.4  P(1->1)=0.6
/// emit:   P(0->a)=0.9  P(0->b)=0.1
///         P(1->a)=0.2  P(1->b)=0.8
/// ```
///
pub fn mock_two_state_hmm() -> HMM {
    HMM::new(
        2,
        Multinomial::from_probs(&[0.6, 0.4]),
        vec![
            Multinomial::from_probs(&[0.7, 0.3]),
            Multinomial::from_probs(&[0.4, 0.6]),
        ],
        vec![
            Multinomial::from_probs(&[0.9, 0.1]),
            Multinomial::from_probs(&[0.2, 0.8]),
        ],
    )
    .expect("two rows each")
}

///
/// Counts whose maximum likelihood estimate is `mock_two_state_hmm`
///
pub fn mock_two_state_counts() -> HMMCounts {
    let mut counts = HMMCounts::new(2, 2).expect("positive sizes");
    for &(s, n) in &[(0, 6), (1, 4)] {
        for _ in 0..n {
            counts.inc_start(s).unwrap();
        }
    }
    for &(s, t, n) in &[(0, 0, 7), (0, 1, 3), (1, 0, 4), (1, 1, 6)] {
        for _ in 0..n {
            counts.inc_transition(s, t).unwrap();
        }
    }
    for &(s, o, n) in &[(0, 0, 9), (0, 1, 1), (1, 0, 2), (1, 1, 8)] {
        for _ in 0..n {
            counts.inc_emission(s, o).unwrap();
        }
    }
    counts
}

///
/// HMM with a single state that always emits outcome 0
///
pub fn mock_single_state_hmm() -> HMM {
    let one = Multinomial::from_probs(&[1.0]);
    HMM::new(1, one.clone(), vec![one.clone()], vec![one]).expect("one row each")
}
