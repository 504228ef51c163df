//!
//! test of hmm training and decoding
//!
#[macro_use]
extern crate approx;

use itertools::{iproduct, Itertools};
use nlphmm::common::unzip_labeled;
use nlphmm::hmm::mocks::{mock_single_state_hmm, mock_two_state_hmm};
use nlphmm::io::json::{hmm_from_str, hmm_to_string};
use nlphmm::prelude::*;
use rayon::prelude::*;

///
/// Brute force `max_s P(s, x)` over all `num_states^n` paths.
/// The first path in lexicographic order wins ties.
///
fn brute_force_best(hmm: &HMM, outcomes: &[Outcome]) -> (Prob, Vec<State>) {
    let n = outcomes.len();
    let mut best: Option<(Prob, Vec<State>)> = None;
    for states in (0..n)
        .map(|_| 0..hmm.num_states())
        .multi_cartesian_product()
    {
        let p = hmm.log_prob_path(outcomes, &states).unwrap();
        match &best {
            Some((best_p, _)) if p <= *best_p => {}
            _ => best = Some((p, states)),
        }
    }
    best.unwrap()
}

fn three_state_hmm() -> HMM {
    let mut counts = HMMCounts::new(3, 4).unwrap();
    let seqs: Vec<Vec<Labeled>> = vec![
        vec![(0, 0), (1, 1), (2, 2), (0, 3)],
        vec![(1, 1), (1, 2), (2, 2)],
        vec![(2, 3), (0, 0), (0, 1), (1, 1), (2, 0)],
        vec![(0, 2), (2, 3)],
    ];
    for seq in seqs.iter() {
        counts.add_sequence(seq).unwrap();
    }
    counts.to_hmm()
}

#[test]
fn viterbi_matches_brute_force() {
    let hmm = three_state_hmm();
    for n in 1..=5 {
        for outcomes in (0..n).map(|_| 0..4).multi_cartesian_product().take(50) {
            let (score, states) = hmm.run_viterbi(&outcomes).unwrap();
            let (score_bf, _) = brute_force_best(&hmm, &outcomes);
            assert_eq!(states.len(), outcomes.len());
            assert_abs_diff_eq!(score, score_bf, epsilon = 1e-9);
            // the decoded path really has the reported score
            let p = hmm.log_prob_path(&outcomes, &states).unwrap();
            assert_abs_diff_eq!(p, score, epsilon = 1e-9);
        }
    }
}

#[test]
fn worked_example_regression() {
    let hmm = mock_two_state_hmm();
    let (score, states) = run_viterbi(&hmm, &[0, 1, 0]).unwrap();
    assert_eq!(states, vec![0, 1, 0]);
    assert_abs_diff_eq!(score.to_log_value(), -3.064953742595944, epsilon = 1e-12);
    for (x, y, z) in iproduct!(0..2, 0..2, 0..2) {
        let outcomes = vec![x, y, z];
        let (score, _) = hmm.run_viterbi(&outcomes).unwrap();
        let (score_bf, states_bf) = brute_force_best(&hmm, &outcomes);
        assert_abs_diff_eq!(score, score_bf, epsilon = 1e-12);
        assert_eq!(hmm.run_viterbi(&outcomes).unwrap().1, states_bf);
    }
}

#[test]
fn single_state_model() {
    let hmm = mock_single_state_hmm();
    let (score, states) = hmm.run_viterbi(&[0; 100]).unwrap();
    assert_eq!(states, vec![0; 100]);
    assert_eq!(score.to_log_value(), 0.0);
}

#[test]
fn train_on_samples_and_decode() {
    let truth = mock_two_state_hmm();
    let train = truth.sample_many(500, 30, 1).unwrap();
    let test = truth.sample_many(20, 30, 10_000).unwrap();

    // shards counted separately and merged equal the whole
    let whole = HMMCounts::from_sequences(2, 2, &train).unwrap();
    let shards: Vec<HMMCounts> = train
        .par_chunks(64)
        .map(|chunk| HMMCounts::from_sequences(2, 2, chunk).unwrap())
        .collect();
    let merged = shards
        .iter()
        .skip(1)
        .fold(shards[0].clone(), |acc, c| merge_counts(&acc, c).unwrap());
    assert_eq!(merged, whole);
    assert_eq!(
        HMMCounts::from_sequences_parallel(2, 2, &train).unwrap(),
        whole
    );

    let hmm = maximum_likelihood_hmm(&whole);
    let mut n_correct = 0;
    let mut n_total = 0;
    for seq in test.iter() {
        let (states_true, outcomes) = unzip_labeled(seq);
        let (score, states) = hmm.run_viterbi(&outcomes).unwrap();
        assert_eq!(states.len(), outcomes.len());
        assert!(score.to_log_value().is_finite());
        // decoded path is at least as likely as the true path
        let p_true = hmm.log_prob_path(&outcomes, &states_true).unwrap();
        assert!(score.to_log_value() >= p_true.to_log_value() - 1e-9);
        n_correct += states
            .iter()
            .zip(states_true.iter())
            .filter(|(a, b)| a == b)
            .count();
        n_total += states.len();
    }
    let accuracy = n_correct as f64 / n_total as f64;
    println!("accuracy={}", accuracy);
    assert!(accuracy > 0.6);
}

#[test]
fn model_is_shared_between_threads() {
    let hmm = three_state_hmm();
    let inputs: Vec<Vec<Outcome>> = (0..64).map(|i| vec![i % 4, (i / 4) % 4, 1, 2]).collect();
    let sequential: Vec<(Prob, Vec<State>)> = inputs
        .iter()
        .map(|x| hmm.run_viterbi(x).unwrap())
        .collect();
    let parallel: Vec<(Prob, Vec<State>)> = inputs
        .par_iter()
        .map(|x| hmm.run_viterbi(x).unwrap())
        .collect();
    assert_eq!(sequential, parallel);
}

#[test]
fn json_round_trip_keeps_decoding() {
    let hmm = three_state_hmm();
    let loaded = hmm_from_str(&hmm_to_string(&hmm).unwrap()).unwrap();
    let outcomes = vec![0, 1, 2, 3, 3, 2, 1, 0];
    assert_eq!(
        hmm.run_viterbi(&outcomes).unwrap(),
        loaded.run_viterbi(&outcomes).unwrap()
    );
}

#[test]
fn errors_are_reported_to_caller() {
    assert!(matches!(
        HMMCounts::new(0, 1),
        Err(HmmError::Configuration(_))
    ));
    let mut counts = HMMCounts::new(2, 2).unwrap();
    assert!(matches!(
        counts.inc_emission(0, 2),
        Err(HmmError::OutOfRange { .. })
    ));
    // nothing was counted, start is degenerate
    let hmm = counts.to_hmm();
    assert!(matches!(
        hmm.run_viterbi(&[0]),
        Err(HmmError::DegenerateDistribution(_))
    ));
    assert!(matches!(
        mock_two_state_hmm().run_viterbi(&[0, 5]),
        Err(HmmError::InvalidInput(_))
    ));
}
