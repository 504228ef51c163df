//!
//! Hidden Markov Model for sequence labeling (e.g. part-of-speech tagging)
//!
//! # Overview of calculation
//!
//! x = x[0],...,x[n-1] : Outcomes (observed symbols) of length n
//! s = s[0],...,s[n-1] : Hidden states, one per outcome
//!
//! Training
//!     aligned `(s[i], x[i])` sequences are counted into `HMMCounts`
//!     and turned into an `HMM` by relative frequency (`maximum_likelihood_hmm`).
//!
//! Decoding
//!     `HMM::run_viterbi` finds `argmax_s P(s, x)` by dynamic programming
//!     over a `n x num_states` chart in log space.
//!
pub mod counts;
pub mod mocks;
pub mod model;
pub mod sampler;
pub mod table;
pub mod viterbi;

pub use counts::{merge_counts, HMMCounts};
pub use model::{maximum_likelihood_hmm, Row, HMM};
pub use table::{ViterbiResult, ViterbiTable};
pub use viterbi::run_viterbi;
