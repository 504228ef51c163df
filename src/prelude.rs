//!
//! globally-available parts
//!
pub use crate::common::{Labeled, Outcome, State};
pub use crate::distribution::{Multinomial, MultinomialCounts};
pub use crate::error::{HmmError, Result};
pub use crate::hmm::{maximum_likelihood_hmm, merge_counts, run_viterbi, HMMCounts, HMM};
pub use crate::prob::{lp, p, Prob};
