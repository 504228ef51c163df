//!
//! Hidden Markov Model tagger core
//!
//! * `distribution`: multinomial counts and their maximum likelihood estimate
//! * `hmm`: HMM counts, estimation, Viterbi decoding and sampling
//! * `io`: JSON persistence of models and integer-encoded sequences
//!
pub mod common;
pub mod distribution;
pub mod error;
pub mod hmm;
pub mod io;
pub mod prelude;
pub mod prob;
pub mod utils;

#[cfg(test)]
#[macro_use]
extern crate approx;
