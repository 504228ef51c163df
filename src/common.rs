//!
//! Integer ids shared with the lexicon side.
//!

/// Hidden state id in `[0, num_states)` (e.g. a part-of-speech tag id)
pub type State = usize;

/// Observable symbol id in `[0, num_outcomes)` (e.g. a word id)
pub type Outcome = usize;

/// One aligned position of a labeled training sequence
pub type Labeled = (State, Outcome);

/// Observation sequence to be decoded
pub type Outcomes = Vec<Outcome>;

///
/// Split an aligned sequence into its state path and its outcomes.
///
pub fn unzip_labeled(seq: &[Labeled]) -> (Vec<State>, Outcomes) {
    seq.iter().copied().unzip()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unzip() {
        let (states, outcomes) = unzip_labeled(&[(0, 3), (1, 2), (1, 0)]);
        assert_eq!(states, vec![0, 1, 1]);
        assert_eq!(outcomes, vec![3, 2, 0]);
        let (states, outcomes) = unzip_labeled(&[]);
        assert!(states.is_empty() && outcomes.is_empty());
    }
}
