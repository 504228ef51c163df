//!
//! JSON (de)serialization of a trained `HMM` and of labeled sequences
//!
//! Sequences are stored as arrays of `[state, outcome]` pairs, e.g.
//!
//! ```text
//! [[[0,3],[1,2]], [[1,0]]]
//! ```
//!
use super::write_string;
use crate::common::Labeled;
use crate::error::Result;
use crate::hmm::HMM;
use log::info;
use std::path::Path;

pub fn hmm_to_string(hmm: &HMM) -> Result<String> {
    Ok(serde_json::to_string_pretty(hmm)?)
}

pub fn hmm_from_str(json: &str) -> Result<HMM> {
    Ok(serde_json::from_str(json)?)
}

///
/// Save the model into a JSON file
///
pub fn save_hmm<P: AsRef<Path>>(hmm: &HMM, path: P) -> Result<()> {
    let json = hmm_to_string(hmm)?;
    write_string(&path, &json)?;
    info!("saved hmm to {}", path.as_ref().display());
    Ok(())
}

///
/// Load the model from a JSON file created by `save_hmm`
///
pub fn load_hmm<P: AsRef<Path>>(path: P) -> Result<HMM> {
    let json = std::fs::read_to_string(&path)?;
    let hmm = hmm_from_str(&json)?;
    info!(
        "loaded hmm num_states={} num_outcomes={} from {}",
        hmm.num_states(),
        hmm.num_outcomes(),
        path.as_ref().display()
    );
    Ok(hmm)
}

///
/// Load labeled sequences from a JSON file
///
pub fn load_sequences<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<Labeled>>> {
    let json = std::fs::read_to_string(&path)?;
    let seqs: Vec<Vec<Labeled>> = serde_json::from_str(&json)?;
    info!(
        "loaded n_seqs={} from {}",
        seqs.len(),
        path.as_ref().display()
    );
    Ok(seqs)
}

pub fn save_sequences<P: AsRef<Path>>(seqs: &[Vec<Labeled>], path: P) -> Result<()> {
    let json = serde_json::to_string(seqs)?;
    write_string(path, &json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HmmError;
    use crate::hmm::mocks::{mock_two_state_counts, mock_two_state_hmm};

    #[test]
    fn hmm_json_keeps_probabilities() {
        let hmm = mock_two_state_counts().to_hmm();
        let json = hmm_to_string(&hmm).unwrap();
        let loaded = hmm_from_str(&json).unwrap();
        assert_eq!(hmm, loaded);
        assert_eq!(
            hmm.run_viterbi(&[0, 1, 0]).unwrap(),
            loaded.run_viterbi(&[0, 1, 0]).unwrap()
        );
    }

    #[test]
    fn broken_hmm_json_is_rejected() {
        let hmm = mock_two_state_hmm();
        let mut value: serde_json::Value = serde_json::to_value(&hmm).unwrap();
        // drop one emission row
        value["emissions"].as_array_mut().unwrap().pop();
        let json = value.to_string();
        assert!(matches!(hmm_from_str(&json), Err(HmmError::Json(_))));
        assert!(matches!(hmm_from_str("{"), Err(HmmError::Json(_))));
    }

    #[test]
    fn hmm_json_with_too_wide_row_is_rejected() {
        let hmm = mock_two_state_hmm();
        let mut value: serde_json::Value = serde_json::to_value(&hmm).unwrap();
        // start row over three states in a two-state model
        value["start"]["probs"]
            .as_array_mut()
            .unwrap()
            .push(serde_json::Value::from("0.2"));
        let json = value.to_string();
        assert!(matches!(hmm_from_str(&json), Err(HmmError::Json(_))));

        let mut value: serde_json::Value = serde_json::to_value(&hmm).unwrap();
        // emission of outcome 2 when only 2 outcomes exist
        value["emissions"][1]["probs"]
            .as_array_mut()
            .unwrap()
            .push(serde_json::Value::from("0.2"));
        assert!(matches!(
            hmm_from_str(&value.to_string()),
            Err(HmmError::Json(_))
        ));
    }

    #[test]
    fn files() {
        let dir = tempfile::tempdir().unwrap();
        let model = dir.path().join("model.json");
        let hmm = mock_two_state_hmm();
        save_hmm(&hmm, &model).unwrap();
        assert_eq!(load_hmm(&model).unwrap(), hmm);

        let seqs_path = dir.path().join("seqs.json");
        let seqs = vec![vec![(0, 1), (1, 0)], vec![], vec![(1, 1)]];
        save_sequences(&seqs, &seqs_path).unwrap();
        assert_eq!(load_sequences(&seqs_path).unwrap(), seqs);
        std::fs::write(&seqs_path, "[[[0,1],[1,0]],[[1,1]]]").unwrap();
        assert_eq!(
            load_sequences(&seqs_path).unwrap(),
            vec![vec![(0, 1), (1, 0)], vec![(1, 1)]]
        );

        assert!(matches!(
            load_hmm(dir.path().join("missing.json")),
            Err(HmmError::Io(_))
        ));
    }
}
