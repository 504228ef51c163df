//!
//! Error type shared by counting, estimation, decoding and persistence.
//!
use thiserror::Error;

/// Which kind of integer id was rejected by a bounds check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKind {
    State,
    Outcome,
}

impl std::fmt::Display for IdKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            IdKind::State => write!(f, "state"),
            IdKind::Outcome => write!(f, "outcome"),
        }
    }
}

#[derive(Debug, Error)]
pub enum HmmError {
    /// Non-positive sizes, or two objects whose sizes do not agree.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// An id outside of `[0, bound)`.
    #[error("{kind} id {id} is out of range (bound {bound})")]
    OutOfRange { kind: IdKind, id: usize, bound: usize },

    /// A distribution estimated from zero observations was relied on.
    #[error("degenerate distribution: {0}")]
    DegenerateDistribution(String),

    /// A decode request that cannot be answered for this model.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, HmmError>;

///
/// Check `id < bound`
///
pub(crate) fn check_id(kind: IdKind, id: usize, bound: usize) -> Result<()> {
    if id < bound {
        Ok(())
    } else {
        Err(HmmError::OutOfRange { kind, id, bound })
    }
}
