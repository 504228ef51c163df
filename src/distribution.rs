//!
//! Multinomial distributions over small dense integer keys
//!
//! ## MultinomialCounts
//!
//! Occurrence counts of a single discrete random variable.
//! Keys are used directly as indices of a growable vec.
//!
//! ## Multinomial
//!
//! Immutable probability mass function, stored as `Prob` (log space).
//! Keys that were never observed have probability exactly 0.
//!
use crate::error::{HmmError, Result};
use crate::prob::Prob;
use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

#[derive(Debug, Clone, Default)]
pub struct MultinomialCounts {
    counts: Vec<usize>,
}

impl MultinomialCounts {
    /// Empty counter
    pub fn new() -> MultinomialCounts {
        MultinomialCounts { counts: Vec::new() }
    }
    /// Empty counter with preallocated room for keys `0..size`
    pub fn with_size(size: usize) -> MultinomialCounts {
        MultinomialCounts {
            counts: vec![0; size],
        }
    }
    ///
    /// Add one observation of `key`.
    ///
    pub fn inc(&mut self, key: usize) {
        if key >= self.counts.len() {
            self.counts.resize(key + 1, 0);
        }
        self.counts[key] += 1;
    }
    /// Count of `key`, 0 if never incremented
    pub fn count(&self, key: usize) -> usize {
        self.counts.get(key).copied().unwrap_or(0)
    }
    /// Sum of all counts
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
    /// Iterator over `(key, count)` of keys with a positive count
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter_map(|(key, &count)| if count > 0 { Some((key, count)) } else { None })
    }
    ///
    /// Elementwise sum of two counters
    ///
    pub fn merge(a: &MultinomialCounts, b: &MultinomialCounts) -> MultinomialCounts {
        let mut merged = a.clone();
        merged += b;
        merged
    }
    ///
    /// Relative frequency `count(k) / total` of each key.
    ///
    /// If no observation was counted, a degenerate distribution
    /// (every key has probability 0) is returned instead of dividing by zero.
    ///
    pub fn maximum_likelihood(&self) -> Multinomial {
        let total = self.total();
        if total == 0 {
            return Multinomial::degenerate();
        }
        Multinomial {
            probs: self
                .counts
                .iter()
                .map(|&count| Prob::from_ratio(count, total))
                .collect(),
        }
    }
    ///
    /// `maximum_likelihood` that refuses to build a degenerate distribution.
    ///
    pub fn checked_maximum_likelihood(&self) -> Result<Multinomial> {
        if self.is_empty() {
            Err(HmmError::DegenerateDistribution(
                "counts have no observations".to_string(),
            ))
        } else {
            Ok(self.maximum_likelihood())
        }
    }
}

impl<'a> AddAssign<&'a MultinomialCounts> for MultinomialCounts {
    fn add_assign(&mut self, other: &'a MultinomialCounts) {
        if other.counts.len() > self.counts.len() {
            self.counts.resize(other.counts.len(), 0);
        }
        for (a, b) in self.counts.iter_mut().zip(other.counts.iter()) {
            *a += b;
        }
    }
}

/// Counters are equal if every key has the same count, regardless of
/// how much room was preallocated.
impl PartialEq for MultinomialCounts {
    fn eq(&self, other: &MultinomialCounts) -> bool {
        self.iter().eq(other.iter())
    }
}

impl Eq for MultinomialCounts {}

impl std::fmt::Display for MultinomialCounts {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, (key, count)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}:{}", key, count)?;
        }
        write!(f, "]")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Multinomial {
    probs: Vec<Prob>,
}

impl Multinomial {
    ///
    /// Distribution from explicit probabilities, `probs[k] = P(k)`.
    ///
    /// Values are taken as they are (not normalized).
    ///
    pub fn from_probs(probs: &[f64]) -> Multinomial {
        Multinomial {
            probs: probs.iter().map(|&x| Prob::from_prob(x)).collect(),
        }
    }
    ///
    /// All-zero distribution, the estimate of an empty counter
    ///
    pub fn degenerate() -> Multinomial {
        Multinomial { probs: Vec::new() }
    }
    /// `P(key)` in `[0, 1]`. Unknown keys have probability 0.
    pub fn prob(&self, key: usize) -> f64 {
        self.log_prob(key).to_value()
    }
    /// `P(key)` as `Prob`. Unknown keys give `Prob::zero()`.
    #[inline]
    pub fn log_prob(&self, key: usize) -> Prob {
        self.probs.get(key).copied().unwrap_or_else(Prob::zero)
    }
    /// Sum of all probabilities (1 unless degenerate)
    pub fn total_prob(&self) -> Prob {
        self.probs.iter().sum()
    }
    /// Is every key mapped to probability 0?
    pub fn is_degenerate(&self) -> bool {
        self.probs.iter().all(|p| p.is_zero())
    }
    /// Number of keys stored in the table (keys beyond it have prob 0)
    pub fn len(&self) -> usize {
        self.probs.len()
    }
    pub fn is_empty(&self) -> bool {
        self.probs.is_empty()
    }
    /// Iterator over `(key, prob)` of keys with non-zero probability
    pub fn iter(&self) -> impl Iterator<Item = (usize, Prob)> + '_ {
        self.probs
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.is_zero())
            .map(|(key, &p)| (key, p))
    }
}

impl std::fmt::Display for Multinomial {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, (key, p)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}:{:.4}", key, p.to_value())?;
        }
        write!(f, "]")
    }
}
