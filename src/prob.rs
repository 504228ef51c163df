//!
//! Probability values in log space
//!
//! Every probability handled by the HMM (start, transition, emission and
//! Viterbi chart scores) is kept as its natural logarithm, so that long
//! products of small probabilities never underflow.
//!
use approx::AbsDiffEq;
use once_cell::sync::Lazy;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::str::FromStr;

///
/// Wrapper of f64 that represents probability `0 <= p <= 1` as `log p`
///
/// `p = 0` is stored as `-inf`, and multiplication with it always gives `-inf`.
///
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, SerializeDisplay, DeserializeFromStr)]
pub struct Prob(f64);

///
/// short-hand of `Prob::from_prob`
///
pub fn p(p: f64) -> Prob {
    Prob::from_prob(p)
}

///
/// short-hand of `Prob::from_log_prob`
///
pub fn lp(lp: f64) -> Prob {
    Prob::from_log_prob(lp)
}

const MAX_PRECALCULATED_X: usize = 64;
static LN_TABLE: Lazy<[f64; MAX_PRECALCULATED_X]> = Lazy::new(|| {
    let mut v = [0f64; MAX_PRECALCULATED_X];
    for (x, y) in v.iter_mut().enumerate() {
        *y = (x as f64).ln();
    }
    v
});

///
/// Cached log function `(x as f64).ln()`
///
/// Counts in a tagging corpus are mostly small, so the first values are
/// precalculated.
///
#[inline]
pub fn ln_int(x: usize) -> f64 {
    if x < MAX_PRECALCULATED_X {
        LN_TABLE[x]
    } else {
        (x as f64).ln()
    }
}

impl Prob {
    pub fn from_prob(value: f64) -> Prob {
        Prob(value.ln())
    }
    pub fn from_log_prob(log_value: f64) -> Prob {
        Prob(log_value)
    }
    ///
    /// Probability of `count / total`, computed as `log count - log total`.
    ///
    /// `total` should be positive.
    ///
    pub fn from_ratio(count: usize, total: usize) -> Prob {
        Prob(ln_int(count) - ln_int(total))
    }
    ///
    /// Get the probability (in `[0, 1]`)
    pub fn to_value(self) -> f64 {
        self.0.exp()
    }
    ///
    /// Get the log probability
    pub fn to_log_value(self) -> f64 {
        self.0
    }
    ///
    /// Is `p == 0` or not? (log p = -inf)
    ///
    pub fn is_zero(self) -> bool {
        self.0.is_infinite() && self.0.is_sign_negative()
    }
    ///
    /// Is `p == 1`? (log p = 0)
    ///
    pub fn is_one(self) -> bool {
        self.0 == 0.0
    }
    ///
    /// prob=0.0
    ///
    pub fn zero() -> Prob {
        Prob(f64::NEG_INFINITY)
    }
    ///
    /// prob=1.0
    ///
    pub fn one() -> Prob {
        Prob(0.0)
    }
    ///
    /// abs diff of two log probs `= |log p_a - log p_b|`
    ///
    /// Two zero probabilities have diff 0, and a zero against a non-zero
    /// probability has infinite diff.
    ///
    pub fn log_diff(&self, other: Prob) -> f64 {
        match (self.is_zero(), other.is_zero()) {
            (true, true) => 0.0,
            (true, false) | (false, true) => f64::INFINITY,
            (false, false) => (self.0 - other.0).abs(),
        }
    }
}

/// p=0 (Prob(-inf)) as a default value
impl Default for Prob {
    fn default() -> Self {
        Prob::zero()
    }
}

impl num_traits::One for Prob {
    fn one() -> Self {
        Prob::one()
    }
}

impl num_traits::Zero for Prob {
    fn zero() -> Self {
        Prob::zero()
    }
    fn is_zero(&self) -> bool {
        Prob::is_zero(*self)
    }
}

impl std::fmt::Display for Prob {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}({:.4})", self.0, self.to_value())
    }
}

/// Parse either `"{log}({value})"` (the `Display` form) or a bare log value.
impl FromStr for Prob {
    type Err = std::num::ParseFloatError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let front = s.split_once('(').map_or(s, |(front, _)| front);
        front.trim().parse::<f64>().map(Prob)
    }
}

/// Addition of two probabilities `px + py` in log space
///
/// If `px > py`:
///
/// ```text
/// log(exp(x) + exp(y))
///  = x + log(1 + exp(y-x))
/// ```
impl std::ops::Add for Prob {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        let (x, y) = if self.0 >= other.0 {
            (self.0, other.0)
        } else {
            (other.0, self.0)
        };
        if y == f64::NEG_INFINITY {
            Prob(x)
        } else {
            Prob(x + (y - x).exp().ln_1p())
        }
    }
}

/// Multiplication of two probabilities `px * py` in log space
///
/// ```text
/// log(px * py) = log(px) + log(py)
/// ```
impl std::ops::Mul for Prob {
    type Output = Self;
    fn mul(self, other: Self) -> Self {
        Prob(self.0 + other.0)
    }
}

/// Division of two probabilities `px / py` in log space
impl std::ops::Div for Prob {
    type Output = Self;
    fn div(self, other: Self) -> Self {
        Prob(self.0 - other.0)
    }
}

impl std::ops::AddAssign for Prob {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}
impl std::ops::MulAssign for Prob {
    fn mul_assign(&mut self, other: Self) {
        *self = *self * other;
    }
}
impl std::iter::Sum for Prob {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Prob::zero(), |a, b| a + b)
    }
}
impl<'a> std::iter::Sum<&'a Self> for Prob {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Prob::zero(), |a, b| a + *b)
    }
}
impl std::iter::Product for Prob {
    fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Prob::one(), |a, b| a * b)
    }
}
impl<'a> std::iter::Product<&'a Self> for Prob {
    fn product<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.fold(Prob::one(), |a, b| a * *b)
    }
}

/// for approx `assert_abs_diff_eq`
///
/// Two zero probabilities are equal.
impl AbsDiffEq for Prob {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        if self.is_zero() || other.is_zero() {
            self.is_zero() && other.is_zero()
        } else {
            f64::abs_diff_eq(&self.0, &other.0, epsilon)
        }
    }
}

impl Eq for Prob {}
impl Ord for Prob {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}
