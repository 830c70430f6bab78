// vim: tw=80
//! Allowed ranges of invocation counts.

use std::{
    fmt,
    ops::{
        Bound,
        Range,
        RangeBounds,
        RangeFrom,
        RangeFull,
        RangeInclusive,
        RangeTo,
        RangeToInclusive
    }
};

/// How many times an expectation may and must be invoked.
///
/// Both bounds are inclusive.  Cardinalities can also be created from a
/// count or from any `usize` range expression.
///
/// # Examples
/// ```
/// # use mockset::*;
/// let c = Cardinality::between(1, 3);
/// assert!(!c.is_satisfied(0));
/// assert!(c.is_satisfied(3));
/// assert!(!c.allows_more_invocations(3));
/// assert_eq!(c, Cardinality::from(1..=3));
/// assert_eq!(Cardinality::exactly(2), Cardinality::from(2));
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Cardinality {
    /// How many invocations are required to satisfy the expectation
    required: usize,
    /// How many invocations are allowed, or `None` if there is no limit
    maximum: Option<usize>
}

impl Cardinality {
    /// Any number of invocations, including none.
    pub fn any() -> Self {
        Self::at_least(0)
    }

    pub fn at_least(n: usize) -> Self {
        Cardinality{required: n, maximum: None}
    }

    pub fn at_most(n: usize) -> Self {
        Cardinality{required: 0, maximum: Some(n)}
    }

    /// Between `min` and `max` invocations, inclusive.
    ///
    /// # Panics
    ///
    /// If `min > max`.
    pub fn between(min: usize, max: usize) -> Self {
        assert!(min <= max,
            "Cardinality lower bound {} exceeds upper bound {}", min, max);
        Cardinality{required: min, maximum: Some(max)}
    }

    pub fn exactly(n: usize) -> Self {
        Cardinality{required: n, maximum: Some(n)}
    }

    /// Does this cardinality permit another invocation, after `count`
    /// invocations have already happened?
    pub fn allows_more_invocations(&self, count: usize) -> bool {
        self.maximum.map_or(true, |max| count < max)
    }

    /// Is it required that the expectation be invoked an exact number of
    /// times?
    pub fn is_exact(&self) -> bool {
        self.maximum == Some(self.required)
    }

    /// Is `count` invocations within the allowed range?
    pub fn is_satisfied(&self, count: usize) -> bool {
        count >= self.required && self.maximum.map_or(true, |max| count <= max)
    }

    pub fn maximum(&self) -> Option<usize> {
        self.maximum
    }

    pub fn required(&self) -> usize {
        self.required
    }

    fn from_bounds<R: RangeBounds<usize>>(range: R) -> Self {
        let required = match range.start_bound() {
            Bound::Included(&n) => n,
            Bound::Excluded(&n) => n + 1,
            Bound::Unbounded => 0
        };
        match range.end_bound() {
            Bound::Included(&n) => Self::between(required, n),
            Bound::Excluded(&n) => {
                assert!(n > required,
                    "Cardinality range {}..{} is empty", required, n);
                Self::between(required, n - 1)
            },
            Bound::Unbounded => Self::at_least(required)
        }
    }
}

impl Default for Cardinality {
    /// By default, allow any number of invocations
    fn default() -> Self {
        Self::any()
    }
}

impl From<usize> for Cardinality {
    fn from(n: usize) -> Self {
        Self::exactly(n)
    }
}

macro_rules! cardinality_from_range {
    ($($range:ty),*) => {
        $(
            impl From<$range> for Cardinality {
                fn from(range: $range) -> Self {
                    Self::from_bounds(range)
                }
            }
        )*
    }
}

cardinality_from_range!{
    Range<usize>, RangeFrom<usize>, RangeFull, RangeInclusive<usize>,
    RangeTo<usize>, RangeToInclusive<usize>
}

/// Render a count the way the descriptions do: "once", "2 times", ...
pub(crate) fn times(n: usize) -> String {
    match n {
        1 => "once".to_string(),
        n => format!("{} times", n)
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.required, self.maximum) {
            (0, None) => f.write_str("allowed"),
            (0, Some(0)) => f.write_str("expected never"),
            (1, Some(1)) => f.write_str("expected once"),
            (n, Some(max)) if n == max =>
                write!(f, "expected exactly {}", times(n)),
            (n, None) => write!(f, "expected at least {}", times(n)),
            (0, Some(max)) => write!(f, "expected at most {}", times(max)),
            (n, Some(max)) =>
                write!(f, "expected between {} and {} times", n, max),
        }
    }
}

#[cfg(test)]
mod t {
    use super::*;

    #[test]
    fn times_once() {
        assert_eq!("once", times(1));
    }

    #[test]
    fn times_many() {
        assert_eq!("0 times", times(0));
        assert_eq!("7 times", times(7));
    }
}
