use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A contiguous income range taxed at a single marginal rate.
///
/// `upper_bound` is `None` for the open-ended top bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bracket {
    pub lower_bound: Decimal,
    pub upper_bound: Option<Decimal>,
    pub rate: Decimal,
}

impl Bracket {
    pub fn new(
        lower_bound: Decimal,
        upper_bound: Option<Decimal>,
        rate: Decimal,
    ) -> Self {
        Self {
            lower_bound,
            upper_bound,
            rate,
        }
    }

    /// Portion of `income` that falls inside this bracket.
    ///
    /// Equal to `max(0, min(income, upper_bound) - lower_bound)`.
    pub fn taxable_portion(
        &self,
        income: Decimal,
    ) -> Decimal {
        let ceiling = match self.upper_bound {
            Some(upper) => income.min(upper),
            None => income,
        };
        (ceiling - self.lower_bound).max(Decimal::ZERO)
    }

    /// Width of the bracket, or `None` when unbounded.
    pub fn width(&self) -> Option<Decimal> {
        self.upper_bound.map(|upper| upper - self.lower_bound)
    }
}

/// Reasons a sequence of brackets is not a valid progressive schedule.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BracketSetError {
    #[error("bracket set must contain at least one bracket")]
    Empty,

    #[error("first bracket must start at zero, got {0}")]
    NonZeroStart(Decimal),

    #[error("bracket {index} is empty or inverted: lower {lower}, upper {upper}")]
    InvertedBracket {
        index: usize,
        lower: Decimal,
        upper: Decimal,
    },

    #[error("bracket {index} ends at {upper} but the next bracket starts at {next_lower}")]
    NotContiguous {
        index: usize,
        upper: Decimal,
        next_lower: Decimal,
    },

    #[error("only the last bracket may be unbounded, bracket {0} is unbounded")]
    UnboundedBeforeLast(usize),

    #[error("last bracket must be unbounded, got upper bound {0}")]
    BoundedLast(Decimal),

    #[error("bracket {index} rate must be between 0 and 1, got {rate}")]
    InvalidRate { index: usize, rate: Decimal },

    #[error("bracket {index} rate {rate} is lower than the previous rate {previous}")]
    Regressive {
        index: usize,
        rate: Decimal,
        previous: Decimal,
    },
}

/// An ordered, validated partition of `[0, ∞)` into brackets.
///
/// Construction checks every invariant the bracket walk relies on: the
/// brackets start at zero, are contiguous and ascending, only the last one is
/// unbounded, and rates lie in `[0, 1]` and never decrease. A `BracketSet` is
/// immutable once built.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use calc_core::{Bracket, BracketSet};
///
/// let set = BracketSet::new(vec![
///     Bracket::new(dec!(0), Some(dec!(10000)), dec!(0.10)),
///     Bracket::new(dec!(10000), None, dec!(0.20)),
/// ])
/// .unwrap();
///
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.max_rate(), dec!(0.20));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Bracket>", into = "Vec<Bracket>")]
pub struct BracketSet {
    brackets: Vec<Bracket>,
}

impl BracketSet {
    /// Validates `brackets` and wraps them.
    ///
    /// # Errors
    ///
    /// Returns the first [`BracketSetError`] found, scanning from the lowest
    /// bracket upwards.
    pub fn new(brackets: Vec<Bracket>) -> Result<Self, BracketSetError> {
        validate(&brackets)?;
        Ok(Self { brackets })
    }

    /// Builds a set from `(lower_bound, rate)` pairs. Each bracket's upper
    /// bound is the next pair's lower bound; the last bracket is unbounded.
    pub fn from_thresholds(thresholds: &[(Decimal, Decimal)]) -> Result<Self, BracketSetError> {
        Self::new(brackets_from_thresholds(thresholds))
    }

    /// Builds a set from a static table that is known to be well formed.
    ///
    /// Only used for the schedules compiled into this crate, each of which is
    /// covered by a validation test.
    pub(crate) fn from_static_thresholds(thresholds: &[(Decimal, Decimal)]) -> Self {
        let brackets = brackets_from_thresholds(thresholds);
        debug_assert_eq!(validate(&brackets), Ok(()));
        Self { brackets }
    }

    pub fn brackets(&self) -> &[Bracket] {
        &self.brackets
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Bracket> {
        self.brackets.iter()
    }

    pub fn len(&self) -> usize {
        self.brackets.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.brackets.is_empty()
    }

    /// The lowest bracket (always starts at zero).
    pub fn first(&self) -> &Bracket {
        &self.brackets[0]
    }

    /// The highest rate in the schedule, i.e. the rate of the top bracket.
    pub fn max_rate(&self) -> Decimal {
        self.brackets
            .iter()
            .map(|b| b.rate)
            .max()
            .unwrap_or(Decimal::ZERO)
    }

    /// True when the schedule is a single rate applied to all income.
    pub fn is_flat(&self) -> bool {
        self.brackets.len() == 1
    }
}

impl TryFrom<Vec<Bracket>> for BracketSet {
    type Error = BracketSetError;

    fn try_from(brackets: Vec<Bracket>) -> Result<Self, Self::Error> {
        Self::new(brackets)
    }
}

impl From<BracketSet> for Vec<Bracket> {
    fn from(set: BracketSet) -> Self {
        set.brackets
    }
}

impl<'a> IntoIterator for &'a BracketSet {
    type Item = &'a Bracket;
    type IntoIter = std::slice::Iter<'a, Bracket>;

    fn into_iter(self) -> Self::IntoIter {
        self.brackets.iter()
    }
}

fn brackets_from_thresholds(thresholds: &[(Decimal, Decimal)]) -> Vec<Bracket> {
    thresholds
        .iter()
        .enumerate()
        .map(|(i, &(lower, rate))| {
            let upper = thresholds.get(i + 1).map(|&(next_lower, _)| next_lower);
            Bracket::new(lower, upper, rate)
        })
        .collect()
}

fn validate(brackets: &[Bracket]) -> Result<(), BracketSetError> {
    let first = brackets.first().ok_or(BracketSetError::Empty)?;
    if !first.lower_bound.is_zero() {
        return Err(BracketSetError::NonZeroStart(first.lower_bound));
    }

    let last_index = brackets.len() - 1;
    let mut previous_rate: Option<Decimal> = None;

    for (index, bracket) in brackets.iter().enumerate() {
        if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
            return Err(BracketSetError::InvalidRate {
                index,
                rate: bracket.rate,
            });
        }
        if let Some(previous) = previous_rate {
            if bracket.rate < previous {
                return Err(BracketSetError::Regressive {
                    index,
                    rate: bracket.rate,
                    previous,
                });
            }
        }
        previous_rate = Some(bracket.rate);

        match bracket.upper_bound {
            None if index != last_index => {
                return Err(BracketSetError::UnboundedBeforeLast(index));
            }
            None => {}
            Some(upper) if index == last_index => {
                return Err(BracketSetError::BoundedLast(upper));
            }
            Some(upper) => {
                if upper <= bracket.lower_bound {
                    return Err(BracketSetError::InvertedBracket {
                        index,
                        lower: bracket.lower_bound,
                        upper,
                    });
                }
                let next_lower = brackets[index + 1].lower_bound;
                if upper != next_lower {
                    return Err(BracketSetError::NotContiguous {
                        index,
                        upper,
                        next_lower,
                    });
                }
            }
        }
    }

    Ok(())
}
