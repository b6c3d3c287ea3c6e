//! Value types shared by the tree, the evaluators and the driver.

use std::fmt;
use std::str::FromStr;

use crate::{Result, TuneError};

/// Result category reported by an evaluator for one sampled value
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Outcome {
    /// Counts toward a node's wins
    Win,
    /// Counts as a visit only
    Loss,
    /// Counts as a visit only
    Draw,
}

impl Outcome {
    /// Contribution of this outcome to a node's win count
    pub fn win_value(self) -> u64 {
        match self {
            Outcome::Win => 1,
            Outcome::Loss | Outcome::Draw => 0,
        }
    }

    /// Short token used by external evaluators and sample dumps
    pub fn token(self) -> &'static str {
        match self {
            Outcome::Win => "W",
            Outcome::Loss => "L",
            Outcome::Draw => "D",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Outcome {
    type Err = TuneError;

    /// Accepts `W`/`L`/`D` and `win`/`loss`/`draw`, ignoring case and surrounding whitespace
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "w" | "win" => Ok(Outcome::Win),
            "l" | "loss" => Ok(Outcome::Loss),
            "d" | "draw" => Ok(Outcome::Draw),
            _ => Err(TuneError::UnknownOutcome(s.to_string())),
        }
    }
}

/// Absolute bounds of a sub-range of a parameter's domain
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    /// Inclusive lower bound
    pub low: f64,
    /// Upper bound
    pub high: f64,
}

impl Interval {
    /// Creates a new interval
    pub fn new(low: f64, high: f64) -> Self {
        Interval { low, high }
    }

    /// Total width of the interval
    pub fn width(&self) -> f64 {
        self.high - self.low
    }

    /// Width of one of `chunks` equal sub-intervals
    pub fn chunk_width(&self, chunks: usize) -> f64 {
        self.width() / chunks as f64
    }

    /// The `index`-th of `chunks` equal-width consecutive sub-intervals
    ///
    /// The last chunk ends exactly at `high` so the chunks tile the interval.
    pub fn sub_interval(&self, index: usize, chunks: usize) -> Interval {
        let chunk = self.chunk_width(chunks);
        let low = self.low + index as f64 * chunk;
        let high = if index + 1 == chunks {
            self.high
        } else {
            self.low + (index + 1) as f64 * chunk
        };
        Interval { low, high }
    }

    /// Returns true if `value` lies in `[low, high]`
    pub fn contains(&self, value: f64) -> bool {
        value >= self.low && value <= self.high
    }

    /// Returns true if `other` lies entirely inside this interval
    pub fn encloses(&self, other: &Interval) -> bool {
        other.low >= self.low && other.high <= self.high
    }

    /// Returns true if both bounds are finite and `low < high`
    pub fn is_proper(&self) -> bool {
        self.low.is_finite() && self.high.is_finite() && self.low < self.high
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.5}, {:.5}]", self.low, self.high)
    }
}

/// A named parameter and the range it may take
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterRange {
    /// Name passed to the evaluator
    pub name: String,
    /// Lower bound of the range
    pub low: f64,
    /// Upper bound of the range
    pub high: f64,
}

impl ParameterRange {
    /// Creates a new parameter range
    pub fn new(name: impl Into<String>, low: f64, high: f64) -> Self {
        ParameterRange {
            name: name.into(),
            low,
            high,
        }
    }

    /// The range as an interval
    pub fn interval(&self) -> Interval {
        Interval::new(self.low, self.high)
    }

    /// Checks that the range is finite and not empty or inverted
    pub fn validate(&self) -> Result<()> {
        if self.interval().is_proper() {
            Ok(())
        } else {
            Err(TuneError::InvalidConfiguration(format!(
                "parameter {:?} has a degenerate domain [{}, {}]",
                self.name, self.low, self.high
            )))
        }
    }
}

/// One evaluated sample, as recorded on every node it was propagated through
#[derive(Debug, Clone, PartialEq)]
pub struct SampleRecord {
    /// Name of the tuned parameter
    pub parameter: String,
    /// The sampled value
    pub value: f64,
    /// What the evaluator reported
    pub outcome: Outcome,
}

impl SampleRecord {
    /// Creates a new sample record
    pub fn new(parameter: impl Into<String>, value: f64, outcome: Outcome) -> Self {
        SampleRecord {
            parameter: parameter.into(),
            value,
            outcome,
        }
    }
}
