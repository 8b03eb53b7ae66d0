use std::fmt;

use crate::Operator;

#[derive(Clone, Debug, Copy, PartialEq)]
// Summary holds the count/min/max/sum of a run of samples.
pub struct Summary {
    pub count: usize,
    pub max: f64,
    pub min: f64,
    pub sum: f64,
}

impl Summary {
    pub fn of(value: f64) -> Self {
        Self {
            count: 1,
            max: value,
            min: value,
            sum: value,
        }
    }

    pub fn mean(&self) -> Option<f64> {
        if self.count == 0 {
            return None;
        }
        Some(self.sum / self.count as f64)
    }
}

impl From<f64> for Summary {
    fn from(value: f64) -> Self {
        Summary::of(value)
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "count={} min={} max={} sum={}",
            self.count, self.min, self.max, self.sum
        )
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Summarize;

impl Operator<Summary> for Summarize {
    fn combine(&self, left: &Summary, right: &Summary) -> Summary {
        Summary {
            count: left.count + right.count,
            max: left.max.max(right.max),
            min: left.min.min(right.min),
            sum: left.sum + right.sum,
        }
    }
}
