use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RangeQueryError {
    #[error("operation on a tree built from zero elements")]
    EmptyStructure,
    #[error("range [{start}, {end}) is not a non-empty sub-range of [0, {len})")]
    InvalidRange { start: usize, end: usize, len: usize },
    #[error("index {index} is out of range for a tree of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}
