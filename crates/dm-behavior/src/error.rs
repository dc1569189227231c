use thiserror::Error;

#[derive(Debug, Error)]
pub enum BehaviorError {
    #[error("rule probability `{name}` must be within [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f64 },
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
