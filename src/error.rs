/// Reasons a weight vector cannot be turned into a sampler.
#[derive(Debug, Clone, PartialEq)]
pub enum InvalidInput {
    Empty,
    Negative { index: usize, value: f64 },
    NotFinite { index: usize },
    ZeroSum,
    TooManyWeights { len: usize, max: usize },
}

impl std::fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidInput::Empty => write!(f, "weights slice is empty"),
            InvalidInput::Negative { index, value } => {
                write!(
                    f,
                    "weights contain a negative value at index {index}: {value}"
                )
            }
            InvalidInput::NotFinite { index } => {
                write!(f, "weight at index {index} is not finite")
            }
            InvalidInput::ZeroSum => write!(f, "sum of weights is zero or not finite"),
            InvalidInput::TooManyWeights { len, max } => {
                write!(
                    f,
                    "{len} weights do not fit a quantized table of at most {max} buckets"
                )
            }
        }
    }
}

impl std::error::Error for InvalidInput {}
