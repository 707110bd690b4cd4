#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GridError {
    #[error("energy grid requires at least 2 samples, got {actual}")]
    InsufficientSamples { actual: usize },
    #[error("energy grid bounds must be finite, got [{lower}, {upper}]")]
    NonFiniteBound { lower: f64, upper: f64 },
    #[error("energy grid requires lower < upper, got [{lower}, {upper}]")]
    EmptySpan { lower: f64, upper: f64 },
}

/// `count` evenly spaced samples over `[lower, upper]`.
///
/// The first sample is exactly `lower` and the last exactly `upper`; interior
/// samples are strictly increasing.
pub fn linear_grid(lower: f64, upper: f64, count: usize) -> Result<Vec<f64>, GridError> {
    if count < 2 {
        return Err(GridError::InsufficientSamples { actual: count });
    }
    if !lower.is_finite() || !upper.is_finite() {
        return Err(GridError::NonFiniteBound { lower, upper });
    }
    if lower >= upper {
        return Err(GridError::EmptySpan { lower, upper });
    }

    let span = upper - lower;
    let divisions = (count - 1) as f64;
    let mut grid: Vec<f64> = (0..count)
        .map(|index| lower + span * index as f64 / divisions)
        .collect();
    grid[0] = lower;
    grid[count - 1] = upper;
    Ok(grid)
}
