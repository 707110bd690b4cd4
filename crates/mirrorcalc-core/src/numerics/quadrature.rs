#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QuadratureError {
    #[error("quadrature requires at least 3 samples, got {actual}")]
    InsufficientSamples { actual: usize },
    #[error("quadrature sample length mismatch: abscissa={abscissa}, ordinate={ordinate}")]
    LengthMismatch { abscissa: usize, ordinate: usize },
    #[error("quadrature abscissa must be finite at index {index}, got {value}")]
    NonFiniteAbscissa { index: usize, value: f64 },
    #[error("quadrature ordinate must be finite at index {index}, got {value}")]
    NonFiniteOrdinate { index: usize, value: f64 },
    #[error(
        "quadrature abscissa must be strictly increasing, index {index} has {current} after {previous}"
    )]
    NonIncreasingAbscissa {
        index: usize,
        previous: f64,
        current: f64,
    },
    #[error("quadrature produced a non-finite result")]
    NonFiniteResult,
}

/// Definite-integral estimate over ordered `(x, y)` samples.
pub trait QuadratureRule {
    fn integrate(&self, abscissa: &[f64], ordinate: &[f64]) -> Result<f64, QuadratureError>;
}

/// Composite Simpson rule over a possibly non-uniform abscissa.
///
/// Simpson's rule consumes interval pairs, so it wants an odd sample count.
/// With an even count the final interval is closed with the trapezoid rule
/// instead; the fallback is part of this rule's contract, not a silent
/// degradation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompositeSimpson;

impl QuadratureRule for CompositeSimpson {
    fn integrate(&self, abscissa: &[f64], ordinate: &[f64]) -> Result<f64, QuadratureError> {
        validate_samples(abscissa, ordinate)?;

        let sample_count = abscissa.len();
        let paired_end = if sample_count % 2 == 1 {
            sample_count
        } else {
            sample_count - 1
        };

        let mut integral = 0.0;
        let mut left = 0;
        while left + 2 < paired_end {
            integral += simpson_pair(&abscissa[left..left + 3], &ordinate[left..left + 3]);
            left += 2;
        }

        if paired_end != sample_count {
            let width = abscissa[sample_count - 1] - abscissa[sample_count - 2];
            integral += 0.5 * width * (ordinate[sample_count - 1] + ordinate[sample_count - 2]);
        }

        if !integral.is_finite() {
            return Err(QuadratureError::NonFiniteResult);
        }
        Ok(integral)
    }
}

/// Simpson estimate over one interval pair with independent widths.
fn simpson_pair(x: &[f64], y: &[f64]) -> f64 {
    let h0 = x[1] - x[0];
    let h1 = x[2] - x[1];
    let combined = h0 + h1;
    combined / 6.0
        * ((2.0 - h1 / h0) * y[0] + combined * combined / (h0 * h1) * y[1]
            + (2.0 - h0 / h1) * y[2])
}

fn validate_samples(abscissa: &[f64], ordinate: &[f64]) -> Result<(), QuadratureError> {
    if abscissa.len() != ordinate.len() {
        return Err(QuadratureError::LengthMismatch {
            abscissa: abscissa.len(),
            ordinate: ordinate.len(),
        });
    }
    if abscissa.len() < 3 {
        return Err(QuadratureError::InsufficientSamples {
            actual: abscissa.len(),
        });
    }

    for (index, value) in abscissa.iter().copied().enumerate() {
        if !value.is_finite() {
            return Err(QuadratureError::NonFiniteAbscissa { index, value });
        }
        if index > 0 {
            let previous = abscissa[index - 1];
            if value <= previous {
                return Err(QuadratureError::NonIncreasingAbscissa {
                    index,
                    previous,
                    current: value,
                });
            }
        }
    }
    for (index, value) in ordinate.iter().copied().enumerate() {
        if !value.is_finite() {
            return Err(QuadratureError::NonFiniteOrdinate { index, value });
        }
    }
    Ok(())
}
