//! Statistical helpers shared by the forecasting models.

/// Mean of a slice. NaN for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation (n denominator).
pub fn population_std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let m = mean(values);
    let var = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    var.sqrt()
}

/// Quantile function (inverse CDF) of the standard normal distribution.
///
/// Rational approximation from Abramowitz and Stegun, formula 26.2.23.
/// Absolute error stays below 4.5e-4 over the open unit interval, which
/// is plenty for interval half-widths.
pub fn quantile_normal(p: f64) -> f64 {
    if p <= 0.0 {
        return f64::NEG_INFINITY;
    }
    if p >= 1.0 {
        return f64::INFINITY;
    }

    // Evaluate in the lower tail and mirror for p above the median.
    let tail = p.min(1.0 - p);
    let t = (-2.0 * tail.ln()).sqrt();

    const NUM: [f64; 3] = [2.515517, 0.802853, 0.010328];
    const DEN: [f64; 3] = [1.432788, 0.189269, 0.001308];

    let z = t - (NUM[0] + t * (NUM[1] + t * NUM[2]))
        / (1.0 + t * (DEN[0] + t * (DEN[1] + t * DEN[2])));

    if p < 0.5 {
        -z
    } else {
        z
    }
}
