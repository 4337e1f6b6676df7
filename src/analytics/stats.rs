//! Descriptive statistics over a user's logged data. Everything here is
//! pure arithmetic over slices; fetching and pairing lives in `summary`.

use serde::{Serialize, Serializer};

/// Slopes flatter than this count as no trend.
const TREND_EPSILON: f64 = 1e-6;

/// Variances below this are treated as constant series.
const VARIANCE_EPSILON: f64 = 1e-12;

/// Outcome of a correlation computation. A correlation over fewer than two
/// pairs, or over a constant series, is undefined and must never surface as
/// NaN or a division error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Correlation {
    Defined(f64),
    InsufficientData,
}

impl Serialize for Correlation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Correlation::Defined(r) => serializer.serialize_f64(*r),
            Correlation::InsufficientData => serializer.serialize_str("insufficient data"),
        }
    }
}

/// Direction of the least-squares slope of a series over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Pearson's r over paired samples.
pub fn pearson(pairs: &[(f64, f64)]) -> Correlation {
    if pairs.len() < 2 {
        return Correlation::InsufficientData;
    }
    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x < VARIANCE_EPSILON || var_y < VARIANCE_EPSILON {
        return Correlation::InsufficientData;
    }

    // Rounding can push r marginally outside [-1, 1].
    let r = (cov / (var_x * var_y).sqrt()).clamp(-1.0, 1.0);
    Correlation::Defined(r)
}

/// Sign of the least-squares slope of `values` against their index.
/// Returns `None` when the series is too short to say anything.
pub fn trend(values: &[f64]) -> Option<Trend> {
    if values.len() < 2 {
        return None;
    }
    let n = values.len() as f64;
    let mean_t = (n - 1.0) / 2.0;
    let mean_v = values.iter().sum::<f64>() / n;

    let mut num = 0.0;
    let mut den = 0.0;
    for (i, v) in values.iter().enumerate() {
        let dt = i as f64 - mean_t;
        num += dt * (v - mean_v);
        den += dt * dt;
    }
    let slope = num / den;

    Some(if slope > TREND_EPSILON {
        Trend::Up
    } else if slope < -TREND_EPSILON {
        Trend::Down
    } else {
        Trend::Stable
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_empty_is_none() {
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn mean_of_focus_ratings() {
        let m = mean(&[2.0, 3.0, 3.0, 4.0, 5.0]).unwrap();
        assert!((m - 3.4).abs() < 1e-9);
    }

    #[test]
    fn pearson_needs_two_pairs() {
        assert_eq!(pearson(&[]), Correlation::InsufficientData);
        assert_eq!(pearson(&[(1.0, 2.0)]), Correlation::InsufficientData);
    }

    #[test]
    fn pearson_undefined_for_constant_series() {
        let pairs = [(3.0, 1.0), (3.0, 2.0), (3.0, 3.0)];
        assert_eq!(pearson(&pairs), Correlation::InsufficientData);
    }

    #[test]
    fn series_correlates_perfectly_with_itself() {
        let xs = [30.0, 45.0, 60.0, 90.0, 120.0];
        let pairs: Vec<_> = xs.iter().map(|&x| (x, x)).collect();
        match pearson(&pairs) {
            Correlation::Defined(r) => assert!((r - 1.0).abs() < 1e-9),
            other => panic!("expected defined correlation, got {other:?}"),
        }
    }

    #[test]
    fn duration_and_focus_correlate_positively() {
        let durations = [30.0, 45.0, 60.0, 90.0, 120.0];
        let focus = [2.0, 3.0, 3.0, 4.0, 5.0];
        let pairs: Vec<_> = durations.iter().zip(&focus).map(|(&d, &f)| (d, f)).collect();
        match pearson(&pairs) {
            Correlation::Defined(r) => assert!(r >= 0.95, "r was {r}"),
            other => panic!("expected defined correlation, got {other:?}"),
        }
    }

    #[test]
    fn anticorrelated_series_gives_negative_r() {
        let pairs = [(1.0, 5.0), (2.0, 4.0), (3.0, 3.0), (4.0, 2.0), (5.0, 1.0)];
        match pearson(&pairs) {
            Correlation::Defined(r) => assert!((r + 1.0).abs() < 1e-9),
            other => panic!("expected defined correlation, got {other:?}"),
        }
    }

    #[test]
    fn correlation_serializes_as_number_or_message() {
        let defined = serde_json::to_value(Correlation::Defined(0.5)).unwrap();
        assert_eq!(defined, serde_json::json!(0.5));
        let missing = serde_json::to_value(Correlation::InsufficientData).unwrap();
        assert_eq!(missing, serde_json::json!("insufficient data"));
    }

    #[test]
    fn rising_series_trends_up() {
        assert_eq!(trend(&[1.0, 2.0, 4.0, 5.0]), Some(Trend::Up));
    }

    #[test]
    fn falling_series_trends_down() {
        assert_eq!(trend(&[8.0, 7.0, 6.5, 5.0]), Some(Trend::Down));
    }

    #[test]
    fn constant_series_is_stable() {
        assert_eq!(trend(&[3.0, 3.0, 3.0]), Some(Trend::Stable));
    }

    #[test]
    fn short_series_has_no_trend() {
        assert_eq!(trend(&[3.0]), None);
        assert_eq!(trend(&[]), None);
    }
}
