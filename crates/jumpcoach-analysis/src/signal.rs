//! Numeric primitives over ordered sample sequences.
//!
//! Missing samples are `None`. Every helper here is a pure function of its
//! input slice so event heuristics can be tested without any keypoint data.

// === Statistics ===

/// Mean of the present values, or `None` if every value is missing.
pub fn mean_present(values: &[Option<f64>]) -> Option<f64> {
    let (sum, count) = values
        .iter()
        .flatten()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

/// Maximum of the present values, or `None` if every value is missing.
pub fn max_present(values: &[Option<f64>]) -> Option<f64> {
    values.iter().flatten().copied().reduce(f64::max)
}

/// Index of the first minimum among present values.
pub fn argmin_present(values: &[Option<f64>]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, value) in values.iter().enumerate() {
        let Some(v) = *value else { continue };
        match best {
            Some((_, b)) if v >= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

/// Index of the first present value strictly greater than zero.
pub fn first_positive(values: &[Option<f64>]) -> Option<usize> {
    values.iter().position(|v| v.is_some_and(|v| v > 0.0))
}

// === Gap Filling ===

/// Fill missing samples by linear interpolation between present neighbours.
///
/// Samples before the first or after the last present value take that
/// value (no extrapolation). Returns `None` when nothing is present.
pub fn interpolate_gaps(samples: &[Option<f64>]) -> Option<Vec<f64>> {
    let anchors: Vec<(usize, f64)> = samples
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.map(|v| (i, v)))
        .collect();
    let &(first_idx, first_val) = anchors.first()?;
    let &(last_idx, last_val) = anchors.last()?;

    let mut filled = Vec::with_capacity(samples.len());
    // Index into `anchors` of the first anchor at or after the current sample.
    let mut next = 0;
    for (i, sample) in samples.iter().enumerate() {
        let value = match *sample {
            Some(v) => v,
            None if i < first_idx => first_val,
            None if i > last_idx => last_val,
            None => {
                while anchors[next].0 < i {
                    next += 1;
                }
                let (hi_idx, hi_val) = anchors[next];
                let (lo_idx, lo_val) = anchors[next - 1];
                let t = (i - lo_idx) as f64 / (hi_idx - lo_idx) as f64;
                lo_val + t * (hi_val - lo_val)
            }
        };
        filled.push(value);
    }
    Some(filled)
}

// === Filtering ===

/// Least-squares quadratic fit over an odd-length window, with sample
/// positions centred on the middle sample.
struct QuadraticFit {
    c0: f64,
    c1: f64,
    c2: f64,
}

impl QuadraticFit {
    fn new(window: &[f64]) -> Self {
        let half = (window.len() / 2) as f64;
        let (mut s2, mut s4) = (0.0, 0.0);
        let (mut t0, mut t1, mut t2) = (0.0, 0.0, 0.0);
        for (k, &y) in window.iter().enumerate() {
            let x = k as f64 - half;
            let x2 = x * x;
            s2 += x2;
            s4 += x2 * x2;
            t0 += y;
            t1 += x * y;
            t2 += x2 * y;
        }
        // Odd moments vanish on a symmetric grid, decoupling the linear term.
        let s0 = window.len() as f64;
        let det = s0 * s4 - s2 * s2;
        Self {
            c0: (t0 * s4 - s2 * t2) / det,
            c1: t1 / s2,
            c2: (s0 * t2 - s2 * t0) / det,
        }
    }

    fn eval(&self, x: f64) -> f64 {
        self.c0 + self.c1 * x + self.c2 * x * x
    }
}

/// Savitzky-Golay filter with polynomial order 2.
///
/// Interior samples take the value of the quadratic fitted to the window
/// centred on them. The first and last `window / 2` samples are evaluated on
/// the quadratic fitted to the first and last full window respectively.
///
/// The input is returned unchanged if `window` is even, below 3, or longer
/// than the data.
pub fn savgol_smooth(values: &[f64], window: usize) -> Vec<f64> {
    let n = values.len();
    if window < 3 || window % 2 == 0 || window > n {
        return values.to_vec();
    }

    let half = window / 2;
    let mut smoothed = Vec::with_capacity(n);

    let head = QuadraticFit::new(&values[..window]);
    smoothed.extend((0..half).map(|i| head.eval(i as f64 - half as f64)));

    for center in half..n - half {
        let fit = QuadraticFit::new(&values[center - half..=center + half]);
        smoothed.push(fit.c0);
    }

    let tail_start = n - window;
    let tail = QuadraticFit::new(&values[tail_start..]);
    smoothed.extend((n - half..n).map(|i| tail.eval((i - tail_start) as f64 - half as f64)));

    smoothed
}

/// Largest usable filter window for `len` samples given a target window.
///
/// Returns the target when it fits, otherwise the largest odd number not
/// exceeding `len`.
pub fn fitted_window(target: usize, len: usize) -> usize {
    if len >= target {
        target
    } else if len % 2 == 1 {
        len
    } else {
        len.saturating_sub(1)
    }
}

// === Derivatives and Peaks ===

/// Discrete gradient with unit sample spacing.
///
/// Centred differences in the interior and one-sided differences at both
/// ends. A sample is `None` when a value it depends on is missing; a single
/// sample has no defined gradient.
pub fn gradient(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let n = values.len();
    if n < 2 {
        return vec![None; n];
    }

    let diff = |hi: Option<f64>, lo: Option<f64>, span: f64| Some((hi? - lo?) / span);
    let mut grad = Vec::with_capacity(n);
    grad.push(diff(values[1], values[0], 1.0));
    for i in 1..n - 1 {
        grad.push(diff(values[i + 1], values[i - 1], 2.0));
    }
    grad.push(diff(values[n - 1], values[n - 2], 1.0));
    grad
}

/// Indices of local maxima at least `min_distance` samples apart.
///
/// A peak is strictly higher than the sample before it and the first
/// differing sample after it; flat tops report their middle sample.
/// Endpoints are never peaks and missing samples neither peak nor bound a
/// peak. When peaks crowd each other, higher peaks win and any peak closer
/// than `min_distance` to a kept one is dropped.
pub fn find_peaks(values: &[Option<f64>], min_distance: usize) -> Vec<usize> {
    let peaks = local_maxima(values);
    if min_distance <= 1 || peaks.len() < 2 {
        return peaks;
    }

    let heights: Vec<f64> = peaks
        .iter()
        .map(|&p| values[p].unwrap_or(f64::NEG_INFINITY))
        .collect();
    let mut by_height: Vec<usize> = (0..peaks.len()).collect();
    by_height.sort_by(|&a, &b| heights[a].total_cmp(&heights[b]));

    let mut keep = vec![true; peaks.len()];
    for &j in by_height.iter().rev() {
        if !keep[j] {
            continue;
        }
        for k in (0..j).rev() {
            if peaks[j] - peaks[k] >= min_distance {
                break;
            }
            keep[k] = false;
        }
        for k in j + 1..peaks.len() {
            if peaks[k] - peaks[j] >= min_distance {
                break;
            }
            keep[k] = false;
        }
    }

    peaks
        .into_iter()
        .zip(keep)
        .filter_map(|(p, kept)| kept.then_some(p))
        .collect()
}

fn local_maxima(values: &[Option<f64>]) -> Vec<usize> {
    let mut peaks = Vec::new();
    if values.len() < 3 {
        return peaks;
    }

    let i_max = values.len() - 1;
    let mut i = 1;
    while i < i_max {
        if let (Some(prev), Some(cur)) = (values[i - 1], values[i]) {
            if prev < cur {
                let mut ahead = i + 1;
                while ahead < i_max && values[ahead] == Some(cur) {
                    ahead += 1;
                }
                if values[ahead].is_some_and(|next| next < cur) {
                    peaks.push((i + ahead - 1) / 2);
                    i = ahead;
                }
            }
        }
        i += 1;
    }
    peaks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some(values: &[f64]) -> Vec<Option<f64>> {
        values.iter().copied().map(Some).collect()
    }

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-9, "{actual:?} != {expected:?}");
        }
    }

    #[test]
    fn test_mean_and_max_present() {
        assert_eq!(mean_present(&[Some(1.0), None, Some(3.0)]), Some(2.0));
        assert_eq!(mean_present(&[None, None]), None);
        assert_eq!(mean_present(&[]), None);
        assert_eq!(max_present(&[None, Some(2.0), Some(5.0)]), Some(5.0));
        assert_eq!(max_present(&[None]), None);
    }

    #[test]
    fn test_argmin_first_occurrence() {
        let values = [None, Some(3.0), Some(1.0), Some(1.0), Some(4.0), Some(4.0)];
        assert_eq!(argmin_present(&values), Some(2));
        assert_eq!(argmin_present(&[None, None]), None);
    }

    #[test]
    fn test_first_positive() {
        assert_eq!(first_positive(&[Some(0.0), None, Some(-1.0), Some(0.5)]), Some(3));
        assert_eq!(first_positive(&[Some(0.0), None]), None);
    }

    #[test]
    fn test_interpolate_interior_gap() {
        let filled = interpolate_gaps(&[Some(0.0), None, None, Some(3.0)]).unwrap();
        assert_close(&filled, &[0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_interpolate_clamps_edges() {
        let filled = interpolate_gaps(&[None, Some(5.0), None, Some(7.0), None, None]).unwrap();
        assert_close(&filled, &[5.0, 5.0, 6.0, 7.0, 7.0, 7.0]);
    }

    #[test]
    fn test_interpolate_all_missing() {
        assert!(interpolate_gaps(&[None, None, None]).is_none());
    }

    #[test]
    fn test_savgol_preserves_quadratic() {
        let values: Vec<f64> = (0..15)
            .map(|t| {
                let t = t as f64;
                3.0 - 2.0 * t + 0.5 * t * t
            })
            .collect();
        assert_close(&savgol_smooth(&values, 9), &values);
        assert_close(&savgol_smooth(&values, 5), &values);
    }

    #[test]
    fn test_savgol_reduces_noise() {
        let values: Vec<f64> = (0..20).map(|t| if t % 2 == 0 { 1.0 } else { -1.0 }).collect();
        let smoothed = savgol_smooth(&values, 9);
        let raw_energy: f64 = values[4..16].iter().map(|v| v * v).sum();
        let smooth_energy: f64 = smoothed[4..16].iter().map(|v| v * v).sum();
        assert!(smooth_energy < raw_energy * 0.1);
    }

    #[test]
    fn test_savgol_window_too_large_is_identity() {
        let values = [1.0, 5.0, 2.0];
        assert_eq!(savgol_smooth(&values, 5), values.to_vec());
        assert_eq!(savgol_smooth(&values, 4), values.to_vec());
    }

    #[test]
    fn test_fitted_window() {
        assert_eq!(fitted_window(9, 30), 9);
        assert_eq!(fitted_window(9, 9), 9);
        assert_eq!(fitted_window(9, 8), 7);
        assert_eq!(fitted_window(9, 7), 7);
        assert_eq!(fitted_window(9, 4), 3);
        assert_eq!(fitted_window(9, 1), 1);
        assert_eq!(fitted_window(9, 0), 0);
    }

    #[test]
    fn test_gradient_matches_numpy() {
        let grad = gradient(&some(&[1.0, 2.0, 4.0, 7.0, 11.0]));
        assert_eq!(
            grad,
            vec![Some(1.0), Some(1.5), Some(2.5), Some(3.5), Some(4.0)]
        );
    }

    #[test]
    fn test_gradient_missing_neighbours() {
        let grad = gradient(&[Some(1.0), None, Some(3.0), Some(4.0)]);
        assert_eq!(grad, vec![None, Some(1.0), None, Some(1.0)]);
        assert_eq!(gradient(&[Some(1.0)]), vec![None]);
        assert!(gradient(&[]).is_empty());
    }

    #[test]
    fn test_find_peaks_basic() {
        let values = some(&[0.0, 2.0, 0.0, 3.0, 1.0, 1.0, 4.0, 0.0]);
        assert_eq!(find_peaks(&values, 1), vec![1, 3, 6]);
    }

    #[test]
    fn test_find_peaks_plateau_and_edges() {
        let values = some(&[5.0, 1.0, 3.0, 3.0, 3.0, 1.0, 2.0]);
        assert_eq!(find_peaks(&values, 1), vec![3]);
        // Rising plateau is not a peak.
        let values = some(&[0.0, 2.0, 2.0, 3.0, 0.0]);
        assert_eq!(find_peaks(&values, 1), vec![3]);
    }

    #[test]
    fn test_find_peaks_ignores_missing() {
        let values = [
            Some(0.0),
            Some(2.0),
            None,
            Some(3.0),
            Some(0.0),
            Some(1.0),
            Some(0.0),
        ];
        assert_eq!(find_peaks(&values, 1), vec![5]);
    }

    #[test]
    fn test_find_peaks_distance_keeps_higher() {
        let values = some(&[0.0, 2.0, 0.0, 5.0, 0.0, 1.0, 0.0, 0.0, 0.0, 3.0, 0.0]);
        assert_eq!(find_peaks(&values, 1), vec![1, 3, 5, 9]);
        assert_eq!(find_peaks(&values, 3), vec![3, 9]);
    }
}
