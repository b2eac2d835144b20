//! Sample grids with numpy semantics.

/// `n` evenly spaced points from `start` to `stop` inclusive.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            let mut out: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
            out[n - 1] = stop;
            out
        }
    }
}

/// Points `start + i*step` for all `i` with the point strictly before `stop`.
///
/// The count is `ceil((stop - start) / step)`; empty for a non-positive count
/// or a zero/non-finite step.
pub fn arange(start: f64, stop: f64, step: f64) -> Vec<f64> {
    if step == 0.0 || !step.is_finite() {
        return Vec::new();
    }
    let count = ((stop - start) / step).ceil();
    if !(count > 0.0) {
        return Vec::new();
    }
    (0..count as usize).map(|i| start + i as f64 * step).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_endpoints() {
        let t = linspace(0.0, 10.0, 1000);
        assert_eq!(t.len(), 1000);
        assert_eq!(t[0], 0.0);
        assert_eq!(t[999], 10.0);
        assert!((t[1] - 10.0 / 999.0).abs() < 1e-15);
    }

    #[test]
    fn linspace_degenerate() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(2.0, 5.0, 1), vec![2.0]);
    }

    #[test]
    fn arange_excludes_stop() {
        let x = arange(0.0, 5.1, 0.2);
        assert_eq!(x.len(), 26);
        assert_eq!(x[0], 0.0);
        assert!((x[25] - 5.0).abs() < 1e-12);

        assert_eq!(arange(0.0, 1.0, 0.25), vec![0.0, 0.25, 0.5, 0.75]);
    }

    #[test]
    fn arange_empty_cases() {
        assert!(arange(1.0, 0.0, 0.1).is_empty());
        assert!(arange(0.0, 1.0, 0.0).is_empty());
        assert_eq!(arange(1.0, 0.0, -0.5), vec![1.0, 0.5]);
    }
}
