//! Descriptive statistics over anomaly series.

/// Arithmetic mean, `None` when empty.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Pearson correlation coefficient.
///
/// Returns `None` for fewer than two pairs, mismatched lengths, or when either
/// side has zero variance.
pub fn pearson(xs: &[f64], ys: &[f64]) -> Option<f64> {
    if xs.len() != ys.len() || xs.len() < 2 {
        return None;
    }
    let mx = mean(xs)?;
    let my = mean(ys)?;

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (&x, &y) in xs.iter().zip(ys) {
        let dx = x - mx;
        let dy = y - my;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    if sxx <= 0.0 || syy <= 0.0 {
        return None;
    }
    let r = sxy / (sxx.sqrt() * syy.sqrt());
    r.is_finite().then_some(r.clamp(-1.0, 1.0))
}

/// Trailing rolling mean.
///
/// Entry `i` averages `values[i + 1 - window ..= i]` (clipped at the start) and
/// is `None` until at least `min_periods` values are inside the window.
pub fn rolling_mean(values: &[f64], window: usize, min_periods: usize) -> Vec<Option<f64>> {
    let window = window.max(1);
    let min_periods = min_periods.clamp(1, window);

    let mut out = Vec::with_capacity(values.len());
    let mut sum = 0.0;
    for (i, &v) in values.iter().enumerate() {
        sum += v;
        if i >= window {
            sum -= values[i - window];
        }
        let count = (i + 1).min(window);
        out.push((count >= min_periods).then(|| sum / count as f64));
    }
    out
}

/// Equal-width histogram.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// Left edge of the first bin.
    pub min: f64,
    pub bin_width: f64,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// `(left, right, count)` for every bin.
    pub fn bins(&self) -> impl Iterator<Item = (f64, f64, usize)> + '_ {
        self.counts.iter().enumerate().map(|(i, &c)| {
            let left = self.min + i as f64 * self.bin_width;
            (left, left + self.bin_width, c)
        })
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Bucket finite values into `bins` equal-width bins over their range.
///
/// The right edge of the last bin is inclusive. A constant series gets a
/// unit-wide range centered on its value.
pub fn histogram(values: &[f64], bins: usize) -> Option<Histogram> {
    let bins = bins.max(1);
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return None;
    }

    let mut lo = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let mut hi = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if hi - lo < 1e-12 {
        lo -= 0.5;
        hi += 0.5;
    }

    let bin_width = (hi - lo) / bins as f64;
    let mut counts = vec![0usize; bins];
    for v in finite {
        let idx = (((v - lo) / bin_width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
    }

    Some(Histogram {
        min: lo,
        bin_width,
        counts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pearson_perfect_and_inverse() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        assert!((pearson(&xs, &[2.0, 4.0, 6.0, 8.0]).unwrap() - 1.0).abs() < 1e-12);
        assert!((pearson(&xs, &[8.0, 6.0, 4.0, 2.0]).unwrap() + 1.0).abs() < 1e-12);
        assert!(pearson(&xs, &[1.0, 1.0, 1.0, 1.0]).is_none());
    }

    #[test]
    fn rolling_mean_waits_for_min_periods() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        let rolled = rolling_mean(&values, 3, 2);
        assert_eq!(rolled[0], None);
        assert_eq!(rolled[1], Some(1.5));
        assert_eq!(rolled[2], Some(2.0));
        assert_eq!(rolled[3], Some(3.0));
        assert_eq!(rolled[4], Some(4.0));
    }

    #[test]
    fn rolling_mean_empty_input() {
        assert!(rolling_mean(&[], 120, 30).is_empty());
    }

    #[test]
    fn histogram_counts_every_value_once() {
        let values = [0.0, 0.1, 0.2, 0.5, 0.9, 1.0];
        let h = histogram(&values, 4).unwrap();
        assert_eq!(h.counts.len(), 4);
        assert_eq!(h.total(), values.len());
        // The maximum lands in the last bin.
        assert_eq!(h.counts[3], 2);
        let (left, right, _) = h.bins().last().unwrap();
        assert!((left - 0.75).abs() < 1e-12);
        assert!((right - 1.0).abs() < 1e-12);
    }

    #[test]
    fn histogram_constant_series() {
        let h = histogram(&[0.3, 0.3, f64::NAN], 5).unwrap();
        assert_eq!(h.total(), 2);
        assert!((h.min + 0.2).abs() < 1e-12);
        assert!(histogram(&[], 5).is_none());
    }
}
