//! Box-and-whisker summaries.
//!
//! Quartiles use linear interpolation between closest ranks: for sorted samples `x` of length
//! `n`, the `p` quantile sits at fractional index `h = (n - 1) * p`. This is the convention of
//! `plotters::data::Quartiles`, computed here in `f64`. Whiskers reach the most extreme samples
//! within 1.5 IQR of the box rather than the fences themselves; everything beyond is an outlier.

/// Whisker reach in multiples of the interquartile range.
pub const WHISKER_IQR: f64 = 1.5;

#[derive(Clone, Debug, PartialEq)]
pub struct BoxStats {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub whisker_lo: f64,
    pub whisker_hi: f64,
    pub outliers: Vec<f64>,
}

impl BoxStats {
    /// `None` for an empty sample.
    pub fn compute(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        let mut sorted = samples.to_vec();
        sorted.sort_by(f64::total_cmp);

        let q1 = quantile_sorted(&sorted, 0.25);
        let median = quantile_sorted(&sorted, 0.5);
        let q3 = quantile_sorted(&sorted, 0.75);
        let iqr = q3 - q1;
        let lo_fence = q1 - WHISKER_IQR * iqr;
        let hi_fence = q3 + WHISKER_IQR * iqr;

        let whisker_lo = sorted
            .iter()
            .copied()
            .find(|&v| v >= lo_fence && v <= q1)
            .unwrap_or(q1);
        let whisker_hi = sorted
            .iter()
            .rev()
            .copied()
            .find(|&v| v <= hi_fence && v >= q3)
            .unwrap_or(q3);
        let outliers = sorted
            .iter()
            .copied()
            .filter(|&v| v < whisker_lo || v > whisker_hi)
            .collect();

        Some(Self {
            q1,
            median,
            q3,
            whisker_lo,
            whisker_hi,
            outliers,
        })
    }

    /// Smallest and largest value the summary draws (whiskers and outliers).
    pub fn drawn_extent(&self) -> (f64, f64) {
        self.outliers.iter().fold(
            (self.whisker_lo, self.whisker_hi),
            |(lo, hi), &v| (lo.min(v), hi.max(v)),
        )
    }
}

/// Quantile of ascending `sorted` by linear interpolation. `sorted` must be non-empty.
fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    let h = (sorted.len() - 1) as f64 * p.clamp(0.0, 1.0);
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(sorted.len() - 1);
    sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo])
}
