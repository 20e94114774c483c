/// Summary statistics over a batch of round scores.
///
/// Percentiles use the nearest-rank method: the `k`-th percentile of `n`
/// sorted values is the value at index `floor(n * k / 100)`, capped at the
/// last index.
///
/// # Example
///
/// ```
/// use tablecraft_evaluator::summary::ScoreSummary;
///
/// let summary = ScoreSummary::new(&[40.0, 10.0, 30.0, 20.0, 50.0], &[50.0, 90.0]).unwrap();
/// assert_eq!(summary.mean, 30.0);
/// assert_eq!(summary.median, 30.0);
/// assert_eq!(summary.percentile(90.0), Some(50.0));
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ScoreSummary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    /// `(percentile, value)` pairs in the requested order.
    pub percentiles: Vec<(f64, f64)>,
}

impl ScoreSummary {
    /// Returns `None` for an empty slice.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new(scores: &[f64], percentile_points: &[f64]) -> Option<Self> {
        let mut sorted = scores.to_vec();
        sorted.sort_by(f64::total_cmp);

        let min = *sorted.first()?;
        let max = *sorted.last()?;
        let count = sorted.len();
        let n = count as f64;
        let mean = sorted.iter().sum::<f64>() / n;
        let median = sorted[count / 2];
        let variance = sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let percentiles = percentile_points
            .iter()
            .map(|&p| (p, nearest_rank(&sorted, p)))
            .collect();

        Some(Self {
            count,
            min,
            max,
            mean,
            median,
            std_dev: variance.sqrt(),
            percentiles,
        })
    }

    /// Value at a percentile passed to [`Self::new`].
    #[must_use]
    pub fn percentile(&self, percentile: f64) -> Option<f64> {
        self.percentiles
            .iter()
            .find(|(p, _)| (p - percentile).abs() < f64::EPSILON)
            .map(|&(_, value)| value)
    }
}

#[expect(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]
fn nearest_rank(sorted: &[f64], percentile: f64) -> f64 {
    let idx = ((sorted.len() as f64 * percentile) / 100.0) as usize;
    sorted[idx.min(sorted.len() - 1)]
}
