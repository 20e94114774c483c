//! Uniform-grid spatial index over template points.
//!
//! Points are bucketed by `(x.div_euclid(cell_size), y.div_euclid(cell_size))`.
//! A window query only visits the buckets overlapping the window, so with
//! `cell_size = 2 * tolerance + 1` a single-pixel coverage test touches at most
//! four buckets regardless of template size.

use std::{
    collections::HashMap,
    ops::{Range, RangeInclusive},
};

use tablecraft_core::TemplatePoint;

#[derive(Debug, Clone, Copy)]
struct CellBounds {
    min: (i64, i64),
    max: (i64, i64),
}

/// Set of template points supporting "is this pixel near the template" queries.
///
/// Built once per round and read-only afterwards. An index built from an
/// empty template is valid and never reports coverage.
///
/// # Example
///
/// ```
/// use tablecraft_core::TemplatePoint;
/// use tablecraft_evaluator::template_index::TemplateIndex;
///
/// let index = TemplateIndex::for_tolerance(&[TemplatePoint::new(100, 100)], 10);
/// assert!(index.is_covered(110, 90, 10));
/// assert!(!index.is_covered(111, 100, 10));
/// ```
#[derive(Debug, Clone)]
pub struct TemplateIndex {
    cell_size: i64,
    cells: HashMap<(i64, i64), Vec<TemplatePoint>>,
    bounds: Option<CellBounds>,
    y_extent: Option<(i32, i32)>,
    len: usize,
}

impl TemplateIndex {
    /// Builds an index with the given grid cell size (clamped to at least 1).
    ///
    /// Duplicate points are stored once.
    #[must_use]
    pub fn build(points: &[TemplatePoint], cell_size: i32) -> Self {
        let cell_size = i64::from(cell_size.max(1));
        let mut cells: HashMap<(i64, i64), Vec<TemplatePoint>> = HashMap::new();
        let mut bounds: Option<CellBounds> = None;
        let mut y_extent: Option<(i32, i32)> = None;
        let mut len = 0;

        for &point in points {
            let key = (
                i64::from(point.x).div_euclid(cell_size),
                i64::from(point.y).div_euclid(cell_size),
            );
            let cell = cells.entry(key).or_default();
            if cell.contains(&point) {
                continue;
            }
            cell.push(point);
            len += 1;
            y_extent = Some(y_extent.map_or((point.y, point.y), |(min, max)| {
                (min.min(point.y), max.max(point.y))
            }));
            bounds = Some(match bounds {
                None => CellBounds { min: key, max: key },
                Some(b) => CellBounds {
                    min: (b.min.0.min(key.0), b.min.1.min(key.1)),
                    max: (b.max.0.max(key.0), b.max.1.max(key.1)),
                },
            });
        }

        tracing::debug!(
            points = len,
            cells = cells.len(),
            cell_size,
            "built template index"
        );

        Self {
            cell_size,
            cells,
            bounds,
            y_extent,
            len,
        }
    }

    /// Builds an index whose cells are exactly one tolerance window wide.
    #[must_use]
    pub fn for_tolerance(points: &[TemplatePoint], tolerance: i32) -> Self {
        Self::build(points, tolerance.max(0).saturating_mul(2).saturating_add(1))
    }

    /// Number of distinct template points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if some template point lies within `tolerance` of
    /// `(x, y)` on both axes.
    ///
    /// A negative tolerance never covers anything.
    #[must_use]
    pub fn is_covered(&self, x: i32, y: i32, tolerance: i32) -> bool {
        if tolerance < 0 {
            return false;
        }
        let t = i64::from(tolerance);
        let (x64, y64) = (i64::from(x), i64::from(y));
        self.candidates(x64 - t..=x64 + t, y64 - t..=y64 + t)
            .any(|p| p.is_within(x, y, tolerance))
    }

    /// Counts the pixels `(x, y)` with `x` in `columns` for which
    /// [`Self::is_covered`] would return `true`.
    ///
    /// Each nearby template point covers the run `[p.x - tolerance, p.x + tolerance]`
    /// of the row; the result is the length of the union of those runs clipped to
    /// `columns`.
    #[must_use]
    pub fn covered_in_row(&self, y: i32, columns: Range<i32>, tolerance: i32) -> u64 {
        if columns.is_empty() || tolerance < 0 {
            return 0;
        }
        let t = i64::from(tolerance);
        let y64 = i64::from(y);
        let (start, end) = (i64::from(columns.start), i64::from(columns.end));

        let mut runs = self
            .candidates(start - t..=end - 1 + t, y64 - t..=y64 + t)
            .filter(|p| (i64::from(p.y) - y64).abs() <= t)
            .map(|p| {
                let px = i64::from(p.x);
                ((px - t).max(start), (px + t + 1).min(end))
            })
            .filter(|(run_start, run_end)| run_start < run_end)
            .collect::<Vec<_>>();
        runs.sort_unstable();

        let mut covered = 0;
        let mut covered_until = i64::MIN;
        for (run_start, run_end) in runs {
            let run_start = run_start.max(covered_until);
            if run_end > run_start {
                covered += run_end - run_start;
                covered_until = run_end;
            }
        }
        u64::try_from(covered).unwrap_or_default()
    }

    /// Narrows `rows` to the rows that can hold covered pixels: those within
    /// `tolerance` of the topmost or bottommost template point, or between them.
    #[must_use]
    pub fn rows_near(&self, rows: Range<i32>, tolerance: i32) -> Range<i32> {
        let empty = rows.start..rows.start;
        let Some((min_y, max_y)) = self.y_extent else {
            return empty;
        };
        if tolerance < 0 {
            return empty;
        }
        let t = i64::from(tolerance);
        let start = i64::from(rows.start).max(i64::from(min_y) - t);
        let end = i64::from(rows.end).min(i64::from(max_y) + t + 1);
        if start >= end {
            return empty;
        }
        // Both bounds lie within `rows` here
        i32::try_from(start).unwrap_or(rows.start)..i32::try_from(end).unwrap_or(rows.end)
    }

    /// Points in the buckets overlapping the window. May include points outside it.
    fn candidates(
        &self,
        xs: RangeInclusive<i64>,
        ys: RangeInclusive<i64>,
    ) -> impl Iterator<Item = TemplatePoint> + '_ {
        let cell_size = self.cell_size;
        self.bounds
            .into_iter()
            .flat_map(move |bounds| {
                let cols = xs.start().div_euclid(cell_size).max(bounds.min.0)
                    ..=xs.end().div_euclid(cell_size).min(bounds.max.0);
                let rows = ys.start().div_euclid(cell_size).max(bounds.min.1)
                    ..=ys.end().div_euclid(cell_size).min(bounds.max.1);
                rows.flat_map(move |row| cols.clone().map(move |col| (col, row)))
            })
            .filter_map(|key| self.cells.get(&key))
            .flatten()
            .copied()
    }
}
