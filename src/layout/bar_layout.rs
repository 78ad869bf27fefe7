//! Horizontal placement of grouped bars.
//!
//! Every category `i` sits at base position `i`. The `n` series of a category
//! are spread over `[-span, +span]` around that base with evenly spaced
//! offsets, so series `j` of category `i` is drawn at `i + offset[j]`.

/// Evenly spaced offsets over `[-span, +span]`, strictly increasing.
///
/// Offsets are exactly antisymmetric (`offset[j] == -offset[n - 1 - j]`), so
/// for odd `n` the middle series lands on the base position. A single series
/// is centred; zero series produce no offsets.
pub fn series_offsets(count: usize, span: f64) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => {
            let last = (count - 1) as f64;
            (0..count)
                .map(|j| span * (((2 * j) as f64 - last) / last))
                .collect()
        }
    }
}

/// Bar positions for one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct BarLayout {
    categories: usize,
    offsets: Vec<f64>,
    bar_width: f64,
}

impl BarLayout {
    /// # Arguments
    /// * `categories` - Number of x-axis categories
    /// * `series` - Number of bars per category
    /// * `bar_width` - Requested width of a single bar
    /// * `span` - Half-width of the interval the offsets are spread over
    pub fn new(categories: usize, series: usize, bar_width: f64, span: f64) -> Self {
        let offsets = series_offsets(series, span);

        // Narrow the bars if the offsets are packed tighter than the width,
        // or if neighbouring categories would touch.
        let mut bar_width = match offsets.as_slice() {
            [first, second, ..] => bar_width.min(second - first),
            _ => bar_width,
        };
        let category_gap = 1.0 - 2.0 * span;
        if category_gap > 0.0 {
            bar_width = bar_width.min(category_gap);
        }

        Self {
            categories,
            offsets,
            bar_width,
        }
    }

    pub fn categories(&self) -> usize {
        self.categories
    }

    pub fn series(&self) -> usize {
        self.offsets.len()
    }

    /// Offsets of each series relative to the base position, in series order.
    pub fn offsets(&self) -> &[f64] {
        &self.offsets
    }

    /// Width each bar is drawn with; never wider than the offset spacing.
    pub fn bar_width(&self) -> f64 {
        self.bar_width
    }

    /// Base position of a category.
    pub fn base_position(&self, category: usize) -> f64 {
        category as f64
    }

    /// Centre of the bar for `series` within `category`.
    pub fn position(&self, category: usize, series: usize) -> f64 {
        self.base_position(category) + self.offsets[series]
    }

    /// Left and right edge of a bar.
    pub fn extent(&self, category: usize, series: usize) -> (f64, f64) {
        let centre = self.position(category, series);
        let half = self.bar_width / 2.0;
        (centre - half, centre + half)
    }

    /// X range that contains every bar, with at least half a unit of padding
    /// around the first and last base position.
    pub fn x_range(&self) -> (f64, f64) {
        let last = self.categories.saturating_sub(1) as f64;
        let reach = self
            .offsets
            .iter()
            .map(|offset| offset.abs())
            .fold(0.0, f64::max)
            + self.bar_width / 2.0;
        let pad = reach.max(0.5);
        (-pad, last + pad)
    }
}

/// Maps an x-axis tick to its category label.
///
/// Only ticks that fall on a base position get a label; all others are blank.
pub fn category_label(labels: &[String], x: f64) -> String {
    let rounded = x.round();
    if (x - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }

    labels
        .get(rounded as usize)
        .cloned()
        .unwrap_or_default()
}
