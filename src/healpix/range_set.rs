//! Accumulator of pixel ranges
//!
//! Disc queries emit one or two closed ranges of RING pixels per ring. The
//! builder keeps them as a sorted list of disjoint, non-adjacent ranges, so
//! repeated or overlapping appends cost nothing extra and the flattened
//! output is sorted and free of duplicates.

/// Sorted set of closed `i64` ranges
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LongRangeSetBuilder {
    ranges: Vec<(i64, i64)>,
}

impl LongRangeSetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds every value in `[lo, hi]`; an empty range (`lo > hi`) is ignored
    pub fn append_range(&mut self, lo: i64, hi: i64) {
        if lo > hi {
            return;
        }
        // Ranges that overlap or touch [lo, hi] form the run start..end
        let start = self
            .ranges
            .partition_point(|&(_, h)| h < lo.saturating_sub(1));
        let end = self
            .ranges
            .partition_point(|&(l, _)| l <= hi.saturating_add(1));

        if start == end {
            self.ranges.insert(start, (lo, hi));
            return;
        }
        let merged = (lo.min(self.ranges[start].0), hi.max(self.ranges[end - 1].1));
        self.ranges.splice(start..end, std::iter::once(merged));
    }

    /// Adds a single value
    pub fn append(&mut self, value: i64) {
        self.append_range(value, value);
    }

    pub fn contains(&self, value: i64) -> bool {
        let idx = self.ranges.partition_point(|&(l, _)| l <= value);
        idx > 0 && self.ranges[idx - 1].1 >= value
    }

    /// Number of distinct values
    pub fn len(&self) -> usize {
        self.ranges.iter().map(|&(l, h)| (h - l + 1) as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// The merged ranges in ascending order
    pub fn ranges(&self) -> &[(i64, i64)] {
        &self.ranges
    }

    /// Every value in ascending order
    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        self.ranges.iter().flat_map(|&(l, h)| l..=h)
    }

    /// Flattens the set into a sorted vector of unique values
    pub fn build(&self) -> Vec<i64> {
        let mut values = Vec::with_capacity(self.len());
        values.extend(self.iter());
        values
    }
}
