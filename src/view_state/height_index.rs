//! HeightIndex - section tops and line lookups via a Fenwick tree
//!
//! Sections are stacked top to bottom; the top of section `i` is the sum of
//! the heights before it. A Fenwick tree keeps both that sum and single
//! height updates at O(log n), so a resize that re-wraps one section does not
//! force a full rescan.
//!
//! # Complexity
//!
//! - `set`: O(log n)
//! - `prefix_sum` / `top_of`: O(log n)
//! - `lower_bound`: O(log² n)
//! - `total`: O(log n)

/// Cumulative section heights backed by a fixed-size Fenwick tree.
#[derive(Debug, Clone, Default)]
pub struct HeightIndex {
    /// Fenwick storage, one slot per section.
    tree: Vec<isize>,
}

impl HeightIndex {
    /// Build an index from heights in document order.
    ///
    /// # Examples
    ///
    /// ```
    /// # use revealdeck::view_state::height_index::HeightIndex;
    /// let index = HeightIndex::from_heights([3, 4, 5]);
    /// assert_eq!(index.len(), 3);
    /// assert_eq!(index.total(), 12);
    /// ```
    pub fn from_heights<I>(heights: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let heights: Vec<usize> = heights.into_iter().collect();
        let mut tree = vec![0isize; heights.len()];
        for (i, &h) in heights.iter().enumerate() {
            if h > 0 {
                fenwick::array::update(&mut tree, i, h as isize);
            }
        }
        Self { tree }
    }

    /// Number of sections in the index.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Whether the index holds no sections.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Height of one section.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn height(&self, index: usize) -> usize {
        self.prefix_sum(index) - self.top_of(index)
    }

    /// Replace the height of one section.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use revealdeck::view_state::height_index::HeightIndex;
    /// let mut index = HeightIndex::from_heights([3, 4, 5]);
    /// index.set(1, 10);
    /// assert_eq!(index.top_of(2), 13);
    /// ```
    pub fn set(&mut self, index: usize, height: usize) {
        let delta = height as isize - self.height(index) as isize;
        if delta != 0 {
            fenwick::array::update(&mut self.tree, index, delta);
        }
    }

    /// Cumulative height up to and including `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn prefix_sum(&self, index: usize) -> usize {
        assert!(
            index < self.len(),
            "index {} out of bounds (len: {})",
            index,
            self.len()
        );
        fenwick::array::prefix_sum(&self.tree, index).max(0) as usize
    }

    /// First line of section `index`.
    ///
    /// Indices past the end resolve to the total height.
    ///
    /// # Examples
    ///
    /// ```
    /// # use revealdeck::view_state::height_index::HeightIndex;
    /// let index = HeightIndex::from_heights([10, 20, 15]);
    /// assert_eq!(index.top_of(0), 0);
    /// assert_eq!(index.top_of(2), 30);
    /// assert_eq!(index.top_of(9), 45);
    /// ```
    pub fn top_of(&self, index: usize) -> usize {
        match index {
            0 => 0,
            i if i >= self.len() => self.total(),
            i => self.prefix_sum(i - 1),
        }
    }

    /// Section containing document line `line`.
    ///
    /// Returns the first index whose cumulative height exceeds `line`, or
    /// `None` past the end. Zero-height sections are never returned.
    ///
    /// # Examples
    ///
    /// ```
    /// # use revealdeck::view_state::height_index::HeightIndex;
    /// let index = HeightIndex::from_heights([10, 0, 15]);
    /// assert_eq!(index.lower_bound(9), Some(0));
    /// assert_eq!(index.lower_bound(10), Some(2));
    /// assert_eq!(index.lower_bound(25), None);
    /// ```
    pub fn lower_bound(&self, line: usize) -> Option<usize> {
        let mut left = 0;
        let mut right = self.len();

        while left < right {
            let mid = left + (right - left) / 2;
            if self.prefix_sum(mid) > line {
                right = mid;
            } else {
                left = mid + 1;
            }
        }

        (left < self.len()).then_some(left)
    }

    /// Sum of all heights.
    pub fn total(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.prefix_sum(self.len() - 1)
        }
    }
}
