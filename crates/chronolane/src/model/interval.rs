//! Half-open time intervals with optionally unbounded ends.

/// A time interval `[start, end)`.
///
/// Open ends are represented by `f64::NEG_INFINITY` / `f64::INFINITY`, so
/// intersecting with an unbounded interval leaves the other side untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    start: f64,
    end: f64,
}

impl Interval {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// The interval covering all of time.
    pub fn unbounded() -> Self {
        Self::new(f64::NEG_INFINITY, f64::INFINITY)
    }

    pub fn start(self) -> f64 {
        self.start
    }

    pub fn end(self) -> f64 {
        self.end
    }

    pub fn has_open_start(self) -> bool {
        self.start == f64::NEG_INFINITY
    }

    pub fn has_open_end(self) -> bool {
        self.end == f64::INFINITY
    }

    /// Returns `true` if nothing lies inside the interval (`end <= start`).
    pub fn is_empty(self) -> bool {
        self.end <= self.start
    }

    /// Intersection of two intervals. The result may be empty.
    ///
    /// ```
    /// # use chronolane::model::Interval;
    /// let activity = Interval::new(0.0, 30.0);
    /// let installed = Interval::new(10.0, f64::INFINITY);
    ///
    /// assert_eq!(activity.intersect(installed), Interval::new(10.0, 30.0));
    /// ```
    pub fn intersect(self, other: Self) -> Self {
        Self::new(self.start.max(other.start), self.end.min(other.end))
    }

    /// Returns `true` if this interval strictly overlaps `[from, to)`.
    pub fn covers(self, from: f64, to: f64) -> bool {
        self.start < to && self.end > from
    }

    /// Returns `true` if the two intervals share any instant.
    pub fn overlaps(self, other: Self) -> bool {
        self.covers(other.start, other.end)
    }

    /// Raises the start to at least `floor`.
    pub fn floor_start(self, floor: f64) -> Self {
        Self::new(self.start.max(floor), self.end)
    }
}
