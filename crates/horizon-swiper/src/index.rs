//! Page index arithmetic.
//!
//! [`PageIndexModel`] owns the page count, the current index and the circular
//! flag, and answers "which page is before/after the current one". It has no
//! side effects beyond its own fields; animation and notification are the
//! caller's business.

/// One of the three transition roles a concrete page occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    /// The page immediately before the current one.
    Before,
    /// The current page.
    Current,
    /// The page immediately after the current one.
    After,
}

impl Slot {
    /// All slots, in paging-axis order.
    pub const ALL: [Slot; 3] = [Slot::Before, Slot::Current, Slot::After];

    /// The signed step this slot represents (-1, 0, +1).
    #[inline]
    pub fn step(self) -> i32 {
        match self {
            Slot::Before => -1,
            Slot::Current => 0,
            Slot::After => 1,
        }
    }

    /// The idle offset of a page in this slot for the given viewport extent.
    #[inline]
    pub fn idle_offset(self, extent: f32) -> f32 {
        self.step() as f32 * extent
    }
}

/// Page count, current index and wrap-around arithmetic.
///
/// Invariant: `current < count` whenever `count > 0`; `current == 0` when the
/// page set is empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageIndexModel {
    count: usize,
    current: usize,
    circular: bool,
}

impl PageIndexModel {
    /// Create a model for `count` pages starting at page 0.
    pub fn new(count: usize, circular: bool) -> Self {
        Self {
            count,
            current: 0,
            circular,
        }
    }

    /// Number of pages.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Whether there are no pages.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The current page index (0 when empty).
    #[inline]
    pub fn current(&self) -> usize {
        self.current
    }

    /// Whether index arithmetic wraps around at the ends.
    #[inline]
    pub fn is_circular(&self) -> bool {
        self.circular
    }

    /// Set whether index arithmetic wraps around.
    pub fn set_circular(&mut self, circular: bool) {
        self.circular = circular;
    }

    /// Change the page count, clamping the current index into range.
    pub fn set_count(&mut self, count: usize) {
        self.count = count;
        self.current = self.current.min(count.saturating_sub(1));
    }

    /// Move to `index`.
    ///
    /// Returns `false` (and leaves the model unchanged) when `index` is out of range.
    pub fn set_current(&mut self, index: usize) -> bool {
        if index >= self.count {
            return false;
        }
        self.current = index;
        true
    }

    /// The page occupying `slot` relative to the current page.
    ///
    /// `Slot::Current` is always the current page when the set is non-empty.
    /// `Slot::Before`/`Slot::After` are `None` at a boundary in non-circular
    /// mode, and always `None` when there is at most one page.
    pub fn neighbor(&self, slot: Slot) -> Option<usize> {
        if self.count == 0 {
            return None;
        }
        match slot {
            Slot::Current => Some(self.current),
            Slot::Before => {
                if self.current > 0 {
                    Some(self.current - 1)
                } else if self.circular && self.count > 1 {
                    Some(self.count - 1)
                } else {
                    None
                }
            }
            Slot::After => {
                if self.current + 1 < self.count {
                    Some(self.current + 1)
                } else if self.circular && self.count > 1 {
                    Some(0)
                } else {
                    None
                }
            }
        }
    }

    /// The index a forward page move would land on.
    ///
    /// Equal to [`current`](Self::current) when the move is impossible (last
    /// page in non-circular mode, or at most one page). Does not mutate.
    pub fn advance(&self) -> usize {
        self.neighbor(Slot::After).unwrap_or(self.current)
    }

    /// The index a backward page move would land on.
    ///
    /// Mirror of [`advance`](Self::advance).
    pub fn retreat(&self) -> usize {
        self.neighbor(Slot::Before).unwrap_or(self.current)
    }

    /// Whether a forward move is possible.
    #[inline]
    pub fn can_advance(&self) -> bool {
        self.neighbor(Slot::After).is_some()
    }

    /// Whether a backward move is possible.
    #[inline]
    pub fn can_retreat(&self) -> bool {
        self.neighbor(Slot::Before).is_some()
    }

    /// Whether the current page is the last one.
    #[inline]
    pub fn is_last(&self) -> bool {
        self.count > 0 && self.current == self.count - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model_at(count: usize, current: usize, circular: bool) -> PageIndexModel {
        let mut model = PageIndexModel::new(count, circular);
        assert!(model.set_current(current));
        model
    }

    #[test]
    fn test_neighbors_in_the_middle() {
        let model = model_at(5, 2, false);
        assert_eq!(model.neighbor(Slot::Before), Some(1));
        assert_eq!(model.neighbor(Slot::Current), Some(2));
        assert_eq!(model.neighbor(Slot::After), Some(3));
    }

    #[test]
    fn test_neighbors_at_boundaries_non_circular() {
        let first = model_at(4, 0, false);
        assert_eq!(first.neighbor(Slot::Before), None);
        assert_eq!(first.retreat(), 0);
        assert!(!first.can_retreat());

        let last = model_at(4, 3, false);
        assert_eq!(last.neighbor(Slot::After), None);
        assert_eq!(last.advance(), 3);
        assert!(!last.can_advance());
    }

    #[test]
    fn test_neighbors_wrap_when_circular() {
        let first = model_at(4, 0, true);
        assert_eq!(first.neighbor(Slot::Before), Some(3));
        assert_eq!(first.retreat(), 3);

        let last = model_at(4, 3, true);
        assert_eq!(last.neighbor(Slot::After), Some(0));
        assert_eq!(last.advance(), 0);
    }

    #[test]
    fn test_single_page_never_moves() {
        for circular in [false, true] {
            let model = model_at(1, 0, circular);
            assert_eq!(model.neighbor(Slot::Before), None);
            assert_eq!(model.neighbor(Slot::After), None);
            assert_eq!(model.advance(), 0);
            assert_eq!(model.retreat(), 0);
        }
    }

    #[test]
    fn test_empty_model() {
        let model = PageIndexModel::new(0, true);
        assert!(model.is_empty());
        assert_eq!(model.neighbor(Slot::Current), None);
        assert_eq!(model.advance(), 0);
        assert!(!model.is_last());
    }

    #[test]
    fn test_set_count_clamps_current() {
        let mut model = model_at(5, 4, false);
        model.set_count(3);
        assert_eq!(model.current(), 2);
        model.set_count(0);
        assert_eq!(model.current(), 0);
    }

    #[test]
    fn test_set_current_rejects_out_of_range() {
        let mut model = model_at(3, 1, false);
        assert!(!model.set_current(3));
        assert_eq!(model.current(), 1);
    }

    #[test]
    fn test_two_pages_circular_share_neighbor() {
        let model = model_at(2, 0, true);
        assert_eq!(model.neighbor(Slot::Before), Some(1));
        assert_eq!(model.neighbor(Slot::After), Some(1));
    }

    #[test]
    fn test_idle_offsets() {
        assert_eq!(Slot::Before.idle_offset(300.0), -300.0);
        assert_eq!(Slot::Current.idle_offset(300.0), 0.0);
        assert_eq!(Slot::After.idle_offset(300.0), 300.0);
    }
}
