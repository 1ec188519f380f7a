/// An inclusive range of integers `[start, end]`.
///
/// Construction goes through [`Interval::new`] and friends, so an `Interval`
/// with `start > end` can never exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Interval {
    start: i64,
    end: i64,
}

impl Interval {
    /// Returns `None` when the bounds describe an empty range.
    pub fn new(start: i64, end: i64) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// A range covering exactly one value.
    pub fn point(value: i64) -> Self {
        Self {
            start: value,
            end: value,
        }
    }

    /// The `length` values starting at `start`. Returns `None` for a
    /// non-positive length or when the last value doesn't fit in an `i64`.
    pub fn from_start_len(start: i64, length: i64) -> Option<Self> {
        if length < 1 {
            return None;
        }
        Self::new(start, start.checked_add(length - 1)?)
    }

    pub fn start(&self) -> i64 {
        self.start
    }

    pub fn end(&self) -> i64 {
        self.end
    }

    /// How many integers the range covers.
    pub fn len(&self) -> i64 {
        self.end - self.start + 1
    }

    pub fn contains(&self, value: i64) -> bool {
        (self.start..=self.end).contains(&value)
    }

    /// Moves both bounds by `offset`.
    pub fn shift(&self, offset: i64) -> Self {
        Self {
            start: self.start + offset,
            end: self.end + offset,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn rejects_inverted_bounds() {
        assert!(Interval::new(5, 4).is_none());
        assert_eq!(Interval::new(4, 4), Some(Interval::point(4)));
    }

    #[test]
    fn builds_from_start_and_length() {
        let interval = Interval::from_start_len(79, 14).unwrap();
        assert_eq!(interval.start(), 79);
        assert_eq!(interval.end(), 92);
        assert_eq!(interval.len(), 14);
        assert!(Interval::from_start_len(79, 0).is_none());
        assert!(Interval::from_start_len(79, -3).is_none());
    }

    #[test]
    fn end_past_i64_max_is_rejected() {
        assert!(Interval::from_start_len(i64::MAX, 2).is_none());
        assert_eq!(
            Interval::from_start_len(i64::MAX, 1),
            Some(Interval::point(i64::MAX))
        );
    }

    #[test]
    fn shifts_both_bounds() {
        let interval = Interval::new(10, 20).unwrap().shift(-15);
        assert_eq!(interval, Interval::new(-5, 5).unwrap());
        assert!(interval.contains(0));
        assert!(!interval.contains(6));
    }
}
