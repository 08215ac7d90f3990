/// Largest confirmed message id seen so far; the `after` cursor for
/// incremental fetches. Never moves backwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct HighWaterMark(u64);

impl HighWaterMark {
    pub fn new() -> Self {
        Self(0)
    }

    pub fn get(self) -> u64 {
        self.0
    }

    /// Raise the mark to `id` if it is larger. Returns whether it moved.
    pub fn advance(&mut self, id: u64) -> bool {
        if id > self.0 {
            self.0 = id;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn never_decreases() {
        let mut mark = HighWaterMark::new();
        assert!(mark.advance(5));
        assert!(!mark.advance(3));
        assert!(!mark.advance(5));
        assert_eq!(mark.get(), 5);
        assert!(mark.advance(9));
        assert_eq!(mark.get(), 9);
    }
}
