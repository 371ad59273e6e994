/// Unsigned Microseconds
#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Clone, Copy, Default, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UMicros(u64);

impl UMicros {
    /// Creates a new instance of microseconds
    #[inline]
    pub const fn new(microseconds: u64) -> Self {
        Self(microseconds)
    }

    /// Returns the microseconds as a u64
    #[inline]
    pub const fn us(&self) -> u64 {
        self.0
    }
}

#[test]
fn ordered_by_value() {
    use pretty_assertions::assert_eq;

    let quarter = UMicros::new(500_000);
    assert_eq!(quarter.us(), 500_000);
    assert!(quarter < UMicros::new(500_001));
    assert_eq!(UMicros::default(), UMicros::new(0));
}
