//! Set construction parameters.

/// Default index degree.
pub const DEFAULT_DEGREE: usize = 64;

/// Performance knobs for a set.
///
/// Nothing here changes which IDs a set holds or how runs are merged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tuning {
    /// Fan-out or capacity hint forwarded to the ordered index.
    pub degree: usize,
}

impl Tuning {
    /// Create tuning with the default degree.
    pub const fn new() -> Self {
        Self {
            degree: DEFAULT_DEGREE,
        }
    }

    /// Set the index degree.
    pub const fn with_degree(mut self, degree: usize) -> Self {
        self.degree = degree;
        self
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Self::new()
    }
}
