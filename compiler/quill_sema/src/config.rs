/// Limits for the static phase.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SemaConfig {
    /// How many template instantiations may be nested inside one another
    /// before expansion is reported as unbounded.
    pub max_instantiation_depth: usize,
}

impl SemaConfig {
    pub const DEFAULT_MAX_INSTANTIATION_DEPTH: usize = 64;

    #[must_use]
    pub fn with_max_instantiation_depth(mut self, depth: usize) -> Self {
        self.max_instantiation_depth = depth;
        self
    }
}

impl Default for SemaConfig {
    fn default() -> Self {
        SemaConfig {
            max_instantiation_depth: Self::DEFAULT_MAX_INSTANTIATION_DEPTH,
        }
    }
}
