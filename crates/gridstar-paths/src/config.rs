//! Search configuration.

/// Tunables for [`SearchEngine`](crate::SearchEngine).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    /// Maximum number of cells to expand before giving up (`None` = no limit).
    ///
    /// A search that runs out of budget ends in
    /// [`SearchState::Aborted`](crate::SearchState::Aborted), never in
    /// `Exhausted`: it says nothing about reachability.
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_expansions: Option<usize>,
}

impl SearchConfig {
    /// Unlimited search.
    pub const fn new() -> Self {
        Self {
            max_expansions: None,
        }
    }

    /// Limit the number of expansions.
    pub const fn with_max_expansions(mut self, limit: usize) -> Self {
        self.max_expansions = Some(limit);
        self
    }
}
