use crate::policy::BasePolicy;

/// `QueryPolicy` encapsulates parameters for query operations.
#[derive(Clone, Debug)]
pub struct QueryPolicy {
    /// Base policy instance
    pub base_policy: BasePolicy,

    /// Approximate number of records to return to the client. This number is divided by the
    /// number of nodes involved in the query. The actual number of records returned may be less
    /// than `max_records` if node record counts are small and unbalanced across nodes.
    /// Default (0) is to return all records.
    pub max_records: u64,

    /// Should bin data be retrieved. If false, only record digests (and user keys if stored on
    /// the server) are retrieved.
    pub include_bin_data: bool,

    /// Terminate query if cluster is in fluctuating state.
    pub fail_on_cluster_change: bool,
}

impl QueryPolicy {
    /// Create a new query policy instance with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for QueryPolicy {
    fn default() -> Self {
        Self {
            base_policy: BasePolicy::default(),
            max_records: 0,
            include_bin_data: true,
            fail_on_cluster_change: true,
        }
    }
}

impl AsRef<BasePolicy> for QueryPolicy {
    fn as_ref(&self) -> &BasePolicy {
        &self.base_policy
    }
}

impl AsMut<BasePolicy> for QueryPolicy {
    fn as_mut(&mut self) -> &mut BasePolicy {
        &mut self.base_policy
    }
}
