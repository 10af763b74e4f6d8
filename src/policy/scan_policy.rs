use crate::policy::BasePolicy;

/// `ScanPolicy` encapsulates optional parameters used in scan operations.
#[derive(Debug, Clone)]
pub struct ScanPolicy {
    /// Base policy instance
    pub base_policy: BasePolicy,

    /// Approximate number of records to return to the client. Default (0) is to return all
    /// records.
    pub max_records: u64,

    /// Limit returned records per second (rps) rate for each server. Do not apply rps limit if
    /// zero, which is the default.
    pub records_per_second: u32,

    /// Maximum time in milliseconds to wait when polling socket for availability prior to
    /// performing an operation on the socket on the server side. Zero means there is no socket
    /// timeout. Default: 10,000 ms.
    pub socket_timeout: u32,
}

impl ScanPolicy {
    /// Create a new scan policy instance with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for ScanPolicy {
    fn default() -> Self {
        Self {
            base_policy: BasePolicy::default(),
            max_records: 0,
            records_per_second: 0,
            socket_timeout: 10000,
        }
    }
}

impl AsRef<BasePolicy> for ScanPolicy {
    fn as_ref(&self) -> &BasePolicy {
        &self.base_policy
    }
}

impl AsMut<BasePolicy> for ScanPolicy {
    fn as_mut(&mut self) -> &mut BasePolicy {
        &mut self.base_policy
    }
}
