//! Policy types encapsulate optional parameters for various client operations.
//!
//! Every data policy embeds a [`BasePolicy`], which in turn may carry a transaction handle. A
//! command issued with a policy that carries a handle is tracked by the server as part of that
//! multi-record transaction.

mod commit_level;
mod consistency_level;
mod expiration;
mod generation_policy;
mod query_policy;
mod read_policy;
mod record_exists_action;
mod scan_policy;
mod txn_policy;
mod write_policy;

use std::{sync::Arc, time::Duration};

pub use self::{
    commit_level::CommitLevel, consistency_level::ConsistencyLevel, expiration::Expiration,
    generation_policy::GenerationPolicy, query_policy::QueryPolicy, read_policy::ReadPolicy,
    record_exists_action::RecordExistsAction, scan_policy::ScanPolicy, txn_policy::TxnPolicy,
    write_policy::WritePolicy,
};
use crate::Txn;

/// Trait implemented by most policy types; policies that implement this trait typically encompass
/// an instance of `BasePolicy`.
pub trait Policy {
    /// Total command timeout for both client and server. The timeout is tracked on the client
    /// and also sent to the server along with the command in the wire protocol. The client
    /// will most likely timeout first, but the server has the capability to timeout the
    /// command as well.
    fn timeout(&self) -> Option<Duration>;

    /// Multi-record transaction the command is enlisted in, if any.
    fn txn(&self) -> Option<&Arc<Txn>>;
}

impl<T> Policy for T
where
    T: AsRef<BasePolicy>,
{
    fn timeout(&self) -> Option<Duration> {
        self.as_ref().timeout()
    }

    fn txn(&self) -> Option<&Arc<Txn>> {
        self.as_ref().txn()
    }
}

/// Common parameters shared by all policy types.
#[derive(Debug, Clone)]
pub struct BasePolicy {
    /// How replicas should be consulted in a read operation to provide the desired
    /// consistency guarantee. Default to allowing one replica to be used in the
    /// read operation.
    pub consistency_level: ConsistencyLevel,

    /// Timeout specifies command timeout.
    /// This timeout is used to set the socket timeout and is also sent to the
    /// server along with the command in the wire protocol.
    /// Default to no timeout (0).
    pub timeout: Option<Duration>,

    /// MaxRetries determines maximum number of retries before aborting the current command.
    /// A retry is attempted when there is a network error other than timeout.
    /// If maxRetries is exceeded, the abort will occur even if the timeout
    /// has not yet been exceeded.
    pub max_retries: Option<usize>,

    /// SleepBetweenReplies determines duration to sleep between retries if a
    /// command fails and the timeout was not exceeded.  Enter zero to skip sleep.
    pub sleep_between_retries: Option<Duration>,

    /// Send user defined key in addition to hash digest on both reads and writes.
    /// The default is to not send the user defined key.
    pub send_key: bool,

    /// Multi-record transaction handle. When set, the server tracks the command against this
    /// transaction. The handle is shared, so cloning the policy keeps the enlistment.
    pub txn: Option<Arc<Txn>>,
}

impl BasePolicy {
    /// Returns a copy of this policy that enlists every command in the given transaction.
    #[must_use]
    pub fn with_txn(&self, txn: &Arc<Txn>) -> Self {
        Self {
            txn: Some(Arc::clone(txn)),
            ..self.clone()
        }
    }
}

impl Policy for BasePolicy {
    fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    fn txn(&self) -> Option<&Arc<Txn>> {
        self.txn.as_ref()
    }
}

impl AsMut<BasePolicy> for BasePolicy {
    fn as_mut(&mut self) -> &mut BasePolicy {
        self
    }
}

/// Clone a policy and attach the transaction handle to its base policy.
pub(crate) fn overlay<P>(policy: &P, txn: &Arc<Txn>) -> P
where
    P: Clone + AsMut<BasePolicy>,
{
    let mut policy = policy.clone();
    policy.as_mut().txn = Some(Arc::clone(txn));
    policy
}
