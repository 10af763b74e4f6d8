use rand::Rng;

use crate::{
    errors::CommandError,
    policy::{QueryPolicy, ReadPolicy, ScanPolicy, WritePolicy},
    Bin, Bins, Key, Record, Statement, Txn,
};

/// Server acknowledgement of a commit request.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CommitStatus {
    /// All nodes verified the read versions and applied the writes.
    Ok,
    /// The transaction was committed by an earlier request.
    AlreadyCommitted,
    /// The commit is durable, but the client gave up waiting for the roll-forward. The server
    /// will finish it asynchronously.
    RollForwardAbandoned,
    /// Roll-forward finished, but closing the transaction monitor was abandoned. The server will
    /// close it asynchronously.
    CloseAbandoned,
}

/// Server acknowledgement of an abort request.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AbortStatus {
    /// All enlisted writes were rolled back.
    Ok,
    /// The transaction was aborted by an earlier request or by expiry.
    AlreadyAborted,
    /// The client gave up waiting for the roll-back. The server will finish it asynchronously.
    RollBackAbandoned,
    /// Roll-back finished, but closing the transaction monitor was abandoned.
    CloseAbandoned,
}

/// Namespace-scoped data access over an Aerospike cluster.
///
/// This is the surface a [`TxnCoordinator`](crate::TxnCoordinator) wraps. Implementations own the
/// connection to the cluster, which may be shared by many coordinators at once, so they must be
/// safe to use from multiple threads.
///
/// Data commands receive policies that may carry a transaction handle
/// ([`Policy::txn`](crate::policy::Policy::txn)). Implementations pass the handle along to the
/// server, which then tracks the command as part of the transaction. Recording the client-side
/// read and write sets is left to the coordinator.
pub trait Namespace: Send + Sync {
    /// Name of the namespace.
    fn name(&self) -> &str;

    /// Policy used for reads when the caller does not supply one.
    fn default_read_policy(&self) -> &ReadPolicy;

    /// Policy used for writes, deletes and touches when the caller does not supply one.
    fn default_write_policy(&self) -> &WritePolicy;

    /// Policy used for secondary index queries when the caller does not supply one.
    fn default_query_policy(&self) -> &QueryPolicy;

    /// Policy used for scans when the caller does not supply one.
    fn default_scan_policy(&self) -> &ScanPolicy;

    /// Read record for the specified key. Depending on the bins value provided, all record bins,
    /// only selected record bins or only the record header is returned.
    fn get(&self, policy: &ReadPolicy, key: &Key, bins: Bins) -> Result<Record, CommandError>;

    /// Write record bin(s).
    fn put(&self, policy: &WritePolicy, key: &Key, bins: &[Bin<'_>]) -> Result<(), CommandError>;

    /// Delete record for specified key. Returns whether the record existed on the server before
    /// deletion.
    fn delete(&self, policy: &WritePolicy, key: &Key) -> Result<bool, CommandError>;

    /// Reset record's time to expiration using the policy's expiration, incrementing the
    /// generation.
    fn touch(&self, policy: &WritePolicy, key: &Key) -> Result<(), CommandError>;

    /// Execute a secondary index query.
    fn query(
        &self,
        policy: &QueryPolicy,
        statement: &Statement,
    ) -> Result<Vec<Record>, CommandError>;

    /// Read all records in the given set.
    fn scan(
        &self,
        policy: &ScanPolicy,
        set_name: &str,
        bins: Bins,
    ) -> Result<Vec<Record>, CommandError>;

    /// Ask the cluster to commit the transaction. The expected record versions from the read set
    /// are sent along for verification.
    ///
    /// Errors that leave the outcome unknown must report
    /// [`CommandError::is_in_doubt`]. A transaction that the server already aborted reports
    /// [`ResultCode::TxnAborted`](crate::ResultCode::TxnAborted).
    fn commit(&self, txn: &Txn) -> Result<CommitStatus, CommandError>;

    /// Ask the cluster to roll back all writes of the transaction. A transaction that the server
    /// already committed reports [`ResultCode::TxnCommitted`](crate::ResultCode::TxnCommitted).
    fn abort(&self, txn: &Txn) -> Result<AbortStatus, CommandError>;

    /// Allocate the identifier of a new transaction. Zero is reserved for "no transaction".
    fn allocate_txn_id(&self) -> u64 {
        rand::thread_rng().gen_range(1..=u64::MAX)
    }
}
