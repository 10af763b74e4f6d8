/// Lifecycle of a transaction as seen by its coordinator.
///
/// ```text
/// NotInitialized -> Active -> CommitRequested -> (PartiallyCommitted <-> retry) -> Committed | Failed
///                          -> AbortRequested  -> Aborted | Failed
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize))]
pub enum TxnState {
    #[default]
    NotInitialized,
    /// Commands may be issued under the transaction.
    Active,
    /// A commit is in flight.
    CommitRequested,
    /// A commit attempt ended in doubt. Transient while retries remain, final once they are
    /// exhausted.
    PartiallyCommitted,
    Committed,
    /// An abort is in flight.
    AbortRequested,
    Aborted,
    Failed,
}

impl TxnState {
    /// Returns `true` once the transaction reached a final outcome. Neither commit nor abort is
    /// accepted afterwards. `Failed` and `PartiallyCommitted` are not terminal: the transaction
    /// can still be aborted.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Committed | Self::Aborted)
    }
}

/// Result of [`TxnCoordinator::commit`](crate::TxnCoordinator::commit).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize))]
pub enum CommitOutcome {
    /// Committed on the first attempt.
    Completed,
    /// An earlier request already committed the transaction.
    AlreadyCommitted,
    /// Commit is durable; the server finishes the roll-forward asynchronously. The client treats
    /// the transaction as committed while the server may still be converging.
    RollForwardPending,
    /// Roll-forward finished; the server closes the monitor asynchronously.
    RollForwardCompleted,
    /// Committed after one or more in-doubt attempts.
    CompletedAfterRetry,
    Failed,
    /// The server had already aborted the transaction, by expiry or by a concurrent abort.
    PreviouslyAborted,
}

impl CommitOutcome {
    /// Returns `true` if the writes of the transaction are, or will be, applied.
    #[must_use]
    pub const fn is_successful(self) -> bool {
        !matches!(self, Self::Failed | Self::PreviouslyAborted)
    }
}

/// Result of [`TxnCoordinator::abort`](crate::TxnCoordinator::abort).
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize))]
pub enum AbortOutcome {
    /// All writes rolled back.
    Completed,
    /// An earlier request or the monitor timeout already aborted the transaction.
    AlreadyAborted,
    /// Abort is durable; the server finishes the roll-back asynchronously.
    RollBackPending,
    /// Roll-back finished; the server closes the monitor asynchronously.
    RollBackCompleted,
    Failed,
    /// The server had already committed the transaction.
    PreviouslyCommitted,
}

impl AbortOutcome {
    /// Returns `true` if the writes of the transaction are, or will be, rolled back.
    #[must_use]
    pub const fn is_successful(self) -> bool {
        !matches!(self, Self::Failed | Self::PreviouslyCommitted)
    }
}

/// How a record takes part in a transaction.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serialization", derive(serde::Serialize))]
pub enum RecordEnlistment {
    NotEnlisted,
    /// Read, but not written, under the transaction.
    ReadOnly {
        /// Generation observed at read time.
        generation: u32,
    },
    /// Written under the transaction. The read generation no longer applies.
    Updated,
}
