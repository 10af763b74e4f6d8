use std::{fmt, sync::Arc, time::Duration};

use tracing::{debug, warn};

use super::{AbortOutcome, CommitOutcome, Pause, RecordEnlistment, ThreadPause, Txn, TxnState};
use crate::{
    errors::{CommandError, Error, Result},
    namespace::{AbortStatus, CommitStatus, Namespace},
    policy::{self, QueryPolicy, ReadPolicy, ScanPolicy, TxnPolicy, WritePolicy},
    Bin, Bins, Key, Record, ResultCode, Statement,
};

/// Drives a single multi-record transaction over a namespace accessor.
///
/// The coordinator presents the accessor's data commands with policies that carry the
/// transaction handle, so every command it issues is tracked by the server as part of the
/// transaction. It then brings the transaction to exactly one outcome through [`commit`] or
/// [`abort`].
///
/// A coordinator is meant to be driven by a single unit of work and provides no internal
/// locking for its state. Many coordinators may share one accessor.
///
/// [`commit`]: Self::commit
/// [`abort`]: Self::abort
pub struct TxnCoordinator<N> {
    namespace: Arc<N>,
    txn: Arc<Txn>,
    read_policy: ReadPolicy,
    write_policy: WritePolicy,
    query_policy: QueryPolicy,
    scan_policy: ScanPolicy,
    commit_retries: u32,
    sleep_between_retries: Duration,
    pause: Arc<dyn Pause>,
    state: TxnState,
    commit_outcome: Option<CommitOutcome>,
    abort_outcome: Option<AbortOutcome>,
}

impl<N> TxnCoordinator<N>
where
    N: Namespace,
{
    /// Start a new transaction on the given namespace.
    ///
    /// The accessor allocates the transaction id and fixes the namespace every key must belong
    /// to. Its default policies are cloned and tagged with the new handle. The monitor timeout
    /// does not start until the first command.
    pub fn new(namespace: Arc<N>, policy: &TxnPolicy) -> Self {
        let txn = Arc::new(Txn::for_namespace(
            namespace.allocate_txn_id(),
            namespace.name(),
            policy.timeout,
        ));
        debug!(
            txn_id = txn.id(),
            namespace = namespace.name(),
            timeout = policy.timeout,
            "transaction created"
        );

        Self {
            read_policy: policy::overlay(namespace.default_read_policy(), &txn),
            write_policy: policy::overlay(namespace.default_write_policy(), &txn),
            query_policy: policy::overlay(namespace.default_query_policy(), &txn),
            scan_policy: policy::overlay(namespace.default_scan_policy(), &txn),
            namespace,
            txn,
            commit_retries: policy.commit_retries,
            sleep_between_retries: policy.sleep_between_retries,
            pause: Arc::new(ThreadPause),
            state: TxnState::Active,
            commit_outcome: None,
            abort_outcome: None,
        }
    }

    /// Replace the way the coordinator waits between commit attempts.
    #[must_use]
    pub fn with_pause(mut self, pause: impl Pause + 'static) -> Self {
        self.pause = Arc::new(pause);
        self
    }

    /// Create another coordinator for the same in-flight transaction, optionally with different
    /// policies. Overrides are tagged with the shared handle; no second transaction is started on
    /// the server.
    ///
    /// The clone shares the read and write sets but starts from a copy of the current state, and
    /// from then on each coordinator tracks its own state. Once one of them commits or aborts, the
    /// others still report their old state and must not be used for further commands; their
    /// commit or abort sees the server's answer for the finished transaction.
    #[must_use]
    pub fn clone_with(
        &self,
        read_policy: Option<ReadPolicy>,
        write_policy: Option<WritePolicy>,
        query_policy: Option<QueryPolicy>,
        scan_policy: Option<ScanPolicy>,
    ) -> Self {
        Self {
            namespace: Arc::clone(&self.namespace),
            txn: Arc::clone(&self.txn),
            read_policy: policy::overlay(
                read_policy.as_ref().unwrap_or(&self.read_policy),
                &self.txn,
            ),
            write_policy: policy::overlay(
                write_policy.as_ref().unwrap_or(&self.write_policy),
                &self.txn,
            ),
            query_policy: policy::overlay(
                query_policy.as_ref().unwrap_or(&self.query_policy),
                &self.txn,
            ),
            scan_policy: policy::overlay(
                scan_policy.as_ref().unwrap_or(&self.scan_policy),
                &self.txn,
            ),
            commit_retries: self.commit_retries,
            sleep_between_retries: self.sleep_between_retries,
            pause: Arc::clone(&self.pause),
            state: self.state,
            commit_outcome: self.commit_outcome,
            abort_outcome: self.abort_outcome,
        }
    }

    /// The transaction handle shared with every policy this coordinator issues.
    #[must_use]
    pub fn txn(&self) -> &Arc<Txn> {
        &self.txn
    }

    #[must_use]
    pub fn txn_id(&self) -> u64 {
        self.txn.id()
    }

    #[must_use]
    pub fn state(&self) -> TxnState {
        self.state
    }

    /// Outcome of the last commit, if one was attempted.
    #[must_use]
    pub fn commit_outcome(&self) -> Option<CommitOutcome> {
        self.commit_outcome
    }

    /// Outcome of the last abort, if one was attempted.
    #[must_use]
    pub fn abort_outcome(&self) -> Option<AbortOutcome> {
        self.abort_outcome
    }

    #[must_use]
    pub fn namespace(&self) -> &N {
        &self.namespace
    }

    #[must_use]
    pub fn read_policy(&self) -> &ReadPolicy {
        &self.read_policy
    }

    #[must_use]
    pub fn write_policy(&self) -> &WritePolicy {
        &self.write_policy
    }

    #[must_use]
    pub fn query_policy(&self) -> &QueryPolicy {
        &self.query_policy
    }

    #[must_use]
    pub fn scan_policy(&self) -> &ScanPolicy {
        &self.scan_policy
    }

    /// Read a record under the transaction. The generation returned by the server is recorded
    /// for verification on commit.
    pub fn get<T>(&self, key: &Key, bins: T) -> Result<Record>
    where
        T: Into<Bins>,
    {
        self.begin(&key.namespace)?;
        let record = self.namespace.get(&self.read_policy, key, bins.into())?;
        self.txn.on_read(key, record.generation);
        Ok(record)
    }

    /// Check whether a record exists, enlisting it as a read if it does.
    pub fn exists(&self, key: &Key) -> Result<bool> {
        match self.get(key, Bins::None) {
            Ok(_) => Ok(true),
            Err(Error::Command(err)) if err.result_code() == Some(ResultCode::KeyNotFoundError) => {
                Ok(false)
            }
            Err(err) => Err(err),
        }
    }

    /// Write record bins under the transaction.
    pub fn put(&self, key: &Key, bins: &[Bin<'_>]) -> Result<()> {
        self.begin(&key.namespace)?;
        let result = self.namespace.put(&self.write_policy, key, bins);
        self.track_write(key, result)
    }

    /// Delete a record under the transaction. Returns whether the record existed.
    pub fn delete(&self, key: &Key) -> Result<bool> {
        self.begin(&key.namespace)?;
        let result = self.namespace.delete(&self.write_policy, key);
        self.track_write(key, result)
    }

    /// Reset a record's time to expiration under the transaction.
    pub fn touch(&self, key: &Key) -> Result<()> {
        self.begin(&key.namespace)?;
        let result = self.namespace.touch(&self.write_policy, key);
        self.track_write(key, result)
    }

    /// Run a secondary index query under the transaction. Returned records that carry their key
    /// are enlisted as reads.
    pub fn query(&self, statement: &Statement) -> Result<Vec<Record>> {
        self.begin(&statement.namespace)?;
        let records = self.namespace.query(&self.query_policy, statement)?;
        self.track_reads(&records);
        Ok(records)
    }

    /// Scan a set under the transaction. Returned records that carry their key are enlisted as
    /// reads.
    pub fn scan<T>(&self, set_name: &str, bins: T) -> Result<Vec<Record>>
    where
        T: Into<Bins>,
    {
        self.begin(self.namespace.name())?;
        let records = self
            .namespace
            .scan(&self.scan_policy, set_name, bins.into())?;
        self.track_reads(&records);
        Ok(records)
    }

    /// How the given key takes part in the transaction. Only meaningful while the transaction is
    /// active; in any other state every key reports [`RecordEnlistment::NotEnlisted`].
    #[must_use]
    pub fn record_state(&self, key: &Key) -> RecordEnlistment {
        if self.state == TxnState::Active {
            self.txn.enlistment(key)
        } else {
            RecordEnlistment::NotEnlisted
        }
    }

    /// Commit the transaction.
    ///
    /// An attempt whose outcome is in doubt is retried up to the policy's `commit_retries`
    /// additional times, pausing `sleep_between_retries` in between. When the attempts run out the
    /// state stays [`TxnState::PartiallyCommitted`] and [`Error::RetryExhausted`] is returned. A
    /// transaction the server already aborted yields [`CommitOutcome::PreviouslyAborted`] without
    /// retrying. Any other failure moves the state to [`TxnState::Failed`] and is returned as is.
    ///
    /// Commit is only possible while the transaction is active. In any other state it fails with
    /// [`Error::InvalidState`], including after a commit that failed or stayed in doubt.
    pub fn commit(&mut self) -> Result<CommitOutcome> {
        if self.state != TxnState::Active {
            return Err(self.invalid_state("commit"));
        }
        self.transition(TxnState::CommitRequested);

        let mut attempt: u32 = 1;
        loop {
            let err = match self.namespace.commit(&self.txn) {
                Ok(status) => {
                    let outcome = match status {
                        CommitStatus::Ok if attempt == 1 => CommitOutcome::Completed,
                        CommitStatus::Ok => CommitOutcome::CompletedAfterRetry,
                        CommitStatus::AlreadyCommitted => CommitOutcome::AlreadyCommitted,
                        CommitStatus::RollForwardAbandoned => CommitOutcome::RollForwardPending,
                        CommitStatus::CloseAbandoned => CommitOutcome::RollForwardCompleted,
                    };
                    return Ok(self.finish_commit(TxnState::Committed, outcome));
                }
                Err(err) => err,
            };

            match err.result_code() {
                Some(ResultCode::TxnAborted) => {
                    return Ok(
                        self.finish_commit(TxnState::Aborted, CommitOutcome::PreviouslyAborted)
                    );
                }
                Some(ResultCode::TxnCommitted) => {
                    return Ok(
                        self.finish_commit(TxnState::Committed, CommitOutcome::AlreadyCommitted)
                    );
                }
                _ => {}
            }

            if !err.is_in_doubt() {
                warn!(txn_id = self.txn.id(), attempt, %err, "commit failed");
                self.finish_commit(TxnState::Failed, CommitOutcome::Failed);
                return Err(err.into());
            }

            if attempt > self.commit_retries {
                warn!(txn_id = self.txn.id(), attempt, %err, "commit still in doubt, giving up");
                self.finish_commit(TxnState::PartiallyCommitted, CommitOutcome::Failed);
                return Err(Error::RetryExhausted {
                    attempts: attempt,
                    txn_id: self.txn.id(),
                    source: err,
                });
            }

            debug!(txn_id = self.txn.id(), attempt, %err, "commit in doubt, retrying");
            self.transition(TxnState::PartiallyCommitted);
            self.pause.pause(self.sleep_between_retries);
            attempt += 1;
        }
    }

    /// Abort the transaction, rolling back every enlisted write.
    ///
    /// Abort is accepted in every state that is not [terminal](TxnState::is_terminal), so a
    /// transaction whose commit or abort failed, or whose commit stayed in doubt, can still be
    /// rolled back. Once terminal it fails with [`Error::InvalidState`]. A transaction the server
    /// already committed yields [`AbortOutcome::PreviouslyCommitted`].
    pub fn abort(&mut self) -> Result<AbortOutcome> {
        if self.state.is_terminal() {
            return Err(self.invalid_state("abort"));
        }
        self.transition(TxnState::AbortRequested);

        let err = match self.namespace.abort(&self.txn) {
            Ok(status) => {
                let outcome = match status {
                    AbortStatus::Ok => AbortOutcome::Completed,
                    AbortStatus::AlreadyAborted => AbortOutcome::AlreadyAborted,
                    AbortStatus::RollBackAbandoned => AbortOutcome::RollBackPending,
                    AbortStatus::CloseAbandoned => AbortOutcome::RollBackCompleted,
                };
                return Ok(self.finish_abort(TxnState::Aborted, outcome));
            }
            Err(err) => err,
        };

        match err.result_code() {
            Some(ResultCode::TxnCommitted) => {
                Ok(self.finish_abort(TxnState::Committed, AbortOutcome::PreviouslyCommitted))
            }
            Some(ResultCode::TxnAborted) => {
                Ok(self.finish_abort(TxnState::Aborted, AbortOutcome::AlreadyAborted))
            }
            _ => {
                warn!(txn_id = self.txn.id(), %err, "abort failed");
                self.finish_abort(TxnState::Failed, AbortOutcome::Failed);
                Err(err.into())
            }
        }
    }

    fn begin(&self, namespace: &str) -> Result<()> {
        if self.state != TxnState::Active {
            return Err(Error::NotActive {
                txn_id: self.txn.id(),
                state: self.state,
            });
        }
        if namespace != self.namespace.name() {
            return Err(Error::NamespaceMismatch {
                expected: self.namespace.name().to_owned(),
                got: namespace.to_owned(),
            });
        }
        self.txn.begin_command(namespace)
    }

    fn track_write<T>(&self, key: &Key, result: Result<T, CommandError>) -> Result<T> {
        match result {
            Ok(value) => {
                self.txn.on_write(key);
                Ok(value)
            }
            Err(err) => {
                // The server may have applied the write; roll-back must still cover it.
                if err.is_in_doubt() {
                    self.txn.on_write(key);
                }
                Err(err.into())
            }
        }
    }

    fn track_reads(&self, records: &[Record]) {
        for record in records {
            if let Some(key) = &record.key {
                self.txn.on_read(key, record.generation);
            }
        }
    }

    fn transition(&mut self, next: TxnState) {
        debug!(txn_id = self.txn.id(), from = ?self.state, to = ?next, "transaction state change");
        self.state = next;
    }

    fn finish_commit(&mut self, state: TxnState, outcome: CommitOutcome) -> CommitOutcome {
        self.transition(state);
        self.commit_outcome = Some(outcome);
        outcome
    }

    fn finish_abort(&mut self, state: TxnState, outcome: AbortOutcome) -> AbortOutcome {
        self.transition(state);
        self.abort_outcome = Some(outcome);
        outcome
    }

    fn invalid_state(&self, operation: &'static str) -> Error {
        Error::InvalidState {
            txn_id: self.txn.id(),
            state: self.state,
            operation,
        }
    }
}

impl<N> fmt::Debug for TxnCoordinator<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TxnCoordinator")
            .field("txn", &self.txn)
            .field("state", &self.state)
            .field("commit_retries", &self.commit_retries)
            .field("sleep_between_retries", &self.sleep_between_retries)
            .field("commit_outcome", &self.commit_outcome)
            .field("abort_outcome", &self.abort_outcome)
            .finish_non_exhaustive()
    }
}
