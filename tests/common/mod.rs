#![allow(dead_code)]

use std::{
    collections::{HashMap, VecDeque},
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    time::Duration,
};

use parking_lot::Mutex;
use windpike_txn::{
    errors::CommandError,
    policy::{Policy, QueryPolicy, ReadPolicy, ScanPolicy, TxnPolicy, WritePolicy},
    AbortStatus, Bin, Bins, CommitStatus, Key, Namespace, Pause, Record, ResultCode, Statement,
    Txn, TxnCoordinator,
};

pub const NAMESPACE: &str = "test";
pub const SET: &str = "accounts";

/// In-memory namespace whose commit and abort responses are scripted per test.
pub struct MemoryNamespace {
    read_policy: ReadPolicy,
    write_policy: WritePolicy,
    query_policy: QueryPolicy,
    scan_policy: ScanPolicy,
    next_txn_id: AtomicU64,
    records: Mutex<HashMap<Key, Record>>,
    commit_script: Mutex<VecDeque<Result<CommitStatus, CommandError>>>,
    abort_script: Mutex<VecDeque<Result<AbortStatus, CommandError>>>,
    write_errors: Mutex<VecDeque<CommandError>>,
    commit_calls: Mutex<Vec<u64>>,
    abort_calls: Mutex<Vec<u64>>,
    command_txns: Mutex<Vec<Option<u64>>>,
}

impl MemoryNamespace {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            read_policy: ReadPolicy::default(),
            write_policy: WritePolicy::default(),
            query_policy: QueryPolicy::default(),
            scan_policy: ScanPolicy::default(),
            next_txn_id: AtomicU64::new(1000),
            records: Mutex::default(),
            commit_script: Mutex::default(),
            abort_script: Mutex::default(),
            write_errors: Mutex::default(),
            commit_calls: Mutex::default(),
            abort_calls: Mutex::default(),
            command_txns: Mutex::default(),
        })
    }

    /// Store a record directly, bypassing any transaction.
    pub fn seed(&self, key: &Key, bins: &[(&str, i64)], generation: u32) {
        let bins = bins
            .iter()
            .map(|(name, value)| ((*name).to_owned(), (*value).into()))
            .collect();
        self.records
            .lock()
            .insert(key.clone(), Record::new(Some(key.clone()), bins, generation, 0));
    }

    pub fn script_commit(&self, response: Result<CommitStatus, CommandError>) {
        self.commit_script.lock().push_back(response);
    }

    pub fn script_abort(&self, response: Result<AbortStatus, CommandError>) {
        self.abort_script.lock().push_back(response);
    }

    /// Make the next write command fail with the given error.
    pub fn fail_next_write(&self, err: CommandError) {
        self.write_errors.lock().push_back(err);
    }

    pub fn commit_calls(&self) -> Vec<u64> {
        self.commit_calls.lock().clone()
    }

    pub fn abort_calls(&self) -> Vec<u64> {
        self.abort_calls.lock().clone()
    }

    /// Transaction ids carried by the policies of every data command, in order.
    pub fn command_txns(&self) -> Vec<Option<u64>> {
        self.command_txns.lock().clone()
    }

    pub fn generation(&self, key: &Key) -> Option<u32> {
        self.records.lock().get(key).map(|r| r.generation)
    }

    fn observe(&self, policy: &impl Policy) {
        self.command_txns
            .lock()
            .push(policy.txn().map(|txn| txn.id()));
    }

    fn next_write_error(&self) -> Option<CommandError> {
        self.write_errors.lock().pop_front()
    }

    fn select(record: &Record, bins: &Bins) -> Record {
        let selected = record
            .bins
            .iter()
            .filter(|(name, _)| bins.contains(name))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        Record::new(record.key.clone(), selected, record.generation, 0)
    }

    fn in_set(&self, set_name: &str, bins: &Bins) -> Vec<Record> {
        self.records
            .lock()
            .values()
            .filter(|record| {
                record
                    .key
                    .as_ref()
                    .map_or(false, |key| key.set_name == set_name)
            })
            .map(|record| Self::select(record, bins))
            .collect()
    }
}

impl Namespace for MemoryNamespace {
    fn name(&self) -> &str {
        NAMESPACE
    }

    fn default_read_policy(&self) -> &ReadPolicy {
        &self.read_policy
    }

    fn default_write_policy(&self) -> &WritePolicy {
        &self.write_policy
    }

    fn default_query_policy(&self) -> &QueryPolicy {
        &self.query_policy
    }

    fn default_scan_policy(&self) -> &ScanPolicy {
        &self.scan_policy
    }

    fn get(&self, policy: &ReadPolicy, key: &Key, bins: Bins) -> Result<Record, CommandError> {
        self.observe(policy);
        self.records
            .lock()
            .get(key)
            .map(|record| Self::select(record, &bins))
            .ok_or(CommandError::server(ResultCode::KeyNotFoundError))
    }

    fn put(&self, policy: &WritePolicy, key: &Key, bins: &[Bin<'_>]) -> Result<(), CommandError> {
        self.observe(policy);
        if let Some(err) = self.next_write_error() {
            return Err(err);
        }

        let mut records = self.records.lock();
        let record = records
            .entry(key.clone())
            .or_insert_with(|| Record::new(Some(key.clone()), HashMap::new(), 0, 0));
        for bin in bins {
            record.bins.insert(bin.name.to_owned(), bin.value.clone());
        }
        record.generation += 1;
        Ok(())
    }

    fn delete(&self, policy: &WritePolicy, key: &Key) -> Result<bool, CommandError> {
        self.observe(policy);
        if let Some(err) = self.next_write_error() {
            return Err(err);
        }
        Ok(self.records.lock().remove(key).is_some())
    }

    fn touch(&self, policy: &WritePolicy, key: &Key) -> Result<(), CommandError> {
        self.observe(policy);
        if let Some(err) = self.next_write_error() {
            return Err(err);
        }
        match self.records.lock().get_mut(key) {
            Some(record) => {
                record.generation += 1;
                Ok(())
            }
            None => Err(CommandError::server(ResultCode::KeyNotFoundError)),
        }
    }

    fn query(
        &self,
        policy: &QueryPolicy,
        statement: &Statement,
    ) -> Result<Vec<Record>, CommandError> {
        self.observe(policy);
        Ok(self.in_set(&statement.set_name, &statement.bins))
    }

    fn scan(
        &self,
        policy: &ScanPolicy,
        set_name: &str,
        bins: Bins,
    ) -> Result<Vec<Record>, CommandError> {
        self.observe(policy);
        Ok(self.in_set(set_name, &bins))
    }

    fn commit(&self, txn: &Txn) -> Result<CommitStatus, CommandError> {
        self.commit_calls.lock().push(txn.id());
        self.commit_script
            .lock()
            .pop_front()
            .unwrap_or(Ok(CommitStatus::Ok))
    }

    fn abort(&self, txn: &Txn) -> Result<AbortStatus, CommandError> {
        self.abort_calls.lock().push(txn.id());
        self.abort_script
            .lock()
            .pop_front()
            .unwrap_or(Ok(AbortStatus::Ok))
    }

    fn allocate_txn_id(&self) -> u64 {
        self.next_txn_id.fetch_add(1, Ordering::Relaxed)
    }
}

/// Records every pause instead of sleeping.
#[derive(Clone, Default)]
pub struct RecordingPause(Arc<Mutex<Vec<Duration>>>);

impl RecordingPause {
    pub fn delays(&self) -> Vec<Duration> {
        self.0.lock().clone()
    }
}

impl Pause for RecordingPause {
    fn pause(&self, delay: Duration) {
        self.0.lock().push(delay);
    }
}

pub fn txn_policy(commit_retries: u32) -> TxnPolicy {
    TxnPolicy {
        commit_retries,
        ..TxnPolicy::default()
    }
}

/// Coordinator over a fresh namespace, with pauses recorded instead of slept.
pub fn coordinator(
    commit_retries: u32,
) -> (
    Arc<MemoryNamespace>,
    TxnCoordinator<MemoryNamespace>,
    RecordingPause,
) {
    let ns = MemoryNamespace::new();
    let pause = RecordingPause::default();
    let txn = TxnCoordinator::new(Arc::clone(&ns), &txn_policy(commit_retries))
        .with_pause(pause.clone());
    (ns, txn, pause)
}

pub fn key(id: i64) -> Key {
    Key::new(NAMESPACE, SET, id)
}

pub fn in_doubt() -> CommandError {
    CommandError::in_doubt(ResultCode::Timeout)
}
