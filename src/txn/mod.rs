//! Multi-record transactions.

mod coordinator;
mod pause;
mod state;

use std::{
    borrow::Cow,
    collections::{HashMap, HashSet},
    time::{Duration, Instant},
};

use parking_lot::Mutex;

pub use self::{
    coordinator::TxnCoordinator,
    pause::{Pause, ThreadPause},
    state::{AbortOutcome, CommitOutcome, RecordEnlistment, TxnState},
};
use crate::{errors::Error, Key};

/// Multi-record transaction handle.
///
/// The handle identifies the transaction on the server and records which keys were read (with
/// the generation observed at read time) and which keys were written. It is shared through an
/// `Arc` by the coordinator, its clones and every policy tagged with it. The read and write sets
/// only ever grow.
#[derive(Debug)]
pub struct Txn {
    id: u64,
    timeout: u32,
    tracking: Mutex<Tracking>,
}

#[derive(Debug, Default)]
struct Tracking {
    namespace: Option<Cow<'static, str>>,
    reads: HashMap<Key, u32>,
    writes: HashSet<Key>,
    first_command_at: Option<Instant>,
}

impl Txn {
    /// Create a handle for the transaction with the given identifier and monitor timeout in
    /// seconds.
    #[must_use]
    pub fn new(id: u64, timeout: u32) -> Self {
        Self {
            id,
            timeout,
            tracking: Mutex::default(),
        }
    }

    /// Create a handle already bound to the namespace every command of the transaction must
    /// target.
    pub(crate) fn for_namespace(id: u64, namespace: &str, timeout: u32) -> Self {
        Self {
            id,
            timeout,
            tracking: Mutex::new(Tracking {
                namespace: Some(Cow::Owned(namespace.to_owned())),
                ..Tracking::default()
            }),
        }
    }

    /// Transaction identifier.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Monitor timeout in seconds.
    #[must_use]
    pub const fn timeout(&self) -> u32 {
        self.timeout
    }

    /// Namespace the transaction is bound to. Set on creation by the coordinator, or by the
    /// first command for a bare handle.
    #[must_use]
    pub fn namespace(&self) -> Option<Cow<'static, str>> {
        self.tracking.lock().namespace.clone()
    }

    /// Time the first command was issued under this transaction, which is when the monitor
    /// timeout starts running.
    #[must_use]
    pub fn first_command_at(&self) -> Option<Instant> {
        self.tracking.lock().first_command_at
    }

    /// Expected expiry of the transaction monitor. `None` until the first command.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.first_command_at()
            .map(|start| start + Duration::from_secs(self.timeout.into()))
    }

    /// Generation observed when the key was read under this transaction.
    #[must_use]
    pub fn read_generation(&self, key: &Key) -> Option<u32> {
        self.tracking.lock().reads.get(key).copied()
    }

    /// Returns `true` if the key was written under this transaction.
    #[must_use]
    pub fn is_written(&self, key: &Key) -> bool {
        self.tracking.lock().writes.contains(key)
    }

    /// Snapshot of the read set, for verification on commit.
    #[must_use]
    pub fn reads(&self) -> Vec<(Key, u32)> {
        self.tracking
            .lock()
            .reads
            .iter()
            .map(|(key, generation)| (key.clone(), *generation))
            .collect()
    }

    /// Snapshot of the write set, for roll-forward or roll-back.
    #[must_use]
    pub fn writes(&self) -> Vec<Key> {
        self.tracking.lock().writes.iter().cloned().collect()
    }

    /// Enlistment of a single key. Writes take precedence over reads.
    #[must_use]
    pub fn enlistment(&self, key: &Key) -> RecordEnlistment {
        let tracking = self.tracking.lock();
        if tracking.writes.contains(key) {
            RecordEnlistment::Updated
        } else if let Some(generation) = tracking.reads.get(key) {
            RecordEnlistment::ReadOnly {
                generation: *generation,
            }
        } else {
            RecordEnlistment::NotEnlisted
        }
    }

    /// Bind the transaction to a namespace and start the monitor clock. Called before every
    /// command issued under the transaction.
    pub(crate) fn begin_command(&self, namespace: &str) -> Result<(), Error> {
        let mut tracking = self.tracking.lock();
        let bound = tracking
            .namespace
            .get_or_insert_with(|| Cow::Owned(namespace.to_owned()));
        if bound.as_ref() != namespace {
            return Err(Error::NamespaceMismatch {
                expected: bound.to_string(),
                got: namespace.to_owned(),
            });
        }

        tracking.first_command_at.get_or_insert_with(Instant::now);
        Ok(())
    }

    pub(crate) fn on_read(&self, key: &Key, generation: u32) {
        let mut tracking = self.tracking.lock();
        if !tracking.writes.contains(key) {
            tracking.reads.insert(key.clone(), generation);
        }
    }

    pub(crate) fn on_write(&self, key: &Key) {
        self.tracking.lock().writes.insert(key.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::{RecordEnlistment, Txn};
    use crate::{errors::Error, Key};

    #[test]
    fn clock_starts_on_first_command() {
        let txn = Txn::new(1, 10);
        assert!(txn.first_command_at().is_none());
        assert!(txn.deadline().is_none());

        txn.begin_command("test").unwrap();
        let started = txn.first_command_at().unwrap();
        txn.begin_command("test").unwrap();
        assert_eq!(txn.first_command_at(), Some(started));
        assert_eq!(
            txn.deadline().map(|d| d.duration_since(started).as_secs()),
            Some(10)
        );
    }

    #[test]
    fn namespace_is_bound_once() {
        let txn = Txn::new(1, 10);
        txn.begin_command("test").unwrap();
        assert_eq!(txn.namespace().as_deref(), Some("test"));

        let err = txn.begin_command("bar").unwrap_err();
        assert!(matches!(
            err,
            Error::NamespaceMismatch { ref expected, ref got } if expected == "test" && got == "bar"
        ));
    }

    #[test]
    fn bound_handle_rejects_other_namespaces() {
        let txn = Txn::for_namespace(1, "test", 10);
        assert_eq!(txn.namespace().as_deref(), Some("test"));
        assert!(txn.first_command_at().is_none());

        assert!(matches!(
            txn.begin_command("other").unwrap_err(),
            Error::NamespaceMismatch { ref expected, .. } if expected == "test"
        ));
        assert!(txn.first_command_at().is_none());
        txn.begin_command("test").unwrap();
        assert!(txn.first_command_at().is_some());
    }

    #[test]
    fn write_dominates_read() {
        let txn = Txn::new(1, 10);
        let key = Key::new("test", "s", 1);

        txn.on_read(&key, 4);
        assert_eq!(txn.enlistment(&key), RecordEnlistment::ReadOnly { generation: 4 });

        txn.on_write(&key);
        assert_eq!(txn.enlistment(&key), RecordEnlistment::Updated);
        // The earlier read stays recorded; the sets are append-only.
        assert_eq!(txn.read_generation(&key), Some(4));
    }

    #[test]
    fn read_after_write_is_not_tracked() {
        let txn = Txn::new(1, 10);
        let key = Key::new("test", "s", 2);

        txn.on_write(&key);
        txn.on_read(&key, 9);
        assert_eq!(txn.read_generation(&key), None);
        assert!(txn.is_written(&key));
        assert_eq!(txn.writes(), vec![key]);
        assert!(txn.reads().is_empty());
    }

    #[test]
    fn unseen_key() {
        let txn = Txn::new(1, 10);
        assert_eq!(
            txn.enlistment(&Key::new("test", "s", 3)),
            RecordEnlistment::NotEnlisted
        );
    }
}
