#![forbid(unsafe_code)]
#![warn(
    rust_2018_idioms,
    clippy::all,
    clippy::pedantic,
    clippy::clone_on_ref_ptr,
    clippy::format_push_string,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::mutex_atomic,
    clippy::rc_buffer,
    clippy::rc_mutex,
    clippy::self_named_module_files,
    clippy::str_to_string,
    clippy::wildcard_imports,
    clippy::string_add,
    clippy::string_to_string,
    clippy::try_err,
    clippy::unreachable
)]
#![allow(
    clippy::cast_possible_truncation,
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::too_many_lines,
    clippy::missing_errors_doc,
    clippy::manual_let_else,
    missing_docs
)]

//! Multi-record transactions (MRT) for the Aerospike `NoSQL` database.
//!
//! A [`TxnCoordinator`] wraps a namespace accessor, anything implementing the [`Namespace`] trait,
//! and tags every read, write, query and scan it issues with a shared transaction handle
//! ([`Txn`]). The server tracks these commands against the handle; the coordinator then drives the
//! transaction to exactly one terminal outcome through [`TxnCoordinator::commit`] or
//! [`TxnCoordinator::abort`], retrying commits whose outcome is in doubt.
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use windpike_txn::{
//!     errors::Result, policy::TxnPolicy, Bin, Bins, Key, Namespace, TxnCoordinator,
//! };
//! # use std::collections::HashMap;
//! # use windpike_txn::{
//! #     errors::CommandError,
//! #     policy::{QueryPolicy, ReadPolicy, ScanPolicy, WritePolicy},
//! #     AbortStatus, CommitStatus, Record, Statement, Txn,
//! # };
//!
//! fn transfer<N: Namespace>(ns: Arc<N>) -> Result<()> {
//!     let mut txn = TxnCoordinator::new(ns, &TxnPolicy::default());
//!
//!     let from = Key::new("test", "accounts", "alice");
//!     let to = Key::new("test", "accounts", "bob");
//!
//!     let record = txn.get(&from, Bins::All)?;
//!     println!("generation before transfer: {}", record.generation);
//!
//!     txn.put(&from, &[Bin::new("balance", 80)])?;
//!     txn.put(&to, &[Bin::new("balance", 70)])?;
//!
//!     match txn.commit() {
//!         Ok(outcome) if outcome.is_successful() => println!("committed: {outcome:?}"),
//!         Ok(outcome) => println!("not committed: {outcome:?}"),
//!         Err(err) => {
//!             println!("commit failed: {err}");
//!             txn.abort()?;
//!         }
//!     }
//!
//!     Ok(())
//! }
//! #
//! # #[derive(Default)]
//! # struct Accounts {
//! #     read: ReadPolicy,
//! #     write: WritePolicy,
//! #     query: QueryPolicy,
//! #     scan: ScanPolicy,
//! # }
//! #
//! # impl Namespace for Accounts {
//! #     fn name(&self) -> &str {
//! #         "test"
//! #     }
//! #     fn default_read_policy(&self) -> &ReadPolicy {
//! #         &self.read
//! #     }
//! #     fn default_write_policy(&self) -> &WritePolicy {
//! #         &self.write
//! #     }
//! #     fn default_query_policy(&self) -> &QueryPolicy {
//! #         &self.query
//! #     }
//! #     fn default_scan_policy(&self) -> &ScanPolicy {
//! #         &self.scan
//! #     }
//! #     fn get(&self, _: &ReadPolicy, key: &Key, _: Bins) -> Result<Record, CommandError> {
//! #         Ok(Record::new(Some(key.clone()), HashMap::new(), 1, 0))
//! #     }
//! #     fn put(&self, _: &WritePolicy, _: &Key, _: &[Bin<'_>]) -> Result<(), CommandError> {
//! #         Ok(())
//! #     }
//! #     fn delete(&self, _: &WritePolicy, _: &Key) -> Result<bool, CommandError> {
//! #         Ok(true)
//! #     }
//! #     fn touch(&self, _: &WritePolicy, _: &Key) -> Result<(), CommandError> {
//! #         Ok(())
//! #     }
//! #     fn query(&self, _: &QueryPolicy, _: &Statement) -> Result<Vec<Record>, CommandError> {
//! #         Ok(Vec::new())
//! #     }
//! #     fn scan(&self, _: &ScanPolicy, _: &str, _: Bins) -> Result<Vec<Record>, CommandError> {
//! #         Ok(Vec::new())
//! #     }
//! #     fn commit(&self, _: &Txn) -> Result<CommitStatus, CommandError> {
//! #         Ok(CommitStatus::Ok)
//! #     }
//! #     fn abort(&self, _: &Txn) -> Result<AbortStatus, CommandError> {
//! #         Ok(AbortStatus::Ok)
//! #     }
//! # }
//! #
//! # fn main() -> Result<()> {
//! #     transfer(Arc::new(Accounts::default()))
//! # }
//! ```

pub use bin::{Bin, Bins};
pub use key::{Key, UserKey};
pub use namespace::{AbortStatus, CommitStatus, Namespace};
pub use query::Statement;
pub use record::Record;
pub use result_code::ResultCode;
pub use txn::{
    AbortOutcome, CommitOutcome, Pause, RecordEnlistment, ThreadPause, Txn, TxnCoordinator,
    TxnState,
};
pub use value::{FloatValue, Value};

mod bin;
pub mod errors;
mod key;
mod namespace;
pub mod policy;
mod query;
mod record;
mod result_code;
mod txn;
mod value;
