//! Error and Result types for the transaction coordinator.
//!
//! Errors come in two layers. [`CommandError`] is what a [`Namespace`](crate::Namespace)
//! accessor reports for a single server round trip; it carries the server's result code and
//! whether the outcome of the command is in doubt. [`Error`] is what the coordinator surfaces to
//! the caller, wrapping pass-through command errors and adding the coordinator's own failure
//! kinds.
//!
//! # Examples
//!
//! Handling an exhausted commit.
//!
//! ```rust
//! use windpike_txn::errors::{CommandError, Error};
//! use windpike_txn::ResultCode;
//!
//! fn report(err: &Error) -> String {
//!     match err {
//!         Error::RetryExhausted { attempts, txn_id, .. } => {
//!             format!("transaction {txn_id} still in doubt after {attempts} attempt(s)")
//!         }
//!         Error::Command(CommandError::Server { code, .. }) => format!("server said: {code}"),
//!         other => other.to_string(),
//!     }
//! }
//!
//! let err = Error::from(CommandError::server(ResultCode::KeyBusy));
//! assert_eq!(report(&err), "server said: Hot key");
//! ```

use crate::{result_code::ResultCode, txn::TxnState};

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failure of a single command sent to the cluster.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum CommandError {
    /// Server responded with a response code indicating an error condition.
    #[error("Server error: {code}")]
    Server {
        code: ResultCode,
        /// The command may or may not have been applied on the server.
        in_doubt: bool,
    },
    /// The command timed out before a response was received.
    #[error("Timeout")]
    Timeout {
        /// The request was sent, so the server may have applied it.
        in_doubt: bool,
    },
    /// The client was not able to communicate with the cluster due to some issue with the
    /// network connection.
    #[error("Unable to communicate with server cluster: {0}")]
    Connection(String),
    /// One or more of the arguments passed to the client are invalid.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl CommandError {
    /// A server error whose outcome is known: the command was not applied.
    #[must_use]
    pub const fn server(code: ResultCode) -> Self {
        Self::Server {
            code,
            in_doubt: false,
        }
    }

    /// A server error whose outcome is unknown: the command may have been applied.
    #[must_use]
    pub const fn in_doubt(code: ResultCode) -> Self {
        Self::Server {
            code,
            in_doubt: true,
        }
    }

    /// Returns `true` if the client cannot tell whether the command took effect.
    #[must_use]
    pub const fn is_in_doubt(&self) -> bool {
        match self {
            Self::Server { in_doubt, .. } | Self::Timeout { in_doubt } => *in_doubt,
            Self::Connection(_) | Self::InvalidArgument(_) => false,
        }
    }

    /// Result code reported by the server, if the error originates from a server response.
    #[must_use]
    pub const fn result_code(&self) -> Option<ResultCode> {
        match self {
            Self::Server { code, .. } => Some(*code),
            Self::Timeout { .. } => Some(ResultCode::Timeout),
            Self::Connection(_) | Self::InvalidArgument(_) => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The commit outcome remained in doubt after every configured attempt. The coordinator does
    /// not retry further; the caller decides whether to inspect record state or abort.
    #[error("commit of transaction {txn_id} still in doubt after {attempts} attempt(s)")]
    RetryExhausted {
        attempts: u32,
        txn_id: u64,
        #[source]
        source: CommandError,
    },
    /// Commit or abort was requested in a state that does not allow it.
    #[error("cannot {operation} transaction {txn_id} in state {state:?}")]
    InvalidState {
        txn_id: u64,
        state: TxnState,
        operation: &'static str,
    },
    /// A data command was issued after the transaction left the active state.
    #[error("transaction {txn_id} no longer accepts commands in state {state:?}")]
    NotActive { txn_id: u64, state: TxnState },
    /// All keys of a transaction must live in the same namespace.
    #[error("transaction is bound to namespace `{expected}`, command targets `{got}`")]
    NamespaceMismatch { expected: String, got: String },
    #[error("Command error")]
    Command(#[from] CommandError),
}

impl Error {
    /// Result code of the underlying server error, if any.
    #[must_use]
    pub const fn result_code(&self) -> Option<ResultCode> {
        match self {
            Self::RetryExhausted { source, .. } | Self::Command(source) => source.result_code(),
            Self::InvalidState { .. } | Self::NotActive { .. } | Self::NamespaceMismatch { .. } => {
                None
            }
        }
    }
}
