use std::time::Duration;

/// `TxnPolicy` encapsulates the parameters of a multi-record transaction coordinator.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TxnPolicy {
    /// MRT timeout in seconds. The timer starts when the first command is issued under the
    /// transaction, not when the transaction is created. The server aborts the transaction if
    /// neither commit nor abort is received before the timer expires. Zero selects the server's
    /// configured default. Default: 10 seconds.
    pub timeout: u32,

    /// Number of additional commit attempts when the outcome of a commit is in doubt. With the
    /// default of 1, an in-doubt first attempt is followed by one more attempt.
    pub commit_retries: u32,

    /// Time to sleep between commit attempts. Zero yields the thread instead of sleeping.
    /// Default: 1000ms.
    pub sleep_between_retries: Duration,
}

impl TxnPolicy {
    /// Create a new transaction policy with the given timeout in seconds and default retry
    /// settings.
    #[must_use]
    pub fn new(timeout: u32) -> Self {
        Self {
            timeout,
            ..Self::default()
        }
    }
}

impl Default for TxnPolicy {
    fn default() -> Self {
        Self {
            timeout: 10,
            commit_retries: 1,
            sleep_between_retries: Duration::from_millis(1000),
        }
    }
}
