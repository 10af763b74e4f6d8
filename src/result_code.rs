use std::{borrow::Cow, fmt};

/// Database operation error codes. The error codes are defined in the server-side file proto.h.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ResultCode {
    /// Operation was successful.
    Ok,
    /// Unknown server failure.
    ServerError,
    /// Retrieving, touching or replacing a record that doesn't exist.
    KeyNotFoundError,
    /// Modifying a record with unexpected generation.
    GenerationError,
    /// Bad parameter(s) were passed in database operation call.
    ParameterError,
    /// Create-only (write unique) operations on a record that already exists.
    KeyExistsError,
    /// Bin already exists on a create-only operation.
    BinExistsError,
    /// Server has run out of memory.
    ServerMemError,
    /// Client or server has timed out.
    Timeout,
    /// Operation not allowed in current configuration.
    AlwaysForbidden,
    /// Partition is unavailable.
    PartitionUnavailable,
    /// Record size exceeds limit.
    RecordTooBig,
    /// Too many concurrent operations on the same record.
    KeyBusy,
    /// Unsupported server feature (e.g. Scan + UDF).
    UnsupportedFeature,
    /// Device not keeping up with writes.
    DeviceOverload,
    /// Key type mismatch.
    KeyMismatch,
    /// Invalid namespace.
    InvalidNamespace,
    /// Operation not allowed at this time.
    FailForbidden,
    /// Attempt to use an Enterprise feature on a community server or a server without the
    /// applicable feature key.
    EnterpriseOnly,
    /// The command was not performed because the filter was false.
    FilteredOut,
    /// Write command loses conflict to XDR.
    LostConflict,
    /// There are no more records left for query.
    QueryEnd,
    /// Transaction record blocked by a different transaction.
    TxnBlocked,
    /// Transaction read version mismatch identified during commit. Some other command changed
    /// the record outside of the transaction.
    TxnVersionMismatch,
    /// Transaction deadline reached without a successful commit or abort.
    TxnExpired,
    /// Transaction write command limit (4096) exceeded.
    TxnTooManyWrites,
    /// Transaction was already committed.
    TxnCommitted,
    /// Transaction was already aborted.
    TxnAborted,
    /// This record has been locked by a previous update in this transaction.
    TxnAlreadyLocked,
    /// This transaction has already started. Writing to the same transaction with independent
    /// connections is not allowed.
    TxnMonitorExists,
    /// Unknown server result code.
    Unknown(u8),
}

impl ResultCode {
    /// Convert the result code from the server response.
    #[must_use]
    pub const fn from_u8(n: u8) -> Self {
        match n {
            0 => Self::Ok,
            1 => Self::ServerError,
            2 => Self::KeyNotFoundError,
            3 => Self::GenerationError,
            4 => Self::ParameterError,
            5 => Self::KeyExistsError,
            6 => Self::BinExistsError,
            8 => Self::ServerMemError,
            9 => Self::Timeout,
            10 => Self::AlwaysForbidden,
            11 => Self::PartitionUnavailable,
            13 => Self::RecordTooBig,
            14 => Self::KeyBusy,
            16 => Self::UnsupportedFeature,
            18 => Self::DeviceOverload,
            19 => Self::KeyMismatch,
            20 => Self::InvalidNamespace,
            22 => Self::FailForbidden,
            25 => Self::EnterpriseOnly,
            27 => Self::FilteredOut,
            28 => Self::LostConflict,
            50 => Self::QueryEnd,
            120 => Self::TxnBlocked,
            121 => Self::TxnVersionMismatch,
            122 => Self::TxnExpired,
            123 => Self::TxnTooManyWrites,
            124 => Self::TxnCommitted,
            125 => Self::TxnAborted,
            126 => Self::TxnAlreadyLocked,
            127 => Self::TxnMonitorExists,
            code => Self::Unknown(code),
        }
    }

    /// Convert the result code to the server response.
    #[must_use]
    pub const fn to_u8(self) -> u8 {
        match self {
            Self::Ok => 0,
            Self::ServerError => 1,
            Self::KeyNotFoundError => 2,
            Self::GenerationError => 3,
            Self::ParameterError => 4,
            Self::KeyExistsError => 5,
            Self::BinExistsError => 6,
            Self::ServerMemError => 8,
            Self::Timeout => 9,
            Self::AlwaysForbidden => 10,
            Self::PartitionUnavailable => 11,
            Self::RecordTooBig => 13,
            Self::KeyBusy => 14,
            Self::UnsupportedFeature => 16,
            Self::DeviceOverload => 18,
            Self::KeyMismatch => 19,
            Self::InvalidNamespace => 20,
            Self::FailForbidden => 22,
            Self::EnterpriseOnly => 25,
            Self::FilteredOut => 27,
            Self::LostConflict => 28,
            Self::QueryEnd => 50,
            Self::TxnBlocked => 120,
            Self::TxnVersionMismatch => 121,
            Self::TxnExpired => 122,
            Self::TxnTooManyWrites => 123,
            Self::TxnCommitted => 124,
            Self::TxnAborted => 125,
            Self::TxnAlreadyLocked => 126,
            Self::TxnMonitorExists => 127,
            Self::Unknown(code) => code,
        }
    }

    /// Convert a result code into an string.
    #[must_use]
    pub fn into_string(self) -> Cow<'static, str> {
        match self {
            Self::Ok => "ok".into(),
            Self::ServerError => "Server error".into(),
            Self::KeyNotFoundError => "Key not found".into(),
            Self::GenerationError => "Generation error".into(),
            Self::ParameterError => "Parameter error".into(),
            Self::KeyExistsError => "Key already exists".into(),
            Self::BinExistsError => "Bin already exists".into(),
            Self::ServerMemError => "Server memory error".into(),
            Self::Timeout => "Timeout".into(),
            Self::AlwaysForbidden => "Operation not allowed".into(),
            Self::PartitionUnavailable => "Partitions unavailable".into(),
            Self::RecordTooBig => "Record too big".into(),
            Self::KeyBusy => "Hot key".into(),
            Self::UnsupportedFeature => "Unsupported Server Feature".into(),
            Self::DeviceOverload => "Device overload".into(),
            Self::KeyMismatch => "Key mismatch".into(),
            Self::InvalidNamespace => "Namespace not found".into(),
            Self::FailForbidden => "Operation not allowed at this time".into(),
            Self::EnterpriseOnly => "Enterprise only".into(),
            Self::FilteredOut => "Command filtered out".into(),
            Self::LostConflict => "Command failed due to conflict with XDR".into(),
            Self::QueryEnd => "Query end".into(),
            Self::TxnBlocked => "Transaction record blocked by a different transaction".into(),
            Self::TxnVersionMismatch => "Transaction version mismatch".into(),
            Self::TxnExpired => "Transaction expired".into(),
            Self::TxnTooManyWrites => "Transaction write command limit exceeded".into(),
            Self::TxnCommitted => "Transaction committed".into(),
            Self::TxnAborted => "Transaction aborted".into(),
            Self::TxnAlreadyLocked => "Transaction record already locked".into(),
            Self::TxnMonitorExists => "Transaction monitor already exists".into(),
            Self::Unknown(code) => format!("Unknown server error code: {code}").into(),
        }
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.into_string())
    }
}

impl From<u8> for ResultCode {
    fn from(value: u8) -> Self {
        Self::from_u8(value)
    }
}

impl From<ResultCode> for u8 {
    fn from(value: ResultCode) -> Self {
        value.to_u8()
    }
}
