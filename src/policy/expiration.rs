use std::time::Duration;

const NAMESPACE_DEFAULT: u32 = 0;
const DONT_EXPIRE: u32 = u32::MAX; // -1 as i32
const DONT_UPDATE: u32 = u32::MAX - 1; // -2 as i32

/// Record expiration, also known as time-to-live (TTL).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Expiration {
    /// Set the record to expire X seconds from now
    Seconds(u32),
    /// Set the record's expiry time using the default time-to-live (TTL) value for the namespace
    #[default]
    NamespaceDefault,
    /// Set the record to never expire.
    Never,
    /// Do not change the record's expiry time when updating the record.
    DontUpdate,
}

impl From<Duration> for Expiration {
    fn from(ttl: Duration) -> Self {
        // Whole seconds only; the two largest values are reserved markers.
        Self::Seconds(ttl.as_secs().min(u64::from(DONT_UPDATE - 1)) as u32)
    }
}

impl From<Expiration> for u32 {
    fn from(exp: Expiration) -> Self {
        match exp {
            Expiration::Seconds(secs) => secs,
            Expiration::NamespaceDefault => NAMESPACE_DEFAULT,
            Expiration::Never => DONT_EXPIRE,
            Expiration::DontUpdate => DONT_UPDATE,
        }
    }
}
