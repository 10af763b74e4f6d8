use std::{
    collections::HashMap,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use crate::{Key, Value};

/// Container object for a database record.
#[derive(Clone, Debug)]
pub struct Record {
    /// Record key. When reading a record from the database, the key is not set in the returned
    /// Record struct.
    pub key: Option<Key>,

    /// Map of named record bins.
    pub bins: HashMap<String, Value>,

    /// Record modification count.
    pub generation: u32,

    /// Date record will expire, in seconds from Jan 01 2010, 00:00:00 UTC.
    expiration: u32,
}

impl Record {
    /// Construct a new Record. Used by [`Namespace`](crate::Namespace) implementations to hand
    /// back what the server returned.
    #[must_use]
    pub const fn new(
        key: Option<Key>,
        bins: HashMap<String, Value>,
        generation: u32,
        expiration: u32,
    ) -> Self {
        Self {
            key,
            bins,
            generation,
            expiration,
        }
    }

    /// Returns the remaining time-to-live (TTL, a.k.a. expiration time) for the record or `None`
    /// if the record never expires.
    #[must_use]
    pub fn time_to_live(&self) -> Option<Duration> {
        (self.expiration > 0).then(|| {
            let expiration = citrusleaf_epoch() + Duration::new(u64::from(self.expiration), 0);
            expiration
                .duration_since(SystemTime::now())
                .ok()
                .unwrap_or(Duration::new(1, 0))
        })
    }
}

/// Aerospike's own epoch time, which is `Fri Jan  1 00:00:00 UTC 2010`.
#[inline]
fn citrusleaf_epoch() -> SystemTime {
    UNIX_EPOCH + Duration::new(1_262_304_000, 0)
}
