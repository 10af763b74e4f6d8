use std::{
    borrow::Cow,
    fmt,
    hash::{Hash, Hasher},
};

use ripemd::{Digest, Ripemd160};

/// Particle type tags that take part in the digest computation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
enum ParticleType {
    Integer = 1,
    String = 3,
    Blob = 4,
}

/// Unique record identifier. Records can be identified using a specified namespace, an optional
/// set name and a user defined key which must be unique within a set. Records can also be
/// identified by namespace/digest, which is the combination used on the server.
///
/// Two keys are equal when namespace and digest match, regardless of whether the original user
/// key is still attached. This is the identity the server uses to track records inside a
/// transaction.
#[derive(Clone)]
pub struct Key {
    /// Namespace.
    pub namespace: Cow<'static, str>,
    /// Set name.
    pub set_name: Cow<'static, str>,
    /// Original user key.
    pub user_key: Option<UserKey>,
    /// Unique server hash value generated from set name and user key.
    pub(crate) digest: [u8; 20],
}

impl Key {
    /// Construct a new key given a namespace, a set name and a user key value.
    pub fn new<N, S, K>(namespace: N, set_name: S, key: K) -> Self
    where
        N: Into<Cow<'static, str>>,
        S: Into<Cow<'static, str>>,
        K: Into<UserKey>,
    {
        let set_name = set_name.into();
        let user_key = key.into();
        let digest = Self::compute_digest(&set_name, &user_key);

        Self {
            namespace: namespace.into(),
            set_name,
            digest,
            user_key: Some(user_key),
        }
    }

    /// Construct a key from a digest previously computed by the client or returned by the
    /// server. The user key is unknown in that case.
    pub fn from_digest<N, S>(namespace: N, set_name: S, digest: [u8; 20]) -> Self
    where
        N: Into<Cow<'static, str>>,
        S: Into<Cow<'static, str>>,
    {
        Self {
            namespace: namespace.into(),
            set_name: set_name.into(),
            user_key: None,
            digest,
        }
    }

    #[must_use]
    pub fn digest(&self) -> [u8; 20] {
        self.digest
    }

    fn compute_digest(set_name: &str, user_key: &UserKey) -> [u8; 20] {
        let mut hash = Ripemd160::new();
        hash.update(set_name.as_bytes());
        hash.update([user_key.particle_type() as u8]);
        user_key.write_key_bytes(&mut hash);

        hash.finalize().into()
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.namespace == other.namespace && self.digest == other.digest
    }
}

impl Eq for Key {}

impl Hash for Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.namespace.hash(state);
        self.digest.hash(state);
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Key")
            .field("namespace", &self.namespace)
            .field("set_name", &self.set_name)
            .field("user_key", &self.user_key)
            .field("digest", &DigestHex(&self.digest))
            .finish()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.namespace,
            self.set_name,
            DigestHex(&self.digest)
        )
    }
}

struct DigestHex<'a>(&'a [u8; 20]);

impl fmt::Display for DigestHex<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|b| write!(f, "{b:02x}"))
    }
}

impl fmt::Debug for DigestHex<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// The user key, which is a subset of the [`Value`](crate::Value) type, as only a few of its
/// variants are allowed to be used in Aerospike keys.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum UserKey {
    /// 64-bit signed integer.
    Int(i64),
    /// String value.
    String(Cow<'static, str>),
    /// Byte array value.
    Blob(Cow<'static, [u8]>),
}

impl UserKey {
    fn particle_type(&self) -> ParticleType {
        match self {
            UserKey::Int(_) => ParticleType::Integer,
            UserKey::String(_) => ParticleType::String,
            UserKey::Blob(_) => ParticleType::Blob,
        }
    }

    fn write_key_bytes(&self, hasher: &mut impl Digest) {
        match self {
            UserKey::Int(i) => hasher.update(i.to_be_bytes()),
            UserKey::String(s) => hasher.update(s.as_bytes()),
            UserKey::Blob(b) => hasher.update(b),
        }
    }
}

macro_rules! from_int {
    ($($from:ty),+) => {
        $(impl From<$from> for UserKey {
            fn from(value: $from) -> Self {
                Self::Int(value.into())
            }
        })+
    };
}

from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<String> for UserKey {
    fn from(value: String) -> Self {
        Self::String(value.into())
    }
}

impl From<&'static str> for UserKey {
    fn from(value: &'static str) -> Self {
        Self::String(value.into())
    }
}

impl From<Cow<'static, str>> for UserKey {
    fn from(value: Cow<'static, str>) -> Self {
        Self::String(value)
    }
}

impl From<Vec<u8>> for UserKey {
    fn from(value: Vec<u8>) -> Self {
        Self::Blob(value.into())
    }
}

impl From<&'static [u8]> for UserKey {
    fn from(value: &'static [u8]) -> Self {
        Self::Blob(value.into())
    }
}
