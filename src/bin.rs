use crate::value::Value;

/// Container object for a record bin, comprising a name and a value.
#[derive(Clone, Debug, PartialEq)]
pub struct Bin<'a> {
    /// Bin name
    pub name: &'a str,
    /// Bin value
    pub value: Value,
}

impl<'a> Bin<'a> {
    /// Construct a new bin given a name and a value.
    #[must_use]
    pub fn new(name: &'a str, val: impl Into<Value>) -> Self {
        Bin {
            name,
            value: val.into(),
        }
    }
}

impl<'a> AsRef<Bin<'a>> for Bin<'a> {
    fn as_ref(&self) -> &Self {
        self
    }
}

/// Specify which, if any, bins to return in read operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Bins {
    /// Read all bins.
    All,
    /// Read record header (generation, expiration) only.
    None,
    /// Read specified bin names only.
    Some(Vec<String>),
}

impl Bins {
    /// Returns `true` if the named bin is selected.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        match self {
            Self::All => true,
            Self::None => false,
            Self::Some(names) => names.iter().any(|n| n == name),
        }
    }
}

impl<'a> From<&'a [&'a str]> for Bins {
    fn from(bins: &'a [&'a str]) -> Self {
        let bins = bins.iter().copied().map(String::from).collect();
        Self::Some(bins)
    }
}

impl<'a, const N: usize> From<[&'a str; N]> for Bins {
    fn from(bins: [&'a str; N]) -> Self {
        let bins = bins.iter().copied().map(String::from).collect();
        Self::Some(bins)
    }
}
