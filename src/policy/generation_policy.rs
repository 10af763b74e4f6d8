/// `GenerationPolicy` determines how to handle record writes based on record generation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum GenerationPolicy {
    /// Do not use record generation to restrict writes.
    #[default]
    None = 0,
    /// Update/delete record if expected generation is equal to server generation. Otherwise,
    /// fail.
    ExpectGenEqual,
    /// Update/delete record if expected generation greater than the server generation.
    /// Otherwise, fail. This is useful for restore after backup.
    ExpectGenGreater,
}
