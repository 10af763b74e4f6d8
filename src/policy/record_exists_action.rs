/// `RecordExistsAction` determines how to handle writes where the record already exists.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum RecordExistsAction {
    /// Create or update record. Merge write command bins with existing bins.
    #[default]
    Update = 0,
    /// Update record only. Fail if record does not exist. Merge write command bins with existing
    /// bins.
    UpdateOnly,
    /// Create or replace record. Delete existing bins not referenced by write command bins.
    Replace,
    /// Replace record only. Fail if record does not exist. Delete existing bins not referenced by
    /// write command bins.
    ReplaceOnly,
    /// Create only. Fail if record exists.
    CreateOnly,
}
