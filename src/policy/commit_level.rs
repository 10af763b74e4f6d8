/// `CommitLevel` determines when the server acknowledges a write.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum CommitLevel {
    /// Wait until master and all replicas have applied the write.
    #[default]
    CommitAll = 0,
    /// Wait until the master has applied the write only. Replicas are updated asynchronously.
    CommitMaster,
}
