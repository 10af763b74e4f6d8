use crate::policy::{BasePolicy, CommitLevel, Expiration, GenerationPolicy, RecordExistsAction};

/// `WritePolicy` encapsulates parameters for all write operations.
#[derive(Debug, Clone)]
pub struct WritePolicy {
    /// Base policy instance
    pub base_policy: BasePolicy,

    /// RecordExistsAction qualifies how to handle writes where the record already exists.
    pub record_exists_action: RecordExistsAction,

    /// GenerationPolicy qualifies how to handle record writes based on record generation.
    /// The default (NONE) indicates that the generation is not used to restrict writes.
    pub generation_policy: GenerationPolicy,

    /// Desired consistency guarantee when committing a command on the server. The default
    /// (COMMIT_ALL) indicates that the server should wait for master and all replica commits to
    /// be successful before returning success to the client.
    pub commit_level: CommitLevel,

    /// Generation determines expected generation.
    /// Generation is the number of times a record has been
    /// modified (including creation) on the server.
    /// If a write operation is creating a record, the expected generation would be 0.
    pub generation: u32,

    /// Expiration determimes record expiration in seconds. Also known as TTL (Time-To-Live).
    /// Seconds record will live before being removed by the server.
    pub expiration: Expiration,

    /// If the command results in a record deletion, leave a tombstone for the record. This
    /// prevents deleted records from reappearing after node failures. Writes inside a
    /// multi-record transaction always behave as durable on the server.
    pub durable_delete: bool,
}

impl Default for WritePolicy {
    fn default() -> Self {
        Self {
            base_policy: BasePolicy::default(),
            record_exists_action: RecordExistsAction::default(),
            generation_policy: GenerationPolicy::default(),
            commit_level: CommitLevel::default(),
            generation: 0,
            expiration: Expiration::default(),
            durable_delete: false,
        }
    }
}

impl AsRef<BasePolicy> for WritePolicy {
    fn as_ref(&self) -> &BasePolicy {
        &self.base_policy
    }
}

impl AsMut<BasePolicy> for WritePolicy {
    fn as_mut(&mut self) -> &mut BasePolicy {
        &mut self.base_policy
    }
}
