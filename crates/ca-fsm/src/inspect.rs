/// Read-only view of an agent context, for status lines and snapshots.
pub trait Inspect {
    /// Units of work the agent has completed.
    fn actions_done(&self) -> u32;

    /// Number of world entities the agent currently looks after.
    fn managed(&self) -> usize {
        0
    }

    /// Latest status key, if the agent has reported one.
    fn status(&self) -> Option<String> {
        None
    }
}
