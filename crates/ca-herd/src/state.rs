use std::fmt;

/// States shared by every herding behavior.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum HerdState {
    /// Entry: make sure the required tools are at hand.
    Preparing,
    /// Pick the next job.  Also the fallback after a failed handler.
    Decide,
    Breed,
    Butcher,
    /// Behavior-specific harvest (shearing for the shepherd).
    Harvest,
    /// Carry a full inventory back to the hut.
    Dump,
}

impl HerdState {
    pub const ALL: [HerdState; 6] = [
        HerdState::Preparing,
        HerdState::Decide,
        HerdState::Breed,
        HerdState::Butcher,
        HerdState::Harvest,
        HerdState::Dump,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HerdState::Preparing => "preparing",
            HerdState::Decide    => "decide",
            HerdState::Breed     => "breed",
            HerdState::Butcher   => "butcher",
            HerdState::Harvest   => "harvest",
            HerdState::Dump      => "dump",
        }
    }

    /// States in which the citizen walks toward something.
    pub fn is_walking(self) -> bool {
        matches!(self, HerdState::Breed | HerdState::Butcher | HerdState::Harvest | HerdState::Dump)
    }
}

impl fmt::Display for HerdState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
