/// What handling one event did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The event was applied with this many entity writes.
    Applied { writes: usize },
    /// The event was dropped without touching the store.
    Skipped(SkipReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SkipReason {
    /// The event names a DID that has never been registered.
    UnknownAgent,
    /// A registration for an existing DID under the `ignore` policy.
    AlreadyRegistered,
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied { .. })
    }

    pub fn writes(&self) -> usize {
        match self {
            Outcome::Applied { writes } => *writes,
            Outcome::Skipped(_) => 0,
        }
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::UnknownAgent => f.write_str("unknown agent"),
            SkipReason::AlreadyRegistered => f.write_str("already registered"),
        }
    }
}
