//! Data source capabilities and the requirements displays place on them

use std::fmt;
use std::num::NonZeroUsize;

/// One way of obtaining samples from a source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// `poll()` returns the latest sample without blocking
    Pull,
    /// `subscribe()` registers a queue the source pushes samples into
    Push,
    /// `history(n)` returns recent samples, oldest first
    Historical,
}

impl Capability {
    const ALL: [Capability; 3] = [Capability::Pull, Capability::Push, Capability::Historical];

    const fn bit(self) -> u8 {
        match self {
            Capability::Pull => 0b001,
            Capability::Push => 0b010,
            Capability::Historical => 0b100,
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Capability::Pull => "pull",
            Capability::Push => "push",
            Capability::Historical => "historical",
        })
    }
}

/// The exact subset of capabilities a source implements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CapabilitySet(u8);

impl CapabilitySet {
    pub const EMPTY: CapabilitySet = CapabilitySet(0);
    pub const PULL: CapabilitySet = CapabilitySet(Capability::Pull.bit());
    pub const PUSH: CapabilitySet = CapabilitySet(Capability::Push.bit());
    pub const HISTORICAL: CapabilitySet = CapabilitySet(Capability::Historical.bit());

    pub const fn with(self, capability: Capability) -> Self {
        CapabilitySet(self.0 | capability.bit())
    }

    pub const fn union(self, other: CapabilitySet) -> Self {
        CapabilitySet(self.0 | other.0)
    }

    pub const fn contains(self, capability: Capability) -> bool {
        self.0 & capability.bit() != 0
    }

    /// Whether the source can deliver live values (pull or push)
    pub const fn is_live(self) -> bool {
        self.contains(Capability::Pull) || self.contains(Capability::Push)
    }

    pub fn iter(self) -> impl Iterator<Item = Capability> {
        Capability::ALL.into_iter().filter(move |c| self.contains(*c))
    }
}

impl From<Capability> for CapabilitySet {
    fn from(capability: Capability) -> Self {
        CapabilitySet::EMPTY.with(capability)
    }
}

impl fmt::Display for CapabilitySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == CapabilitySet::EMPTY {
            return f.write_str("no capabilities");
        }
        let names: Vec<String> = self.iter().map(|c| c.to_string()).collect();
        write!(f, "{{{}}}", names.join(", "))
    }
}

/// What a display role needs from the source bound to it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Pull or push; pull is used when a source offers both
    Live,
    Pull,
    Push,
    /// History queries over a window of `window` samples
    Historical { window: NonZeroUsize },
}

impl Requirement {
    pub fn is_satisfied_by(&self, offered: CapabilitySet) -> bool {
        match self {
            Requirement::Live => offered.is_live(),
            Requirement::Pull => offered.contains(Capability::Pull),
            Requirement::Push => offered.contains(Capability::Push),
            Requirement::Historical { .. } => offered.contains(Capability::Historical),
        }
    }

    pub fn window(&self) -> Option<NonZeroUsize> {
        match self {
            Requirement::Historical { window } => Some(*window),
            _ => None,
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Requirement::Live => f.write_str("live (pull or push)"),
            Requirement::Pull => f.write_str("pull"),
            Requirement::Push => f.write_str("push"),
            Requirement::Historical { window } => write!(f, "historical ({} samples)", window),
        }
    }
}
