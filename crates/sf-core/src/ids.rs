use core::fmt;
use core::num::NonZeroU32;

/// Compact handle for objects stored in the workflow graph's arenas.
///
/// Stored as index+1 in a `NonZeroU32`, so `Option<Id>` costs no extra
/// space; a node's `incoming`/`outgoing` slots are `Option<EdgeId>`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(NonZeroU32);

impl Id {
    /// Handle for the arena slot at `index`.
    pub fn from_index(index: u32) -> Self {
        // index+1 must be nonzero
        Self(NonZeroU32::new(index + 1).expect("index+1 is nonzero"))
    }

    /// The arena slot this handle refers to.
    pub fn index(self) -> u32 {
        self.0.get() - 1
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.index())
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// Step-node handle.
pub type NodeId = Id;
/// Transition-edge handle.
pub type EdgeId = Id;
