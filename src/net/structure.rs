//! P/T 网静态结构元素：库所、迁移与类型化弧。
use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::net::error::NetError;
use crate::net::ids::{ArcId, PlaceId, TransitionId};

pub type Weight = u64;

/// Incidence list of a transition; most transitions touch few arcs.
pub type ArcList = SmallVec<[ArcId; 4]>;

/// Store of non-negative tokens. The count is only ever changed through the
/// accessors below, which reject over-removal instead of clamping.
#[derive(Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Place {
    tokens: Weight,
}

impl Place {
    pub fn new(tokens: Weight) -> Self {
        Self { tokens }
    }

    pub fn tokens(&self) -> Weight {
        self.tokens
    }

    /// Unconditional overwrite, not relative.
    pub fn set_tokens(&mut self, tokens: Weight) {
        self.tokens = tokens;
    }

    pub fn add_tokens(&mut self, amount: Weight) {
        self.tokens += amount;
    }

    pub fn remove_tokens(&mut self, amount: Weight) -> Result<(), NetError> {
        if amount > self.tokens {
            return Err(NetError::InsufficientTokens {
                requested: amount,
                available: self.tokens,
            });
        }
        self.tokens -= amount;
        Ok(())
    }
}

impl fmt::Debug for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Place").field(&self.tokens).finish()
    }
}

/// A transition holds no state of its own, only the maintained incidence
/// index over its arcs. List order is preserved for deterministic iteration.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub(crate) incoming: ArcList,
    pub(crate) outgoing: ArcList,
}

impl Transition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn incoming(&self) -> &[ArcId] {
        &self.incoming
    }

    pub fn outgoing(&self) -> &[ArcId] {
        &self.outgoing
    }
}

impl fmt::Debug for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("incoming", &self.incoming)
            .field("outgoing", &self.outgoing)
            .finish()
    }
}

/// Arc behaviour, dispatched exhaustively over the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArcKind {
    /// place → transition; firing consumes `weight` tokens from the place.
    Consume(Weight),
    /// transition → place; firing produces `weight` tokens into the place.
    Produce(Weight),
    /// place → transition; pure zero test, firing has no token effect.
    Inhibitor,
    /// place → transition; firing empties the place regardless of its count.
    Reset,
}

impl ArcKind {
    /// Incoming arcs run from a place to a transition and gate enablement.
    pub fn is_incoming(self) -> bool {
        !matches!(self, ArcKind::Produce(_))
    }
}

/// Typed, directed connection between exactly one place and one transition.
/// Endpoints are looked-up relations into the owning [`NetModel`]'s arenas,
/// not ownership.
///
/// [`NetModel`]: crate::net::core::NetModel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Arc {
    pub(crate) kind: ArcKind,
    pub(crate) place: PlaceId,
    pub(crate) transition: TransitionId,
}

impl Arc {
    pub fn new(kind: ArcKind, place: PlaceId, transition: TransitionId) -> Self {
        Self {
            kind,
            place,
            transition,
        }
    }

    pub fn kind(&self) -> ArcKind {
        self.kind
    }

    pub fn place(&self) -> PlaceId {
        self.place
    }

    pub fn transition(&self) -> TransitionId {
        self.transition
    }

    /// Pure precondition check against the resolved place endpoint.
    pub fn is_activable(&self, place: &Place) -> bool {
        match self.kind {
            ArcKind::Consume(weight) => place.tokens() >= weight,
            ArcKind::Produce(_) => true,
            ArcKind::Inhibitor => place.tokens() == 0,
            ArcKind::Reset => place.tokens() > 0,
        }
    }

    /// Token effect. Check-then-act: callers must have just verified
    /// [`Arc::is_activable`]; on a false precondition only the consume case
    /// can fail, and it does so without touching the place.
    pub fn activate(&self, place: &mut Place) -> Result<(), NetError> {
        match self.kind {
            ArcKind::Consume(weight) => place.remove_tokens(weight),
            ArcKind::Produce(weight) => {
                place.add_tokens(weight);
                Ok(())
            }
            ArcKind::Inhibitor => Ok(()),
            ArcKind::Reset => {
                place.set_tokens(0);
                Ok(())
            }
        }
    }
}
