//! 错误定义：所有失败同步报告给调用方，不在内部重试。
use thiserror::Error;

use crate::net::ids::{ArcId, PlaceId, TransitionId};
use crate::net::structure::Weight;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NetError {
    #[error("place {0:?} does not exist in this net")]
    UnknownPlace(PlaceId),
    #[error("transition {0:?} does not exist in this net")]
    UnknownTransition(TransitionId),
    #[error("arc {0:?} does not exist in this net")]
    UnknownArc(ArcId),
    #[error("cannot remove {requested} tokens from a place holding {available}")]
    InsufficientTokens {
        requested: Weight,
        available: Weight,
    },
    #[error("transition {0:?} is not drawable under the current marking")]
    NotDrawable(TransitionId),
    #[error("arc {0:?} carries no settable weight")]
    NotWeighted(ArcId),
    #[error("reset arc {0:?} has no multiplicity")]
    NoMultiplicity(ArcId),
    #[error("the net is structurally invalid")]
    InvalidNet,
}
