//! Petri 网离散事件模拟引擎：库所、迁移与四类弧上的标识演算。
//!
//! 核心能力：网结构的增删改、结构有效性检查、可发生集枚举、单步发射
//! 与可复现（注入随机源）的多步随机模拟。严格单线程，宿主自行串行化。

pub mod net;

pub use net::{
    Arc, ArcId, ArcKind, NetError, NetModel, Place, PlaceId, Transition, TransitionId,
    ValidityReport, Weight,
};
