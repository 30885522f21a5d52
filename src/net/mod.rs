//! # Petri 网模拟核心（Place/Transition Net）
//!
//! 设库所集合 `P` 与迁移集合 `T`，弧为类型化的有向连接，每条弧恰好关联
//! 一个库所与一个迁移。对任意标识 `M ∈ ℕ^{|P|}`，弧的激活前提与发射效应：
//!
//! * 消耗弧 `(p, t, w)`：前提 `M[p] ≥ w`，效应 `M'[p] = M[p] - w`；
//! * 产出弧 `(t, p, w)`：前提恒真，效应 `M'[p] = M[p] + w`；
//! * 抑制弧 `(p, t)`：前提 `M[p] = 0`，无效应（纯零测试）；
//! * 复位弧 `(p, t)`：前提 `M[p] > 0`，效应 `M'[p] = 0`。
//!
//! 迁移 `t` **可发射**（drawable）当且仅当其所有入弧的前提同时成立；
//! 发射按入弧、出弧的登记顺序依次施加效应。效应先在副本上演算、全部
//! 成功后一次性提交，故半发射状态对外不可见。
//!
//! 提供的核心 API 支持：
//! * 库所/迁移/弧的增删、令牌与权重修改；
//! * 结构有效性检查（重复弧、未连接迁移、悬挂弧）；
//! * 可发射集枚举、单步发射与注入随机源的多步随机模拟；
//! * serde 序列化（持久化格式由宿主自定）与 GraphViz 导出。
//!
//! ## 示例
//!
//! ```rust
//! use petrisim::net::*;
//!
//! let mut net = NetModel::empty();
//! let p0 = net.add_place(2);
//! let p1 = net.add_place(0);
//! let t0 = net.add_transition();
//!
//! net.add_input_arc(p0, t0, 2).unwrap();
//! net.add_output_arc(t0, p1, 2).unwrap();
//!
//! assert!(net.is_valid());
//! assert_eq!(net.drawable(), vec![t0]);
//!
//! net.step_simulation(t0).unwrap();
//! assert_eq!(net.tokens(p0).unwrap(), 0);
//! assert_eq!(net.tokens(p1).unwrap(), 2);
//! ```

pub mod core;
pub mod error;
pub mod ids;
pub mod structure;

pub use self::core::{NetModel, ValidityReport};
pub use self::error::NetError;
pub use self::ids::{ArcId, PlaceId, TransitionId};
pub use self::structure::{Arc, ArcKind, Place, Transition, Weight};
