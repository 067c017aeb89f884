//! DVR 算法模块
//!
//! 此模块包含距离向量路由的步进引擎与基于 next hop 的路径重建。

mod engine;
mod path;

pub use engine::{DvrEngine, EngineState, MAX_ROUNDS, StepReport};
pub use path::{Path, find_path};
