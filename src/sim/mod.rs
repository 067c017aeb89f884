//! 仿真模块
//!
//! 此模块包含 `Simulation` 聚合及其配置选项。

// 子模块声明
mod opts;
mod simulation;

// 重新导出公共接口
pub use opts::DvrOpts;
pub use simulation::{RunOutcome, Simulation};
