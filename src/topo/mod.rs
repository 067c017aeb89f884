//! 拓扑描述与预置拓扑

pub mod sample;
pub mod spec;

pub use spec::{LinkSpec, TopologySpec};
