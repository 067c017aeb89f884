//! 拓扑数据模型
//!
//! 此模块包含 DVR 仿真的数据模型：路由器、链路、代价以及拓扑存储。

// 子模块声明
mod cost;
mod id;
mod link;
mod router;
mod topology;

// 重新导出公共接口
pub use cost::{Cost, parse_cost};
pub use id::RouterId;
pub use link::{Link, LinkKey};
pub use router::Router;
pub use topology::Topology;
