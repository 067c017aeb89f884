//! 可视化/展示接口
//!
//! 设计目标：
//! - **只读**：展示层只拿快照，不直接触碰路由器内部状态
//! - **结构化**：步进轨迹以 JSON 事件记录，而不是解析文本日志
//! - **可回放**：按 step 顺序回放每个路由器的处理与收敛结果

mod table;
mod types;

pub use table::{RouteRow, RoutingTableView};
pub use types::{TraceEvent, TraceEventKind, TraceLinkInfo, TraceLog};
