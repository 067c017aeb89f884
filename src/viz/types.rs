use serde::{Deserialize, Serialize};

use crate::net::RouterId;

use super::table::RoutingTableView;

/// 轨迹事件类型
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TraceEventKind {
    /// 拓扑元信息（作为第一条事件）
    Topology {
        routers: Vec<RouterId>,
        links: Vec<TraceLinkInfo>,
    },
    /// 处理了一个路由器；`table` 是处理后的路由表
    Step {
        router: RouterId,
        updated: bool,
        table: RoutingTableView,
    },
    /// 某轮无更新，已收敛
    Converged { rounds: u32 },
    /// 达到轮数上限
    MaxIterations { rounds: u32 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceLinkInfo {
    pub from: RouterId,
    pub to: RouterId,
    pub cost: f64,
}

/// 一条可回放的事件（JSON）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceEvent {
    /// 第几个 step（从 1 开始；元信息事件为 0）
    pub seq: u64,
    pub round: u32,
    #[serde(flatten)]
    pub kind: TraceEventKind,
}

/// 一个简单的事件收集器（存内存，运行结束写 JSON 文件）
#[derive(Debug, Default)]
pub struct TraceLog {
    pub events: Vec<TraceEvent>,
}

impl TraceLog {
    pub fn push(&mut self, ev: TraceEvent) {
        self.events.push(ev);
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
