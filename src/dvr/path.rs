//! 路径重建
//!
//! 收敛之后，从源路由器出发逐跳读取各路由器自己的 next hop，
//! 直到到达目的。

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::engine::{DvrEngine, EngineState};
use crate::error::{DvrError, DvrResult};
use crate::net::{Cost, RouterId, Topology};

/// 一条转发路径（含首尾）及其总代价
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path {
    pub hops: Vec<RouterId>,
    pub cost: f64,
}

impl Path {
    pub fn source(&self) -> Option<RouterId> {
        self.hops.first().copied()
    }

    pub fn destination(&self) -> Option<RouterId> {
        self.hops.last().copied()
    }

    /// 路径经过的链路 `(a, b)`，用于高亮
    pub fn links(&self) -> impl Iterator<Item = (RouterId, RouterId)> + '_ {
        self.hops.windows(2).map(|w| (w[0], w[1]))
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, hop) in self.hops.iter().enumerate() {
            if i > 0 {
                f.write_str(" → ")?;
            }
            write!(f, "{hop}")?;
        }
        write!(f, " (cost {})", Cost::Finite(self.cost))
    }
}

/// 查找 `from` 到 `to` 的转发路径。要求引擎处于 Converged。
pub fn find_path(
    topo: &Topology,
    engine: &DvrEngine,
    from: RouterId,
    to: RouterId,
) -> DvrResult<Path> {
    if engine.state() != EngineState::Converged {
        return Err(DvrError::NotConverged);
    }
    if from == to {
        return Err(DvrError::SameRouter(from));
    }
    let src = topo.router(from).ok_or(DvrError::UnknownRouter(from))?;
    if !topo.contains(to) {
        return Err(DvrError::UnknownRouter(to));
    }

    let cost = match src.cost_to(to) {
        Cost::Finite(c) if src.next_hop_to(to).is_some() => c,
        _ => return Err(DvrError::Unreachable { from, to }),
    };

    let limit = topo.router_count();
    let mut hops = vec![from];
    let mut current = from;
    while current != to {
        let next = topo
            .router(current)
            .and_then(|r| r.next_hop_to(to))
            .ok_or(DvrError::IncompletePath {
                from,
                to,
                at: current,
            })?;
        hops.push(next);
        current = next;
        if hops.len() > limit {
            return Err(DvrError::LoopDetected { from, to });
        }
    }

    debug!(from = %from, to = %to, cost, hops = ?hops, "🧭 找到路径");
    Ok(Path { hops, cost })
}
