//! 路由表快照

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::net::{Cost, Router, RouterId};

/// 路由表中的一行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRow {
    pub dest: RouterId,
    pub next_hop: Option<RouterId>,
    pub cost: Cost,
}

/// 单个路由器的路由表（不含到自身的表项，按目的升序）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingTableView {
    pub router: RouterId,
    pub rows: Vec<RouteRow>,
}

impl RoutingTableView {
    pub fn of(router: &Router) -> Self {
        let rows = router
            .distance_vector()
            .iter()
            .filter(|(dest, _)| **dest != router.id())
            .map(|(&dest, &cost)| RouteRow {
                dest,
                next_hop: router.next_hop_to(dest),
                cost,
            })
            .collect();
        Self {
            router: router.id(),
            rows,
        }
    }

    pub fn row(&self, dest: RouterId) -> Option<&RouteRow> {
        self.rows.iter().find(|r| r.dest == dest)
    }
}

impl fmt::Display for RoutingTableView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Router {}:", self.router)?;
        writeln!(f, "Dest | Next | Cost")?;
        writeln!(f, "-----|------|-----")?;
        for row in &self.rows {
            let next = row
                .next_hop
                .map(|n| n.to_string())
                .unwrap_or_else(|| "-".to_string());
            writeln!(f, " {:<4}| {:<5}| {}", row.dest.to_string(), next, row.cost)?;
        }
        Ok(())
    }
}
