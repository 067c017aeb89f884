//! 路由器类型
//!
//! 每个路由器只持有自己的距离向量和下一跳表；
//! DVR 引擎通过 [`Router::relax`] 把邻居通告的向量合并进来。

use std::collections::BTreeMap;

use super::cost::Cost;
use super::id::RouterId;
use tracing::trace;

/// 路由器
#[derive(Debug, Clone)]
pub struct Router {
    id: RouterId,
    /// 邻居，按链路创建顺序排列
    neighbors: Vec<RouterId>,
    distance_vector: BTreeMap<RouterId, Cost>,
    /// 不含自身；`None` 当且仅当对应距离为 `Unreachable`
    next_hop: BTreeMap<RouterId, Option<RouterId>>,
    pub(crate) updated_in_round: bool,
}

/// 邻居在某一时刻的通告：链路代价 + 它当前的距离向量
#[derive(Debug, Clone)]
pub(crate) struct NeighborAdvert {
    pub neighbor: RouterId,
    pub link_cost: f64,
    pub vector: BTreeMap<RouterId, Cost>,
}

impl Router {
    /// 创建新路由器：到自身代价为 0，到 `known` 中其它路由器均不可达
    pub(crate) fn new(id: RouterId, known: impl IntoIterator<Item = RouterId>) -> Self {
        let mut router = Self {
            id,
            neighbors: Vec::new(),
            distance_vector: BTreeMap::new(),
            next_hop: BTreeMap::new(),
            updated_in_round: false,
        };
        for other in known {
            router.learn_destination(other);
        }
        router.distance_vector.insert(id, Cost::ZERO);
        router
    }

    pub fn id(&self) -> RouterId {
        self.id
    }

    pub fn neighbors(&self) -> &[RouterId] {
        &self.neighbors
    }

    pub fn distance_vector(&self) -> &BTreeMap<RouterId, Cost> {
        &self.distance_vector
    }

    pub fn next_hop(&self) -> &BTreeMap<RouterId, Option<RouterId>> {
        &self.next_hop
    }

    /// 到 `dest` 的当前代价；未知目的视为不可达
    pub fn cost_to(&self, dest: RouterId) -> Cost {
        self.distance_vector
            .get(&dest)
            .copied()
            .unwrap_or(Cost::Unreachable)
    }

    pub fn next_hop_to(&self, dest: RouterId) -> Option<RouterId> {
        self.next_hop.get(&dest).copied().flatten()
    }

    /// 本轮是否更新过距离向量
    pub fn updated_in_round(&self) -> bool {
        self.updated_in_round
    }

    /// 加入一个新目的（初始不可达）
    pub(crate) fn learn_destination(&mut self, dest: RouterId) {
        if dest == self.id {
            return;
        }
        self.distance_vector.insert(dest, Cost::Unreachable);
        self.next_hop.insert(dest, None);
    }

    /// 删除一个目的，同时把它从邻居列表里移除
    pub(crate) fn forget(&mut self, dest: RouterId) {
        self.distance_vector.remove(&dest);
        self.next_hop.remove(&dest);
        self.neighbors.retain(|&n| n != dest);
    }

    /// 新建链路：登记邻居并写入直连代价与下一跳
    pub(crate) fn attach(&mut self, neighbor: RouterId, cost: f64) {
        self.neighbors.push(neighbor);
        self.distance_vector.insert(neighbor, Cost::Finite(cost));
        self.next_hop.insert(neighbor, Some(neighbor));
    }

    #[cfg(test)]
    pub(crate) fn set_route(&mut self, dest: RouterId, cost: Cost, next_hop: Option<RouterId>) {
        self.distance_vector.insert(dest, cost);
        self.next_hop.insert(dest, next_hop);
    }

    /// Bellman-Ford 松弛：只有严格更优的候选才会替换当前路由。
    ///
    /// 按 `adverts` 的顺序处理邻居，等价候选保留先发现者。
    /// 返回是否有任何表项被更新。
    pub(crate) fn relax(&mut self, adverts: &[NeighborAdvert]) -> bool {
        let mut updated = false;
        let dests: Vec<RouterId> = self
            .distance_vector
            .keys()
            .copied()
            .filter(|&d| d != self.id)
            .collect();

        for advert in adverts {
            for &dest in &dests {
                let via = advert
                    .vector
                    .get(&dest)
                    .copied()
                    .unwrap_or(Cost::Unreachable);
                let candidate = via + advert.link_cost;
                if candidate < self.cost_to(dest) {
                    trace!(
                        router = %self.id,
                        dest = %dest,
                        via = %advert.neighbor,
                        old = %self.cost_to(dest),
                        new = %candidate,
                        "发现更短路径"
                    );
                    self.distance_vector.insert(dest, candidate);
                    self.next_hop.insert(dest, Some(advert.neighbor));
                    updated = true;
                }
            }
        }

        if updated {
            self.updated_in_round = true;
        }
        updated
    }
}
