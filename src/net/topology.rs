//! 拓扑存储
//!
//! 持有全部路由器与链路，在增删路由器、新建链路时维护结构不变量：
//! - 每个路由器的距离向量 / 下一跳表覆盖当前拓扑中的所有路由器
//! - 没有自环，任意一对路由器之间至多一条链路
//! - 链路代价总是正的有限数
//!
//! 所有失败的操作都不修改状态。

use std::collections::BTreeMap;

use super::cost::validate_link_cost;
use super::id::RouterId;
use super::link::{Link, LinkKey};
use super::router::{NeighborAdvert, Router};
use crate::error::{DvrError, DvrResult};
use tracing::{debug, info};

/// 网络拓扑
#[derive(Debug, Clone)]
pub struct Topology {
    routers: BTreeMap<RouterId, Router>,
    links: BTreeMap<LinkKey, Link>,
    next_router_id: u32,
}

impl Default for Topology {
    fn default() -> Self {
        Self {
            routers: BTreeMap::new(),
            links: BTreeMap::new(),
            next_router_id: 1,
        }
    }
}

impl Topology {
    /// 添加路由器，自动分配 id（从 1 开始递增）
    pub fn add_router(&mut self) -> RouterId {
        let id = self.vacant_id();
        self.insert_vacant(id);
        id
    }

    /// 从分配器位置向上找空闲 id；到达 `u32::MAX` 后改为取最小的空闲 id
    fn vacant_id(&self) -> RouterId {
        let mut next = Some(self.next_router_id);
        while let Some(raw) = next {
            if !self.routers.contains_key(&RouterId(raw)) {
                return RouterId(raw);
            }
            next = raw.checked_add(1);
        }
        (1..=u32::MAX)
            .map(RouterId)
            .find(|id| !self.routers.contains_key(id))
            .unwrap_or(RouterId(0))
    }

    /// 以指定 id 添加路由器
    pub fn insert_router(&mut self, id: RouterId) -> DvrResult<&Router> {
        if self.routers.contains_key(&id) {
            return Err(DvrError::DuplicateRouter(id));
        }
        self.insert_vacant(id);
        Ok(&self.routers[&id])
    }

    fn insert_vacant(&mut self, id: RouterId) {
        for other in self.routers.values_mut() {
            other.learn_destination(id);
        }
        let router = Router::new(id, self.routers.keys().copied());
        self.routers.insert(id, router);
        self.next_router_id = self.next_router_id.max(id.0.saturating_add(1));
        info!(router = %id, routers = self.routers.len(), "➕ 添加路由器");
    }

    /// 删除路由器，级联删除其链路并从所有距离向量中清除
    pub fn remove_router(&mut self, id: RouterId) -> DvrResult<()> {
        if self.routers.remove(&id).is_none() {
            return Err(DvrError::UnknownRouter(id));
        }

        let before = self.links.len();
        self.links.retain(|key, _| !key.touches(id));
        for router in self.routers.values_mut() {
            router.forget(id);
        }

        info!(
            router = %id,
            removed_links = before - self.links.len(),
            routers = self.routers.len(),
            "➖ 删除路由器"
        );
        Ok(())
    }

    /// 在 `a` 与 `b` 之间新建链路
    pub fn add_link(&mut self, a: RouterId, b: RouterId, cost: f64) -> DvrResult<&Link> {
        if a == b {
            return Err(DvrError::SelfLink(a));
        }
        for id in [a, b] {
            if !self.routers.contains_key(&id) {
                return Err(DvrError::UnknownRouter(id));
            }
        }
        let key = LinkKey::new(a, b);
        if self.links.contains_key(&key) {
            return Err(DvrError::DuplicateLink(a, b));
        }
        let cost = validate_link_cost(cost)?;

        if let Some(r) = self.routers.get_mut(&a) {
            r.attach(b, cost);
        }
        if let Some(r) = self.routers.get_mut(&b) {
            r.attach(a, cost);
        }
        info!(from = %a, to = %b, cost, "🔗 添加链路");
        let link = &*self.links.entry(key).or_insert(Link { from: a, to: b, cost });
        Ok(link)
    }

    /// 两个路由器间的链路代价（不区分方向）
    pub fn link_cost(&self, a: RouterId, b: RouterId) -> Option<f64> {
        self.links.get(&LinkKey::new(a, b)).map(|l| l.cost)
    }

    pub fn router(&self, id: RouterId) -> Option<&Router> {
        self.routers.get(&id)
    }

    pub(crate) fn router_mut(&mut self, id: RouterId) -> Option<&mut Router> {
        self.routers.get_mut(&id)
    }

    /// 全部路由器，按 id 升序
    pub fn routers(&self) -> impl Iterator<Item = &Router> {
        self.routers.values()
    }

    pub fn router_ids(&self) -> Vec<RouterId> {
        self.routers.keys().copied().collect()
    }

    /// 全部链路，按规范化键排序
    pub fn links(&self) -> impl Iterator<Item = &Link> {
        self.links.values()
    }

    pub fn router_count(&self) -> usize {
        self.routers.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn contains(&self, id: RouterId) -> bool {
        self.routers.contains_key(&id)
    }

    /// 收集 `id` 的所有邻居此刻的距离向量（实时快照，而非轮开始时的快照）
    pub(crate) fn neighbor_adverts(&self, id: RouterId) -> Vec<NeighborAdvert> {
        let Some(router) = self.routers.get(&id) else {
            return Vec::new();
        };
        router
            .neighbors()
            .iter()
            .filter_map(|&n| {
                let neighbor = self.routers.get(&n)?;
                let link_cost = self.link_cost(id, n)?;
                Some(NeighborAdvert {
                    neighbor: n,
                    link_cost,
                    vector: neighbor.distance_vector().clone(),
                })
            })
            .collect()
    }

    /// 清除所有路由器的 `updated_in_round` 标记
    pub(crate) fn clear_round_flags(&mut self) {
        for router in self.routers.values_mut() {
            router.updated_in_round = false;
        }
        debug!("清除本轮更新标记");
    }

    pub(crate) fn any_updated_in_round(&self) -> bool {
        self.routers.values().any(|r| r.updated_in_round)
    }
}
