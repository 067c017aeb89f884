//! 链路类型
//!
//! 定义无向链路及其规范化键。

use serde::{Deserialize, Serialize};

use super::id::RouterId;

/// 无向链路的规范化键：`(较小 id, 较大 id)`
///
/// `LinkKey::new(a, b) == LinkKey::new(b, a)`，因此反向查询命中同一条链路。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LinkKey(RouterId, RouterId);

impl LinkKey {
    pub fn new(a: RouterId, b: RouterId) -> Self {
        if a <= b { LinkKey(a, b) } else { LinkKey(b, a) }
    }

    pub fn low(&self) -> RouterId {
        self.0
    }

    pub fn high(&self) -> RouterId {
        self.1
    }

    pub fn touches(&self, id: RouterId) -> bool {
        self.0 == id || self.1 == id
    }
}

/// 网络链路（双向、对称代价）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    /// 创建时的起点
    pub from: RouterId,
    /// 创建时的终点
    pub to: RouterId,
    pub cost: f64,
}

impl Link {
    pub fn key(&self) -> LinkKey {
        LinkKey::new(self.from, self.to)
    }

    /// 给定一端，返回另一端
    pub fn other(&self, id: RouterId) -> Option<RouterId> {
        if self.from == id {
            Some(self.to)
        } else if self.to == id {
            Some(self.from)
        } else {
            None
        }
    }
}
