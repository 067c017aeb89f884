//! 错误类型
//!
//! 拓扑编辑、DVR 步进与路径查询共用的错误枚举。
//! 所有错误都是局部的：返回错误的操作不会修改任何状态。

use thiserror::Error;

use crate::net::RouterId;

/// DVR 仿真错误
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DvrError {
    /// 路由器 id 已存在
    #[error("router {0} already exists")]
    DuplicateRouter(RouterId),

    /// 路由器 id 不存在
    #[error("router {0} does not exist")]
    UnknownRouter(RouterId),

    /// 链路两端是同一个路由器
    #[error("cannot create a link from router {0} to itself")]
    SelfLink(RouterId),

    /// 两个路由器之间已有链路（任意方向）
    #[error("a link already exists between routers {0} and {1}")]
    DuplicateLink(RouterId, RouterId),

    /// 链路代价不是正的有限数
    #[error("link cost must be a positive number, got {0}")]
    InvalidCost(String),

    /// 尚未收敛，不能查询路径
    #[error("run the DVR algorithm to convergence before finding paths")]
    NotConverged,

    /// 源与目的相同
    #[error("source and destination are the same router ({0})")]
    SameRouter(RouterId),

    /// 目的不可达
    #[error("no path exists from router {from} to router {to}")]
    Unreachable { from: RouterId, to: RouterId },

    /// 沿 next hop 行进时遇到缺失的表项
    #[error("path from router {from} to router {to} is incomplete at router {at}")]
    IncompletePath {
        from: RouterId,
        to: RouterId,
        at: RouterId,
    },

    /// 路径长度超过路由器总数
    #[error("loop detected in path from router {from} to router {to}")]
    LoopDetected { from: RouterId, to: RouterId },

    /// 路由器少于 2 个时无法运行 DVR
    #[error("need at least 2 routers to run DVR, have {0}")]
    InsufficientTopology(usize),
}

/// DVR 操作结果
pub type DvrResult<T> = Result<T, DvrError>;
