//! JSON 拓扑描述
//!
//! ```json
//! {
//!     "routers": [1, 2, 3],
//!     "links": [ { "from": 1, "to": 2, "cost": 5 } ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::DvrResult;
use crate::net::RouterId;
use crate::sim::{DvrOpts, Simulation};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopologySpec {
    pub routers: Vec<RouterId>,
    #[serde(default)]
    pub links: Vec<LinkSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkSpec {
    pub from: RouterId,
    pub to: RouterId,
    pub cost: f64,
}

impl TopologySpec {
    /// 按描述构建仿真；遇到第一个非法路由器/链路即返回错误
    pub fn build(&self, opts: DvrOpts) -> DvrResult<Simulation> {
        let mut sim = Simulation::new(opts);
        for &id in &self.routers {
            sim.insert_router(id)?;
        }
        for link in &self.links {
            sim.add_link(link.from, link.to, link.cost)?;
        }
        debug!(
            routers = self.routers.len(),
            links = self.links.len(),
            "按描述构建拓扑"
        );
        Ok(sim)
    }
}

impl Simulation {
    pub fn from_spec(spec: &TopologySpec, opts: DvrOpts) -> DvrResult<Simulation> {
        spec.build(opts)
    }
}
