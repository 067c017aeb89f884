//! 预置拓扑

use crate::error::DvrResult;
use crate::net::RouterId;
use crate::sim::Simulation;

/// 构建启动时的示例三角拓扑
///
/// 拓扑结构：1 -5- 2，1 -3- 3，2 -2- 3
/// 返回：三个路由器的 id
pub fn build_sample(sim: &mut Simulation) -> DvrResult<[RouterId; 3]> {
    let r1 = sim.add_router();
    let r2 = sim.add_router();
    let r3 = sim.add_router();

    sim.add_link(r1, r2, 5.0)?;
    sim.add_link(r1, r3, 3.0)?;
    sim.add_link(r2, r3, 2.0)?;
    Ok([r1, r2, r3])
}
