//! DVR 步进引擎
//!
//! 每次 `step()` 只处理一个路由器：按 id 升序轮转，每轮开始时重新选取
//! 当前全部路由器。处理某个路由器时读取邻居的*实时*距离向量，所以同一轮
//! 里先处理的路由器的更新会立即被后处理的路由器看到（Gauss-Seidel 式）。
//!
//! 状态机：`Idle -> Running -> Converged | MaxIterations`。

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};

use crate::error::{DvrError, DvrResult};
use crate::net::{RouterId, Topology};

/// 轮数硬上限
pub const MAX_ROUNDS: u32 = 20;

/// 引擎对外可见的状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineState {
    #[default]
    Idle,
    Running,
    Converged,
    /// 达到轮数上限仍未收敛（终止状态，不是错误）
    MaxIterations,
}

impl EngineState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, EngineState::Converged | EngineState::MaxIterations)
    }
}

/// 最近一次 `step()` 的处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepReport {
    pub round: u32,
    pub router: RouterId,
    pub updated: bool,
}

/// DVR 引擎
#[derive(Debug, Clone)]
pub struct DvrEngine {
    state: EngineState,
    max_rounds: u32,
    /// 当前轮次（1 起）；Idle 时为 0
    round: u32,
    /// 本轮的处理顺序，在轮开始时确定
    order: Vec<RouterId>,
    cursor: usize,
    steps: u64,
    last: Option<StepReport>,
}

impl Default for DvrEngine {
    fn default() -> Self {
        Self::new(MAX_ROUNDS)
    }
}

impl DvrEngine {
    /// `max_rounds` 会被限制在 `1..=MAX_ROUNDS`
    pub fn new(max_rounds: u32) -> Self {
        Self {
            state: EngineState::Idle,
            max_rounds: max_rounds.clamp(1, MAX_ROUNDS),
            round: 0,
            order: Vec::new(),
            cursor: 0,
            steps: 0,
            last: None,
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn max_rounds(&self) -> u32 {
        self.max_rounds
    }

    /// 本次运行已执行的 step 数
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn last_step(&self) -> Option<StepReport> {
        self.last
    }

    pub fn is_converged(&self) -> bool {
        self.state == EngineState::Converged
    }

    /// 回到 Idle；下一次 `step()` 从第 1 轮重新开始
    pub fn rewind(&mut self) {
        if self.state != EngineState::Idle {
            debug!(state = ?self.state, round = self.round, "⏮️  引擎回到 Idle");
        }
        self.state = EngineState::Idle;
        self.round = 0;
        self.order.clear();
        self.cursor = 0;
        self.steps = 0;
        self.last = None;
    }

    /// 处理一个路由器。
    ///
    /// 返回 `Ok(true)` 表示还需要继续调用；`Ok(false)` 表示进入（或已处于）
    /// 终止状态。路由器少于 2 个时返回 `InsufficientTopology`，状态保持 Idle。
    #[tracing::instrument(skip(self, topo), fields(state = ?self.state, round = self.round))]
    pub fn step(&mut self, topo: &mut Topology) -> DvrResult<bool> {
        if self.state.is_terminal() {
            trace!("已处于终止状态，忽略");
            return Ok(false);
        }
        if topo.router_count() < 2 {
            warn!(routers = topo.router_count(), "路由器不足，无法运行 DVR");
            self.rewind();
            return Err(DvrError::InsufficientTopology(topo.router_count()));
        }

        if self.state == EngineState::Idle {
            info!(routers = topo.router_count(), "▶️  开始运行 DVR");
            self.state = EngineState::Running;
            self.round = 1;
            self.cursor = 0;
        }

        if self.cursor == 0 {
            self.order = topo.router_ids();
            topo.clear_round_flags();
            debug!(round = self.round, order = ?self.order, "开始新一轮");
        }

        let id = self.order[self.cursor];
        let adverts = topo.neighbor_adverts(id);
        // 本轮中途被删除的路由器直接跳过
        let updated = match topo.router_mut(id) {
            Some(router) => router.relax(&adverts),
            None => false,
        };
        self.steps += 1;
        self.last = Some(StepReport {
            round: self.round,
            router: id,
            updated,
        });
        debug!(router = %id, neighbors = adverts.len(), updated, "处理路由器");

        self.cursor += 1;
        if self.cursor < self.order.len() {
            return Ok(true);
        }

        // 本轮结束
        self.cursor = 0;
        if !topo.any_updated_in_round() {
            self.state = EngineState::Converged;
            info!(rounds = self.round, steps = self.steps, "✅ DVR 已收敛");
            return Ok(false);
        }
        if self.round >= self.max_rounds {
            self.state = EngineState::MaxIterations;
            warn!(rounds = self.round, "⚠️  达到最大轮数仍未收敛");
            return Ok(false);
        }
        self.round += 1;
        Ok(true)
    }
}
