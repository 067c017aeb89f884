//! 仿真聚合
//!
//! `Simulation` 持有一份拓扑、一个 DVR 引擎和可选的轨迹记录，
//! 展示层的全部操作都通过它进行。多个 `Simulation` 互不影响。

use tracing::{debug, info};

use super::opts::DvrOpts;
use crate::dvr::{self, DvrEngine, EngineState, Path, StepReport};
use crate::error::DvrResult;
use crate::net::{Link, Router, RouterId, Topology};
use crate::viz::{RoutingTableView, TraceEvent, TraceEventKind, TraceLinkInfo, TraceLog};

/// 一次完整运行的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome {
    pub state: EngineState,
    pub rounds: u32,
    pub steps: u64,
}

impl RunOutcome {
    pub fn converged(&self) -> bool {
        self.state == EngineState::Converged
    }
}

/// DVR 仿真
#[derive(Debug, Default)]
pub struct Simulation {
    topo: Topology,
    engine: DvrEngine,
    opts: DvrOpts,
    /// 开启后记录步进轨迹
    pub trace: Option<TraceLog>,
}

impl Simulation {
    pub fn new(opts: DvrOpts) -> Self {
        Self {
            topo: Topology::default(),
            engine: DvrEngine::new(opts.max_rounds),
            opts,
            trace: None,
        }
    }

    pub fn opts(&self) -> &DvrOpts {
        &self.opts
    }

    pub fn topology(&self) -> &Topology {
        &self.topo
    }

    pub fn engine(&self) -> &DvrEngine {
        &self.engine
    }

    // ---- 拓扑编辑 ----
    //
    // 运行中的编辑不打断当前轮：新路由器在下一轮加入轮转。
    // 已收敛（或达到上限）后的编辑会让引擎回到 Idle，必须重新运行后才能查路径。

    fn after_edit(&mut self) {
        if self.engine.state().is_terminal() {
            self.engine.rewind();
        }
    }

    pub fn add_router(&mut self) -> RouterId {
        let id = self.topo.add_router();
        self.after_edit();
        id
    }

    pub fn insert_router(&mut self, id: RouterId) -> DvrResult<RouterId> {
        self.topo.insert_router(id)?;
        self.after_edit();
        Ok(id)
    }

    pub fn remove_router(&mut self, id: RouterId) -> DvrResult<()> {
        self.topo.remove_router(id)?;
        self.after_edit();
        Ok(())
    }

    pub fn add_link(&mut self, from: RouterId, to: RouterId, cost: f64) -> DvrResult<Link> {
        let link = self.topo.add_link(from, to, cost)?.clone();
        self.after_edit();
        Ok(link)
    }

    // ---- 引擎 ----

    pub fn state(&self) -> EngineState {
        self.engine.state()
    }

    pub fn round(&self) -> u32 {
        self.engine.round()
    }

    pub fn last_step(&self) -> Option<StepReport> {
        self.engine.last_step()
    }

    /// 推进一个路由器，见 [`DvrEngine::step`]
    pub fn step(&mut self) -> DvrResult<bool> {
        if self.engine.state() == EngineState::Idle && self.topo.router_count() >= 2 {
            // 新的一次运行，轨迹只保留本次
            if let Some(trace) = &mut self.trace {
                trace.clear();
            }
            self.emit_trace_meta();
        }
        let steps_before = self.engine.steps();
        let more = self.engine.step(&mut self.topo)?;

        if self.trace.is_some() && self.engine.steps() != steps_before {
            self.trace_last_step();
            if !more {
                self.trace_outcome();
            }
        }
        Ok(more)
    }

    /// 从头运行直到收敛或达到轮数上限
    pub fn run(&mut self) -> DvrResult<RunOutcome> {
        self.run_with(|_| {})
    }

    /// 同 [`Simulation::run`]，每个 step 之后回调 `on_step`（供驱动循环做动画/节奏控制）
    #[tracing::instrument(skip(self, on_step), fields(routers = self.topo.router_count()))]
    pub fn run_with(&mut self, mut on_step: impl FnMut(&Simulation)) -> DvrResult<RunOutcome> {
        self.engine.rewind();
        while self.step()? {
            on_step(self);
        }
        on_step(self);

        let outcome = RunOutcome {
            state: self.engine.state(),
            rounds: self.engine.round(),
            steps: self.engine.steps(),
        };
        info!(?outcome, "DVR 运行结束");
        Ok(outcome)
    }

    /// 收敛后查询转发路径
    pub fn find_path(&self, from: RouterId, to: RouterId) -> DvrResult<Path> {
        dvr::find_path(&self.topo, &self.engine, from, to)
    }

    /// 丢弃全部拓扑与引擎状态，回到 Idle、零个路由器
    pub fn reset(&mut self) {
        self.topo = Topology::default();
        self.engine = DvrEngine::new(self.opts.max_rounds);
        if let Some(trace) = &mut self.trace {
            trace.clear();
        }
        info!("🔄 仿真已重置");
    }

    // ---- 只读访问 ----

    pub fn routers(&self) -> impl Iterator<Item = &Router> {
        self.topo.routers()
    }

    pub fn links(&self) -> impl Iterator<Item = &Link> {
        self.topo.links()
    }

    pub fn router(&self, id: RouterId) -> Option<&Router> {
        self.topo.router(id)
    }

    pub fn routing_table(&self, id: RouterId) -> Option<RoutingTableView> {
        self.topo.router(id).map(RoutingTableView::of)
    }

    /// 所有路由器的路由表，按 id 升序
    pub fn routing_tables(&self) -> Vec<RoutingTableView> {
        self.topo.routers().map(RoutingTableView::of).collect()
    }

    // ---- 轨迹 ----

    fn trace_push(&mut self, kind: TraceEventKind) {
        let seq = self.engine.steps();
        let round = self.engine.round();
        if let Some(t) = &mut self.trace {
            t.push(TraceEvent { seq, round, kind });
        }
    }

    /// 记录拓扑元信息
    pub fn emit_trace_meta(&mut self) {
        if self.trace.is_none() {
            return;
        }
        let routers = self.topo.router_ids();
        let links = self
            .topo
            .links()
            .map(|l| TraceLinkInfo {
                from: l.from,
                to: l.to,
                cost: l.cost,
            })
            .collect();
        debug!(routers = routers.len(), "记录拓扑元信息");
        self.trace_push(TraceEventKind::Topology { routers, links });
    }

    fn trace_last_step(&mut self) {
        let Some(report) = self.engine.last_step() else {
            return;
        };
        let Some(table) = self.routing_table(report.router) else {
            return;
        };
        let kind = TraceEventKind::Step {
            router: report.router,
            updated: report.updated,
            table,
        };
        let seq = self.engine.steps();
        if let Some(t) = &mut self.trace {
            t.push(TraceEvent {
                seq,
                round: report.round,
                kind,
            });
        }
    }

    fn trace_outcome(&mut self) {
        let rounds = self.engine.round();
        match self.engine.state() {
            EngineState::Converged => self.trace_push(TraceEventKind::Converged { rounds }),
            EngineState::MaxIterations => {
                self.trace_push(TraceEventKind::MaxIterations { rounds })
            }
            _ => {}
        }
    }
}
