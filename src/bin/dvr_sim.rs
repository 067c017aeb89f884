//! DVR 仿真
//!
//! 在示例拓扑（或 JSON 拓扑文件）上逐步运行距离向量路由直到收敛，
//! 打印最终路由表，可选地查询一条路径并导出步进轨迹。

use clap::Parser;
use dvr_sim::net::RouterId;
use dvr_sim::sim::{DvrOpts, Simulation};
use dvr_sim::topo::TopologySpec;
use dvr_sim::topo::sample::build_sample;
use dvr_sim::viz::TraceLog;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::thread;
use std::time::Duration;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "dvr_sim", about = "距离向量路由（DVR）收敛过程仿真")]
struct Args {
    /// 拓扑描述 JSON；缺省使用三路由器示例拓扑
    #[arg(long)]
    topology: Option<PathBuf>,
    /// 轮数上限（最大 20）
    #[arg(long, default_value_t = 20)]
    max_rounds: u32,
    /// 两个 step 之间的间隔（毫秒），用于观察过程
    #[arg(long, default_value_t = 0)]
    step_delay_ms: u64,
    /// 收敛后查询路径：--path FROM TO
    #[arg(long, num_args = 2, value_names = ["FROM", "TO"])]
    path: Option<Vec<u32>>,
    /// 输出步进轨迹 JSON
    #[arg(long)]
    trace_json: Option<PathBuf>,
}

/// 读取并解析拓扑描述文件
fn load_topology(path: &Path) -> Result<TopologySpec, String> {
    let raw = fs::read_to_string(path).map_err(|e| format!("read {}: {e}", path.display()))?;
    serde_json::from_str(&raw).map_err(|e| format!("parse {}: {e}", path.display()))
}

fn main() -> ExitCode {
    // 初始化 tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    let args = Args::parse();

    let opts = DvrOpts {
        max_rounds: args.max_rounds,
        step_delay: Duration::from_millis(args.step_delay_ms),
    };

    let built = match &args.topology {
        Some(path) => match load_topology(path) {
            Ok(spec) => Simulation::from_spec(&spec, opts).map_err(|e| e.to_string()),
            Err(e) => Err(e),
        },
        None => {
            let mut sim = Simulation::new(opts);
            build_sample(&mut sim).map(|_| sim).map_err(|e| e.to_string())
        }
    };
    let mut sim = match built {
        Ok(sim) => sim,
        Err(e) => {
            eprintln!("invalid topology: {e}");
            return ExitCode::FAILURE;
        }
    };

    if args.trace_json.is_some() {
        sim.trace = Some(TraceLog::default());
    }

    let outcome = match sim.run_with(|s| {
        if let Some(report) = s.last_step() {
            info!(
                round = report.round,
                router = %report.router,
                updated = report.updated,
                "Iteration {}, Router {}",
                report.round,
                report.router
            );
        }
        let delay = s.opts().step_delay;
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }) {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("cannot run DVR: {e}");
            return ExitCode::FAILURE;
        }
    };

    if outcome.converged() {
        println!("converged after {} iterations ({} steps)", outcome.rounds, outcome.steps);
    } else {
        println!("reached maximum iterations ({})", outcome.rounds);
    }

    println!("\nFinal Routing Tables:");
    for table in sim.routing_tables() {
        println!("{table}");
    }

    if let Some(pair) = &args.path {
        let (from, to) = (RouterId(pair[0]), RouterId(pair[1]));
        match sim.find_path(from, to) {
            Ok(path) => println!("path {from} -> {to}: {path}"),
            Err(e) => println!("path {from} -> {to}: error: {e}"),
        }
    }

    if let (Some(path), Some(trace)) = (&args.trace_json, &sim.trace) {
        let json = serde_json::to_string_pretty(&trace.events).expect("serialize trace events");
        fs::write(path, json).expect("write trace json");
        eprintln!("wrote trace events to {}", path.display());
    }

    ExitCode::SUCCESS
}
