use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!(
        "dvr-sim-{prefix}-{}-{nanos}",
        std::process::id()
    ));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn write_file(dir: &PathBuf, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write temp file");
    path
}

#[test]
fn dvr_sim_runs_sample_topology_and_prints_tables() {
    let output = Command::new(env!("CARGO_BIN_EXE_dvr_sim"))
        .args(["--path", "1", "2"])
        .output()
        .expect("run dvr_sim");
    assert!(
        output.status.success(),
        "dvr_sim failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("converged after 1 iterations"), "stdout={stdout}");
    assert!(stdout.contains("Final Routing Tables:"));
    assert!(stdout.contains("Router 3:"));
    assert!(stdout.contains("path 1 -> 2: 1 → 2 (cost 5)"), "stdout={stdout}");
}

#[test]
fn dvr_sim_loads_topology_and_writes_trace_json() {
    let dir = unique_temp_dir("trace");
    let topology = write_file(
        &dir,
        "topology.json",
        r#"
{
    "routers": [1, 2, 3, 4],
    "links": [
        { "from": 1, "to": 2, "cost": 5 },
        { "from": 1, "to": 3, "cost": 3 },
        { "from": 2, "to": 3, "cost": 2 },
        { "from": 3, "to": 4, "cost": 1 }
    ]
}
        "#,
    );
    let out_json = dir.join("trace.json");

    let output = Command::new(env!("CARGO_BIN_EXE_dvr_sim"))
        .args([
            "--topology",
            topology.to_str().unwrap(),
            "--trace-json",
            out_json.to_str().unwrap(),
            "--path",
            "2",
            "4",
        ])
        .output()
        .expect("run dvr_sim");
    assert!(
        output.status.success(),
        "dvr_sim failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("path 2 -> 4: 2 → 3 → 4 (cost 3)"), "stdout={stdout}");

    let raw = fs::read_to_string(&out_json).expect("read trace.json");
    let v: Value = serde_json::from_str(&raw).expect("parse trace.json");
    let arr = v.as_array().expect("trace.json must be a JSON array");
    assert_eq!(
        arr[0].get("kind").and_then(|k| k.as_str()),
        Some("topology"),
        "expected first trace event to be topology"
    );
    assert_eq!(
        arr.last().and_then(|e| e.get("kind")).and_then(|k| k.as_str()),
        Some("converged")
    );
    let steps = arr
        .iter()
        .filter(|e| e.get("kind").and_then(|k| k.as_str()) == Some("step"))
        .count();
    assert_eq!(steps, 8, "two rounds over four routers");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn dvr_sim_rejects_invalid_topology() {
    let dir = unique_temp_dir("invalid");
    let topology = write_file(
        &dir,
        "topology.json",
        r#"{ "routers": [1, 2], "links": [ { "from": 1, "to": 1, "cost": 1 } ] }"#,
    );

    let output = Command::new(env!("CARGO_BIN_EXE_dvr_sim"))
        .args(["--topology", topology.to_str().unwrap()])
        .output()
        .expect("run dvr_sim");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid topology"));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn dvr_sim_reports_unreachable_path() {
    let dir = unique_temp_dir("unreachable");
    let topology = write_file(&dir, "topology.json", r#"{ "routers": [1, 2] }"#);

    let output = Command::new(env!("CARGO_BIN_EXE_dvr_sim"))
        .args(["--topology", topology.to_str().unwrap(), "--path", "1", "2"])
        .output()
        .expect("run dvr_sim");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("no path exists from router 1 to router 2"),
        "stdout={stdout}"
    );

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn dvr_sim_reports_unreadable_or_malformed_topology_file() {
    let dir = unique_temp_dir("malformed");
    let malformed = write_file(&dir, "topology.json", r#"{ "routers": [1, "#);
    let missing = dir.join("missing.json");

    for path in [&malformed, &missing] {
        let output = Command::new(env!("CARGO_BIN_EXE_dvr_sim"))
            .args(["--topology", path.to_str().unwrap()])
            .output()
            .expect("run dvr_sim");
        assert_eq!(output.status.code(), Some(1));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("invalid topology"), "stderr={stderr}");
        assert!(!stderr.contains("panicked"), "stderr={stderr}");
    }

    let _ = fs::remove_dir_all(&dir);
}
