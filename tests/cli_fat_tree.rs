use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!(
        "fattree-topo-{prefix}-{}-{nanos}",
        std::process::id()
    ));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn run_fat_tree(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_fat_tree"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("run fat_tree")
}

#[test]
fn fat_tree_prints_default_summary() {
    let output = run_fat_tree(&[]);
    assert!(
        output.status.success(),
        "fat_tree failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.trim(),
        "fat-tree k=4 core=4 aggregation=8 edge=8 hosts=16 links=48"
    );
}

#[test]
fn fat_tree_writes_json_with_controller_overrides() {
    let dir = unique_temp_dir("json");
    let out_json = dir.join("topo.json");

    let output = run_fat_tree(&[
        "--k",
        "6",
        "--controller-ip",
        "10.0.0.100",
        "--controller-port",
        "6633",
        "--json",
        out_json.to_str().unwrap(),
    ]);
    assert!(
        output.status.success(),
        "fat_tree failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    let raw = fs::read_to_string(&out_json).expect("read topo.json");
    let v: Value = serde_json::from_str(&raw).expect("parse topo.json");
    assert_eq!(v["summary"]["k"], 6);
    assert_eq!(v["summary"]["hosts"], 54);
    assert_eq!(v["controller"]["ip"], "10.0.0.100");
    assert_eq!(v["controller"]["port"], 6633);
    assert_eq!(v["nodes"].as_array().map(Vec::len), Some(9 + 18 + 18 + 54));
    assert_eq!(v["links"].as_array().map(Vec::len), Some(3 * 54));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn fat_tree_reads_config_file_and_cli_overrides_k() {
    let dir = unique_temp_dir("config");
    let config = dir.join("fat_tree.json");
    fs::write(
        &config,
        r#"{ "k": 8, "controller": { "port": 7000 }, "ip_base": "10.99.0.0/16" }"#,
    )
    .expect("write config");

    let output = run_fat_tree(&["--config", config.to_str().unwrap(), "--dry-run"]);
    assert!(
        output.status.success(),
        "fat_tree failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("fat-tree k=8 "), "stdout={stdout}");
    assert!(stdout.contains("init ip_base=10.99.0.0/16"));
    assert!(stdout.contains("add_controller c0 tcp:192.168.0.10:7000"));

    let output = run_fat_tree(&["--config", config.to_str().unwrap(), "--k", "2"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("fat-tree k=2 "), "stdout={stdout}");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn fat_tree_dry_run_prints_plan_in_order() {
    let output = run_fat_tree(&["--k", "2", "--dry-run"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines = stdout.lines().collect::<Vec<_>>();
    assert_eq!(lines[1], "init ip_base=192.168.0.0/24");
    assert_eq!(lines[2], "add_controller c0 tcp:192.168.0.10:6653");
    assert_eq!(
        lines[3],
        "add_switch c020101 dpid=0000000000020101 protocols=OpenFlow13 kind=ovs_kernel"
    );
    assert!(lines.contains(&"add_host h002 ip=10.0.0.2"));
    assert!(lines.contains(&"add_link h002:0 e000001:1"));
    assert!(lines.contains(&"start_switch a010101 controller=c0"));
    assert_eq!(lines.last().copied(), Some("stop 0"));
}

#[test]
fn fat_tree_exits_nonzero_on_invalid_k() {
    for k in ["3", "0", "-2", "100"] {
        let output = run_fat_tree(&["--k", k]);
        assert!(
            !output.status.success(),
            "expected non-zero exit for k={k}"
        );
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(
            stderr.contains("invalid fat-tree arity"),
            "stderr did not contain expected message: {stderr}"
        );
        assert!(output.stdout.is_empty(), "no topology should be printed");
    }
}

#[test]
fn fat_tree_rejects_non_integer_k() {
    let output = run_fat_tree(&["--k", "four"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not an integer"), "stderr={stderr}");
}
