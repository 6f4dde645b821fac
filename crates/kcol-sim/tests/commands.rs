use std::fs;
use std::path::Path;

use kcol_color::Policy;
use kcol_graph::{graph_from_json, EDGE_CHART, NODE_CHART};
use kcol_sim::commands::color::{self, ColorArgs};
use kcol_sim::commands::generate::{self, GenerateArgs};
use kcol_sim::commands::load_params;
use kcol_sim::commands::sweep::{self, SweepArgs};
use tempfile::tempdir;

fn write_config(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("params.yaml");
    fs::write(&path, "num_nodes: 24\nk: 3\ndensity: 0.4\nmax_degree: 6\n").unwrap();
    path
}

#[test]
fn config_defaults_apply() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("minimal.yaml");
    fs::write(&path, "num_nodes: 10\nk: 2\n").unwrap();
    let params = load_params(&path).unwrap();
    assert_eq!(params.density, 0.5);
    assert_eq!(params.max_degree, None);
    assert_eq!(params.set_sizes, None);
}

#[test]
fn negative_node_count_is_rejected_by_the_loader() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.yaml");
    fs::write(&path, "num_nodes: -4\nk: 2\n").unwrap();
    assert!(load_params(&path).is_err());
}

#[test]
fn generate_writes_snapshot_and_export() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path());
    let args = GenerateArgs {
        config,
        seed: 3,
        out: Some(dir.path().join("snap").join("graph.json")),
        export: Some(dir.path().join("viz")),
    };
    let summary = generate::execute(&args).unwrap();
    assert_eq!(summary.nodes, 24);
    assert_eq!(summary.kind, "partitioned");
    assert!(summary.max_degree <= 6);

    let restored =
        graph_from_json(&fs::read_to_string(dir.path().join("snap").join("graph.json")).unwrap()).unwrap();
    assert_eq!(restored.num_edges(), summary.edges);
    assert_eq!(kcol_graph::canonical_hash(&restored), summary.hash);
    assert!(dir.path().join("viz").join(NODE_CHART).exists());
    assert!(dir.path().join("viz").join(EDGE_CHART).exists());

    // Same seed, same graph; a second export into the same directory conflicts.
    assert!(generate::execute(&args).is_err());
    let again = generate::execute(&GenerateArgs { export: None, ..args }).unwrap();
    assert_eq!(again, summary);
}

#[test]
fn color_runs_requested_policies_and_exports_each() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path());
    let args = ColorArgs {
        config: config.clone(),
        seed: 8,
        policies: vec![Policy::StrictIncreasing, Policy::NumColoredDynamic],
        export: Some(dir.path().join("runs")),
    };
    let records = color::execute(&args).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].policy, Policy::StrictIncreasing);
    for record in &records {
        assert!(record.correct);
        assert_eq!(record.k_correctness, i64::from(record.colors_used) - 3);
        assert!(dir.path().join("runs").join(record.policy.name()).join(NODE_CHART).exists());
    }

    let all = color::execute(&ColorArgs {
        config,
        seed: 8,
        policies: Vec::new(),
        export: None,
    })
    .unwrap();
    assert_eq!(all.len(), 6);
}

#[test]
fn sweep_writes_report_with_overridden_parallelism() {
    let dir = tempdir().unwrap();
    let plan = dir.path().join("plan.yaml");
    fs::write(
        &plan,
        "k: {start: 2, stop: 4, step: 1}\nnodes: {stop: 12, step: 5}\ndensity: {start: 0.5, stop: 0.5, step: 0.1}\npolicies: [StrictDecreasing]\nseed: 4\n",
    )
    .unwrap();
    let out = dir.path().join("reports").join("sweep.csv");
    let rows = sweep::execute(&SweepArgs {
        plan,
        out: out.clone(),
        parallelism: Some(2),
    })
    .unwrap();
    // k=2: nodes 2, 7; k=3: nodes 3, 8.
    assert_eq!(rows.len(), 4);
    let text = fs::read_to_string(&out).unwrap();
    assert_eq!(text.lines().count(), 5);
    assert!(text.lines().nth(1).unwrap().contains(",unbounded,Uniform,"));
}
