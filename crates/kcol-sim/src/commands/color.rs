use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use kcol_color::{color_graph, Policy};
use kcol_graph::export_graph;
use serde::Serialize;

use super::build_graph;

#[derive(Args, Debug)]
pub struct ColorArgs {
    /// YAML generator parameters.
    #[arg(long)]
    pub config: PathBuf,
    /// Master seed.
    #[arg(long)]
    pub seed: u64,
    /// Policies to run, in order; repeat the flag for several. Defaults to all.
    #[arg(long = "policy")]
    pub policies: Vec<Policy>,
    /// Parent directory receiving one export directory per policy.
    #[arg(long)]
    pub export: Option<PathBuf>,
}

/// One policy's outcome as printed by `color`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorRecord {
    pub policy: Policy,
    pub colors_used: u32,
    pub k_correctness: i64,
    pub correct: bool,
    pub duration_ns: u64,
}

pub fn execute(args: &ColorArgs) -> Result<Vec<ColorRecord>, Box<dyn Error>> {
    let (params, mut graph) = build_graph(&args.config, args.seed)?;
    let policies = if args.policies.is_empty() {
        Policy::ALL.to_vec()
    } else {
        args.policies.clone()
    };

    let mut records = Vec::with_capacity(policies.len());
    for policy in policies {
        graph.reset();
        let stats = color_graph(&mut graph, policy)?;
        if let Some(parent) = &args.export {
            export_graph(&graph, &parent.join(policy.name()))?;
        }
        records.push(ColorRecord {
            policy,
            colors_used: stats.colors_used,
            k_correctness: stats.k_correctness(params.k),
            correct: stats.correct,
            duration_ns: stats.duration_ns,
        });
    }
    Ok(records)
}

pub fn run(args: &ColorArgs) -> Result<(), Box<dyn Error>> {
    for record in execute(args)? {
        println!("{}", serde_json::to_string(&record)?);
    }
    Ok(())
}
