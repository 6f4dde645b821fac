use std::fs;
use std::path::Path;

use kcol_color::{run_policies, Policy, StatsCollector};
use kcol_core::errors::{ErrorInfo, KcolError};
use kcol_core::rng::RngHandle;
use kcol_graph::{generate, GeneratorKind, GeneratorParams};
use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::report::ReportRow;

/// Scheduler configuration controlling sweep execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scheduler {
    /// Worker threads; each combination runs on a single worker with its own graph.
    #[serde(default = "Scheduler::default_parallelism")]
    pub parallelism: usize,
}

impl Scheduler {
    const fn default_parallelism() -> usize {
        1
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self {
            parallelism: Self::default_parallelism(),
        }
    }
}

/// Half-open integer range `start..stop` walked by `step`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRange {
    /// First value.
    pub start: usize,
    /// Exclusive upper bound.
    pub stop: usize,
    /// Increment, at least 1.
    pub step: usize,
}

impl StepRange {
    fn values(&self) -> impl Iterator<Item = usize> {
        (self.start..self.stop).step_by(self.step.max(1))
    }
}

/// Node counts `k..stop` walked by `step`; the start follows the current `k`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRange {
    /// Exclusive upper bound.
    pub stop: usize,
    /// Increment, at least 1.
    pub step: usize,
}

/// Upper bound on the number of densities a plan may expand to.
pub const MAX_DENSITY_POINTS: usize = 10_000;

/// Inclusive density range. Values are derived from their index so that
/// `stop` is reached without accumulated drift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DensityRange {
    /// First density.
    pub start: f64,
    /// Inclusive upper bound.
    pub stop: f64,
    /// Increment, strictly positive.
    pub step: f64,
}

impl DensityRange {
    /// Densities covered by the range.
    pub fn values(&self) -> Vec<f64> {
        if self.step <= 0.0 || self.stop < self.start {
            return Vec::new();
        }
        let count = ((self.stop - self.start) / self.step + 1e-9).floor() as usize + 1;
        (0..count)
            .map(|idx| {
                let value = self.start + idx as f64 * self.step;
                ((value * 1e9).round() / 1e9).min(self.stop)
            })
            .collect()
    }
}

/// Full description of a sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepPlan {
    /// Planted color counts.
    #[serde(default = "default_k")]
    pub k: StepRange,
    /// Node counts, restarted at `k` for every color count.
    #[serde(default = "default_nodes")]
    pub nodes: NodeRange,
    /// Edge densities.
    #[serde(default = "default_density")]
    pub density: DensityRange,
    /// Degree cap applied to every graph; absent means unbounded.
    #[serde(default)]
    pub max_degree: Option<usize>,
    /// Generated graphs per combination; stats are averaged over them.
    #[serde(default = "default_trials")]
    pub trials: usize,
    /// Master seed; every trial draws from its own substream.
    #[serde(default)]
    pub seed: u64,
    /// Policies to run on each graph, in report order.
    #[serde(default = "default_policies")]
    pub policies: Vec<Policy>,
    /// Generator used for every graph.
    #[serde(default)]
    pub kind: GeneratorKind,
    /// Execution settings.
    #[serde(default)]
    pub scheduler: Scheduler,
}

fn default_k() -> StepRange {
    StepRange {
        start: 5,
        stop: 100,
        step: 5,
    }
}

fn default_nodes() -> NodeRange {
    NodeRange { stop: 500, step: 50 }
}

fn default_density() -> DensityRange {
    DensityRange {
        start: 0.1,
        stop: 1.0,
        step: 0.3,
    }
}

fn default_trials() -> usize {
    1
}

fn default_policies() -> Vec<Policy> {
    Policy::ALL.to_vec()
}

impl Default for SweepPlan {
    fn default() -> Self {
        Self {
            k: default_k(),
            nodes: default_nodes(),
            density: default_density(),
            max_degree: None,
            trials: default_trials(),
            seed: 0,
            policies: default_policies(),
            kind: GeneratorKind::default(),
            scheduler: Scheduler::default(),
        }
    }
}

/// One point of the parameter grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combination {
    /// Planted color count.
    pub k: usize,
    /// Node count.
    pub num_nodes: usize,
    /// Edge density.
    pub density: f64,
}

impl SweepPlan {
    /// Parses a plan from YAML.
    pub fn from_yaml_str(text: &str) -> Result<Self, KcolError> {
        serde_yaml::from_str(text).map_err(|err| {
            KcolError::Serde(ErrorInfo::new("plan-parse", "invalid sweep plan").with_hint(err.to_string()))
        })
    }

    /// Rejects plans that would loop forever or produce nothing.
    pub fn validate(&self) -> Result<(), KcolError> {
        if self.k.step == 0 {
            return Err(KcolError::invalid_parameter("k.step", 0, "k.step must be at least 1"));
        }
        if self.k.start < 2 {
            return Err(KcolError::invalid_parameter("k.start", self.k.start, "k must be at least 2"));
        }
        if self.nodes.step == 0 {
            return Err(KcolError::invalid_parameter("nodes.step", 0, "nodes.step must be at least 1"));
        }
        let density = &self.density;
        if density.step.is_nan() || density.step <= 0.0 {
            return Err(KcolError::invalid_parameter(
                "density.step",
                density.step,
                "density.step must be positive",
            ));
        }
        if !(0.0..=1.0).contains(&density.start) || !(0.0..=1.0).contains(&density.stop) {
            return Err(KcolError::invalid_parameter(
                "density",
                format!("{}..={}", density.start, density.stop),
                "density bounds must lie in [0, 1]",
            ));
        }
        if (density.stop - density.start) / density.step > (MAX_DENSITY_POINTS - 1) as f64 {
            return Err(KcolError::invalid_parameter(
                "density.step",
                density.step,
                format!("density range expands to more than {MAX_DENSITY_POINTS} points"),
            ));
        }
        if self.max_degree == Some(0) {
            return Err(KcolError::invalid_parameter("max_degree", 0, "max_degree must be at least 1"));
        }
        if self.trials == 0 {
            return Err(KcolError::invalid_parameter("trials", 0, "trials must be at least 1"));
        }
        if self.policies.is_empty() {
            return Err(KcolError::invalid_parameter("policies", "[]", "at least one policy is required"));
        }
        Ok(())
    }

    /// Expands the grid in `k`, node count, density order.
    pub fn combinations(&self) -> Vec<Combination> {
        let densities = self.density.values();
        let mut combos = Vec::new();
        for k in self.k.values() {
            for num_nodes in (k..self.nodes.stop).step_by(self.nodes.step.max(1)) {
                for density in &densities {
                    combos.push(Combination {
                        k,
                        num_nodes,
                        density: *density,
                    });
                }
            }
        }
        combos
    }

    fn generator_params(&self, combo: &Combination) -> GeneratorParams {
        let mut params = GeneratorParams::new(combo.num_nodes, combo.k, combo.density).with_kind(self.kind);
        params.max_degree = self.max_degree;
        params
    }
}

/// Loads a YAML plan from disk.
pub fn load_plan(path: &Path) -> Result<SweepPlan, KcolError> {
    let text = fs::read_to_string(path).map_err(|err| KcolError::io("plan-read", path, err))?;
    SweepPlan::from_yaml_str(&text)
}

/// Runs every combination of `plan` and returns one row per (combination, policy).
///
/// Combinations are spread over a rayon pool of `scheduler.parallelism`
/// threads. Trial `t` of combination `c` always draws from substream
/// `c * trials + t` of the master seed, so the rows other than their
/// durations do not depend on the thread count.
pub fn run_sweep(plan: &SweepPlan) -> Result<Vec<ReportRow>, KcolError> {
    plan.validate()?;
    let combos = plan.combinations();
    info!(
        "sweep: {} combinations x {} policies x {} trials on {} thread(s)",
        combos.len(),
        plan.policies.len(),
        plan.trials,
        plan.scheduler.parallelism.max(1)
    );
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(plan.scheduler.parallelism.max(1))
        .build()
        .map_err(|err| KcolError::Io(ErrorInfo::new("thread-pool", err.to_string())))?;

    let results: Result<Vec<_>, KcolError> = pool.install(|| {
        combos
            .par_iter()
            .enumerate()
            .map(|(index, combo)| -> Result<(usize, Vec<StatsCollector>), KcolError> {
                Ok((index, run_combination(plan, index, combo)?))
            })
            .collect()
    });
    let mut ordered = results?;
    ordered.sort_by_key(|(index, _)| *index);

    let mut rows = Vec::with_capacity(ordered.len() * plan.policies.len());
    for (index, collectors) in ordered {
        let combo = &combos[index];
        for (policy, collector) in plan.policies.iter().zip(collectors) {
            rows.push(ReportRow {
                test_id: rows.len(),
                k: combo.k,
                num_nodes: combo.num_nodes,
                density: combo.density,
                max_degree: plan.max_degree,
                distribution: "Uniform".to_string(),
                correct: collector.is_correct(),
                k_correctness: collector.mean_colors_used().unwrap_or(0.0) - combo.k as f64,
                duration_ns: collector.mean_duration_ns().unwrap_or(0),
                test_type: policy.name().to_string(),
            });
        }
    }
    info!("sweep finished: {} rows", rows.len());
    Ok(rows)
}

fn run_combination(
    plan: &SweepPlan,
    index: usize,
    combo: &Combination,
) -> Result<Vec<StatsCollector>, KcolError> {
    let params = plan.generator_params(combo);
    let mut collectors = vec![StatsCollector::new(); plan.policies.len()];
    for trial in 0..plan.trials {
        let substream = (index * plan.trials + trial) as u64;
        let mut rng = RngHandle::substream(plan.seed, substream);
        let mut graph = generate(&params, &mut rng)?;
        for (slot, (_, tracker)) in run_policies(&mut graph, &plan.policies)?.iter().enumerate() {
            collectors[slot].add_tracker(tracker);
        }
    }
    debug!(
        "k={} nodes={} density={} done ({} trial(s))",
        combo.k, combo.num_nodes, combo.density, plan.trials
    );
    Ok(collectors)
}
