//! Batch sweeps over generator parameters and coloring policies.
//!
//! A [`SweepPlan`] expands into parameter combinations; every combination is
//! generated, colored by each policy and summarised as one [`ReportRow`] per
//! policy. Rows are written with [`write_report`].

pub mod report;
pub mod sweep;

pub use report::{write_report, ReportRow, REPORT_HEADER};
pub use sweep::{
    load_plan, run_sweep, Combination, DensityRange, NodeRange, Scheduler, StepRange, SweepPlan,
    MAX_DENSITY_POINTS,
};
