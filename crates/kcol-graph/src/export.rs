use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use csv::Writer;
use kcol_core::errors::{ErrorInfo, KcolError};
use log::{info, warn};

use crate::graph::Graph;

/// File holding one row per node.
pub const NODE_CHART: &str = "node_chart.csv";
/// File holding one row per undirected edge.
pub const EDGE_CHART: &str = "edge_chart.csv";

/// Writes the node and edge tables consumed by graph visualisation tools.
///
/// `dir` must not exist yet: an existing directory yields
/// [`KcolError::ExportConflict`] and nothing on disk is touched. Missing
/// parent directories are created, and a failed write removes `dir` again.
/// Each undirected edge is emitted once, from the endpoint that comes first
/// in the traversal order, and typed `Directed` with weight `1`.
pub fn export_graph(graph: &Graph, dir: &Path) -> Result<(), KcolError> {
    if let Some(parent) = dir.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| KcolError::io("export-parent", parent, err))?;
    }
    fs::create_dir(dir).map_err(|err| {
        if err.kind() == ErrorKind::AlreadyExists {
            KcolError::ExportConflict(
                ErrorInfo::new("export-dir-exists", "export directory already exists")
                    .with_context("path", dir.display())
                    .with_hint("choose a fresh directory"),
            )
        } else {
            KcolError::io("export-create-dir", dir, err)
        }
    })?;

    fill_or_remove(dir, |dir| {
        write_nodes(graph, &dir.join(NODE_CHART))?;
        write_edges(graph, &dir.join(EDGE_CHART))
    })?;
    info!("graph exported to {}", dir.display());
    Ok(())
}

/// Runs `fill` on a freshly created `dir`, removing the directory if it fails.
fn fill_or_remove<F>(dir: &Path, fill: F) -> Result<(), KcolError>
where
    F: FnOnce(&Path) -> Result<(), KcolError>,
{
    let result = fill(dir);
    if result.is_err() {
        if let Err(cleanup) = fs::remove_dir_all(dir) {
            warn!("could not remove partial export {}: {cleanup}", dir.display());
        }
    }
    result
}

fn write_nodes(graph: &Graph, path: &Path) -> Result<(), KcolError> {
    let mut writer = Writer::from_path(path).map_err(|err| wrap_csv("export-open", path, err))?;
    writer
        .write_record(["Id", "Label", "Color"])
        .map_err(|err| wrap_csv("export-write", path, err))?;
    for (_, node) in graph.nodes() {
        let id = node.id().to_string();
        writer
            .write_record([id.clone(), format!("Node {id}"), node.color().to_string()])
            .map_err(|err| wrap_csv("export-write", path, err))?;
    }
    writer
        .flush()
        .map_err(|err| KcolError::io("export-flush", path, err))
}

fn write_edges(graph: &Graph, path: &Path) -> Result<(), KcolError> {
    let mut position = vec![0usize; graph.len()];
    for (rank, handle) in graph.order().iter().enumerate() {
        position[handle.index()] = rank;
    }

    let mut writer = Writer::from_path(path).map_err(|err| wrap_csv("export-open", path, err))?;
    writer
        .write_record(["Source", "Target", "Type", "Id", "Label", "Weight"])
        .map_err(|err| wrap_csv("export-write", path, err))?;
    let mut counter = 0usize;
    for (handle, node) in graph.nodes() {
        for neighbour in node.connections() {
            if position[neighbour.index()] < position[handle.index()] {
                continue;
            }
            let source = node.id();
            let target = graph[*neighbour].id();
            writer
                .write_record([
                    source.to_string(),
                    target.to_string(),
                    "Directed".to_string(),
                    counter.to_string(),
                    format!("Node {source} to Node {target}"),
                    "1".to_string(),
                ])
                .map_err(|err| wrap_csv("export-write", path, err))?;
            counter += 1;
        }
    }
    writer
        .flush()
        .map_err(|err| KcolError::io("export-flush", path, err))
}

fn wrap_csv(code: &str, path: &Path, err: csv::Error) -> KcolError {
    KcolError::Io(
        ErrorInfo::new(code, "CSV export failure")
            .with_context("path", path.display())
            .with_hint(err.to_string()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_fill_removes_the_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("graph");
        fs::create_dir(&dir).unwrap();

        let result = fill_or_remove(&dir, |dir| {
            fs::write(dir.join(NODE_CHART), "Id,Label,Color\n").unwrap();
            Err(KcolError::io("export-write", &dir.join(EDGE_CHART), "disk full"))
        });
        assert!(matches!(result, Err(KcolError::Io(_))));
        assert!(!dir.exists());

        // The path is free again, so a retry succeeds.
        export_graph(&Graph::new(), &dir).unwrap();
        assert!(dir.join(EDGE_CHART).exists());
    }
}
