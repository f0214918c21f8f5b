//! Idempotent CSV seed loading
//!
//! `nodes.csv` holds one node name per row. `edges.csv` is headed and must
//! carry `src_name`, `dst_name` and `weight` columns. Running a seed twice
//! leaves the graph unchanged: rows that already exist are skipped.

use crate::error::{StorageError, StorageResult};
use crate::traits::StorageBackend;
use pathfinder_core::{NewEdge, NewNode, NodeId};
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;

/// Outcome of a seed run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub loaded: usize,
    pub skipped: usize,
    pub errors: usize,
}

impl SeedReport {
    fn merge(&mut self, other: SeedReport) {
        self.loaded += other.loaded;
        self.skipped += other.skipped;
        self.errors += other.errors;
    }
}

/// Reader over in-memory CSV text with trimmed cells and ragged rows allowed
fn csv_reader(contents: &str, has_headers: bool) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .has_headers(has_headers)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(contents.as_bytes())
}

fn line_of(record: &csv::StringRecord) -> u64 {
    record.position().map_or(0, |p| p.line())
}

/// Load nodes from a CSV file
pub async fn load_nodes_csv<S>(storage: &S, path: impl AsRef<Path>) -> StorageResult<SeedReport>
where
    S: StorageBackend + ?Sized,
{
    let contents = tokio::fs::read_to_string(path.as_ref()).await?;
    seed_nodes(storage, &contents).await
}

/// Load edges from a CSV file; endpoints are resolved by node name
pub async fn load_edges_csv<S>(storage: &S, path: impl AsRef<Path>) -> StorageResult<SeedReport>
where
    S: StorageBackend + ?Sized,
{
    let contents = tokio::fs::read_to_string(path.as_ref()).await?;
    seed_edges(storage, &contents).await
}

/// Seed nodes from CSV text
///
/// A leading `name` header row is ignored.
pub async fn seed_nodes<S>(storage: &S, contents: &str) -> StorageResult<SeedReport>
where
    S: StorageBackend + ?Sized,
{
    let mut report = SeedReport::default();
    let mut reader = csv_reader(contents, false);

    for (index, result) in reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!("Unreadable node row: {}", e);
                report.errors += 1;
                continue;
            }
        };
        let name = match record.get(0) {
            Some(name) if !name.is_empty() => name,
            _ => continue,
        };
        if index == 0 && name.eq_ignore_ascii_case("name") {
            continue;
        }

        match storage.create_node(NewNode::new(name)).await {
            Ok(node) => {
                tracing::debug!("Seeded node '{}' as {}", node.name, node.id);
                report.loaded += 1;
            }
            Err(StorageError::DuplicateNode(_)) => {
                tracing::debug!("Node '{}' already exists, skipping", name);
                report.skipped += 1;
            }
            Err(StorageError::Validation(e)) => {
                tracing::warn!("Line {}: invalid node name: {}", line_of(&record), e);
                report.errors += 1;
            }
            Err(e) => return Err(e),
        }
    }

    tracing::info!(
        "Seeded nodes: {} loaded, {} skipped, {} errors",
        report.loaded,
        report.skipped,
        report.errors
    );
    Ok(report)
}

/// Seed edges from headed CSV text
pub async fn seed_edges<S>(storage: &S, contents: &str) -> StorageResult<SeedReport>
where
    S: StorageBackend + ?Sized,
{
    if contents.trim().is_empty() {
        return Err(StorageError::Seed("edges file is empty".to_string()));
    }
    let mut reader = csv_reader(contents, true);
    let header = reader.headers()?.clone();

    let column = |name: &str| {
        header
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| StorageError::Seed(format!("missing column '{}'", name)))
    };
    let src_col = column("src_name")?;
    let dst_col = column("dst_name")?;
    let weight_col = column("weight")?;

    let name_to_id: HashMap<String, NodeId> = storage
        .get_all_nodes()
        .await?
        .into_iter()
        .map(|n| (n.name, n.id))
        .collect();

    let mut report = SeedReport::default();
    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!("Unreadable edge row: {}", e);
                report.errors += 1;
                continue;
            }
        };
        let line_no = line_of(&record);
        let cell = |col: usize| record.get(col).unwrap_or("");
        let (src_name, dst_name) = (cell(src_col), cell(dst_col));

        let weight: f64 = match cell(weight_col).parse() {
            Ok(w) => w,
            Err(_) => {
                tracing::warn!(
                    "Line {}: invalid weight on {} -> {}",
                    line_no,
                    src_name,
                    dst_name
                );
                report.errors += 1;
                continue;
            }
        };
        let Some(&src_id) = name_to_id.get(src_name) else {
            tracing::warn!("Line {}: source node '{}' not found", line_no, src_name);
            report.errors += 1;
            continue;
        };
        let Some(&dst_id) = name_to_id.get(dst_name) else {
            tracing::warn!(
                "Line {}: destination node '{}' not found",
                line_no,
                dst_name
            );
            report.errors += 1;
            continue;
        };

        if storage.find_edge(src_id, dst_id).await?.is_some() {
            tracing::debug!("Edge {} -> {} already exists, skipping", src_name, dst_name);
            report.skipped += 1;
            continue;
        }

        match storage.create_edge(NewEdge::new(src_id, dst_id, weight)).await {
            Ok(edge) => {
                tracing::debug!(
                    "Seeded edge {} -> {} ({})",
                    src_name,
                    dst_name,
                    edge.weight
                );
                report.loaded += 1;
            }
            Err(StorageError::Validation(e)) => {
                tracing::warn!("Line {}: {}", line_no, e);
                report.errors += 1;
            }
            Err(e) => return Err(e),
        }
    }

    tracing::info!(
        "Seeded edges: {} loaded, {} skipped, {} errors",
        report.loaded,
        report.skipped,
        report.errors
    );
    Ok(report)
}

/// Seed nodes then edges, returning the combined report
pub async fn load_seed<S>(
    storage: &S,
    nodes_path: impl AsRef<Path>,
    edges_path: impl AsRef<Path>,
) -> StorageResult<(SeedReport, SeedReport)>
where
    S: StorageBackend + ?Sized,
{
    let nodes = load_nodes_csv(storage, nodes_path).await?;
    let edges = load_edges_csv(storage, edges_path).await?;

    let mut total = nodes;
    total.merge(edges);
    tracing::info!(
        "Seed complete: {} loaded, {} skipped, {} errors",
        total.loaded,
        total.skipped,
        total.errors
    );
    Ok((nodes, edges))
}
