//! Edge commands

use std::collections::HashMap;

use clap::{Args, Subcommand};
use pathfinder_core::{EdgeId, NewEdge, NodeId};

use crate::output::{render_table, to_json, OutputFormat};
use crate::AppContext;

#[derive(Args)]
pub struct EdgeArgs {
    #[command(subcommand)]
    pub command: EdgeCommands,
}

#[derive(Subcommand)]
pub enum EdgeCommands {
    /// Add a directed, weighted edge
    Add {
        /// Source node id or name
        src: String,
        /// Destination node id or name
        dst: String,
        /// Positive edge weight
        weight: f64,
    },
    /// List all edges in insertion order
    List,
    /// Delete an edge by id
    Delete { id: EdgeId },
}

pub async fn run(args: &EdgeArgs, ctx: &AppContext) -> anyhow::Result<()> {
    match &args.command {
        EdgeCommands::Add { src, dst, weight } => {
            let src = ctx.require_node(src).await?;
            let dst = ctx.require_node(dst).await?;
            let edge = ctx
                .storage
                .create_edge(NewEdge::new(src.id, dst.id, *weight))
                .await?;
            tracing::info!("Created edge {}: {} -> {}", edge.id, src.name, dst.name);

            match ctx.format {
                OutputFormat::Json => println!("{}", to_json(&edge)?),
                OutputFormat::Table => ctx.say(format!(
                    "Created edge {}: {} -> {} (weight {})",
                    edge.id, src.name, dst.name, edge.weight
                )),
            }
        }
        EdgeCommands::List => {
            let edges = ctx.storage.get_all_edges().await?;
            tracing::info!("Found {} edges", edges.len());

            if ctx.format == OutputFormat::Json {
                println!("{}", to_json(&edges)?);
                return Ok(());
            }
            if edges.is_empty() {
                ctx.say("No edges found");
                return Ok(());
            }

            let names: HashMap<NodeId, String> = ctx
                .storage
                .get_all_nodes()
                .await?
                .into_iter()
                .map(|n| (n.id, n.name))
                .collect();
            let label = |id: NodeId| match names.get(&id) {
                Some(name) => format!("{} ({})", name, id),
                None => id.to_string(),
            };

            let rows: Vec<Vec<String>> = edges
                .iter()
                .map(|e| {
                    vec![
                        e.id.to_string(),
                        label(e.src_id),
                        label(e.dst_id),
                        e.weight.to_string(),
                    ]
                })
                .collect();
            println!("{}", render_table(&["ID", "SOURCE", "DESTINATION", "WEIGHT"], &rows));
        }
        EdgeCommands::Delete { id } => {
            ctx.storage.delete_edge(*id).await?;
            tracing::info!("Deleted edge {}", id);
            ctx.say(format!("Deleted edge {}", id));
        }
    }

    Ok(())
}
