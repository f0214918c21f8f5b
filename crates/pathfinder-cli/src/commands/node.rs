//! Node commands

use clap::{Args, Subcommand};
use pathfinder_core::NewNode;

use crate::output::{render_table, to_json, OutputFormat};
use crate::AppContext;

#[derive(Args)]
pub struct NodeArgs {
    #[command(subcommand)]
    pub command: NodeCommands,
}

#[derive(Subcommand)]
pub enum NodeCommands {
    /// Add a new node
    Add {
        /// Unique node name
        name: String,
    },
    /// List all nodes
    List,
    /// Delete a node and every edge touching it
    Delete {
        /// Node id or name
        node: String,
    },
}

pub async fn run(args: &NodeArgs, ctx: &AppContext) -> anyhow::Result<()> {
    match &args.command {
        NodeCommands::Add { name } => {
            let node = ctx.storage.create_node(NewNode::new(name.as_str())).await?;
            tracing::info!("Created node: {} ({})", node.name, node.id);

            match ctx.format {
                OutputFormat::Json => println!("{}", to_json(&node)?),
                OutputFormat::Table => {
                    ctx.say(format!("Created node: {} (id {})", node.name, node.id))
                }
            }
        }
        NodeCommands::List => {
            let nodes = ctx.storage.get_all_nodes().await?;
            tracing::info!("Found {} nodes", nodes.len());

            match ctx.format {
                OutputFormat::Json => println!("{}", to_json(&nodes)?),
                OutputFormat::Table if nodes.is_empty() => ctx.say("No nodes found"),
                OutputFormat::Table => {
                    let rows: Vec<Vec<String>> = nodes
                        .iter()
                        .map(|n| vec![n.id.to_string(), n.name.clone()])
                        .collect();
                    println!("{}", render_table(&["ID", "NAME"], &rows));
                }
            }
        }
        NodeCommands::Delete { node } => {
            let target = ctx.require_node(node).await?;
            ctx.storage.delete_node(target.id).await?;
            tracing::info!("Deleted node: {} ({})", target.name, target.id);
            ctx.say(format!("Deleted node: {} (id {})", target.name, target.id));
        }
    }

    Ok(())
}
