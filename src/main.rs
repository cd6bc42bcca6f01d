use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use mesh_clock::clock_source::SystemClock;
use mesh_clock::radio::loopback::LoopbackMedium;
use mesh_clock::{init_logger, log_info, MeshClock, MeshClockError, NodeConfig};

#[derive(Parser)]
#[command(name = "meshclockd")]
#[command(about = "Mesh clock demo harness")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Runs a simulated multi-node mesh over an in-process loopback medium
    /// and prints each node's sync state as it converges.
    Simulate {
        #[arg(short, long, default_value = "4")]
        nodes: usize,
        #[arg(short, long, default_value = "20")]
        ticks: u32,
        #[arg(short, long)]
        config: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), MeshClockError> {
    init_logger();

    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate { nodes, ticks, config } => {
            let config = match config {
                Some(path) => NodeConfig::from_json_path(path)?,
                None => NodeConfig::new()?,
            };

            simulate(nodes.max(1), ticks, config).await?;
        }
    }

    Ok(())
}

async fn simulate(node_count: usize, ticks: u32, config: NodeConfig) -> Result<(), MeshClockError> {
    let medium = LoopbackMedium::new();
    let mut nodes = Vec::with_capacity(node_count);

    for i in 0..node_count {
        let address = [i as u8 + 1, 0, 0, 0, 0, 0];
        let radio = medium.join(address);
        let clock = Arc::new(MeshClock::new(config, Arc::new(SystemClock), radio));
        clock.begin(true)?;
        nodes.push(clock);
    }

    log_info(&format!("simulating {node_count} nodes for {ticks} ticks"));

    let mut interval = tokio::time::interval(Duration::from_millis(config.interval_ms / 4));
    for tick in 0..ticks {
        interval.tick().await;
        for node in &nodes {
            node.tick();
        }

        let summary: Vec<String> = nodes
            .iter()
            .map(|n| format!("{} ({}us)", n.sync_state(), n.mesh_now_us()))
            .collect();
        log_info(&format!("tick {tick}: [{}]", summary.join(", ")));
    }

    Ok(())
}
