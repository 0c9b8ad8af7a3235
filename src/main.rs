//! Amaza (TIMES) Network Parameters
//!
//! Builds the parameter set of an Amaza network and prints its genesis block
//! and rule pipelines.

use amaza_core::network::{network_for, NetworkType};
use amaza_core::node::GenesisInfo;
use clap::Parser;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "amaza-params")]
#[command(about = "Inspect Amaza network parameters")]
struct Args {
    /// Network to build (main, test or regtest)
    #[arg(short, long, default_value = "main")]
    network: NetworkType,

    /// Dump the whole parameter set as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,amaza_core=debug".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    info!(network = %args.network, "building network parameters");
    let network = network_for(args.network)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&network)?);
        return Ok(());
    }

    println!("╔══════════════════════════════════════════════════════════╗");
    println!("║              AMAZA (TIMES) NETWORK PARAMETERS            ║");
    println!("╚══════════════════════════════════════════════════════════╝");
    println!();

    println!("Network:");
    println!("  Name:        {}", network.name());
    println!("  Magic:       {:#010x}", network.magic());
    println!(
        "  Ports:       p2p {} / rpc {} / api {} / signalr {}",
        network.default_port(),
        network.rpc_port(),
        network.api_port(),
        network.signalr_port()
    );
    println!(
        "  Federation:  {} members, {} signatures required",
        network.federation().len(),
        network.federation().signatures_required()
    );
    println!();

    let genesis_info = GenesisInfo::new(network.genesis());
    println!("Genesis Block Information:");
    println!("  Hash:        {}", genesis_info.hash);
    println!("  Merkle Root: {}", genesis_info.merkle_root);
    println!("  Timestamp:   {}", genesis_info.timestamp);
    println!("  Bits:        0x{:08x}", genesis_info.bits);
    println!("  Nonce:       {}", genesis_info.nonce);
    println!("  Reward:      {} {}", genesis_info.reward, network.coin_ticker());
    println!("  Size:        {} bytes", genesis_info.size);
    println!();

    let consensus = network.consensus();
    println!("Consensus Rules ({}):", consensus.consensus_rules.len());
    for staged in consensus.consensus_rules.stages() {
        println!("  [{:?}]", staged.stage);
        for rule in &staged.rules {
            println!("    {}", rule);
        }
    }
    println!();

    println!("Mempool Rules ({}):", consensus.mempool_rules.len());
    for rule in consensus.mempool_rules.rules() {
        println!("    {}", rule);
    }

    Ok(())
}
