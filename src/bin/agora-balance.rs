#![forbid(unsafe_code)]
//! Query the ETH balance of an address and print it to stdout.

use agora_backend::chain::{is_valid_address, ChainReader};
use agora_backend::config::load_config;
use clap::Parser;

#[derive(Parser)]
#[command(name = "agora-balance", about = "Check the ETH balance of an address")]
struct Args {
    /// Account address (0x-prefixed, 40 hex digits)
    address: String,

    /// Override the configured JSON-RPC endpoint
    #[arg(long)]
    rpc_url: Option<String>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if !is_valid_address(&args.address) {
        eprintln!(
            "❌ Invalid address format: {} (expected 0x followed by 40 hex digits)",
            args.address
        );
        std::process::exit(2);
    }

    let rpc_url = match args.rpc_url {
        Some(url) => url,
        None => match load_config() {
            Ok(config) => config.chain.rpc_url,
            Err(e) => {
                eprintln!("❌ {}", e);
                std::process::exit(2);
            }
        },
    };

    let reader = ChainReader::new(rpc_url);
    if let Err(e) = reader.check_balance(&args.address).await {
        eprintln!("❌ Balance query failed: {}", e);
        std::process::exit(1);
    }
}
