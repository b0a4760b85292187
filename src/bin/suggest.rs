//! Compare fee suggestions per urgency tier against a live RPC endpoint.

use anyhow::{Context, Result};
use clap::Parser;
use config::{Config, File};
use dotenv::dotenv;
use ethers::types::{Address, Bytes, U256};
use gas_engine::{
    setup_logger, CallIntent, EngineConfig, EngineConfigToml, EthersNodeClient, FeeParams,
    GasEngine, UrgencyTier,
};
use std::env;
use tokio_util::sync::CancellationToken;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// HTTP RPC endpoint (falls back to the RPC_URL env var)
    #[arg(long)]
    rpc_url: Option<String>,

    /// Sender address
    #[arg(long)]
    from: String,

    /// Recipient address; omit for contract creation
    #[arg(long)]
    to: Option<String>,

    /// Value in wei (decimal)
    #[arg(long, default_value = "0")]
    value: String,

    /// Call data as 0x-prefixed hex
    #[arg(long)]
    data: Option<String>,

    /// Single tier to price; all three when omitted
    #[arg(long)]
    tier: Option<String>,

    /// Optional engine config TOML
    #[arg(short, long)]
    config: Option<String>,

    /// Print the raw suggestion as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _guard = setup_logger();
    dotenv().ok();

    let args = Args::parse();
    let rpc_url = args
        .rpc_url
        .or_else(|| env::var("RPC_URL").ok())
        .context("no RPC endpoint: pass --rpc-url or set RPC_URL")?;

    let engine_config = match &args.config {
        Some(path) => {
            let settings = Config::builder()
                .add_source(File::with_name(path))
                .build()
                .with_context(|| format!("failed to read config from {path}"))?;
            let toml: EngineConfigToml = settings.try_deserialize()?;
            toml.into()
        }
        None => EngineConfig::default(),
    };

    let from: Address = args.from.parse().context("invalid --from address")?;
    let to: Option<Address> = match &args.to {
        Some(addr) => Some(addr.parse().context("invalid --to address")?),
        None => None,
    };
    let value = U256::from_dec_str(&args.value).context("invalid --value")?;
    let data: Bytes = match &args.data {
        Some(hex) => hex.parse().context("invalid --data hex")?,
        None => Bytes::default(),
    };

    let tiers: Vec<UrgencyTier> = match &args.tier {
        Some(t) => vec![t.parse()?],
        None => UrgencyTier::ALL.to_vec(),
    };

    let client = EthersNodeClient::connect(&rpc_url)?;
    let engine = GasEngine::with_config(client, engine_config);
    let intent = CallIntent::new(from, to, value, data);
    let token = CancellationToken::new();

    info!(%rpc_url, "requesting suggestions");

    // One tier-keyed document for --json so the output parses as a whole.
    let mut json_out = serde_json::Map::new();

    for tier in tiers {
        match engine.suggest(&intent, tier, &token).await {
            Ok(suggestion) => {
                if args.json {
                    json_out.insert(tier.to_string(), serde_json::to_value(suggestion)?);
                    continue;
                }
                println!("\n[{tier}]");
                println!("  Gas Limit: {}", suggestion.gas_limit);
                match suggestion.params {
                    FeeParams::Legacy { gas_price } => {
                        println!("  Gas Price: {} gwei", to_gwei(gas_price));
                    }
                    FeeParams::Dynamic {
                        max_fee_per_gas,
                        max_priority_fee_per_gas,
                    } => {
                        println!("  Tip Cap:   {} gwei", to_gwei(max_priority_fee_per_gas));
                        println!("  Fee Cap:   {} gwei", to_gwei(max_fee_per_gas));
                    }
                }
            }
            Err(e) => {
                eprintln!("\n[{tier}] suggestion failed: {e}");
            }
        }
    }

    if args.json {
        let doc = serde_json::Value::Object(json_out);
        println!("{}", serde_json::to_string_pretty(&doc)?);
    }

    Ok(())
}

/// Display scaling only; fee math stays in wei.
fn to_gwei(wei: U256) -> U256 {
    wei / U256::exp10(9)
}
