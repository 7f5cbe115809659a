use clap::{Parser, Subcommand};
use serde_json::json;

use sigwatch::blockchain::{Block, BlockSource, ChainConfig, FetchOutcome, HttpBlockSource};

#[derive(Parser)]
#[command(name = "sigwatch-cli")]
#[command(about = "Inspect blocks the way the signing monitor sees them", long_about = None)]
struct Cli {
    #[arg(short, long, env = "MTNODE_BASE_URL", default_value = "http://localhost:1317")]
    base_url: String,

    /// Validator address to look for in the last commit.
    #[arg(short, long, env = "WATCH_VALIDATOR_ADDRESS")]
    validator: Option<String>,

    #[arg(short, long, default_value_t = 10)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the chain tip
    Latest,
    /// Show the block at a height
    Block { height: u64 },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let source = HttpBlockSource::new(&ChainConfig {
        base_url: cli.base_url.clone(),
        request_timeout_secs: cli.timeout_secs,
    })?;

    let block = match cli.command {
        Commands::Latest => source.fetch_latest().await?,
        Commands::Block { height } => match source.fetch_by_height(height).await? {
            FetchOutcome::Found(block) => *block,
            FetchOutcome::NotFound => {
                eprintln!("Block {} has not been produced yet", height);
                return Ok(());
            }
        },
    };

    print_summary(&block, cli.validator.as_deref())?;
    Ok(())
}

fn print_summary(block: &Block, validator: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let commit = &block.block.last_commit;
    let signatures = commit.signatures.iter().flatten().count();

    let mut summary = json!({
        "height": block.height(),
        "hash": block.hash(),
        "chain_id": block.block.header.chain_id,
        "commit_height": commit.height,
        "commit_round": commit.round,
        "signatures": signatures,
    });
    if let Some(address) = validator {
        summary["validator"] = json!(address);
        summary["signed"] = json!(block.is_signed_by(address));
    }

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
