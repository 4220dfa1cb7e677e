use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "forge-cli")]
#[command(about = "CLI client for the forge ledger node")]
struct Cli {
    /// Node base URL (e.g. http://127.0.0.1:8080)
    #[arg(long, default_value = "http://127.0.0.1:8080")]
    node: String,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Submit a transaction
    Submit {
        /// Sender
        #[arg(long)]
        sender: String,
        /// Recipient
        #[arg(long)]
        recipient: String,
        /// Amount
        #[arg(long)]
        amount: u64,
    },
    /// Forge a new block
    Mine,
    /// Print the full chain
    Chain,
    /// Register peer nodes
    Register {
        /// Node URLs to register (e.g. http://127.0.0.1:8081)
        #[arg(required = true)]
        nodes: Vec<String>,
    },
    /// Run conflict resolution against registered peers
    Resolve,
}

#[derive(Serialize)]
struct TxRequest {
    sender: String,
    recipient: String,
    amount: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .pretty()
        .init();

    let Cli { node, cmd } = Cli::parse();
    let client = reqwest::Client::new();

    let res = match cmd {
        Command::Submit {
            sender,
            recipient,
            amount,
        } => {
            let tx = TxRequest {
                sender,
                recipient,
                amount,
            };
            client
                .post(format!("{node}/transactions/new"))
                .json(&tx)
                .send()
                .await?
        }
        Command::Mine => client.get(format!("{node}/mine")).send().await?,
        Command::Chain => client.get(format!("{node}/chain")).send().await?,
        Command::Register { nodes } => client
            .post(format!("{node}/nodes/register"))
            .json(&serde_json::json!({ "nodes": nodes }))
            .send()
            .await?,
        Command::Resolve => client.get(format!("{node}/nodes/resolve")).send().await?,
    };

    let status = res.status();
    debug!(%status, "node replied");
    let body = res.text().await?;
    println!("status: {}", status);
    println!("{body}");
    Ok(())
}
