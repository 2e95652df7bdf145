use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "proxy-cli")]
#[command(about = "Command-line client for a running cutools-proxy", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3000")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check proxy status
    Health,
    /// Probe every upstream sub-API
    TestAll,
    /// Fetch the lc79_hu feed
    Hu {
        #[arg(short, long)]
        key: Option<String>,
    },
    /// Fetch the lc79_md5 feed
    Md5 {
        #[arg(short, long)]
        key: Option<String>,
    },
    /// Fetch any sub-API by name
    Query {
        #[arg(short = 't', long = "type", default_value = "lc79_hu")]
        query_type: String,
        #[arg(short, long)]
        key: Option<String>,
    },
}

impl Commands {
    /// Path and query parameters for the command.
    fn target(&self) -> (&'static str, Vec<(&'static str, String)>) {
        match self {
            Commands::Health => ("/health", Vec::new()),
            Commands::TestAll => ("/api/test-all", Vec::new()),
            Commands::Hu { key: None } => ("/api/tx", Vec::new()),
            Commands::Hu { key: Some(key) } => {
                ("/api/cutools/hu/with-key", vec![("key", key.clone())])
            }
            Commands::Md5 { key: None } => ("/api/md5", Vec::new()),
            Commands::Md5 { key: Some(key) } => {
                ("/api/cutools/md5/with-key", vec![("key", key.clone())])
            }
            Commands::Query { query_type, key } => {
                let mut params = vec![("type", query_type.clone())];
                if let Some(key) = key {
                    params.push(("key", key.clone()));
                }
                ("/api/all", params)
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let (path, params) = cli.command.target();
    let res = client
        .get(format!("{}{}", cli.url.trim_end_matches('/'), path))
        .query(&params)
        .send()
        .await?;

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    if !status.is_success() {
        eprintln!("Error: proxy returned status {}", status);
    }

    match serde_json::from_str::<Value>(&text) {
        Ok(json) => println!("{}", serde_json::to_string_pretty(&json)?),
        Err(_) => println!("{}", text),
    }
    Ok(())
}
