use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use reqwest::Method;
use serde_json::Value;

use gateway_dashboard::codec::{self, Format};
use gateway_dashboard::config::GatewayConfig;
use gateway_dashboard::gateway::{Credentials, GatewayClient};
use gateway_dashboard::reconcile::{self, ChangeSummary};
use gateway_dashboard::templates::{self, TemplateCatalog};

#[derive(Parser)]
#[command(name = "gateway-cli")]
#[command(about = "Export, diff and apply API gateway configuration", long_about = None)]
struct Cli {
    /// Admin API base URL, e.g. http://127.0.0.1:9180/apisix/admin
    #[arg(short, long, env = "GATEWAY_ADMIN_URL", default_value = "")]
    url: String,

    /// Admin API key
    #[arg(short, long, env = "GATEWAY_ADMIN_KEY", default_value = "", hide_env_values = true)]
    key: String,

    /// Header the key is sent in
    #[arg(long, default_value = "X-API-KEY")]
    key_header: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the admin API is reachable with these credentials
    Check,
    /// Print (or write) the live configuration
    Export {
        #[arg(short, long, value_enum, default_value_t = Format::Json)]
        format: Format,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Compare two configuration files offline
    Diff {
        current: PathBuf,
        candidate: PathBuf,
        #[arg(short, long, value_enum)]
        format: Option<Format>,
    },
    /// Show what applying a file would change on the live gateway
    Plan {
        candidate: PathBuf,
        #[arg(short, long, value_enum)]
        format: Option<Format>,
    },
    /// Push a file's changes to the live gateway
    Apply {
        candidate: PathBuf,
        #[arg(short, long, value_enum)]
        format: Option<Format>,
        /// Apply without stopping at the plan
        #[arg(long)]
        yes: bool,
    },
    /// List plugins with a configuration template
    Templates,
    /// Print the template for one plugin
    Template { plugin: String },
    /// List configuration recipes
    Recipes,
    /// Send a raw admin API call, e.g. `call GET routes`
    Call {
        method: String,
        path: String,
        /// JSON request body
        #[arg(short, long)]
        data: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let credentials = Credentials::new(cli.url, cli.key);
    let client = GatewayClient::new(&GatewayConfig {
        key_header: cli.key_header,
        ..GatewayConfig::default()
    })?;

    match cli.command {
        Commands::Check => {
            if client.check_connection(&credentials).await {
                println!("Connected to {}", credentials.base_url);
            } else {
                eprintln!("Error: could not reach {}", credentials.base_url);
                std::process::exit(1);
            }
        }
        Commands::Export { format, output } => {
            let snapshot = client.fetch_snapshot(&credentials).await?;
            let text = codec::encode(&snapshot, format)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, text)?;
                    println!("Exported {} resources to {}", snapshot.len(), path.display());
                }
                None => println!("{}", text),
            }
        }
        Commands::Diff {
            current,
            candidate,
            format,
        } => {
            let current_set = codec::decode_file(&current, format_of(&current, format))?;
            let candidate_set = codec::decode_file(&candidate, format_of(&candidate, format))?;
            print_summary(&reconcile::diff(&current_set, &candidate_set));
        }
        Commands::Plan { candidate, format } => {
            let candidate_set = codec::decode_file(&candidate, format_of(&candidate, format))?;
            let live = client.fetch_snapshot(&credentials).await?;
            print_summary(&reconcile::diff(&live, &candidate_set));
        }
        Commands::Apply {
            candidate,
            format,
            yes,
        } => {
            let candidate_set = codec::decode_file(&candidate, format_of(&candidate, format))?;
            let live = client.fetch_snapshot(&credentials).await?;
            let summary = reconcile::diff(&live, &candidate_set);
            print_summary(&summary);

            if summary.is_empty() {
                return Ok(());
            }
            if !yes {
                println!("\nRe-run with --yes to apply these changes.");
                return Ok(());
            }

            let report = client.apply(&credentials, &summary).await?;
            println!(
                "\nApplied {} change(s), skipped {}.",
                report.applied, report.skipped
            );
        }
        Commands::Templates => {
            for name in TemplateCatalog::builtin().names() {
                println!("{}", name);
            }
        }
        Commands::Template { plugin } => match TemplateCatalog::builtin().template_for(&plugin) {
            Some(payload) => println!("{}", serde_json::to_string_pretty(payload)?),
            None => {
                eprintln!("Error: no template for plugin '{}'", plugin);
                std::process::exit(1);
            }
        },
        Commands::Recipes => {
            for recipe in templates::recipes() {
                println!("{:<24} {}", recipe.id, recipe.description);
            }
        }
        Commands::Call { method, path, data } => {
            let body = data.as_deref().map(serde_json::from_str::<Value>).transpose()?;
            let method = Method::from_bytes(method.to_uppercase().as_bytes())?;
            let res = client
                .forward(method, &path, &credentials, body.as_ref())
                .await?;
            if !res.status.is_success() {
                eprintln!("Error: Admin API returned status {}", res.status);
            }
            println!("{}", serde_json::to_string_pretty(&res.body)?);
        }
    }

    Ok(())
}

/// Explicit `--format`, else taken from the file extension, else JSON.
fn format_of(path: &Path, explicit: Option<Format>) -> Format {
    explicit
        .or_else(|| path.extension()?.to_str()?.parse().ok())
        .unwrap_or_default()
}

fn print_summary(summary: &ChangeSummary) {
    if summary.is_empty() {
        println!("No changes.");
        return;
    }
    for line in &summary.details {
        println!("{}", line);
    }
    println!(
        "\n{} to add, {} to update, {} to delete.",
        summary.added, summary.updated, summary.deleted
    );
}
