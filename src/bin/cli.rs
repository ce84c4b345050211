//! Printer Timeline CLI
//!
//! Command-line client for a running Printer Timeline API server:
//! - Fetch telemetry of one data kind
//! - Download the stored document behind an event
//! - List a printer's subscriptions
//! - Check server status
//! - Generate a default config file

use clap::{Parser, Subcommand};
use printer_timeline::params::{
    BUCKET_NAME, BUCKET_REGION, END_TIME, OBJECT_KEY, OFFSET_UNITS, OFFSET_VALUE, PRODUCT_NUMBER,
    SERIAL_NUMBER, START_TIME, TIME_TYPE,
};
use printer_timeline::query::DataKind;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "printer-timeline-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Query printer telemetry timelines")]
#[command(
    long_about = "Fetches uploaded Open XML, cloud JSON, heartbeat and RTA events for a time window,\noptionally narrowed to one product number or one device."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API server URL
    #[arg(long, default_value = "http://localhost:8080", global = true)]
    pub api_url: String,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch telemetry events
    Fetch {
        /// Data kind (open-xml, cloud-json, heartbeat, rta)
        kind: String,
        /// Relative window ending now (e.g., 30s, 5m)
        #[arg(short, long, conflicts_with_all = ["start", "end"])]
        last: Option<String>,
        /// Window start, epoch seconds
        #[arg(long, requires = "end")]
        start: Option<i64>,
        /// Window end, epoch seconds
        #[arg(long, requires = "start")]
        end: Option<i64>,
        /// Product number
        #[arg(long)]
        pn: Option<String>,
        /// Serial number (requires --pn)
        #[arg(long)]
        sn: Option<String>,
    },

    /// Download a stored document
    Object {
        /// Bucket region (US_EAST_1, US_WEST_1)
        #[arg(long, default_value = "US_EAST_1")]
        region: String,
        /// Bucket name
        #[arg(long)]
        bucket: String,
        /// Object key
        #[arg(long)]
        key: String,
        /// Write the document here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List the services a printer is registered with
    Subscriptions {
        /// Product number
        #[arg(long)]
        pn: String,
        /// Serial number
        #[arg(long)]
        sn: String,
    },

    /// Show server status
    Status,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Fetch {
            kind,
            last,
            start,
            end,
            pn,
            sn,
        } => {
            let Some(kind) = DataKind::from_slug(&kind) else {
                let known: Vec<&str> = DataKind::all().iter().map(|k| k.slug()).collect();
                eprintln!("Unknown data kind: {}. Use one of: {}", kind, known.join(", "));
                std::process::exit(1);
            };

            let mut query: Vec<(&str, String)> = match (start, end) {
                (Some(start), Some(end)) => vec![
                    (TIME_TYPE, "absolute".to_string()),
                    (START_TIME, start.to_string()),
                    (END_TIME, end.to_string()),
                ],
                _ => {
                    let (units, value) = parse_last(last.as_deref().unwrap_or("5m"))?;
                    vec![
                        (TIME_TYPE, "relative".to_string()),
                        (OFFSET_UNITS, units.to_string()),
                        (OFFSET_VALUE, value.to_string()),
                    ]
                }
            };
            if let Some(pn) = pn {
                query.push((PRODUCT_NUMBER, pn));
            }
            if let Some(sn) = sn {
                query.push((SERIAL_NUMBER, sn));
            }

            let response = client
                .get(format!("{}/cc/V01/api/{}", cli.api_url, kind.slug()))
                .query(&query)
                .send()
                .await?;

            if !response.status().is_success() {
                let status = response.status();
                let text = response.text().await.unwrap_or_default();
                eprintln!("Fetch failed ({}): {}", status, text);
                std::process::exit(1);
            }

            let data: serde_json::Value = response.json().await?;

            match cli.format.as_str() {
                "json" => {
                    println!("{}", serde_json::to_string_pretty(&data)?);
                }
                _ => {
                    print_table(&data);
                }
            }
        }

        Commands::Object {
            region,
            bucket,
            key,
            output,
        } => {
            let response = client
                .get(format!("{}/cc/V01/api/object", cli.api_url))
                .query(&[(BUCKET_REGION, region), (BUCKET_NAME, bucket), (OBJECT_KEY, key)])
                .send()
                .await?;

            if !response.status().is_success() {
                let status = response.status();
                let text = response.text().await.unwrap_or_default();
                eprintln!("Object download failed ({}): {}", status, text);
                std::process::exit(1);
            }

            let content: String = response.json().await?;

            match output {
                Some(path) => {
                    std::fs::write(&path, &content)?;
                    println!("{} bytes written to {:?}", content.len(), path);
                }
                None => println!("{}", content),
            }
        }

        Commands::Subscriptions { pn, sn } => {
            let response = client
                .get(format!("{}/cc/V01/api/subscriptions", cli.api_url))
                .query(&[(PRODUCT_NUMBER, pn.as_str()), (SERIAL_NUMBER, sn.as_str())])
                .send()
                .await?;

            if response.status() == reqwest::StatusCode::NOT_FOUND {
                println!("No subscriptions for {} / {}", pn, sn);
                return Ok(());
            }
            if !response.status().is_success() {
                let status = response.status();
                let text = response.text().await.unwrap_or_default();
                eprintln!("Subscription lookup failed ({}): {}", status, text);
                std::process::exit(1);
            }

            let data: serde_json::Value = response.json().await?;

            match cli.format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&data)?),
                _ => print_subscriptions(&data),
            }
        }

        Commands::Status => {
            let response = client
                .get(format!("{}/health", cli.api_url))
                .send()
                .await;

            match response {
                Ok(resp) if resp.status().is_success() => {
                    let health: serde_json::Value = resp.json().await?;

                    println!(
                        "Printer Timeline v{}",
                        health["version"].as_str().unwrap_or(env!("CARGO_PKG_VERSION"))
                    );
                    println!();
                    println!(
                        "API Status: {}",
                        health["status"].as_str().unwrap_or("unknown")
                    );

                    if let Some(max) = health["max_time_diff_minutes"].as_u64() {
                        println!("Max window: {} minutes", max);
                    }

                    if let Some(kinds) = health["kinds"].as_array() {
                        let kinds: Vec<&str> = kinds.iter().filter_map(|k| k.as_str()).collect();
                        println!("Data kinds: {}", kinds.join(", "));
                    }

                    if let Some(uptime) = health["uptime_seconds"].as_u64() {
                        println!();
                        println!("Uptime: {}", format_duration(uptime));
                    }
                }
                Ok(resp) => {
                    eprintln!("API returned error: {}", resp.status());
                    std::process::exit(1);
                }
                Err(e) => {
                    eprintln!("Cannot connect to Printer Timeline API at {}", cli.api_url);
                    eprintln!("Error: {}", e);
                    eprintln!();
                    eprintln!("Make sure the API server is running:");
                    eprintln!("  cargo run --bin printer-timeline");
                    std::process::exit(1);
                }
            }
        }

        Commands::Config { output } => {
            let config = printer_timeline::config::generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

/// Split "30s" / "5m" into the `offset_units` and `offset_value` query values
fn parse_last(s: &str) -> anyhow::Result<(&'static str, u64)> {
    let s = s.trim().to_lowercase();

    if let Some(seconds) = s.strip_suffix('s') {
        Ok(("seconds", seconds.parse()?))
    } else if let Some(minutes) = s.strip_suffix('m') {
        Ok(("minutes", minutes.parse()?))
    } else {
        anyhow::bail!("Invalid window format: {}. Use: 30s, 5m", s)
    }
}

fn format_duration(seconds: u64) -> String {
    if seconds < 60 {
        format!("{}s", seconds)
    } else if seconds < 3600 {
        format!("{}m {}s", seconds / 60, seconds % 60)
    } else if seconds < 86400 {
        format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
    } else {
        format!("{}d {}h", seconds / 86400, (seconds % 86400) / 3600)
    }
}

fn print_table(data: &serde_json::Value) {
    let rows = match data["Results"].as_array() {
        Some(r) => r,
        None => {
            println!("No data");
            return;
        }
    };

    if rows.is_empty() {
        println!(
            "No events for the selected time range ({})",
            data["Status"].as_str().unwrap_or("unknown")
        );
        return;
    }

    // Column order follows the first row; @ptr is an opaque record handle
    let columns: Vec<&str> = rows[0]
        .as_array()
        .map(|cells| {
            cells
                .iter()
                .filter_map(|c| c["Field"].as_str())
                .filter(|f| *f != "@ptr")
                .collect()
        })
        .unwrap_or_default();

    println!("{}", columns.join(" | "));
    println!("{}", "-".repeat(columns.iter().map(|c| c.len() + 3).sum::<usize>()));

    for row in rows {
        let cells = row.as_array().map(Vec::as_slice).unwrap_or_default();
        let values: Vec<&str> = columns
            .iter()
            .map(|col| {
                cells
                    .iter()
                    .find(|c| c["Field"].as_str() == Some(*col))
                    .and_then(|c| c["Value"].as_str())
                    .unwrap_or("-")
            })
            .collect();
        println!("{}", values.join(" | "));
    }

    println!();
    println!("{} events", rows.len());
}

fn print_subscriptions(data: &serde_json::Value) {
    let subscriptions = data.as_array().map(Vec::as_slice).unwrap_or_default();

    println!("SERVICE | ACCOUNT | REGISTERED");
    for sub in subscriptions {
        let registered = sub["RegistrationTimeEpoch"]
            .as_i64()
            .and_then(|secs| chrono::DateTime::from_timestamp(secs, 0))
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "-".to_string());

        println!(
            "{} | {} | {}",
            sub["ServiceID"].as_str().unwrap_or("-"),
            sub["AccountID"].as_str().unwrap_or("-"),
            registered
        );
    }

    println!();
    println!("{} subscriptions", subscriptions.len());
}
