//! url-mapper command line tool.
//!
//! ```text
//! url-mapper --config conf/url-mapping.xml check
//! url-mapper --config conf/url-mapping.yml to-url --prefix /app --path bookId=123 --query detail=0
//! url-mapper --config conf/url-mapping.json from-url /app/book/123/4
//! url-mapper --config conf/url-mapping.toml watch
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use url_mapper::config::{ConfigFormat, ConfigWatcher};
use url_mapper::mapping::Segment;
use url_mapper::observability::logging::init_logging;
use url_mapper::{Parameters, StructuredUri, UrlMapper};

#[derive(Parser)]
#[command(name = "url-mapper")]
#[command(about = "Map request parameters to friendly URLs and back", long_about = None)]
struct Cli {
    /// Mapping document (.xml, .yml, .yaml, .json or .toml)
    #[arg(short, long, default_value = "conf/url-mapping.xml")]
    config: PathBuf,

    /// Log level for this tool (overrides RUST_LOG)
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the mapping document and list its rules
    Check,
    /// Map parameters to a simplified link
    ToUrl {
        /// Path prefix of the link (becomes `webAppRoot`)
        #[arg(long, default_value = "")]
        prefix: String,
        /// Path parameter as key=value (repeatable)
        #[arg(long = "path", value_parser = parse_pair)]
        path: Vec<(String, String)>,
        /// Query parameter as key=value (repeatable)
        #[arg(long = "query", value_parser = parse_pair)]
        query: Vec<(String, String)>,
    },
    /// Extract parameters from a simplified URL and print them as JSON
    FromUrl {
        url: String,
    },
    /// Keep the mappings loaded and reload them on change until Ctrl-C
    Watch,
}

fn parse_pair(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got `{}`", s))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    let format = ConfigFormat::from_path(&cli.config)?;
    tracing::debug!(path = %cli.config.display(), %format, "Loading url mappings");

    let mapper = UrlMapper::from_path(&cli.config)?;

    match cli.command {
        Commands::Check => {
            let rules = mapper.rules();
            println!(
                "{}: {} mapping(s) ({})",
                cli.config.display(),
                rules.len(),
                rules.name().unwrap_or("unnamed")
            );
            for (i, rule) in rules.rules().iter().enumerate() {
                let placeholders: Vec<&str> = rule
                    .template()
                    .iter()
                    .filter_map(|s| match s {
                        Segment::Placeholder(p) => Some(p.name()),
                        Segment::Literal(_) => None,
                    })
                    .collect();
                println!("  [{}] {}", i, rule.pattern());
                println!("      placeholders: {:?}", placeholders);
                if !rule.implicit().is_empty() {
                    println!("      implicit:     {:?}", rule.implicit());
                }
                if !rule.overrides().is_empty() {
                    println!("      override:     {:?}", rule.overrides());
                }
                if !rule.ignore().is_empty() {
                    println!("      ignore:       {:?}", rule.ignore().keys().collect::<Vec<_>>());
                }
            }
        }
        Commands::ToUrl { prefix, path, query } => {
            let mut uri = StructuredUri::new(prefix);
            for (k, v) in path {
                uri.add_path_param(k, v);
            }
            for (k, v) in query {
                uri.add_query_param(k, v);
            }

            if !mapper.map_to_url(&mut uri) {
                tracing::info!("No mapping applies; link left unchanged");
            }
            println!("{}", uri.relative_link());
        }
        Commands::FromUrl { url } => {
            let mut params = Parameters::new();
            if !mapper.map_from_url(&url, &mut params) {
                tracing::info!(url = %url, "No mapping matches");
            }
            println!("{}", serde_json::to_string_pretty(&params)?);
        }
        Commands::Watch => {
            let (watcher, mut updates) = ConfigWatcher::new(&cli.config);
            let _watcher = watcher.run()?;

            loop {
                tokio::select! {
                    Some(rules) = updates.recv() => mapper.replace(rules),
                    _ = tokio::signal::ctrl_c() => break,
                }
            }
            tracing::info!(mappings = mapper.rules().len(), "Shutdown complete");
        }
    }

    Ok(())
}
