use anyhow::Context;
use bibshelf::{server, writer, Bibliography, Config, SiteId};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bibshelf")]
#[command(about = "Bibliography data for a personal book-review site")]
#[command(long_about = "\
Bibliography data for a personal book-review site

Reads a citation file and a metadata file, merges them, and either writes the
JSON data files the site renders from or serves them per site.

Metadata layout (YAML):

  <citation key>:
    <site id>:
      tags: [a, b]
      review: text, or a list of paragraphs
      readDate: \"2024-01-31\"
      memo: [private notes, never published]

Settings are read from bibshelf.toml, or the file named by BIBSHELF_CONFIG.")]
#[command(version)]
struct Cli {
    /// Config file (default: $BIBSHELF_CONFIG, then ./bibshelf.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Citation file, overriding the config
    #[arg(long, global = true)]
    citations: Option<PathBuf>,

    /// Metadata file, overriding the config
    #[arg(long, global = true)]
    metadata: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write bibliography.json and, for a site, its page data
    Export {
        /// Output directory
        #[arg(long)]
        out: Option<PathBuf>,
        /// Site whose page data is written
        #[arg(long)]
        site: Option<SiteId>,
        /// Write compact JSON
        #[arg(long)]
        compact: bool,
    },
    /// Serve GET /api/bibliography?siteId=<id>
    Serve {
        /// Listen address
        #[arg(long)]
        bind: Option<String>,
        /// Serve an exported bibliography.json instead of parsing the sources
        #[arg(long)]
        data: Option<PathBuf>,
    },
    /// Parse both files and report what was read
    Check {
        /// Fail if any citation entry was skipped
        #[arg(long)]
        strict: bool,
    },
}

fn load(cli: &Cli, config: &Config) -> anyhow::Result<Bibliography> {
    let citations = cli.citations.as_ref().unwrap_or(&config.citations);
    let metadata = cli.metadata.as_ref().unwrap_or(&config.metadata);

    Bibliography::parser()
        .duplicates(config.duplicate_keys)
        .parse_files(citations, metadata)
        .with_context(|| format!("reading {} and {}", citations.display(), metadata.display()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("bibshelf=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref()).context("loading configuration")?;

    match &cli.command {
        Command::Export { out, site, compact } => {
            let bibliography = load(&cli, &config)?;
            let out_dir = out.clone().unwrap_or_else(|| config.export.out_dir.clone());
            let site = site.clone().or_else(|| config.default_site.clone());
            let mut writer_config = config.export.writer();
            writer_config.pretty &= !*compact;

            let written = writer::export(&bibliography, &out_dir, site.as_ref(), &writer_config)
                .with_context(|| format!("exporting to {}", out_dir.display()))?;
            info!(files = written.len(), "export finished");
        }
        Command::Serve { bind, data } => {
            let bibliography = match data {
                Some(path) => {
                    writer::from_file(path).with_context(|| format!("reading {}", path.display()))?
                }
                None => load(&cli, &config)?,
            };
            let bind = bind.clone().unwrap_or_else(|| config.server.bind.clone());
            server::run(bibliography, &bind).await?;
        }
        Command::Check { strict } => {
            let bibliography = load(&cli, &config)?;
            println!("{} items, {} annotated", bibliography.len(), bibliography.annotated());
            for site in bibliography.sites() {
                println!("  site {site}");
            }
            for location in bibliography.skipped() {
                println!("  skipped entry at {location}");
            }
            if *strict && !bibliography.skipped().is_empty() {
                anyhow::bail!("{} citation entries could not be parsed", bibliography.skipped().len());
            }
        }
    }

    Ok(())
}
