/* src/cli/core/src/main.rs */

mod config;
mod head;
mod logging;
mod prefs;
mod pull;
mod ui;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gig_locale::{FileStore, Locale, LocaleStore};

use config::{resolve_config, GigConfig};
use prefs::PrefsAction;

#[derive(Parser)]
#[command(name = "gig", about = "Gigmarket client CLI", version)]
struct Cli {
  /// Path to gig.toml (auto-detected if omitted)
  #[arg(short, long, global = true)]
  config: Option<PathBuf>,
  /// Debug logging on stderr (otherwise GIG_LOG, default warn)
  #[arg(short, long, global = true)]
  verbose: bool,
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Inspect or change the stored language/currency preference
  Prefs {
    #[command(subcommand)]
    action: Option<PrefsAction>,
  },
  /// Render SEO head markup for a content object
  Head {
    /// Content JSON file (as saved by `gig pull`)
    #[arg(long)]
    content: PathBuf,
    /// Page path, overriding the content's own url
    #[arg(long)]
    path: Option<String>,
    /// Locale to render (defaults to the stored preference)
    #[arg(short, long)]
    locale: Option<String>,
    /// HTML template to inject the head into
    #[arg(short, long)]
    template: Option<PathBuf>,
    /// Output file (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
  },
  /// Fetch generated content from the backend
  Pull {
    /// Content slug, e.g. logo-design
    slug: String,
    /// Backend base URL (overrides [api].base_url)
    #[arg(short, long)]
    url: Option<String>,
    /// Output file path
    #[arg(short, long)]
    out: Option<PathBuf>,
  },
}

fn load(explicit: Option<&Path>) -> Result<(PathBuf, GigConfig)> {
  let cwd = std::env::current_dir().context("failed to get cwd")?;
  resolve_config(explicit, &cwd)
}

/// Explicit `--locale`, else whatever the preference store holds.
fn resolve_locale(explicit: Option<&str>, store_path: &Path) -> Result<Locale> {
  if let Some(tag) = explicit {
    return tag.parse::<Locale>().with_context(|| format!("invalid --locale \"{tag}\""));
  }
  let store = LocaleStore::initialize(FileStore::open(store_path), prefs::environment_languages());
  Ok(store.locale())
}

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();
  logging::init(cli.verbose);

  run(cli).await
}

async fn run(cli: Cli) -> Result<()> {
  let (base_dir, cfg) = load(cli.config.as_deref())?;
  let store_path = cfg.storage.resolve(&base_dir);

  match cli.command {
    Command::Prefs { action } => {
      ui::banner("prefs");
      prefs::run(&action.unwrap_or(PrefsAction::Show), &store_path)?;
    }
    Command::Head { content, path, locale, template, out } => {
      let locale = resolve_locale(locale.as_deref(), &store_path)?;
      let args = head::HeadArgs { content, path, template, out };
      head::run(&cfg.site, locale, &args)?;
    }
    Command::Pull { slug, url, out } => {
      let url = cfg.api.content_url(url.as_deref(), &slug);
      let out = out.unwrap_or_else(|| PathBuf::from(format!("{}.json", slug.trim_matches('/'))));
      pull::pull_content(&url, &out).await?;
    }
  }

  Ok(())
}
