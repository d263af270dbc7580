use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use lectio::bible::{BookIndex, BookSource, ContentStore};
use lectio::ui::verses::fragment_lines;
use lectio::view::{Header, TextStyle, ViewMode, render_with_header};
use lectio::{App, Config, Theme};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Column width used when printing to stdout
const PRINT_WIDTH: usize = 80;

#[derive(Parser)]
#[command(name = "lectio")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base URL or directory holding the book JSON files
    #[arg(long, global = true)]
    source: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the books of the canon
    Books,
    /// Print one chapter
    Show {
        /// Book name, e.g. "1 Samuel"
        book: String,
        /// Chapter number
        chapter: u32,
        /// Layout: boxed, plain or continuous
        #[arg(short, long, default_value = "plain")]
        view: String,
    },
    /// Search a book for a phrase
    Search {
        /// Book name
        book: String,
        /// Text to look for, case-insensitive
        query: String,
    },
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| "lectio=info".into())
}

/// Log to a file so the alternate screen stays clean
fn init_file_logging() -> Result<()> {
    let path = Config::log_path()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {:?}", parent))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {:?}", path))?;

    tracing_subscriber::registry()
        .with(env_filter())
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
    Ok(())
}

fn init_stderr_logging() {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(source) = cli.source {
        config.source = source;
    }

    match cli.command {
        None => {
            init_file_logging()?;
            let source = BookSource::from_location(&config.source, config.request_timeout())?;
            tracing::info!("Starting with source {}", config.source);
            let mut app = App::new(config, source)?;
            app.run().await?;
        }
        Some(command) => {
            init_stderr_logging();
            run_command(command, &config).await?;
        }
    }

    Ok(())
}

async fn run_command(command: Commands, config: &Config) -> Result<()> {
    let catalog = BookIndex::canonical();

    match command {
        Commands::Books => {
            for name in catalog.names() {
                println!("{name}");
            }
        }
        Commands::Show { book, chapter, view } => {
            let Some(mode) = ViewMode::from_key(&view) else {
                bail!("Unknown view mode: {view} (expected boxed, plain or continuous)");
            };
            let (name, mut store) = open_store(&catalog, &book, config).await?;
            let Some(verses) = store.verses_of(chapter) else {
                bail!("{name} has no chapter {chapter}");
            };
            let fragment = render_with_header(
                Header::for_chapter(name, chapter),
                verses,
                mode,
                TextStyle::default(),
            );
            for line in fragment_lines(&fragment, &Theme::default(), PRINT_WIDTH) {
                let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
                println!("{}", text.trim_end());
            }
        }
        Commands::Search { book, query } => {
            let (name, store) = open_store(&catalog, &book, config).await?;
            let hits = store.search(&query);
            if hits.is_empty() {
                println!("No results found for \"{query}\"");
            }
            for hit in hits {
                println!("{} {}:{}  {}", name, hit.chapter, hit.verse, hit.text);
            }
        }
    }

    Ok(())
}

/// Load one book for a CLI command, returning its catalog spelling too
async fn open_store(
    catalog: &BookIndex,
    name: &str,
    config: &Config,
) -> Result<(&'static str, ContentStore)> {
    let Some(name) = catalog.resolve(name) else {
        bail!("Unknown book: {name}");
    };
    let source = BookSource::from_location(&config.source, config.request_timeout())?;
    let mut store = ContentStore::new(source);
    store.load_book(name).await.with_context(|| format!("Failed to load {name}"))?;
    Ok((name, store))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FIRST_SAMUEL: &str = r#"{"book":"1 Samuel","chapters":[{"chapter":"1","verses":[{"verse":"1","text":"Now there was a certain man"}]}]}"#;

    #[tokio::test]
    async fn store_opens_under_catalog_spelling() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("1_samuel.json"), FIRST_SAMUEL).unwrap();
        let config = Config { source: dir.path().to_string_lossy().into_owned(), ..Config::default() };

        let (name, store) = open_store(&BookIndex::canonical(), "1 samuel", &config).await.unwrap();
        assert_eq!(name, "1 Samuel");
        assert_eq!(store.chapter_count(), 1);
    }

    #[tokio::test]
    async fn unknown_book_is_refused() {
        let config = Config::default();
        assert!(open_store(&BookIndex::canonical(), "Hezekiah", &config).await.is_err());
    }
}
