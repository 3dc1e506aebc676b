use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use confgrep::config::{
    default_config_path, find_config_file, get_config, load_config, ColorChoice, Config,
};
use confgrep::render::{render, RenderOptions};
use confgrep::ui::{self, Status};
use confgrep::{JsonlStore, KeywordQuery, Normalizer, PaperStore, Query, RegexpQuery, Searcher};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// confgrep - Grep security conference papers by keyword or regexp
#[derive(Parser, Debug)]
#[command(name = "confgrep")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Grep security conference papers by keyword or regexp", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (can be used multiple times for more verbosity: -v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Paper corpus (newline-delimited JSON), overrides the configured path
    #[arg(long, global = true)]
    corpus: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// When to color output
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum ColorArg {
    /// Color when stdout is a terminal
    Auto,
    /// Always color
    Always,
    /// Never color
    Never,
}

impl From<ColorArg> for ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => ColorChoice::Auto,
            ColorArg::Always => ColorChoice::Always,
            ColorArg::Never => ColorChoice::Never,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search papers by keywords or regular expressions
    #[command(alias = "s")]
    Search {
        /// Keywords separated by ',', e.g. 'linux,kernel,exploit'
        #[arg(long, short = 'k', conflicts_with = "regexp")]
        keywords: Option<String>,

        /// Regular expression every match must satisfy (repeatable)
        #[arg(long = "regexp", short = 'e')]
        regexp: Vec<String>,

        /// Show abstracts below each title
        #[arg(long, short)]
        abstracts: bool,

        /// Match titles only, ignoring abstracts
        #[arg(long)]
        title_only: bool,

        /// Color output
        #[arg(long, value_enum)]
        color: Option<ColorArg>,

        /// Do not turn titles into terminal hyperlinks
        #[arg(long)]
        no_links: bool,
    },

    /// List the papers that do not have abstracts
    MissingAbstract,

    /// Show the conference ranking table
    #[command(alias = "ls")]
    Conferences,

    /// Write a default configuration file
    InitConfig {
        /// Where to write the file (default: user config directory)
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let env_filter = if cli.quiet { "error" } else { log_level };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("confgrep={}", env_filter)),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration from file if specified or found in default locations
    let config = if let Some(config_path) = &cli.config {
        load_config(config_path)
            .with_context(|| format!("failed to load config {}", config_path.display()))?
    } else if let Some(config_path) = find_config_file() {
        tracing::info!("Using config file: {}", config_path.display());
        load_config(&config_path)
            .with_context(|| format!("failed to load config {}", config_path.display()))?
    } else {
        get_config()?
    };

    let corpus = cli.corpus.clone().unwrap_or_else(|| config.corpus.path.clone());

    match cli.command {
        Commands::Search {
            keywords,
            regexp,
            abstracts,
            title_only,
            color,
            no_links,
        } => {
            let include_abstract = config.search.include_abstract && !title_only;

            // Compile the query before touching the corpus
            let query: Query = if regexp.is_empty() {
                let keywords = keywords.as_deref().unwrap_or_default();
                KeywordQuery::parse(keywords, include_abstract)?.into()
            } else {
                RegexpQuery::new(&regexp, include_abstract)?.into()
            };

            if query.is_empty() {
                tracing::warn!("No keyword is provided. Returning all the papers.");
            }

            let normalizer = Normalizer::for_language(&config.search.language)?;
            let searcher = Searcher::new(normalizer, config.ranking.table());

            let store = JsonlStore::open(&corpus)?;
            let papers = searcher.search(&store, &query)?;
            tracing::debug!("Found {} papers", papers.len());

            let color_enabled = color
                .map(ColorChoice::from)
                .unwrap_or(config.display.color)
                .enabled(ui::is_terminal());
            let options = RenderOptions {
                color: color_enabled,
                hyperlinks: color_enabled && config.display.hyperlinks && !no_links,
            };

            for line in render(&papers, &query, abstracts, &options) {
                println!("{}", line);
            }

            if !cli.quiet {
                ui::print_summary(papers.len());
            }
        }

        Commands::MissingAbstract => {
            let store = JsonlStore::open(&corpus)?;
            let papers = store.missing_abstract()?;
            let query: Query = KeywordQuery::new(Vec::<String>::new(), false)?.into();

            for line in render(&papers, &query, false, &RenderOptions::plain()) {
                println!("{}", line);
            }

            if !cli.quiet {
                ui::print_summary(papers.len());
            }
        }

        Commands::Conferences => {
            let table = config.ranking.table();
            println!("Conferences from lowest to highest tie-break priority:");
            for (idx, name) in table.names().iter().enumerate() {
                println!("  {:>2}  {}", idx, name);
            }
        }

        Commands::InitConfig { path, force } => {
            let path = path
                .or_else(|| cli.config.clone())
                .unwrap_or_else(default_config_path);

            if path.exists() && !force {
                bail!(
                    "config file {} already exists (use --force to overwrite)",
                    path.display()
                );
            }

            Config::default()
                .save(&path)
                .with_context(|| format!("failed to write {}", path.display()))?;

            if !cli.quiet {
                ui::print_status(
                    Status::Success,
                    &format!("Wrote default configuration to {}", path.display()),
                );
            }
        }
    }

    Ok(())
}
