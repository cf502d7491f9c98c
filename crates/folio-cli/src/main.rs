use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio_core::contact::compose_mailto;
use folio_core::paginate::Pager;
use folio_core::providers::GitHubSource;
use folio_core::{classify, Aggregator, CardSlot, Config, ProjectDisplayRecord, LOAD_FAILED};

#[derive(Parser)]
#[command(name = "folio")]
#[command(version, about = "Portfolio of GitHub projects in the terminal", long_about = None)]
struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true, env = "FOLIO_CONFIG")]
    config: Option<PathBuf>,

    /// GitHub account to show (repeatable, replaces the configured list)
    #[arg(long = "account", global = true)]
    accounts: Vec<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Interactive viewer (the default)
    Tui,
    /// Print the featured projects and one page of side projects
    List {
        /// Viewport width in layout units; decides the page size
        #[arg(long, default_value_t = 1200.0)]
        width: f32,
        /// Side-project page to print, starting at 1
        #[arg(long, default_value_t = 1)]
        page: usize,
    },
    /// Build the mailto link for a message
    Compose {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        message: String,
        /// Hand the link to the system mail client as well
        #[arg(long)]
        open: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let interactive = matches!(cli.command, None | Some(Commands::Tui));

    // The TUI owns the terminal, so its logs go to a file
    let _guard = if interactive {
        Some(init_file_logging())
    } else {
        init_stderr_logging();
        None
    };

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if !cli.accounts.is_empty() {
        config.github.accounts = cli.accounts.clone();
    }
    tracing::debug!("Showing accounts {:?}", config.github.accounts);

    match cli.command {
        None | Some(Commands::Tui) => {
            let aggregator = build_aggregator(&config)?;
            folio_tui::run_tui(config, aggregator).await?;
        }
        Some(Commands::List { width, page }) => {
            list(&config, width, page).await?;
        }
        Some(Commands::Compose {
            name,
            email,
            message,
            open,
        }) => {
            let recipient = config
                .contact
                .recipient()
                .context("No contact address configured; set [contact] email in the config file")?;
            let url = compose_mailto(recipient.trim(), name.trim(), email.trim(), &message);
            println!("{}", url);
            if open {
                open::that(&url).context("Failed to open mail client")?;
            }
        }
    }

    Ok(())
}

fn init_stderr_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "folio=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Log to `folio.log` in the data dir (or the working directory)
///
/// The returned guard flushes the writer on drop, so keep it alive.
fn init_file_logging() -> tracing_appender::non_blocking::WorkerGuard {
    let dir = dirs::data_dir()
        .map(|d| d.join("folio"))
        .filter(|d| std::fs::create_dir_all(d).is_ok())
        .unwrap_or_else(|| PathBuf::from("."));
    let file_appender = tracing_appender::rolling::never(dir, "folio.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "folio=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false),
        )
        .init();

    guard
}

fn build_aggregator(config: &Config) -> anyhow::Result<Aggregator> {
    let source = GitHubSource::new(&config.github.api_url)?;
    Ok(Aggregator::new(Box::new(source)))
}

fn print_record(number: usize, record: &ProjectDisplayRecord) {
    println!("  {:>3}. {}", number, record.title);
    println!("       {}", record.description);
    if let Some(link) = &record.link {
        println!("       {}", link);
    }
}

async fn list(config: &Config, width: f32, page: usize) -> anyhow::Result<()> {
    let aggregator = build_aggregator(config)?;
    let repos = aggregator
        .load_all(&config.github.accounts)
        .await
        .context(LOAD_FAILED)?;
    let classification = classify(&repos, &config.featured, config.classify.exclusion);

    println!("{}", CardSlot::Featured);
    for (i, record) in classification.featured.iter().enumerate() {
        print_record(i + 1, record);
    }

    // Pages past the end wrap around, same as the "next" control
    let mut pager = Pager::new(config.layout.breakpoints(), width);
    for _ in 1..page.max(1) {
        pager.next(classification.residual.len());
    }
    let window = pager.window();

    println!();
    println!(
        "{} (page {}/{})",
        CardSlot::Side,
        window.index + 1,
        pager.page_count(classification.residual.len())
    );
    for (i, record) in pager.slice(&classification.residual).iter().enumerate() {
        print_record(window.start() + i + 1, record);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_accounts_repeat_and_are_global() {
        let cli = Cli::parse_from(["folio", "list", "--account", "a", "--account", "b", "--page", "2"]);
        assert_eq!(cli.accounts, vec!["a", "b"]);
        assert!(matches!(cli.command, Some(Commands::List { page: 2, .. })));
    }

    #[test]
    fn test_no_subcommand_means_tui() {
        let cli = Cli::parse_from(["folio"]);
        assert!(cli.command.is_none());
    }
}
