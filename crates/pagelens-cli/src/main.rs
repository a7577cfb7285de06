use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use pagelens_cli::OutputFormat;
use pagelens_cli::commands::{self, analyze::AnalyzeArgs};

#[derive(Parser)]
#[command(name = "pagelens")]
#[command(author, version)]
#[command(
    about = "Analyze landing pages for conversion issues",
    long_about = "PageLens loads a page in a real browser, scores its speed, fonts, images, \
                  calls to action, whitespace and social proof, and tells you what to fix first."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Pretty)]
    format: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a page and print the scored report
    Analyze(AnalyzeArgs),

    /// Generate shell completion scripts
    #[command(after_help = commands::completion::AFTER_HELP)]
    Completion {
        /// Target shell
        #[arg(long, value_enum)]
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match cli.command {
        Commands::Analyze(args) => commands::analyze::execute(args, cli.format).await,
        Commands::Completion { shell } => {
            commands::completion::execute(shell, &mut Cli::command())
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new(
            "pagelens=debug,pagelens_cli=debug,pagelens_core=debug,pagelens_detectors=debug,pagelens_browser=debug",
        )
    } else {
        EnvFilter::new("pagelens=info,pagelens_cli=info,pagelens_core=info,pagelens_browser=warn")
    };

    // Reports go to stdout; keep logs off it
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}
