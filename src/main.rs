use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

use vernum::commands;
use vernum::output::{print_error, Output, OutputFormat};
use vernum::store::Store;
use vernum::types::BuildResult;

#[derive(Parser)]
#[command(name = "vernum")]
#[command(about = "Build version-number tool: templates, build-count ordinals, and per-project history")]
#[command(version = env!("VERNUM_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new vernum store
    Init {
        /// Path to initialize (default: current directory)
        #[arg(value_name = "PATH")]
        path: Option<PathBuf>,

        /// Recreate .vernum/ directory if it exists
        #[arg(long)]
        force: bool,
    },

    /// Compute and record the next version number
    #[command(visible_alias = "bump")]
    Next {
        /// Version-number template, e.g. "1.${BUILD_MONTH}.${BUILDS_TODAY}"
        template: String,

        /// Don't advance counters past failed builds
        #[arg(long, overrides_with = "no_skip_failed_builds")]
        skip_failed_builds: bool,

        /// Advance counters past failed builds, overriding the store config
        #[arg(long, overrides_with = "skip_failed_builds")]
        no_skip_failed_builds: bool,

        /// Literal prefix forced onto the front of the result
        #[arg(long)]
        prefix: Option<String>,

        /// Project start date (YYYY-MM-DD)
        #[arg(long)]
        start_date: Option<String>,

        /// Extra KEY=VALUE pairs layered over the process environment
        #[arg(long = "env", value_parser = parse_env_pair, action = clap::ArgAction::Append)]
        env: Vec<(String, String)>,
    },

    /// Amend the recorded result of a build
    Record {
        /// Result: success, unstable, failure, or aborted
        #[arg(value_parser = parse_result)]
        result: BuildResult,

        /// Build number (latest if not specified)
        #[arg(long)]
        build: Option<u32>,
    },

    /// List recorded builds, newest first
    #[command(visible_alias = "log")]
    History {
        /// Show at most this many builds
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },

    /// Show the persisted version info of one build
    Show {
        /// Build number (latest if not specified)
        build: Option<u32>,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        shell: Shell,
    },
}

fn parse_result(s: &str) -> Result<BuildResult, String> {
    s.parse::<BuildResult>().map_err(|e| e.to_string())
}

fn parse_env_pair(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("invalid environment pair: '{}'. Use KEY=VALUE", s)),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Human
    };

    let out = Output::new(format, cli.verbose);

    if let Err(e) = run(cli, &out) {
        print_error(&e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn run(cli: Cli, out: &Output) -> anyhow::Result<()> {
    // Handle commands that don't require an existing store
    match &cli.command {
        Commands::Completion { shell } => {
            generate_completions(*shell);
            return Ok(());
        }
        Commands::Init { path, force } => {
            let opts = commands::init::InitOptions {
                path: path.clone(),
                force: *force,
            };
            return commands::init(opts, out);
        }
        _ => {}
    }

    // Load the store for all other commands
    let mut store = Store::load()?;

    match cli.command {
        Commands::Next {
            template,
            skip_failed_builds,
            no_skip_failed_builds,
            prefix,
            start_date,
            env,
        } => {
            // Unset flags fall back to the store config
            let skip = match (skip_failed_builds, no_skip_failed_builds) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            let opts = commands::next::NextOptions {
                template,
                skip_failed_builds: skip,
                version_prefix: prefix,
                project_start_date: start_date,
                env,
            };
            commands::next(&mut store, opts, out)
        }

        Commands::Record { result, build } => {
            let opts = commands::record::RecordOptions { result, build };
            commands::record(&mut store, opts, out)
        }

        Commands::History { limit } => {
            let opts = commands::history::HistoryOptions { limit };
            commands::history(&store, opts, out)
        }

        Commands::Show { build } => {
            let opts = commands::show::ShowOptions { build };
            commands::show(&store, opts, out)
        }

        Commands::Init { .. } => unreachable!(),
        Commands::Completion { .. } => unreachable!(),
    }
}

fn generate_completions(shell: Shell) {
    use clap::CommandFactory;
    use clap_complete::generate;

    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut std::io::stdout());
}
