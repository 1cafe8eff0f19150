use clap::Parser;
use std::fs::File;
use std::path::PathBuf;
use std::time::Duration;

use cmdterm::actions::pty::{LaunchOptions, ShellMode, DEFAULT_SHELL};
use cmdterm::data::state::AppState;
use cmdterm::ui::app::{self, Settings};

/// Run shell commands in a pty and watch their output
#[derive(Parser, Debug)]
#[command(name = "cmdterm")]
#[command(version, about, long_about = None)]
struct Args {
    /// Shell used to interpret commands
    #[arg(long, value_name = "PATH", default_value = DEFAULT_SHELL)]
    shell: PathBuf,

    /// How submitted text is turned into a process
    #[arg(long, value_enum, default_value_t = ShellMode::Verbatim)]
    mode: ShellMode,

    /// Working directory for commands (default: current directory)
    #[arg(long, value_name = "DIR")]
    cwd: Option<PathBuf>,

    /// UI refresh period in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 100)]
    tick_ms: u64,

    /// CPU/RAM sampling period in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 500)]
    telemetry_ms: u64,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();

    // The terminal belongs to the TUI, so logs only go to a file
    if let Some(path) = &args.log_file {
        let file = match File::create(path) {
            Ok(f) => f,
            Err(e) => {
                eprintln!("Error opening log file {}: {}", path.display(), e);
                std::process::exit(1);
            }
        };
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .target(env_logger::Target::Pipe(Box::new(file)))
            .init();
    }

    if let Some(dir) = &args.cwd {
        if !dir.is_dir() {
            eprintln!("Error: {} is not a directory", dir.display());
            std::process::exit(1);
        }
    }

    let settings = Settings {
        tick: Duration::from_millis(args.tick_ms.max(1)),
        telemetry_interval: Duration::from_millis(args.telemetry_ms.max(1)),
        launch: LaunchOptions {
            shell: args.shell,
            mode: args.mode,
            cwd: args.cwd,
            ..LaunchOptions::default()
        },
    };
    log::info!("starting with {:?}", settings);

    let mut state = AppState::new();
    if let Err(e) = app::run(&mut state, &settings) {
        eprintln!("Error running TUI: {}", e);
        std::process::exit(1);
    }
}
