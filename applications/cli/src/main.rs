/// Flow Player - terminal host
use clap::Parser;
use flow_cli::{command::HELP, render, App, CliConfig, Step};
use flow_core::KeyValueStore;
use flow_session::Signal;
use flow_storage::{FileStore, MemoryStore};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "flow")]
#[command(about = "Flow Player in the terminal", long_about = None)]
struct Cli {
    /// Configuration file path (defaults to ./flow.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for persisted player state
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Keep player state in memory only
    #[arg(long, conflicts_with = "data_dir")]
    memory: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = CliConfig::load(cli.config.as_deref())?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    config.validate()?;

    // Initialize tracing; stdout belongs to the player
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let store: Box<dyn KeyValueStore> = if cli.memory {
        tracing::info!("Keeping player state in memory");
        Box::new(MemoryStore::new())
    } else {
        tracing::info!("Data directory: {}", config.data_dir.display());
        Box::new(FileStore::open(&config.data_dir)?)
    };

    run(App::new(store, config.playback))
}

fn run<S: KeyValueStore>(mut app: App<S>) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut out = io::stdout().lock();

    print_signals(&mut out, &app.start())?;
    writeln!(out, "Type `help` for commands.")?;

    let mut lines = stdin.lock().lines();
    loop {
        write!(out, "> ")?;
        out.flush()?;

        let Some(line) = lines.next() else {
            break;
        };

        let command = match flow_cli::parse_line(&line?) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(out, "{}", e)?;
                continue;
            }
        };

        match app.execute(command) {
            Step::Signals(signals) => print_signals(&mut out, &signals)?,
            Step::Help => writeln!(out, "{}", HELP)?,
            Step::Quit => break,
        }
    }

    tracing::info!("Player closed");
    Ok(())
}

fn print_signals(out: &mut impl Write, signals: &[Signal]) -> io::Result<()> {
    for signal in signals {
        render::write_signal(out, signal)?;
    }
    Ok(())
}
