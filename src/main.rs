use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use dock_shell::app::Application;
use dock_shell::backend::NativeBackend;
use dock_shell::panel::console::{self, ConsoleBuffer};
use dock_shell::settings::{Settings, keys};
use dock_shell::tracing_sub;

const DEFAULT_CONFIG: &str = "dock-shell.conf";
const DEFAULT_TITLE: &str = "dock-shell";

#[derive(Parser, Debug)]
#[command(name = "dock-shell", about = "Frameless tool shell with dockable panels")]
struct Cli {
    /// Settings file path.
    #[arg(long, default_value = DEFAULT_CONFIG)]
    config: PathBuf,

    /// Theme name (dark, light). Overrides the persisted choice.
    #[arg(long)]
    theme: Option<String>,

    /// Target frame rate.
    #[arg(long)]
    fps: Option<f64>,

    /// Run frames as fast as they render.
    #[arg(long)]
    unlock_fps: bool,

    /// Window title.
    #[arg(long, default_value = DEFAULT_TITLE)]
    title: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, default_value = "debug")]
    log_level: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // The log buffer must exist before the subscriber's first write.
    console::install_global(ConsoleBuffer::new());
    let level = tracing_sub::parse_level(&cli.log_level).unwrap_or(tracing::Level::DEBUG);
    tracing_sub::init(level);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "fatal");
            eprintln!("dock-shell: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), dock_shell::error::ShellError> {
    let mut settings = Settings::load(&cli.config)?;
    if let Some(theme) = &cli.theme {
        settings.set_str(keys::THEME, theme);
    }
    if let Some(fps) = cli.fps {
        settings.set_float(keys::TARGET_FPS, fps);
    }
    if cli.unlock_fps {
        settings.set_bool(keys::FRAME_RATE_LOCKED, false);
    }

    let backend = NativeBackend::new()?;
    let mut app = Application::new(backend, settings);
    app.run(&cli.title)
}
