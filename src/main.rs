use flappy::build_info;
use flappy::config::{self, GameConfig, GameMode};
use flappy::io::{terminal, CrosstermKeys, TerminalRenderer};
use flappy::utils::persistence;
use flappy::Game;
use ratatui::backend::CrosstermBackend;
use std::fs::OpenOptions;
use std::io;

const LOG_FILE: &str = "flappy.log";

/// Overrides taken from the command line.
#[derive(Debug, Default)]
struct CliArgs {
    seed: Option<u64>,
    mode: Option<GameMode>,
}

fn print_help() {
    println!("Flappy - terminal side-scroller\n");
    println!("Usage: flappy [options]\n");
    println!("Options:");
    println!("  --seed <n>     Use a fixed RNG seed");
    println!("  --mode <mode>  Preselect easy, medium or hard");
    println!("  --version      Show version information");
    println!("  --help         Show this help message");
    println!("\nSettings live in ~/.flappy/config.json; logs go to ~/.flappy/{}.", LOG_FILE);
}

fn exit_with_usage(message: &str) -> ! {
    eprintln!("{}", message);
    eprintln!("Run 'flappy --help' for usage.");
    std::process::exit(1);
}

fn parse_args() -> CliArgs {
    let mut parsed = CliArgs::default();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-v" => {
                println!("{}", build_info::version_line());
                std::process::exit(0);
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            "--seed" => {
                let value = args
                    .next()
                    .unwrap_or_else(|| exit_with_usage("--seed needs a value"));
                let seed = value
                    .parse::<u64>()
                    .unwrap_or_else(|_| exit_with_usage(&format!("Invalid seed: {}", value)));
                parsed.seed = Some(seed);
            }
            "--mode" => {
                let value = args
                    .next()
                    .unwrap_or_else(|| exit_with_usage("--mode needs a value"));
                let mode = value
                    .parse::<GameMode>()
                    .unwrap_or_else(|e: String| exit_with_usage(&e));
                parsed.mode = Some(mode);
            }
            other => exit_with_usage(&format!("Unknown argument: {}", other)),
        }
    }

    parsed
}

/// Send log output to ~/.flappy/flappy.log so it never lands on the game
/// screen. Logging stays off if the file cannot be opened.
fn init_logging() {
    let file = persistence::save_path(LOG_FILE).and_then(|path| {
        OpenOptions::new().create(true).append(true).open(path)
    });
    let Ok(file) = file else {
        return;
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
}

fn play(config: GameConfig) -> io::Result<()> {
    let renderer = TerminalRenderer::new(CrosstermBackend::new(io::stdout()))?;
    let mut game = Game::new(config, CrosstermKeys::new(), renderer)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    game.run()
}

fn main() -> io::Result<()> {
    let args = parse_args();
    init_logging();

    let mut config = config::load_or_create();
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(mode) = args.mode {
        config.mode = mode;
    }
    log::info!("starting {} with {:?}", build_info::version_line(), config);

    terminal::restore_on_panic();
    terminal::enter()?;

    let result = play(config);

    // Restore the terminal even if the game loop failed
    let restored = terminal::restore();
    if let Err(e) = &result {
        log::error!("game loop failed: {}", e);
    }
    result.and(restored)
}
