//! Binary entrypoint for the manse CLI.
//!
//! Commands:
//! - `play` - run a game session on stdin/stdout
//! - `init` - create a starter `manse.toml` and the sample world file
//! - `status` - print a summary of the save slot
//!
//! See the library crate docs for module-level details: `manse::`.
use std::io::BufRead;

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::{info, warn};

use manse::config::Config;
use manse::engine::{
    channel_port, keys, sample_world, GameEngine, PlayerState, SaveStore, SessionEnd, SledStore,
    WorldContent,
};

#[derive(Parser)]
#[command(name = "manse")]
#[command(about = "A turn-based text exploration engine")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "manse.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a game session on stdin/stdout
    Play,
    /// Initialize a new configuration and sample world
    Init,
    /// Show the current save slot
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config early to configure logging (except for Init which writes it)
    let pre_config = match cli.command {
        Commands::Init => None,
        _ => Config::load(&cli.config).await.ok(),
    };
    init_logging(&pre_config, cli.verbose);

    match cli.command {
        Commands::Play => {
            let config = match pre_config {
                Some(config) => config,
                None => {
                    warn!(
                        "could not load {}; running with built-in defaults",
                        cli.config
                    );
                    Config::default()
                }
            };
            info!("Starting manse v{}", env!("CARGO_PKG_VERSION"));
            play(config).await?;
        }
        Commands::Init => {
            info!("Initializing new game configuration");
            let config = Config::create_default(&cli.config).await?;
            info!("Configuration file created at {}", cli.config);

            tokio::fs::create_dir_all(&config.storage.data_dir).await?;
            let world_path = config.storage.world_path();
            if world_path.exists() {
                warn!(
                    "world file {} already exists; leaving it untouched",
                    world_path.display()
                );
            } else {
                let serialized = serde_json::to_string_pretty(&sample_world())?;
                tokio::fs::write(&world_path, serialized).await?;
                info!("Sample world written to {}", world_path.display());
            }
        }
        Commands::Status => {
            let config = pre_config.unwrap_or_default();
            let store = SledStore::open(config.storage.save_path())?;
            let player = PlayerState::load(&store, config.game.default_health);
            match player.location {
                Some(location) => println!("Location:  {location}"),
                None => println!("Location:  fresh slot (no game in progress)"),
            }
            println!("Health:    {}", player.health);
            println!("Inventory: {} item(s)", player.inventory.len());
            println!("Collected: {} item(s) ever", player.history.len());
            if let Some(saved_at) = store.read(keys::SAVED_AT)? {
                println!("Saved at:  {saved_at}");
            }
        }
    }

    Ok(())
}

/// Run the blocking session loop on a worker thread, bridged to stdin/stdout.
async fn play(config: Config) -> Result<()> {
    let world_path = config.storage.world_path();
    let world = match WorldContent::from_file(&world_path) {
        Ok(world) => world,
        Err(e) => {
            warn!(
                "could not load world file {}: {e}; using the bundled sample world",
                world_path.display()
            );
            WorldContent::from_world(sample_world())
        }
    };
    let store = SledStore::open(config.storage.save_path())?;
    let (port, feed) = channel_port(std::io::stdout());

    // Input side: a plain thread feeding completed stdin lines into the
    // single-slot channel. Lines typed while the engine is mid-turn are
    // dropped, not queued. The thread exits with the process.
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    feed.submit(&line);
                }
                Err(_) => break,
            }
        }
    });

    let game = config.game;
    let ending = tokio::task::spawn_blocking(move || {
        let mut engine = GameEngine::new(game, world, store, port);
        engine.run()
    })
    .await?;

    match ending {
        SessionEnd::Exit => info!("session ended from the menu"),
        SessionEnd::GameOver => info!("session ended in game over"),
        SessionEnd::Win => info!("session ended in a win"),
        SessionEnd::ResetRequested => info!("save slot reset; exiting for restart"),
    }
    println!();
    Ok(())
}

fn init_logging(config: &Option<Config>, verbosity: u8) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    // Base level from CLI verbosity overrides config
    let base_level = match verbosity {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(base_level);
    if let Some(cfg) = config {
        if verbosity == 0 {
            if let Ok(level) = cfg.logging.level.parse::<log::LevelFilter>() {
                builder.filter_level(level);
            }
        }
        if let Some(ref file) = cfg.logging.file {
            if let Ok(f) = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(file)
            {
                let write_mutex = std::sync::Arc::new(std::sync::Mutex::new(f));
                // Foreground sessions keep console logging alongside the
                // file; redirected stdout gets the file only.
                let is_tty = atty::is(atty::Stream::Stdout);
                builder.format(move |fmt, record| {
                    let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
                    let line = format!("{} [{}] {}", ts, record.level(), record.args());
                    if let Ok(mut guard) = write_mutex.lock() {
                        let _ = writeln!(guard, "{}", line);
                    }
                    if is_tty {
                        writeln!(fmt, "{}", line)
                    } else {
                        Ok(())
                    }
                });
            }
        } else {
            builder.format(|fmt, record| {
                let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
                writeln!(fmt, "{} [{}] {}", ts, record.level(), record.args())
            });
        }
    } else {
        builder.format(|fmt, record| {
            let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
            writeln!(fmt, "{} [{}] {}", ts, record.level(), record.args())
        });
    }
    let _ = builder.try_init();
}
