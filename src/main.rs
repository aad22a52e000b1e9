//! Terminal front end for the Game of Life grid simulator

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use life_grid::{
    config::{CliOverrides, OutputFormat, Settings},
    evolve_history,
    game_of_life::{
        create_example_patterns, load_grid_from_file, GridSimulator, IntervalTrigger, TickOutcome,
    },
    utils::{ColorOutput, Frame, GridFormatter},
    Grid,
};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "life_grid")]
#[command(about = "Conway's Game of Life on a fixed square grid")]
#[command(version = "0.1.0")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the simulation on a timer, rendering every generation
    Run {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Seed pattern file (overrides config)
        #[arg(short, long)]
        pattern: Option<PathBuf>,

        /// Grid side length (overrides config)
        #[arg(short, long)]
        side: Option<usize>,

        /// Milliseconds between generations (overrides config)
        #[arg(short, long)]
        interval_ms: Option<u64>,

        /// Pause after this many generations (overrides config)
        #[arg(short, long)]
        max_generations: Option<u64>,

        /// Output format (overrides config)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Evolve a pattern for a fixed number of generations without a timer
    Step {
        /// Seed pattern file
        #[arg(short, long)]
        pattern: PathBuf,

        /// Number of generations
        #[arg(short, long, default_value_t = 1)]
        generations: usize,

        /// Grid side length; defaults to the pattern's own size
        #[arg(short, long)]
        side: Option<usize>,
    },

    /// Write a default configuration and example patterns
    Setup {
        /// Target directory
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Run {
            config, pattern, side, interval_ms, max_generations, format
        } => {
            let overrides = CliOverrides { side, pattern, interval_ms, max_generations, format };
            run_command(config, overrides)
        }
        Commands::Step { pattern, generations, side } => {
            step_command(pattern, generations, side)
        }
        Commands::Setup { directory, force } => {
            setup_command(directory, force)
        }
    }
}

fn load_settings(config_path: &Path, overrides: &CliOverrides) -> Result<Settings> {
    let mut settings = if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        warn!(path = %config_path.display(), "config file not found, using defaults");
        Settings::default()
    };

    settings.merge_with_cli(overrides);
    settings.validate()
        .context("Configuration validation failed")?;
    Ok(settings)
}

/// Read the seed pattern, if any, and centre it on a board of `side`
fn seed_grid(pattern: Option<&Path>, side: usize) -> Result<Grid> {
    match pattern {
        Some(path) => {
            let pattern = load_grid_from_file(path)?;
            if pattern.side() == side {
                Ok(pattern)
            } else {
                pattern.embed_centered(side)
                    .with_context(|| format!("Failed to place pattern {}", path.display()))
            }
        }
        None => Ok(Grid::try_new(side)?),
    }
}

fn render(sim: &GridSimulator<IntervalTrigger>, settings: &Settings) -> Result<()> {
    let frame = Frame::new(sim.grid(), sim.generation(), sim.run_state());
    let output = GridFormatter::format_frame(&frame, settings.display.format, settings.display.show_coordinates)?;
    println!("{}", output);
    Ok(())
}

fn run_command(config_path: PathBuf, overrides: CliOverrides) -> Result<()> {
    let settings = load_settings(&config_path, &overrides)?;

    let mut sim = GridSimulator::new(settings.grid.side, settings.timer.interval(), IntervalTrigger::new());
    let seed = seed_grid(settings.grid.pattern.as_deref(), settings.grid.side)?;
    sim.load(seed).context("Failed to seed the grid")?;

    sim.start();
    render(&sim, &settings)?;
    drive(&mut sim, &settings)
}

/// Tick on every trigger deadline until the run stops or hits the generation limit
fn drive(sim: &mut GridSimulator<IntervalTrigger>, settings: &Settings) -> Result<()> {
    while let Some(deadline) = sim.trigger().next_deadline() {
        let now = Instant::now();
        if deadline > now {
            std::thread::sleep(deadline - now);
        }
        if !sim.trigger_mut().poll(Instant::now()) {
            continue;
        }

        match sim.tick() {
            TickOutcome::Skipped => break,
            TickOutcome::Advanced { generation, .. } => {
                if settings.display.max_generations.is_some_and(|max| generation >= max) {
                    sim.start();
                    render(sim, settings)?;
                    debug!(generation, "generation limit reached");
                    break;
                }
                render(sim, settings)?;
            }
            TickOutcome::Extinct { generation } => {
                render(sim, settings)?;
                if settings.display.format == OutputFormat::Text {
                    println!("{}", ColorOutput::warning(&format!(
                        "All cells died at generation {}", generation
                    )));
                }
            }
        }
    }

    Ok(())
}

fn step_command(pattern_path: PathBuf, generations: usize, side: Option<usize>) -> Result<()> {
    let seed = match side {
        Some(side) => seed_grid(Some(pattern_path.as_path()), side)?,
        None => load_grid_from_file(&pattern_path)?,
    };

    let history = evolve_history(seed, generations);
    for (i, grid) in history.iter().enumerate() {
        println!("Generation {} (Living: {}):", i, grid.living_count());
        println!("{}", GridFormatter::format_grid_compact(grid));
    }

    if history.last().is_some_and(Grid::is_empty) {
        println!("{}", ColorOutput::warning(&format!(
            "All cells died at generation {}", history.len() - 1
        )));
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up project structure..."));

    let config_dir = directory.join("config");
    let pattern_dir = directory.join("patterns");

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default().to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    create_example_patterns(&pattern_dir)
        .context("Failed to create example patterns")?;
    println!("Created example patterns in: {}", pattern_dir.display());

    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!("Run: life_grid run --pattern {}", pattern_dir.join("glider.txt").display());

    Ok(())
}
