//! Main entry point for the chess ledger desk tool
//!
//! Loads configuration, opens the JSON data directory and runs one ledger
//! command against it.

use anyhow::{anyhow, Result};
use chess_ledger::config::AppConfig;
use chess_ledger::engine::{GameReport, Ledger};
use chess_ledger::rating::EloRatingCalculator;
use chess_ledger::storage::{DataStore, InMemoryStore, JsonFileStore};
use chess_ledger::types::{GameResult, NewCompetition, NewPlayer, RatingChange};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};

/// Chess Ledger - players, competitions, games and Elo ratings
#[derive(Parser)]
#[command(
    name = "chess-ledger",
    version,
    about = "Record chess games and keep Elo ratings up to date",
    long_about = "Chess Ledger keeps a registry of players and competitions in a JSON data \
                 directory, records games move by move, and applies a tiered K-factor Elo \
                 update to both players when a game is finished."
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Data directory override
    #[arg(long, value_name = "DIR", help = "Override the data directory")]
    data_dir: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Enable debug mode
    #[arg(short, long, help = "Enable debug mode with verbose logging")]
    debug: bool,

    /// Dry run mode (validate config and exit)
    #[arg(
        long,
        help = "Validate configuration, or run the command without touching the data directory"
    )]
    dry_run: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Manage players
    #[command(subcommand)]
    Player(PlayerCommand),
    /// Manage competitions and their rosters
    #[command(subcommand)]
    Competition(CompetitionCommand),
    /// Record games
    #[command(subcommand)]
    Game(GameCommand),
    /// Show players ordered by rating
    Leaderboard,
}

#[derive(Subcommand)]
enum PlayerCommand {
    /// Register a new player
    Add {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        /// Date of birth (YYYY-MM-DD)
        #[arg(long)]
        born: Option<NaiveDate>,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        phone: String,
        /// Starting rating; the configured initial rating when omitted
        #[arg(long)]
        rating: Option<i32>,
    },
    /// List all players
    List,
    /// Override a player's rating
    UpdateRating { id: u32, rating: i32 },
    /// Delete a player
    Delete { id: u32 },
}

#[derive(Subcommand)]
enum CompetitionCommand {
    /// Create a competition
    Add {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        location: String,
        /// First day (YYYY-MM-DD)
        #[arg(long)]
        start: Option<NaiveDate>,
        /// Last day (YYYY-MM-DD)
        #[arg(long)]
        end: Option<NaiveDate>,
    },
    /// Replace a competition's name, location and dates
    Update {
        id: u32,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        location: String,
        /// First day (YYYY-MM-DD)
        #[arg(long)]
        start: Option<NaiveDate>,
        /// Last day (YYYY-MM-DD)
        #[arg(long)]
        end: Option<NaiveDate>,
    },
    /// List competitions with roster and game counts
    List,
    /// Register a player in a competition
    Register { competition: u32, player: u32 },
    /// Remove a player from a competition
    Unregister { competition: u32, player: u32 },
}

#[derive(Subcommand)]
enum GameCommand {
    /// Record a complete game and apply the rating update
    Record {
        #[arg(long)]
        competition: u32,
        #[arg(long)]
        white: u32,
        #[arg(long)]
        black: u32,
        /// Space-separated moves, e.g. "e4 e5 Nf3"
        #[arg(long, default_value = "")]
        moves: String,
        #[arg(long, value_enum)]
        result: ResultArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ResultArg {
    White,
    Black,
    Draw,
}

impl From<ResultArg> for GameResult {
    fn from(arg: ResultArg) -> Self {
        match arg {
            ResultArg::White => GameResult::WhiteWins,
            ResultArg::Black => GameResult::BlackWins,
            ResultArg::Draw => GameResult::Draw,
        }
    }
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Display startup banner with service information
fn display_startup_banner(config: &AppConfig) {
    info!("♞ Chess Ledger {}", chess_ledger::VERSION);
    info!("   Service: {}", config.service.name);
    info!("   Log level: {}", config.service.log_level);
    info!("   Data directory: {}", config.storage.data_dir.display());
    info!("   Initial rating: {}", config.rating.initial_rating);
    info!(
        "   K-factors: {} / {} (from {}) / {} (from {})",
        config.rating.provisional_k,
        config.rating.intermediate_k,
        config.rating.intermediate_threshold,
        config.rating.established_k,
        config.rating.established_threshold
    );
}

/// Load and merge configuration from file/environment and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    // Apply CLI overrides
    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if args.debug {
        config.service.log_level = "debug".to_string();
    }

    if let Some(data_dir) = &args.data_dir {
        config.storage.data_dir = data_dir.clone();
    }

    chess_ledger::config::validate_config(&config)?;
    Ok(config)
}

/// In-memory copy of the data directory for dry runs
///
/// Reads the files only when the directory already exists and never creates it.
fn dry_run_store(data_dir: &Path) -> InMemoryStore {
    if !data_dir.is_dir() {
        info!("Dry run: {} does not exist, starting empty", data_dir.display());
        return InMemoryStore::new();
    }

    let disk = JsonFileStore::new(data_dir).ok();
    let players = disk
        .as_ref()
        .and_then(|s| s.load_players().ok())
        .unwrap_or_default();
    let competitions = disk
        .as_ref()
        .and_then(|s| s.load_competitions().ok())
        .unwrap_or_default();
    InMemoryStore::with_data(players, competitions)
}

fn open_ledger(config: &AppConfig, dry_run: bool) -> Result<Ledger> {
    let store: Arc<dyn DataStore> = if dry_run {
        // Seed from disk when possible so the dry run sees real ids
        Arc::new(dry_run_store(&config.storage.data_dir))
    } else {
        Arc::new(JsonFileStore::new(&config.storage.data_dir)?)
    };

    let calculator = EloRatingCalculator::new(config.rating.clone())?;
    Ok(Ledger::with_calculator(store, Arc::new(calculator)))
}

fn format_change(label: &str, change: &Option<RatingChange>) -> String {
    match change {
        Some(change) => format!(
            "{} #{}: {} -> {} ({:+})",
            label,
            change.player_id,
            change.old_rating,
            change.new_rating,
            change.delta()
        ),
        None => format!("{}: rating unchanged", label),
    }
}

fn print_report(report: &GameReport) {
    println!(
        "Game #{} in competition #{}: {} after {} moves",
        report.game_id, report.competition_id, report.result, report.move_count
    );
    println!("  {}", format_change("White", &report.white));
    println!("  {}", format_change("Black", &report.black));
    if !report.archived {
        println!("  warning: competition not found, game was not archived");
    }
}

fn run_player(ledger: &mut Ledger, command: PlayerCommand) -> Result<()> {
    match command {
        PlayerCommand::Add {
            first_name,
            last_name,
            born,
            email,
            phone,
            rating,
        } => {
            let id = ledger.add_player(NewPlayer {
                first_name,
                last_name,
                date_of_birth: born,
                email,
                phone_number: phone,
                elo_rating: rating,
            })?;
            println!("Added player #{}", id);
        }
        PlayerCommand::List => {
            for player in ledger.players() {
                println!(
                    "#{:<4} {:<30} {:>5}",
                    player.id,
                    player.full_name(),
                    player.elo_rating
                );
            }
        }
        PlayerCommand::UpdateRating { id, rating } => {
            ledger.set_player_rating(id, rating)?;
            println!("Player #{} now rated {}", id, rating.max(0));
        }
        PlayerCommand::Delete { id } => {
            if !ledger.delete_player(id) {
                return Err(anyhow!("Player #{} not found", id));
            }
            println!("Deleted player #{}", id);
        }
    }
    Ok(())
}

fn run_competition(ledger: &mut Ledger, command: CompetitionCommand) -> Result<()> {
    match command {
        CompetitionCommand::Add {
            name,
            location,
            start,
            end,
        } => {
            let id = ledger.add_competition(NewCompetition {
                name,
                location,
                start_date: start,
                end_date: end,
            })?;
            println!("Added competition #{}", id);
        }
        CompetitionCommand::Update {
            id,
            name,
            location,
            start,
            end,
        } => {
            ledger.update_competition(
                id,
                NewCompetition {
                    name,
                    location,
                    start_date: start,
                    end_date: end,
                },
            )?;
            println!("Updated competition #{}", id);
        }
        CompetitionCommand::List => {
            for competition in ledger.competitions() {
                println!(
                    "#{:<4} {:<30} {:>3} players {:>4} games",
                    competition.id,
                    competition.name,
                    competition.roster_size(),
                    competition.games().len()
                );
            }
        }
        CompetitionCommand::Register {
            competition,
            player,
        } => {
            if ledger.register_player(competition, player) {
                println!("Registered player #{} in competition #{}", player, competition);
            } else {
                println!(
                    "Player #{} was not registered (already registered or unknown competition)",
                    player
                );
            }
        }
        CompetitionCommand::Unregister {
            competition,
            player,
        } => {
            if ledger.unregister_player(competition, player) {
                println!("Removed player #{} from competition #{}", player, competition);
            } else {
                println!("Player #{} was not registered", player);
            }
        }
    }
    Ok(())
}

fn run_game(ledger: &mut Ledger, command: GameCommand) -> Result<()> {
    match command {
        GameCommand::Record {
            competition,
            white,
            black,
            moves,
            result,
        } => {
            ledger.start_game(competition, white, black)?;
            for notation in moves.split_whitespace() {
                if let Err(e) = ledger.add_move(notation) {
                    ledger.cancel_game();
                    return Err(e.into());
                }
            }
            let report = ledger.finish_game(result.into())?;
            print_report(&report);
        }
    }
    Ok(())
}

fn run(ledger: &mut Ledger, command: Command) -> Result<()> {
    match command {
        Command::Player(command) => run_player(ledger, command),
        Command::Competition(command) => run_competition(ledger, command),
        Command::Game(command) => run_game(ledger, command),
        Command::Leaderboard => {
            for (rank, player) in ledger.leaderboard().iter().enumerate() {
                println!(
                    "{:>3}. {:<30} {:>5}",
                    rank + 1,
                    player.full_name(),
                    player.elo_rating
                );
            }
            Ok(())
        }
    }
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration (CLI args can override environment/config file)
    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    // Initialize logging early (before any other operations)
    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    display_startup_banner(&config);

    let Some(command) = args.command else {
        if args.dry_run {
            info!("Configuration validation successful");
        }
        return Ok(());
    };

    let mut ledger = match open_ledger(&config, args.dry_run) {
        Ok(ledger) => ledger,
        Err(e) => {
            error!("Failed to open ledger: {}", e);
            std::process::exit(1);
        }
    };

    if args.dry_run {
        info!("Dry run: changes will not be written");
    }

    let stats = ledger.stats();
    info!(
        "Ledger ready - {} players, {} competitions, {} games",
        stats.players, stats.competitions, stats.games_archived
    );

    run(&mut ledger, command)
}
