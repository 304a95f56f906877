mod check;
mod config;
mod error;
mod play;
mod replay;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use caro_common::games::SessionRng;
use caro_common::games::caro::{
    BotType, CLASSIC_WIN_LENGTH, GameRecord, Mark, RECORD_FILE_EXTENSION, RoomSettings, WinRule,
    save_record,
};
use caro_common::id_generator::{generate_bot_name, generate_room_id};
use caro_common::{PlayerId, log, log_error, logger};

use check::CheckRequest;
use config::{Config, get_config_manager};
use error::CliError;

#[derive(Parser)]
#[command(name = "caro", version, about = "Five-in-a-row engine: check boards, play a bot, replay games")]
struct Args {
    #[arg(long)]
    use_log_prefix: bool,

    /// Config file, defaults to caro_cli_config.yaml next to the executable
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check whether the stone at ROW,COL completes a winning line
    Check {
        board: PathBuf,
        #[arg(long)]
        row: usize,
        #[arg(long)]
        col: usize,
        #[arg(long, value_enum)]
        mark: Option<MarkArg>,
        #[arg(long, default_value_t = CLASSIC_WIN_LENGTH)]
        win_length: usize,
    },
    /// Play against a bot on the terminal
    Play {
        #[arg(long)]
        size: Option<usize>,
        #[arg(long)]
        win_condition: Option<usize>,
        /// Always require five in a row
        #[arg(long)]
        classic: bool,
        #[arg(long, value_enum)]
        bot: Option<BotArg>,
        #[arg(long)]
        seed: Option<u64>,
        /// Where to save the game record
        #[arg(long)]
        record: Option<PathBuf>,
    },
    /// Replay a saved game record
    Replay { record: PathBuf },
}

#[derive(Clone, Copy, ValueEnum)]
enum MarkArg {
    X,
    O,
}

impl From<MarkArg> for Mark {
    fn from(mark: MarkArg) -> Self {
        match mark {
            MarkArg::X => Mark::X,
            MarkArg::O => Mark::O,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum BotArg {
    Random,
    Heuristic,
}

impl From<BotArg> for BotType {
    fn from(bot: BotArg) -> Self {
        match bot {
            BotArg::Random => BotType::Random,
            BotArg::Heuristic => BotType::Heuristic,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config_manager = get_config_manager(args.config.as_deref());
    let config_result = config_manager.get_config();
    let use_log_prefix = args.use_log_prefix
        || config_result.as_ref().is_ok_and(|config| config.use_log_prefix);
    logger::init_logger(use_log_prefix.then(|| "Caro".to_string()));

    let result = config_result
        .map_err(CliError::from)
        .and_then(|config| run(args.command, &config));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log_error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command, config: &Config) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();

    match command {
        Command::Check {
            board,
            row,
            col,
            mark,
            win_length,
        } => {
            let request = CheckRequest {
                row,
                col,
                mark: mark.map(Mark::from),
                win_length,
            };
            check::run_check_file(&board, &request, &mut stdout)?;
        }
        Command::Play {
            size,
            win_condition,
            classic,
            bot,
            seed,
            record,
        } => {
            let settings = RoomSettings {
                board_size: size.unwrap_or(config.room.board_size),
                win_condition: win_condition.unwrap_or(config.room.win_condition),
                win_rule: if classic { WinRule::Classic } else { config.room.win_rule },
                ..config.room.clone()
            };
            let bot_type = bot.map(BotType::from).unwrap_or(config.bot);
            let mut rng = seed.map(SessionRng::new).unwrap_or_else(SessionRng::from_random);
            log!("Starting offline game with seed {}", rng.seed());

            let human = PlayerId::new(config.player_name.clone());
            let bot_id = PlayerId::new(format!("{} (bot)", generate_bot_name(&mut rng)));
            let room_id = generate_room_id(&mut rng);

            let mut stdin = std::io::stdin().lock();
            let state = play::run_game(&mut stdin, &mut stdout, &settings, human, bot_id, bot_type, &mut rng)?;

            let record_path = record.or_else(|| {
                config
                    .record_dir
                    .as_ref()
                    .map(|dir| Path::new(dir).join(format!("{}.{}", room_id, RECORD_FILE_EXTENSION)))
            });
            if let Some(path) = record_path {
                save_record(&path, &GameRecord::from_game(&state, &settings, room_id))?;
                log!("Game record saved to {}", path.display());
            }
        }
        Command::Replay { record } => {
            replay::run_replay(&record, &mut stdout)?;
        }
    }

    Ok(())
}
