use crate::config::Validate;
use crate::games::SessionRng;
use crate::identifiers::PlayerId;
use crate::log;
use super::board::Board;
use super::error::MoveError;
use super::settings::RoomSettings;
use super::types::{FirstPlayerMode, GameStatus, Mark, Position, WinningLine};
use super::win_detector::detect_win;

#[derive(Debug, Clone)]
pub struct CaroGameState {
    pub board: Board,
    pub win_length: usize,
    pub player_x: PlayerId,
    pub player_o: PlayerId,
    pub current_player: PlayerId,
    pub current_mark: Mark,
    pub status: GameStatus,
    pub last_move: Option<Position>,
    pub winning_line: Option<WinningLine>,
    pub moves: Vec<Position>,
    pub forfeited_by: Option<PlayerId>,
}

impl CaroGameState {
    /// `players[0]` is the host.
    pub fn new(
        settings: &RoomSettings,
        players: [PlayerId; 2],
        rng: &mut SessionRng,
    ) -> Result<Self, String> {
        settings.validate()?;
        let [host, guest] = players;
        if host == guest {
            return Err(format!("Player {} cannot play against themselves", host));
        }

        let (player_x, player_o) = match settings.first_player {
            FirstPlayerMode::Random => {
                if rng.random_bool() {
                    (host, guest)
                } else {
                    (guest, host)
                }
            }
            FirstPlayerMode::Host => (host, guest),
        };

        log!(
            "New {}x{} game, win length {}: X={} O={}",
            settings.board_size,
            settings.board_size,
            settings.win_length(),
            player_x,
            player_o
        );

        Ok(Self {
            board: Board::new(settings.board_size),
            win_length: settings.win_length(),
            current_player: player_x.clone(),
            player_x,
            player_o,
            current_mark: Mark::X,
            status: GameStatus::InProgress,
            last_move: None,
            winning_line: None,
            moves: Vec::new(),
            forfeited_by: None,
        })
    }

    pub fn place_mark(
        &mut self,
        player_id: &PlayerId,
        row: usize,
        col: usize,
    ) -> Result<GameStatus, MoveError> {
        if self.status != GameStatus::InProgress {
            return Err(MoveError::GameOver);
        }

        if player_id != &self.current_player {
            return Err(MoveError::NotYourTurn);
        }

        let position = Position::new(row, col);
        match self.board.get(row, col) {
            None => return Err(MoveError::OutOfBounds(position)),
            Some(Mark::Empty) => {}
            Some(_) => return Err(MoveError::CellOccupied(position)),
        }

        self.board.set(row, col, self.current_mark);
        self.last_move = Some(position);
        self.moves.push(position);

        self.check_game_over(row, col)?;

        if self.status == GameStatus::InProgress {
            self.switch_turn();
        }

        Ok(self.status)
    }

    fn switch_turn(&mut self) {
        if self.current_mark == Mark::X {
            self.current_mark = Mark::O;
            self.current_player = self.player_o.clone();
        } else {
            self.current_mark = Mark::X;
            self.current_player = self.player_x.clone();
        }
    }

    fn check_game_over(&mut self, row: usize, col: usize) -> Result<(), MoveError> {
        if let Some(line) = detect_win(&self.board, row, col, self.current_mark, self.win_length)? {
            self.status = match line.mark() {
                Mark::O => GameStatus::OWon,
                _ => GameStatus::XWon,
            };
            log!(
                "{} wins after {} moves with {}",
                self.current_player,
                self.moves.len(),
                line
            );
            self.winning_line = Some(line);
            return Ok(());
        }

        if self.board.is_full() {
            self.status = GameStatus::Draw;
            log!("Board full after {} moves, draw", self.moves.len());
        }
        Ok(())
    }

    pub fn get_winner(&self) -> Option<PlayerId> {
        match self.status {
            GameStatus::XWon => Some(self.player_x.clone()),
            GameStatus::OWon => Some(self.player_o.clone()),
            _ => None,
        }
    }

    pub fn mark_of(&self, player_id: &PlayerId) -> Option<Mark> {
        if player_id == &self.player_x {
            Some(Mark::X)
        } else if player_id == &self.player_o {
            Some(Mark::O)
        } else {
            None
        }
    }

    pub fn forfeit(&mut self, player_id: &PlayerId) -> Result<(), String> {
        if self.status != GameStatus::InProgress {
            return Err("Game is already over".to_string());
        }
        match self.mark_of(player_id) {
            Some(Mark::X) => self.status = GameStatus::OWon,
            Some(Mark::O) => self.status = GameStatus::XWon,
            _ => return Err(format!("Player {} is not in this game", player_id)),
        }
        self.forfeited_by = Some(player_id.clone());
        log!("{} forfeits", player_id);
        Ok(())
    }

    pub fn is_winning_cell(&self, row: usize, col: usize) -> bool {
        super::win_detector::is_winning_cell(row, col, self.winning_line.as_ref())
    }
}
