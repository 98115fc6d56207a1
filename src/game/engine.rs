//! The game aggregate and action handling.
//!
//! Every action is checked in full against copies of the tiles involved
//! before anything is mutated, so a rejected request leaves the game exactly
//! as it was. Accepted actions commit in one go: history first, then the
//! table, then the hand.

use log::{debug, info, warn};

use super::action::{ActionKind, ActionRequest, ActionResponse};
use super::builder::GameBuilder;
use super::state::{FieldView, State};
use crate::core::{GameError, GameRng, GameRngState, PlayerId, PlayerMap, Roster, RulesConfig};
use crate::rules::{Combination, Stage};
use crate::table::{Field, History, StepId};
use crate::tiles::{Bank, Hand, Tile};

/// The seat that opens the game: the first seat holding the numerically
/// largest tile. Ties go to the lower seat.
#[must_use]
pub fn leading_player(hands: &PlayerMap<Hand>) -> PlayerId {
    let mut leader = PlayerId::new(0);
    let mut best = 0;
    for (seat, hand) in hands.iter() {
        let largest = hand.largest_number();
        if largest > best {
            best = largest;
            leader = seat;
        }
    }
    leader
}

/// One rummy game: players, tiles, table and turn.
#[derive(Clone, Debug)]
pub struct Game {
    config: RulesConfig,
    roster: Roster,
    hands: PlayerMap<Hand>,
    stages: PlayerMap<Stage>,
    ready: PlayerMap<bool>,
    bank: Bank,
    field: Field,
    history: History,
    turn: PlayerId,
    started: bool,
    finished: bool,
    winner: Option<String>,
    rng: GameRng,
}

impl Game {
    /// Create a game for `players` with default rules.
    ///
    /// ```
    /// use rummy_engine::game::Game;
    ///
    /// let mut game = Game::new(["alice", "bob"]).unwrap();
    /// game.start().unwrap();
    ///
    /// assert_eq!(game.hand_size("alice").unwrap(), 14);
    /// assert_eq!(game.bank_size(), 106 - 28);
    /// assert!(Game::new(["alice"]).is_err());
    /// ```
    pub fn new<I, S>(players: I) -> Result<Self, GameError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        GameBuilder::new().players(players).build()
    }

    pub(super) fn from_parts(config: RulesConfig, roster: Roster, rng: GameRng) -> Self {
        let n = roster.len();
        Self {
            bank: Bank::full(&config),
            hands: PlayerMap::with_default(n),
            stages: PlayerMap::with_default(n),
            ready: PlayerMap::with_value(n, false),
            field: Field::new(),
            history: History::new(),
            turn: PlayerId::new(0),
            started: false,
            finished: false,
            winner: None,
            config,
            roster,
            rng,
        }
    }

    // === Setup ===

    /// Shuffle the full pack, deal every player a hand and pick the opening
    /// player. Calling it again redeals from scratch.
    pub fn start(&mut self) -> Result<(), GameError> {
        self.check_player_count()?;
        self.reset_table();
        self.bank.shuffle(&mut self.rng);

        for seat in PlayerId::all(self.roster.len()) {
            let tiles = self.bank.draw(self.config.hand_size);
            self.hands[seat].extend(tiles);
        }

        self.begin();
        Ok(())
    }

    /// Start with the given hands, one per seat in seat order. Each tile is
    /// taken out of the pack; the rest is shuffled into the bank.
    pub fn start_with_hands(&mut self, hands: &[Vec<Tile>]) -> Result<(), GameError> {
        self.check_player_count()?;
        let n = self.roster.len();
        if hands.len() != n {
            return Err(GameError::InvalidConfig(format!(
                "expected {n} hands, got {}",
                hands.len()
            )));
        }

        let mut bank = Bank::full(&self.config);
        let mut dealt: PlayerMap<Hand> = PlayerMap::with_default(n);
        for (seat, tiles) in PlayerId::all(n).zip(hands) {
            for tile in tiles {
                let taken = bank
                    .take(tile)
                    .ok_or_else(|| GameError::TileNotInBank(tile.to_string()))?;
                dealt[seat].push(taken);
            }
        }
        bank.shuffle(&mut self.rng);

        self.reset_table();
        self.bank = bank;
        self.hands = dealt;
        self.begin();
        Ok(())
    }

    fn check_player_count(&self) -> Result<(), GameError> {
        let (min, max) = (self.config.min_players, self.config.max_players);
        if (min..=max).contains(&self.roster.len()) {
            Ok(())
        } else {
            Err(GameError::PlayerCount { min, max })
        }
    }

    fn reset_table(&mut self) {
        let n = self.roster.len();
        self.bank = Bank::full(&self.config);
        self.hands = PlayerMap::with_default(n);
        self.stages = PlayerMap::with_default(n);
        self.field = Field::new();
        self.history = History::new();
        self.finished = false;
        self.winner = None;
    }

    fn begin(&mut self) {
        self.turn = leading_player(&self.hands);
        self.started = true;
        info!(
            "game started with {} players, {} opens",
            self.roster.len(),
            self.name(self.turn)
        );
    }

    // === Lobby ===

    /// Register a player before the game starts.
    pub fn add_player(&mut self, name: &str) -> Result<PlayerId, GameError> {
        if self.started {
            return Err(GameError::AlreadyStarted);
        }
        let (min, max) = (self.config.min_players, self.config.max_players);
        if self.roster.len() >= max {
            return Err(GameError::PlayerCount { min, max });
        }

        let seat = self
            .roster
            .push(name)
            .ok_or_else(|| GameError::DuplicatePlayer(name.to_string()))?;
        self.hands.push(Hand::new());
        self.stages.push(Stage::default());
        self.ready.push(false);

        info!("{name} joined at {seat}");
        Ok(seat)
    }

    /// Mark a player ready. Once every registered player is ready and there
    /// are enough of them, the game starts. Returns whether it has started.
    pub fn mark_ready(&mut self, name: &str) -> Result<bool, GameError> {
        if self.started {
            return Err(GameError::AlreadyStarted);
        }
        let seat = self.seat_of(name)?;
        self.ready[seat] = true;
        debug!("{name} is ready");

        let all_ready = self.ready.values().all(|ready| *ready);
        if all_ready && self.roster.len() >= self.config.min_players {
            self.start()?;
        }
        Ok(self.started)
    }

    /// Remove a player. In a running game their hand goes back to the bank,
    /// the turn moves on if it was theirs, and a lone remaining player wins.
    pub fn remove_player(&mut self, name: &str) -> Result<(), GameError> {
        let seat = self.seat_of(name)?;
        self.roster.remove(name);
        let hand = self.hands.remove(seat);
        self.stages.remove(seat);
        self.ready.remove(seat);
        info!("{name} left the game");

        if !self.started {
            return Ok(());
        }
        if let Some(mut hand) = hand {
            self.bank.put_back(hand.take_all());
        }
        if self.finished {
            return Ok(());
        }

        let remaining = self.roster.len();
        if remaining < 2 {
            self.finished = true;
            self.turn = PlayerId::new(0);
            self.winner = self.roster.name(self.turn).map(str::to_string);
            if let Some(winner) = &self.winner {
                info!("{winner} wins, no opponents left");
            }
        } else if seat < self.turn {
            self.turn = PlayerId::new(self.turn.0 - 1);
        } else if seat == self.turn && self.turn.index() >= remaining {
            self.turn = PlayerId::new(0);
        }
        Ok(())
    }

    // === Actions ===

    /// Apply one action request. On error nothing changes.
    pub fn handle_action(&mut self, request: &ActionRequest) -> Result<(), GameError> {
        let result = self.try_action(request);
        match &result {
            Ok(()) => debug!("{} played {}", request.player, request.action),
            Err(e) => warn!("rejected {} from {}: {e}", request.action, request.player),
        }
        result
    }

    /// Handle a JSON request and produce the JSON response alongside the
    /// typed result.
    pub fn receive_action_request(&mut self, payload: &str) -> (String, Result<(), GameError>) {
        let result = match ActionRequest::from_json(payload) {
            Ok(request) => self.handle_action(&request),
            Err(e) => {
                warn!("unreadable action request: {e}");
                Err(e)
            }
        };
        (ActionResponse::from(&result).to_json(), result)
    }

    fn try_action(&mut self, request: &ActionRequest) -> Result<(), GameError> {
        let seat = self.seat_of(&request.player)?;
        if !self.started {
            return Err(GameError::NotStarted);
        }
        if self.finished {
            return Err(GameError::GameFinished);
        }
        if seat != self.turn {
            return Err(GameError::OutOfTurn);
        }

        // an expired timer turns any request into a pass
        let action = if request.timer_exceeded {
            ActionKind::Pass
        } else {
            request.action
        };
        self.require_stage(seat, action)?;
        match action {
            ActionKind::InitialMeld => self.initial_meld(seat, request)?,
            ActionKind::AddPiece => self.add_piece(seat, request)?,
            ActionKind::RemovePiece => self.remove_piece(seat, request)?,
            ActionKind::ReplacePiece => self.replace_piece(seat, request)?,
            ActionKind::AddCombination => self.add_combination(seat, request)?,
            ActionKind::ConcatCombinations => self.concat_combinations(seat, request)?,
            ActionKind::SplitCombination => self.split_combination(seat, request)?,
            ActionKind::Pass => self.draw_penalty(seat),
        }

        self.end_turn(seat);
        Ok(())
    }

    fn require_stage(&self, seat: PlayerId, action: ActionKind) -> Result<(), GameError> {
        let stage = self.stages[seat];
        if stage.permits(action) {
            Ok(())
        } else {
            Err(GameError::WrongStage { action, stage })
        }
    }

    fn draw_penalty(&mut self, seat: PlayerId) {
        let drawn = self.bank.draw(self.config.penalty_size);
        debug!("{} draws {} penalty tile(s)", self.name(seat), drawn.len());
        self.hands[seat].extend(drawn);
    }

    fn end_turn(&mut self, seat: PlayerId) {
        if self.hands[seat].is_empty() {
            self.finished = true;
            self.winner = Some(self.name(seat).to_string());
            info!("{} wins", self.name(seat));
        } else {
            self.turn = seat.next(self.roster.len());
            debug!("turn passes to {}", self.name(self.turn));
        }
    }

    /// Record a combination in the history and lay it on the table.
    fn place(&mut self, seat: PlayerId, combination: Combination) -> StepId {
        let owner = self.roster.name(seat).unwrap_or_default();
        let step = self.history.record(owner, combination.clone());
        self.field.insert(step, combination);
        step
    }

    fn initial_meld(&mut self, seat: PlayerId, request: &ActionRequest) -> Result<(), GameError> {
        let indices = some_pieces(request)?;
        let tiles = self.hands[seat].gather(indices)?;
        let combination = Combination::validate_initial_meld(tiles, &self.config)?;

        self.place(seat, combination);
        self.hands[seat].remove_many(indices);
        self.stages[seat] = Stage::MainGame;
        Ok(())
    }

    fn add_piece(&mut self, seat: PlayerId, request: &ActionRequest) -> Result<(), GameError> {
        let index = one_piece(request)?;
        let step = one_combination(request)?;
        let tile = *self.hands[seat].get(index)?;

        let mut tiles = self.field.get(step)?.tiles().to_vec();
        tiles.push(tile);
        let combination = Combination::validate(tiles, &self.config)?;

        self.field.remove(step);
        self.place(seat, combination);
        self.hands[seat].remove(index)?;
        Ok(())
    }

    fn remove_piece(&mut self, seat: PlayerId, request: &ActionRequest) -> Result<(), GameError> {
        let step = one_combination(request)?;
        let index = removed_piece(request)?;

        let mut tiles = self.field.get(step)?.tiles().to_vec();
        if index >= tiles.len() {
            return Err(GameError::IndexOutOfRange { index, step });
        }
        let taken = tiles.remove(index);
        let combination = Combination::validate(tiles, &self.config)?;

        self.field.remove(step);
        self.place(seat, combination);
        self.hands[seat].push(taken);
        Ok(())
    }

    fn replace_piece(&mut self, seat: PlayerId, request: &ActionRequest) -> Result<(), GameError> {
        let hand_index = one_piece(request)?;
        let step = one_combination(request)?;
        let index = removed_piece(request)?;
        let tile = *self.hands[seat].get(hand_index)?;

        let mut tiles = self.field.get(step)?.tiles().to_vec();
        if index >= tiles.len() {
            return Err(GameError::IndexOutOfRange { index, step });
        }
        let displaced = std::mem::replace(&mut tiles[index], tile);
        let combination = Combination::validate(tiles, &self.config)?;

        self.field.remove(step);
        self.place(seat, combination);
        let hand = &mut self.hands[seat];
        hand.remove(hand_index)?;
        hand.push(displaced);
        Ok(())
    }

    fn add_combination(&mut self, seat: PlayerId, request: &ActionRequest) -> Result<(), GameError> {
        let indices = some_pieces(request)?;
        let tiles = self.hands[seat].gather(indices)?;
        let combination = Combination::validate(tiles, &self.config)?;

        self.place(seat, combination);
        self.hands[seat].remove_many(indices);
        Ok(())
    }

    fn concat_combinations(
        &mut self,
        seat: PlayerId,
        request: &ActionRequest,
    ) -> Result<(), GameError> {
        let steps = request.used_combinations.as_slice();
        if steps.len() < 2 {
            return Err(GameError::CombinationCount {
                action: request.action,
                expected: "at least 2",
                got: steps.len(),
            });
        }

        let mut tiles = Vec::new();
        for (i, &step) in steps.iter().enumerate() {
            if steps[..i].contains(&step) {
                return Err(GameError::DuplicateCombination(step));
            }
            tiles.extend_from_slice(self.field.get(step)?.tiles());
        }
        let combination = Combination::validate(tiles, &self.config)?;

        for &step in steps {
            self.field.remove(step);
        }
        self.place(seat, combination);
        Ok(())
    }

    fn split_combination(
        &mut self,
        seat: PlayerId,
        request: &ActionRequest,
    ) -> Result<(), GameError> {
        let step = one_combination(request)?;
        let index = request.split_before_index.ok_or(GameError::MissingIndex {
            action: request.action,
            field: "splitBeforeIndex",
        })?;

        let tiles = self.field.get(step)?.tiles();
        if index >= tiles.len() {
            return Err(GameError::IndexOutOfRange { index, step });
        }
        let (left, right) = tiles.split_at(index);
        let invalid = |_| GameError::InvalidSplit { step, index };
        let left = Combination::validate(left.to_vec(), &self.config).map_err(invalid)?;
        let right = Combination::validate(right.to_vec(), &self.config).map_err(invalid)?;

        self.field.remove(step);
        self.place(seat, left);
        self.place(seat, right);
        Ok(())
    }

    // === Queries ===

    /// Snapshot of the game as `player` sees it.
    pub fn current_state(&self, player: &str) -> Result<State, GameError> {
        let seat = self.seat_of(player)?;
        let turn = self.started && !self.finished && self.turn == seat;
        let available_actions = if turn {
            self.stages[seat].available_actions().to_vec()
        } else {
            Vec::new()
        };

        let field = self
            .field
            .iter()
            .map(|(step, combination)| FieldView {
                step,
                owner: self
                    .history
                    .get(step)
                    .map(|s| s.player.clone())
                    .unwrap_or_default(),
                kind: combination.kind(),
                tiles: combination.tiles().to_vec(),
            })
            .collect();

        Ok(State {
            turn,
            hand: self.hands[seat].tiles().to_vec(),
            available_actions,
            started: self.started,
            finished: self.finished,
            winner: self.winner.clone(),
            field,
            bank_size: self.bank.len(),
        })
    }

    /// [`Game::current_state`] encoded as JSON.
    pub fn current_state_json(&self, player: &str) -> Result<String, GameError> {
        self.current_state(player)?.to_json()
    }

    fn seat_of(&self, name: &str) -> Result<PlayerId, GameError> {
        self.roster
            .seat(name)
            .ok_or_else(|| GameError::UnknownPlayer(name.to_string()))
    }

    fn name(&self, seat: PlayerId) -> &str {
        self.roster.name(seat).unwrap_or_default()
    }

    /// Number of live combinations on the table.
    #[must_use]
    pub fn field_size(&self) -> usize {
        self.field.len()
    }

    /// Number of tiles in a player's hand.
    pub fn hand_size(&self, player: &str) -> Result<usize, GameError> {
        Ok(self.hand(player)?.len())
    }

    /// A player's hand.
    pub fn hand(&self, player: &str) -> Result<&Hand, GameError> {
        Ok(&self.hands[self.seat_of(player)?])
    }

    /// A player's stage.
    pub fn stage(&self, player: &str) -> Result<Stage, GameError> {
        Ok(self.stages[self.seat_of(player)?])
    }

    /// Number of undealt tiles.
    #[must_use]
    pub fn bank_size(&self) -> usize {
        self.bank.len()
    }

    /// Tiles in the bank, every hand and on the table. Equals the pack size
    /// at every point of a running game.
    #[must_use]
    pub fn total_tiles(&self) -> usize {
        let in_hands: usize = self.hands.values().map(Hand::len).sum();
        self.bank.len() + in_hands + self.field.tile_count()
    }

    /// Name of the player to act, while the game is running.
    #[must_use]
    pub fn current_player(&self) -> Option<&str> {
        if self.started && !self.finished {
            self.roster.name(self.turn)
        } else {
            None
        }
    }

    /// Seat of the turn pointer. Stays on the winner once the game ends.
    #[must_use]
    pub fn turn(&self) -> PlayerId {
        self.turn
    }

    /// Registered names in seat order.
    pub fn players(&self) -> impl Iterator<Item = &str> {
        self.roster.names()
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.roster.len()
    }

    #[must_use]
    pub fn is_started(&self) -> bool {
        self.started
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    #[must_use]
    pub fn winner(&self) -> Option<&str> {
        self.winner.as_deref()
    }

    #[must_use]
    pub fn field(&self) -> &Field {
        &self.field
    }

    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    #[must_use]
    pub fn bank(&self) -> &Bank {
        &self.bank
    }

    #[must_use]
    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    /// RNG state, for reproducing a deal.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }
}

fn one_piece(request: &ActionRequest) -> Result<usize, GameError> {
    match request.added_pieces.as_slice() {
        [index] => Ok(*index),
        other => Err(GameError::PieceCount {
            action: request.action,
            expected: "exactly 1",
            got: other.len(),
        }),
    }
}

fn some_pieces(request: &ActionRequest) -> Result<&[usize], GameError> {
    match request.added_pieces.as_slice() {
        [] => Err(GameError::PieceCount {
            action: request.action,
            expected: "at least 1",
            got: 0,
        }),
        indices => Ok(indices),
    }
}

fn one_combination(request: &ActionRequest) -> Result<StepId, GameError> {
    match request.used_combinations.as_slice() {
        [step] => Ok(*step),
        other => Err(GameError::CombinationCount {
            action: request.action,
            expected: "exactly 1",
            got: other.len(),
        }),
    }
}

fn removed_piece(request: &ActionRequest) -> Result<usize, GameError> {
    request.removed_piece.ok_or(GameError::MissingIndex {
        action: request.action,
        field: "removedPiece",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ErrorClass;
    use crate::tiles::parse_tiles;

    fn two_player_game() -> Game {
        GameBuilder::new()
            .players(["alice", "bob"])
            .seed(7)
            .build()
            .unwrap()
    }

    fn rigged(alice: &str, bob: &str) -> Game {
        let mut game = two_player_game();
        game.start_with_hands(&[parse_tiles(alice).unwrap(), parse_tiles(bob).unwrap()])
            .unwrap();
        game
    }

    fn request(player: &str, action: ActionKind) -> ActionRequest {
        ActionRequest::new(player, action)
    }

    #[test]
    fn test_leading_player_first_max() {
        let hands: PlayerMap<Hand> = PlayerMap::new(3, |seat| match seat.index() {
            0 => parse_tiles("r3 J").unwrap().into_iter().collect(),
            1 => parse_tiles("k12 b2").unwrap().into_iter().collect(),
            _ => parse_tiles("o12").unwrap().into_iter().collect(),
        });
        assert_eq!(leading_player(&hands), PlayerId::new(1));

        let empty: PlayerMap<Hand> = PlayerMap::with_default(2);
        assert_eq!(leading_player(&empty), PlayerId::new(0));
    }

    #[test]
    fn test_start_deals_hands() {
        let mut game = two_player_game();
        game.start().unwrap();

        assert!(game.is_started());
        assert_eq!(game.hand_size("alice").unwrap(), 14);
        assert_eq!(game.hand_size("bob").unwrap(), 14);
        assert_eq!(game.bank_size(), 78);
        assert_eq!(game.total_tiles(), 106);
        assert_eq!(game.stage("bob").unwrap(), Stage::InitialMeld);
        assert_eq!(
            game.current_player(),
            game.roster.name(leading_player(&game.hands))
        );
    }

    #[test]
    fn test_same_seed_same_deal() {
        let mut a = two_player_game();
        let mut b = two_player_game();
        a.start().unwrap();
        b.start().unwrap();

        assert_eq!(a.hand("alice").unwrap(), b.hand("alice").unwrap());
        assert_eq!(a.bank(), b.bank());
    }

    #[test]
    fn test_restart_redeals() {
        let mut game = rigged("r9 r10 r11 k13", "o1 o2 o3");
        game.handle_action(&request("alice", ActionKind::InitialMeld).with_pieces(&[0, 1, 2, 3]))
            .unwrap_err();

        game.start().unwrap();
        assert_eq!(game.total_tiles(), 106);
        assert_eq!(game.field_size(), 0);
        assert!(game.history().is_empty());
    }

    #[test]
    fn test_start_with_hands_takes_from_bank() {
        let game = rigged("r9 r10 r11 k13 J", "o1 o2 o3");

        assert_eq!(game.hand_size("alice").unwrap(), 5);
        assert_eq!(game.bank_size(), 106 - 8);
        assert_eq!(game.total_tiles(), 106);
        assert_eq!(game.current_player(), Some("alice"));
    }

    #[test]
    fn test_start_with_hands_rejects_missing_tile() {
        let mut game = two_player_game();
        let err = game
            .start_with_hands(&[parse_tiles("r5 r5 r5").unwrap(), parse_tiles("k1").unwrap()])
            .unwrap_err();

        assert_eq!(err, GameError::TileNotInBank("r5".to_string()));
        assert!(!game.is_started());
        assert_eq!(game.bank_size(), 106);
    }

    #[test]
    fn test_preconditions() {
        let mut game = two_player_game();
        let err = game.handle_action(&request("alice", ActionKind::Pass)).unwrap_err();
        assert_eq!(err, GameError::NotStarted);

        let mut game = rigged("r9 r10 r11 k13", "o1 o2 o3");
        let err = game.handle_action(&request("mallory", ActionKind::Pass)).unwrap_err();
        assert_eq!(err, GameError::UnknownPlayer("mallory".to_string()));
        assert_eq!(err.class(), ErrorClass::Structural);

        let err = game.handle_action(&request("bob", ActionKind::Pass)).unwrap_err();
        assert_eq!(err, GameError::OutOfTurn);
        assert_eq!(game.hand_size("bob").unwrap(), 3);
    }

    #[test]
    fn test_pass_and_timer_draw_penalty() {
        let mut game = rigged("r9 r10 r11 k13", "o1 o2 o3");
        game.handle_action(&request("alice", ActionKind::Pass)).unwrap();

        assert_eq!(game.hand_size("alice").unwrap(), 7);
        assert_eq!(game.current_player(), Some("bob"));

        let timed_out = request("bob", ActionKind::InitialMeld)
            .with_pieces(&[0, 1, 2])
            .timed_out();
        game.handle_action(&timed_out).unwrap();

        assert_eq!(game.hand_size("bob").unwrap(), 6);
        assert_eq!(game.field_size(), 0);
        assert_eq!(game.current_player(), Some("alice"));
    }

    #[test]
    fn test_pass_with_short_bank() {
        let config = RulesConfig::default()
            .with_numbers(1, 3)
            .with_decks(1)
            .with_hand_size(6)
            .with_players(2, 2);
        let mut game = GameBuilder::new()
            .players(["alice", "bob"])
            .config(config)
            .seed(1)
            .build()
            .unwrap();
        game.start().unwrap();
        assert_eq!(game.bank_size(), 1);

        let first = game.current_player().unwrap().to_string();
        game.handle_action(&request(&first, ActionKind::Pass)).unwrap();
        assert_eq!(game.hand_size(&first).unwrap(), 7);
        assert_eq!(game.bank_size(), 0);

        let second = game.current_player().unwrap().to_string();
        game.handle_action(&request(&second, ActionKind::Pass)).unwrap();
        assert_eq!(game.hand_size(&second).unwrap(), 6);
        assert_eq!(game.total_tiles(), 13);
    }

    #[test]
    fn test_missing_indices() {
        let mut game = rigged("r9 r10 r11 k13", "o1 o2 o3");
        game.handle_action(&request("alice", ActionKind::InitialMeld).with_pieces(&[0, 1, 2]))
            .unwrap();
        game.handle_action(&request("bob", ActionKind::Pass)).unwrap();

        let err = game
            .handle_action(&request("alice", ActionKind::RemovePiece).with_combinations(&[1]))
            .unwrap_err();
        assert_eq!(
            err,
            GameError::MissingIndex {
                action: ActionKind::RemovePiece,
                field: "removedPiece",
            }
        );
        assert_eq!(err.class(), ErrorClass::Cardinality);

        let err = game
            .handle_action(&request("alice", ActionKind::SplitCombination).with_combinations(&[1]))
            .unwrap_err();
        assert_eq!(err.class(), ErrorClass::Cardinality);
    }

    #[test]
    fn test_concat_rejects_repeated_step() {
        let mut game = rigged("r9 r10 r11 k13", "o1 o2 o3");
        game.handle_action(&request("alice", ActionKind::InitialMeld).with_pieces(&[0, 1, 2]))
            .unwrap();
        game.handle_action(&request("bob", ActionKind::Pass)).unwrap();

        let err = game
            .handle_action(
                &request("alice", ActionKind::ConcatCombinations).with_combinations(&[1, 1]),
            )
            .unwrap_err();
        assert_eq!(err, GameError::DuplicateCombination(StepId::new(1)));
        assert_eq!(game.field_size(), 1);
    }

    #[test]
    fn test_lobby_flow() {
        let mut game = GameBuilder::new().seed(3).build_lobby().unwrap();
        game.add_player("alice").unwrap();
        assert_eq!(
            game.add_player("alice").unwrap_err(),
            GameError::DuplicatePlayer("alice".to_string())
        );

        assert!(!game.mark_ready("alice").unwrap());
        game.add_player("bob").unwrap();
        assert!(game.mark_ready("bob").unwrap());

        assert!(game.is_started());
        assert_eq!(game.total_tiles(), 106);
        assert_eq!(game.add_player("carol").unwrap_err(), GameError::AlreadyStarted);
        assert_eq!(game.mark_ready("alice").unwrap_err(), GameError::AlreadyStarted);
    }

    #[test]
    fn test_lobby_capacity() {
        let mut game = GameBuilder::new()
            .players(["a", "b", "c", "d"])
            .build_lobby()
            .unwrap();
        assert_eq!(
            game.add_player("e").unwrap_err(),
            GameError::PlayerCount { min: 2, max: 4 }
        );
    }

    #[test]
    fn test_lone_ready_player_waits() {
        let mut game = GameBuilder::new().player("alice").build_lobby().unwrap();
        assert!(!game.mark_ready("alice").unwrap());
        assert!(!game.is_started());
    }

    #[test]
    fn test_remove_player_returns_hand_to_bank() {
        let mut game = GameBuilder::new()
            .players(["alice", "bob", "carol"])
            .seed(5)
            .build()
            .unwrap();
        game.start_with_hands(&[
            parse_tiles("r1 r2").unwrap(),
            parse_tiles("k13 k12").unwrap(),
            parse_tiles("o4 o5 o6").unwrap(),
        ])
        .unwrap();
        assert_eq!(game.current_player(), Some("bob"));

        game.remove_player("bob").unwrap();
        assert_eq!(game.player_count(), 2);
        assert_eq!(game.current_player(), Some("carol"));
        assert_eq!(game.total_tiles(), 106);
        assert!(!game.is_finished());

        game.remove_player("alice").unwrap();
        assert!(game.is_finished());
        assert_eq!(game.winner(), Some("carol"));
        assert_eq!(game.current_player(), None);
    }

    #[test]
    fn test_remove_player_before_current_shifts_turn() {
        let mut game = GameBuilder::new()
            .players(["alice", "bob", "carol"])
            .build()
            .unwrap();
        game.start_with_hands(&[
            parse_tiles("r1").unwrap(),
            parse_tiles("k2").unwrap(),
            parse_tiles("o13").unwrap(),
        ])
        .unwrap();
        assert_eq!(game.current_player(), Some("carol"));

        game.remove_player("alice").unwrap();
        assert_eq!(game.current_player(), Some("carol"));

        let err = game.remove_player("alice").unwrap_err();
        assert_eq!(err, GameError::UnknownPlayer("alice".to_string()));
    }

    #[test]
    fn test_last_seat_leaving_on_turn_wraps() {
        let mut game = GameBuilder::new()
            .players(["alice", "bob", "carol"])
            .build()
            .unwrap();
        game.start_with_hands(&[
            parse_tiles("r1").unwrap(),
            parse_tiles("k2").unwrap(),
            parse_tiles("o13").unwrap(),
        ])
        .unwrap();

        game.remove_player("carol").unwrap();
        assert_eq!(game.current_player(), Some("alice"));
    }

    #[test]
    fn test_state_view() {
        let mut game = rigged("r9 r10 r11 k13", "o1 o2 o3");
        game.handle_action(&request("alice", ActionKind::InitialMeld).with_pieces(&[0, 1, 2]))
            .unwrap();

        let bob = game.current_state("bob").unwrap();
        assert!(bob.turn);
        assert_eq!(bob.hand, parse_tiles("o1 o2 o3").unwrap());
        assert_eq!(bob.available_actions, vec![ActionKind::InitialMeld, ActionKind::Pass]);
        assert_eq!(bob.field.len(), 1);
        assert_eq!(bob.field[0].owner, "alice");
        assert_eq!(bob.field[0].step, StepId::new(1));

        let alice = game.current_state("alice").unwrap();
        assert!(!alice.turn);
        assert!(alice.available_actions.is_empty());
        assert_eq!(alice.hand.len(), 1);

        let json = game.current_state_json("alice").unwrap();
        assert!(json.contains("\"bankSize\":"));
        assert!(game.current_state("mallory").is_err());
    }

    #[test]
    fn test_receive_action_request() {
        let mut game = rigged("r9 r10 r11 k13", "o1 o2 o3");

        let (response, result) = game.receive_action_request("not json");
        assert!(matches!(result, Err(GameError::MalformedRequest(_))));
        let response: ActionResponse = serde_json::from_str(&response).unwrap();
        assert!(!response.success);

        let (response, result) = game.receive_action_request(
            r#"{"player":"alice","action":"initialMeld","addedPieces":[0,1,2]}"#,
        );
        assert!(result.is_ok());
        let response: ActionResponse = serde_json::from_str(&response).unwrap();
        assert!(response.success);
        assert_eq!(response.error, None);
        assert_eq!(game.field_size(), 1);
    }

    #[test]
    fn test_game_is_send() {
        fn assert_send<T: Send + Clone>() {}
        assert_send::<Game>();
    }
}
