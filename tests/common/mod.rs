//! Shared helpers for integration tests.

#![allow(dead_code)]

use rummy_engine::{parse_tiles, ActionKind, ActionRequest, Game, GameBuilder, RulesConfig};

/// Install a test logger once; `RUST_LOG=debug` shows the engine's decisions.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A started game with fixed hands, one string of tiles per player.
pub fn rigged_game(players: &[&str], hands: &[&str]) -> Game {
    rigged_game_with(players, hands, RulesConfig::default())
}

pub fn rigged_game_with(players: &[&str], hands: &[&str], config: RulesConfig) -> Game {
    init_logging();
    let mut game = GameBuilder::new()
        .players(players.iter().copied())
        .config(config)
        .seed(42)
        .build()
        .expect("valid players");
    let hands: Vec<_> = hands
        .iter()
        .map(|h| parse_tiles(h).expect("valid tiles"))
        .collect();
    game.start_with_hands(&hands).expect("tiles available");
    game
}

pub fn request(player: &str, action: ActionKind) -> ActionRequest {
    ActionRequest::new(player, action)
}

pub fn pass(game: &mut Game, player: &str) {
    game.handle_action(&request(player, ActionKind::Pass))
        .expect("pass always succeeds");
}

/// Hand of a player rendered in tile text form.
pub fn hand_text(game: &Game, player: &str) -> String {
    game.hand(player)
        .expect("registered player")
        .tiles()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Every live table combination, rendered.
pub fn table_text(game: &Game) -> Vec<String> {
    game.field().iter().map(|(_, c)| c.to_string()).collect()
}
