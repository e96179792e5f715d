pub mod live_game;

pub use live_game::LiveGame;
