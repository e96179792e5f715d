use std::sync::Arc;

use tokio::sync::mpsc;
use trivia_server::domain::player::{PlayerEvent, TriviaPlayer};

/// A player attached to an in-process channel instead of a socket.
pub struct ChannelPlayer {
    pub player: Arc<TriviaPlayer>,
    pub events: mpsc::UnboundedReceiver<PlayerEvent>,
}

impl ChannelPlayer {
    pub fn attach(player: Arc<TriviaPlayer>) -> Self {
        let (tx, events) = mpsc::unbounded_channel();
        player.attach(tx).expect("player attaches once");
        Self { player, events }
    }

    /// Answer every question until the game ends, returning the ids seen.
    pub async fn answer_all(mut self) -> Vec<u32> {
        let mut seen = Vec::new();
        while let Some(event) = self.events.recv().await {
            match event {
                PlayerEvent::Question(question) => {
                    seen.push(question.id.0);
                    self.player
                        .record_answer(question.id, "whatever")
                        .expect("answer matches the outstanding question");
                }
                PlayerEvent::GameOver(_) => break,
            }
        }
        seen
    }
}
