use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use trivia_server::domain::player::{GameOutcome, Player, PlayerEvent, TriviaPlayer};
use trivia_server::domain::question::{QuestionBank, QuestionId};
use trivia_server::domain::signal::SignalError;
use trivia_server::errors::domain::{BarrierPhase, ConflictKind, DomainError, NotFoundKind};
use trivia_server::services::game_session::{GameSession, SessionPhase, TriviaSession};

use crate::support::players::ChannelPlayer;
use crate::support::sample_bank;

fn session(names: &[&str]) -> Arc<TriviaSession> {
    let players = names
        .iter()
        .map(|name| Arc::new(TriviaPlayer::new(*name)))
        .collect();
    Arc::new(GameSession::new(players, Arc::new(sample_bank())))
}

#[tokio::test]
async fn every_player_sees_every_question_in_bank_order() {
    let session = session(&["Alice", "Bob"]);
    let alice = ChannelPlayer::attach(session.get_player("Alice").unwrap());
    let bob = ChannelPlayer::attach(session.get_player("Bob").unwrap());

    let game = tokio::spawn({
        let session = Arc::clone(&session);
        async move { session.run_game().await }
    });
    let alice_seen = tokio::spawn(alice.answer_all());
    let bob_seen = tokio::spawn(bob.answer_all());

    tokio::time::timeout(Duration::from_secs(5), game)
        .await
        .expect("game finishes")
        .unwrap()
        .expect("game completes");
    assert_eq!(session.phase(), SessionPhase::Completed);

    // The registry reports outcomes in production; stand in for it.
    for player in session.players() {
        player.finish(GameOutcome::Completed);
    }
    assert_eq!(alice_seen.await.unwrap(), vec![10, 20, 30]);
    assert_eq!(bob_seen.await.unwrap(), vec![10, 20, 30]);
}

#[tokio::test]
async fn no_question_is_sent_before_everyone_connects() {
    let session = session(&["Alice", "Bob"]);
    let mut alice = ChannelPlayer::attach(session.get_player("Alice").unwrap());

    let game = tokio::spawn({
        let session = Arc::clone(&session);
        async move { session.run_game().await }
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(alice.events.try_recv().is_err());
    assert_eq!(session.phase(), SessionPhase::AwaitingPlayers);

    let _bob = ChannelPlayer::attach(session.get_player("Bob").unwrap());
    let first = tokio::time::timeout(Duration::from_secs(1), alice.events.recv())
        .await
        .expect("question arrives")
        .expect("channel open");
    assert!(matches!(first, PlayerEvent::Question(q) if q.id == QuestionId(10)));

    game.abort();
}

#[tokio::test]
async fn next_question_waits_for_the_slowest_answer() {
    let session = session(&["Alice", "Bob"]);
    let mut alice = ChannelPlayer::attach(session.get_player("Alice").unwrap());
    let mut bob = ChannelPlayer::attach(session.get_player("Bob").unwrap());

    let game = tokio::spawn({
        let session = Arc::clone(&session);
        async move { session.run_game().await }
    });

    let PlayerEvent::Question(q1) = alice.events.recv().await.unwrap() else {
        panic!("expected a question");
    };
    assert!(matches!(bob.events.recv().await, Some(PlayerEvent::Question(_))));
    alice.player.record_answer(q1.id, "Paris").unwrap();

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(alice.events.try_recv().is_err(), "second question sent early");
    assert_eq!(
        session.phase(),
        SessionPhase::Question {
            round: 1,
            question_id: QuestionId(10)
        }
    );

    bob.player.record_answer(q1.id, "Lyon").unwrap();
    let next = tokio::time::timeout(Duration::from_secs(1), alice.events.recv())
        .await
        .expect("second question arrives")
        .unwrap();
    assert!(matches!(next, PlayerEvent::Question(q) if q.id == QuestionId(20)));

    game.abort();
}

#[tokio::test]
async fn disconnect_mid_question_aborts_the_game() {
    let session = session(&["Alice", "Bob"]);
    let mut alice = ChannelPlayer::attach(session.get_player("Alice").unwrap());
    let _bob = ChannelPlayer::attach(session.get_player("Bob").unwrap());

    let game = tokio::spawn({
        let session = Arc::clone(&session);
        async move { session.run_game().await }
    });

    assert!(matches!(alice.events.recv().await, Some(PlayerEvent::Question(_))));
    session.get_player("Bob").unwrap().detach();

    let err = tokio::time::timeout(Duration::from_secs(1), game)
        .await
        .expect("game stops")
        .unwrap()
        .unwrap_err();
    match err {
        DomainError::Barrier {
            phase,
            player,
            cause,
        } => {
            assert_eq!(phase, BarrierPhase::Answers(QuestionId(10)));
            assert_eq!(player, "Bob");
            assert_eq!(cause, SignalError::Disconnected);
        }
        other => panic!("unexpected error {other:?}"),
    }
    assert!(matches!(session.phase(), SessionPhase::Aborted { .. }));
}

#[tokio::test]
async fn dropping_out_before_connecting_fails_the_connection_barrier() {
    let session = session(&["Alice", "Bob"]);
    let _alice = ChannelPlayer::attach(session.get_player("Alice").unwrap());
    session.get_player("Bob").unwrap().detach();

    let err = session.run_game().await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Barrier {
            phase: BarrierPhase::Connection,
            ..
        }
    ));
}

#[tokio::test]
async fn leaving_after_connecting_fails_the_first_question() {
    let session = session(&["Alice", "Bob"]);
    let _alice = ChannelPlayer::attach(session.get_player("Alice").unwrap());
    let bob = session.get_player("Bob").unwrap();
    let (tx, _rx) = mpsc::unbounded_channel();
    bob.attach(tx).unwrap();
    bob.detach();

    let err = session.run_game().await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Barrier {
            phase: BarrierPhase::Answers(QuestionId(10)),
            cause: SignalError::Disconnected,
            ..
        }
    ));
}

#[tokio::test]
async fn empty_bank_completes_after_connection() {
    let players = vec![Arc::new(TriviaPlayer::new("Solo"))];
    let session = GameSession::new(players, Arc::new(QuestionBank::new(Vec::new()).unwrap()));
    let mut solo = ChannelPlayer::attach(session.get_player("Solo").unwrap());

    session.run_game().await.unwrap();
    assert!(solo.events.try_recv().is_err());
    assert_eq!(session.phase(), SessionPhase::Completed);
}

#[tokio::test]
async fn get_player_lookup() {
    let session = session(&["Alice", "Bob"]);
    assert_eq!(session.get_player("Bob").unwrap().name(), "Bob");

    let err = session.get_player("bob").err().unwrap();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Player, _)));

    let twins = GameSession::new(
        vec![
            Arc::new(TriviaPlayer::new("Sam")),
            Arc::new(TriviaPlayer::new("Sam")),
        ],
        Arc::new(sample_bank()),
    );
    let err = twins.get_player("Sam").err().unwrap();
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::DuplicatePlayerName, _)
    ));
}
