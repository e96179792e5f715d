use std::time::Duration;

use crate::support::test_state;
use crate::support::websocket::start_test_server;
use crate::support::websocket_client::WebSocketClient;

#[tokio::test]
async fn two_players_play_the_whole_bank() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state();
    let registry = state.registry();
    let session = registry.create(&["Alice", "Bob"])?;
    registry.launch(session.clone());
    let (server_handle, addr, server_join) = start_test_server(state).await?;

    let base = format!("ws://{addr}/api/games/{}/ws", session.id());
    let mut alice =
        WebSocketClient::connect_retry(&format!("{base}?name=Alice"), Duration::from_secs(1))
            .await?;
    let mut bob =
        WebSocketClient::connect_retry(&format!("{base}?name=Bob"), Duration::from_secs(1)).await?;
    alice.hello().await?;
    bob.hello().await?;

    for expected in [10, 20, 30] {
        let qa = alice.recv_type("question").await?;
        let qb = bob.recv_type("question").await?;
        assert_eq!(qa["question_id"], expected);
        assert_eq!(qb["question_id"], expected);
        assert!(qa["choices"].as_array().is_some_and(|c| !c.is_empty()));

        alice.answer(expected, "first").await?;
        assert_eq!(alice.recv_type("ack").await?["message"], "answered");
        bob.answer(expected, "second").await?;
    }

    for client in [&mut alice, &mut bob] {
        let over = client.recv_type("game_over").await?;
        assert_eq!(over["completed"], true);
        assert_eq!(client.recv_json().await?, None);
    }

    server_handle.stop(true).await;
    let _ = server_join.await;
    Ok(())
}

#[tokio::test]
async fn stale_answer_is_reported_without_closing() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state();
    let registry = state.registry();
    let session = registry.create(&["Alice"])?;
    registry.launch(session.clone());
    let (server_handle, addr, server_join) = start_test_server(state).await?;

    let url = format!("ws://{addr}/api/games/{}/ws?name=Alice", session.id());
    let mut alice = WebSocketClient::connect_retry(&url, Duration::from_secs(1)).await?;
    alice.hello().await?;

    let q = alice.recv_type("question").await?;
    assert_eq!(q["question_id"], 10);

    alice.answer(20, "too soon").await?;
    let err = alice.recv_type("error").await?;
    assert_eq!(err["code"], "bad_answer");

    alice.answer(10, "Paris").await?;
    assert_eq!(alice.recv_type("question").await?["question_id"], 20);

    alice.close().await?;
    server_handle.stop(true).await;
    let _ = server_join.await;
    Ok(())
}

#[tokio::test]
async fn disconnect_aborts_the_game_for_everyone() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state();
    let registry = state.registry();
    let session = registry.create(&["Alice", "Bob"])?;
    let game = registry.launch(session.clone());
    let (server_handle, addr, server_join) = start_test_server(state).await?;

    let base = format!("ws://{addr}/api/games/{}/ws", session.id());
    let mut alice =
        WebSocketClient::connect_retry(&format!("{base}?name=Alice"), Duration::from_secs(1))
            .await?;
    let mut bob =
        WebSocketClient::connect_retry(&format!("{base}?name=Bob"), Duration::from_secs(1)).await?;
    alice.hello().await?;
    bob.hello().await?;

    alice.recv_type("question").await?;
    bob.recv_type("question").await?;
    bob.close().await?;

    let over = alice.recv_type("game_over").await?;
    assert_eq!(over["completed"], false);
    assert!(over["reason"].as_str().is_some_and(|r| r.contains("Bob")));

    tokio::time::timeout(Duration::from_secs(2), game).await??;
    assert!(registry.get(session.id()).is_err());

    server_handle.stop(true).await;
    let _ = server_join.await;
    Ok(())
}
