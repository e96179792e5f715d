use std::sync::Arc;
use std::time::{Duration, Instant};

use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use serde::Deserialize;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::player::{Player, PlayerEvent, TriviaPlayer};
use crate::error::AppError;
use crate::errors::ErrorCode as AppErrorCode;
use crate::extractors::live_game::LiveGame;
use crate::ws::protocol::{ClientMsg, ErrorCode, ServerMsg, PROTOCOL_VERSION};

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(20);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(40);

#[derive(Debug, Deserialize)]
pub struct JoinQuery {
    pub name: String,
}

/// GET /api/games/{game_id}/ws?name=...
///
/// Binds the socket to the named player of a live game. The player counts
/// as connected once the client completes the `hello` handshake.
pub async fn upgrade(
    req: HttpRequest,
    stream: web::Payload,
    game: LiveGame,
    query: web::Query<JoinQuery>,
) -> Result<HttpResponse, Error> {
    let LiveGame(session) = game;
    let player = session.get_player(&query.name).map_err(AppError::from)?;
    if player.is_connected() {
        return Err(AppError::conflict(
            AppErrorCode::PlayerAlreadyConnected,
            format!("player {} is already connected", query.name),
        )
        .into());
    }

    let socket = PlayerSocket::new(Uuid::new_v4(), session.id(), player);
    ws::start(socket, &req, stream)
}

pub struct PlayerSocket {
    conn_id: Uuid,
    game_id: Uuid,
    player: Arc<TriviaPlayer>,

    // Handed to the player on hello
    outbox: Option<mpsc::UnboundedSender<PlayerEvent>>,

    last_heartbeat: Instant,
    hello_done: bool,
}

impl PlayerSocket {
    fn new(conn_id: Uuid, game_id: Uuid, player: Arc<TriviaPlayer>) -> Self {
        Self {
            conn_id,
            game_id,
            player,
            outbox: None,
            last_heartbeat: Instant::now(),
            hello_done: false,
        }
    }

    fn player_name(&self) -> &str {
        self.player.name()
    }

    fn send_json(ctx: &mut ws::WebsocketContext<Self>, msg: &ServerMsg) {
        match serde_json::to_string(msg) {
            Ok(payload) => ctx.text(payload),
            Err(err) => warn!(error = %err, "[WS SOCKET] failed to serialize outbound message"),
        }
    }

    fn send_error_and_close(
        &self,
        ctx: &mut ws::WebsocketContext<Self>,
        code: ErrorCode,
        message: impl Into<String>,
    ) {
        let msg = ServerMsg::Error {
            code,
            message: message.into(),
        };
        Self::send_json(ctx, &msg);
        ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
        ctx.stop();
    }

    fn start_heartbeat(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(HEARTBEAT_INTERVAL, |actor, ctx| {
            if Instant::now().duration_since(actor.last_heartbeat) > CLIENT_TIMEOUT {
                warn!(
                    conn_id = %actor.conn_id,
                    game_id = %actor.game_id,
                    player = actor.player_name(),
                    "[WS SOCKET] heartbeat timed out"
                );
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Normal)));
                ctx.stop();
                return;
            }
            ctx.ping(b"keepalive");
        });
    }

    fn handle_client_msg(&mut self, cmd: ClientMsg, ctx: &mut ws::WebsocketContext<Self>) {
        match cmd {
            ClientMsg::Hello { protocol } => {
                if protocol != PROTOCOL_VERSION {
                    self.send_error_and_close(
                        ctx,
                        ErrorCode::BadProtocol,
                        "Unsupported protocol version",
                    );
                    return;
                }
                let Some(outbox) = self.outbox.take() else {
                    self.send_error_and_close(ctx, ErrorCode::BadRequest, "Hello already sent");
                    return;
                };

                if let Err(err) = self.player.attach(outbox) {
                    self.send_error_and_close(ctx, ErrorCode::AlreadyConnected, err.to_string());
                    return;
                }
                self.hello_done = true;

                // Sent before any question: the event stream is only polled
                // after this handler returns.
                Self::send_json(
                    ctx,
                    &ServerMsg::HelloAck {
                        protocol: PROTOCOL_VERSION,
                        game_id: self.game_id,
                        player: self.player_name().to_string(),
                    },
                );
            }

            ClientMsg::Answer {
                question_id,
                answer,
            } => {
                if !self.hello_done {
                    self.send_error_and_close(ctx, ErrorCode::BadRequest, "Must send hello first");
                    return;
                }
                match self.player.record_answer(question_id, &answer) {
                    Ok(()) => Self::send_json(
                        ctx,
                        &ServerMsg::Ack {
                            message: "answered".to_string(),
                        },
                    ),
                    Err(err) => Self::send_json(
                        ctx,
                        &ServerMsg::Error {
                            code: ErrorCode::BadAnswer,
                            message: err.to_string(),
                        },
                    ),
                }
            }
        }
    }
}

impl Actor for PlayerSocket {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(
            conn_id = %self.conn_id,
            game_id = %self.game_id,
            player = self.player_name(),
            "[WS SOCKET] started"
        );

        let (tx, rx) = mpsc::unbounded_channel();
        ctx.add_stream(UnboundedReceiverStream::new(rx));
        self.outbox = Some(tx);

        self.start_heartbeat(ctx);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        if self.hello_done {
            self.player.detach();
        }
        info!(
            conn_id = %self.conn_id,
            game_id = %self.game_id,
            player = self.player_name(),
            "[WS SOCKET] stopped"
        );
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for PlayerSocket {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(payload)) => {
                self.last_heartbeat = Instant::now();
                ctx.pong(&payload);
            }
            Ok(ws::Message::Pong(_)) => {
                self.last_heartbeat = Instant::now();
            }
            Ok(ws::Message::Text(text)) => {
                self.last_heartbeat = Instant::now();

                let parsed: Result<ClientMsg, _> = serde_json::from_str(&text);
                let Ok(cmd) = parsed else {
                    self.send_error_and_close(ctx, ErrorCode::BadRequest, "Malformed JSON");
                    return;
                };
                self.handle_client_msg(cmd, ctx);
            }
            Ok(ws::Message::Binary(_)) => {
                self.last_heartbeat = Instant::now();
                self.send_error_and_close(ctx, ErrorCode::BadRequest, "Binary not supported");
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(ws::Message::Continuation(_)) | Ok(ws::Message::Nop) => {
                self.last_heartbeat = Instant::now();
            }
            Err(err) => {
                warn!(
                    conn_id = %self.conn_id,
                    player = self.player_name(),
                    error = %err,
                    "[WS SOCKET] protocol error"
                );
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
                ctx.stop();
            }
        }
    }
}

impl StreamHandler<PlayerEvent> for PlayerSocket {
    fn handle(&mut self, event: PlayerEvent, ctx: &mut Self::Context) {
        match event {
            PlayerEvent::Question(question) => {
                Self::send_json(ctx, &ServerMsg::from(question));
            }
            PlayerEvent::GameOver(outcome) => {
                Self::send_json(ctx, &ServerMsg::from(outcome));
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Normal)));
                ctx.stop();
            }
        }
    }

    // The event stream only ends on detach, which happens as the socket stops.
    fn finished(&mut self, _ctx: &mut Self::Context) {}
}
