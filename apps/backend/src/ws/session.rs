use std::sync::Arc;
use std::time::{Duration, Instant};

use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::SessionId;
use crate::error::AppError;
use crate::errors::{DomainError, ErrorCode};
use crate::services::registry::{Binding, ConnId, Outbound, SessionRegistry};
use crate::state::app_state::AppState;
use crate::ws::protocol::{ClientMsg, ServerMsg};

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(20);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(40);

pub async fn upgrade(
    req: HttpRequest,
    stream: web::Payload,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let session = WsSession::new(Uuid::new_v4(), app_state.registry());
    ws::start(session, &req, stream)
}

/// One WebSocket connection. Carries no game state of its own; every intent
/// is applied to the registry's authoritative session.
pub struct WsSession {
    conn_id: ConnId,
    registry: Arc<SessionRegistry>,
    last_heartbeat: Instant,
}

impl WsSession {
    pub fn new(conn_id: ConnId, registry: Arc<SessionRegistry>) -> Self {
        Self {
            conn_id,
            registry,
            last_heartbeat: Instant::now(),
        }
    }

    fn send_json(ctx: &mut ws::WebsocketContext<Self>, msg: &ServerMsg) {
        match serde_json::to_string(msg) {
            Ok(payload) => ctx.text(payload),
            Err(err) => warn!(error = %err, "[WS SESSION] failed to serialize outbound message"),
        }
    }

    fn send_error(ctx: &mut ws::WebsocketContext<Self>, code: ErrorCode, message: impl Into<String>) {
        Self::send_json(
            ctx,
            &ServerMsg::Error {
                code: code.as_str(),
                message: message.into(),
            },
        );
    }

    fn start_heartbeat(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(HEARTBEAT_INTERVAL, |actor, ctx| {
            if Instant::now().duration_since(actor.last_heartbeat) > CLIENT_TIMEOUT {
                warn!(conn_id = %actor.conn_id, "[WS SESSION] heartbeat timed out");
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Normal)));
                ctx.stop();
                return;
            }
            ctx.ping(b"keepalive");
        });
    }

    /// Intents other than `join_game` must come from the connection that
    /// joined as that player.
    fn require_binding(&self, game_id: SessionId, player_id: &str) -> Result<(), DomainError> {
        match self.registry.binding(self.conn_id) {
            Some(b) if b.session_id == game_id && b.player_id == player_id => Ok(()),
            _ => Err(DomainError::NotYourTurn),
        }
    }

    /// Applies one intent; returns the session to broadcast on success.
    fn dispatch(
        &mut self,
        cmd: ClientMsg,
        ctx: &mut ws::WebsocketContext<Self>,
    ) -> Result<SessionId, DomainError> {
        let game_id = cmd.game_id();
        if !matches!(cmd, ClientMsg::JoinGame { .. }) {
            self.require_binding(game_id, cmd.player_id())?;
        }

        match cmd {
            ClientMsg::JoinGame { player_id, .. } => {
                let (outcome, previous) = self.registry.join(
                    game_id,
                    &player_id,
                    self.conn_id,
                    ctx.address().recipient(),
                )?;
                if let Some(prev) = previous {
                    self.registry.release_player(&prev);
                }
                info!(
                    session_id = %game_id,
                    player_id = %player_id,
                    conn_id = %self.conn_id,
                    index = outcome.index(),
                    ?outcome,
                    "[WS SESSION] player joined"
                );
            }
            ClientMsg::MakeMove {
                player_id,
                placement,
                ..
            } => {
                let points = self.registry.with_session(game_id, |s| {
                    s.make_move(
                        &player_id,
                        placement.position(),
                        placement.tile_type,
                        placement.rotation,
                    )
                })??;
                debug!(
                    session_id = %game_id,
                    player_id = %player_id,
                    row = placement.row,
                    col = placement.col,
                    points,
                    "[WS SESSION] tile placed"
                );
            }
            ClientMsg::RotateTile { player_id, .. } => {
                self.registry
                    .with_session(game_id, |s| s.rotate_current_tile(&player_id))??;
            }
            ClientMsg::SkipTurn { player_id, .. } => {
                self.registry
                    .with_session(game_id, |s| s.skip_turn(&player_id))??;
            }
            ClientMsg::UseJoker { player_id, .. } => {
                let left = self
                    .registry
                    .with_session(game_id, |s| s.use_joker(&player_id))??;
                debug!(session_id = %game_id, player_id = %player_id, left, "[WS SESSION] joker used");
            }
        }
        Ok(game_id)
    }
}

impl Actor for WsSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(conn_id = %self.conn_id, "[WS SESSION] started");
        self.start_heartbeat(ctx);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        if let Some(binding) = self.registry.remove_connection(self.conn_id) {
            self.release(&binding);
        }
        info!(conn_id = %self.conn_id, "[WS SESSION] stopped");
    }
}

impl WsSession {
    fn release(&self, binding: &Binding) {
        if self.registry.release_player(binding) {
            info!(
                session_id = %binding.session_id,
                player_id = %binding.player_id,
                conn_id = %self.conn_id,
                "[WS SESSION] player left"
            );
        }
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for WsSession {
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

                let cmd: ClientMsg = match serde_json::from_str(&text) {
                    Ok(cmd) => cmd,
                    Err(err) => {
                        warn!(conn_id = %self.conn_id, error = %err, "[WS SESSION] malformed message");
                        Self::send_error(ctx, ErrorCode::BadRequest, format!("Malformed message: {err}"));
                        return;
                    }
                };

                let kind = cmd.kind();
                match self.dispatch(cmd, ctx) {
                    Ok(session_id) => {
                        self.registry.broadcast(session_id);
                    }
                    Err(err) => {
                        debug!(conn_id = %self.conn_id, intent = kind, error = %err, "[WS SESSION] intent rejected");
                        let code = AppError::from(err.clone()).code();
                        Self::send_error(ctx, code, err.to_string());
                    }
                }
            }
            Ok(ws::Message::Binary(_)) => {
                self.last_heartbeat = Instant::now();
                Self::send_error(ctx, ErrorCode::BadRequest, "Binary frames are not supported");
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(ws::Message::Continuation(_)) | Ok(ws::Message::Nop) => {
                self.last_heartbeat = Instant::now();
            }
            Err(err) => {
                warn!(conn_id = %self.conn_id, error = %err, "[WS SESSION] protocol error");
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
                ctx.stop();
            }
        }
    }
}

impl Handler<Outbound> for WsSession {
    type Result = ();

    fn handle(&mut self, msg: Outbound, ctx: &mut Self::Context) -> Self::Result {
        ctx.text(&*msg.0);
    }
}
