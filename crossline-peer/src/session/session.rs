use crate::session::notice::Notice;
use crate::session::online_link::OnlineLink;
use crate::session::presenter::Presenter;
use crate::session::session_command::{SessionCommand, SessionHandle};
use crate::session::session_config::SessionConfig;
use crate::signaling::{Role, SignalEvent};
use crate::transport::{LinkId, TransportEvent};
use crossline_core::{
    CellIndex, GameStatus, MoveApplied, MoveMessage, MoveSynchronizer, PlayMode, RoomId,
    Scoreboard,
};
use crossline_store::SignalingStore;
use std::ops::ControlFlow;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// One player's game: board, scores and at most one peer link.
///
/// All state lives on the task running [`Session::run`]; user input, store
/// watchers and WebRTC callbacks reach it only through queues.
pub struct Session {
    presenter: Box<dyn Presenter>,
    sync: MoveSynchronizer,
    scores: Scoreboard,
    store: Option<Arc<dyn SignalingStore>>,
    config: SessionConfig,
    link: Option<OnlineLink>,
    next_link: LinkId,
    command_rx: mpsc::Receiver<SessionCommand>,
    transport_rx: mpsc::Receiver<TransportEvent>,
    transport_tx: mpsc::Sender<TransportEvent>,
    signal_rx: mpsc::Receiver<SignalEvent>,
    signal_tx: mpsc::Sender<SignalEvent>,
}

impl Session {
    /// Starts in hot-seat mode. Without a store, host and join are refused.
    pub fn new(
        presenter: Box<dyn Presenter>,
        store: Option<Arc<dyn SignalingStore>>,
        config: SessionConfig,
    ) -> (Self, SessionHandle) {
        let (command_tx, command_rx) = mpsc::channel(64);
        let (transport_tx, transport_rx) = mpsc::channel(256);
        let (signal_tx, signal_rx) = mpsc::channel(64);

        let session = Self {
            presenter,
            sync: MoveSynchronizer::new(PlayMode::HotSeat),
            scores: Scoreboard::default(),
            store,
            config,
            link: None,
            next_link: 0,
            command_rx,
            transport_rx,
            transport_tx,
            signal_rx,
            signal_tx,
        };
        (session, SessionHandle::new(command_tx))
    }

    pub async fn run(mut self) {
        info!("Session event loop started");
        self.render().await;
        self.presenter.on_scores_changed(&self.scores).await;
        self.presenter.on_notice(&Notice::Offline).await;

        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => {
                    let Some(cmd) = cmd else {
                        info!("Command channel closed. Ending session.");
                        break;
                    };
                    if self.handle_command(cmd).await.is_break() {
                        break;
                    }
                }

                evt = self.signal_rx.recv() => {
                    if let Some(e) = evt {
                        self.handle_signal_event(e).await;
                    }
                }

                evt = self.transport_rx.recv() => {
                    if let Some(e) = evt {
                        self.handle_transport_event(e).await;
                    }
                }
            }
        }

        self.close_link().await;
        info!("Session event loop finished");
    }

    async fn handle_command(&mut self, cmd: SessionCommand) -> ControlFlow<()> {
        match cmd {
            SessionCommand::LocalMove(cell) => self.local_move(cell).await,

            SessionCommand::Restart => self.restart().await,

            SessionCommand::StartOver => {
                self.reset_scores().await;
                self.restart().await;
            }

            SessionCommand::PlayOffline => {
                self.close_link().await;
                self.sync.set_mode(PlayMode::HotSeat);
                self.render().await;
                self.presenter.on_notice(&Notice::Offline).await;
            }

            SessionCommand::Host { room } => {
                let room = room.unwrap_or_else(RoomId::generate);
                self.go_online(Role::Host, room).await;
            }

            SessionCommand::Join(room) => self.go_online(Role::Joiner, room).await,

            SessionCommand::Shutdown => {
                info!("Shutdown requested");
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }

    async fn handle_signal_event(&mut self, event: SignalEvent) {
        let Some(link) = self.current_link(event.link()) else {
            debug!("Dropping signal event of closed link {}", event.link());
            return;
        };

        match event {
            SignalEvent::Offer(_, offer) => match link.accept_offer(&offer).await {
                Ok(true) => self.presenter.on_notice(&Notice::AnswerSent).await,
                Ok(false) => {}
                Err(e) => self.setup_failed(e).await,
            },

            SignalEvent::Answer(_, answer) => match link.accept_answer(&answer).await {
                Ok(true) => info!("Answer applied for room {}", link.room()),
                Ok(false) => {}
                Err(e) => self.setup_failed(e).await,
            },

            SignalEvent::RemoteCandidate(_, candidate) => {
                link.add_remote_candidate(candidate).await;
            }
        }
    }

    async fn handle_transport_event(&mut self, event: TransportEvent) {
        let Some(link) = self.current_link(event.link()) else {
            debug!("Dropping transport event of closed link {}", event.link());
            return;
        };

        match event {
            TransportEvent::CandidateGenerated(_, candidate) => {
                link.publish_candidate(&candidate).await;
            }

            TransportEvent::ChannelOpen(_, dc) => {
                if !link.channel_opened(dc) {
                    return;
                }
                let local = link.local_symbol();
                info!("Connected to peer in room {} as {}", link.room(), local);

                self.reset_scores().await;
                self.sync.reset();
                self.presenter.on_connection_established(local).await;
                self.presenter.on_notice(&Notice::Connected(local)).await;
                self.render().await;
                self.announce_turn().await;
            }

            TransportEvent::Message(_, data) => match MoveMessage::from_slice(&data) {
                Ok(msg) => match self.sync.remote_move(msg) {
                    Ok(applied) => self.after_move(applied).await,
                    Err(e) => debug!("Remote move {:?} ignored: {}", msg, e),
                },
                Err(e) => warn!("Dropping malformed peer message: {}", e),
            },

            TransportEvent::Disconnected(_) => {
                if link.mark_lost() {
                    warn!("Peer connection in room {} lost", link.room());
                    self.presenter.on_notice(&Notice::PeerDisconnected).await;
                }
            }
        }
    }

    async fn local_move(&mut self, cell: CellIndex) {
        if matches!(self.sync.mode(), PlayMode::Online { .. })
            && !self.link.as_ref().is_some_and(OnlineLink::is_connected)
        {
            debug!("Local move on {} ignored: not connected", cell);
            return;
        }

        let applied = match self.sync.local_move(cell) {
            Ok(applied) => applied,
            Err(e) => {
                debug!("Local move on {} ignored: {}", cell, e);
                return;
            }
        };

        if let (Some(msg), Some(link)) = (applied.outbound, self.link.as_ref()) {
            if let Err(e) = link.send(&msg).await {
                debug!("Move {:?} not delivered: {}", msg, e);
            }
        }
        self.after_move(applied).await;
    }

    async fn after_move(&mut self, applied: MoveApplied) {
        debug!("{} took cell {}", applied.symbol, applied.cell);
        if self.scores.record(&applied.status) {
            self.presenter.on_scores_changed(&self.scores).await;
        }
        self.render().await;
        self.announce_turn().await;
    }

    async fn restart(&mut self) {
        self.sync.reset();
        self.render().await;
        self.announce_turn().await;
    }

    async fn reset_scores(&mut self) {
        self.scores.clear();
        self.presenter.on_scores_changed(&self.scores).await;
    }

    async fn go_online(&mut self, role: Role, room: RoomId) {
        let Some(store) = self.store.clone() else {
            self.presenter.on_notice(&Notice::NoStore).await;
            return;
        };

        self.close_link().await;
        self.sync.set_mode(PlayMode::Online {
            local: role.local_symbol(),
        });
        self.render().await;

        let notice = match role {
            Role::Host => Notice::CreatingRoom,
            Role::Joiner => Notice::JoiningRoom(room.clone()),
        };
        self.presenter.on_notice(&notice).await;

        self.next_link += 1;
        let id = self.next_link;
        let transport = &self.config.transport;
        let transport_tx = self.transport_tx.clone();
        let signal_tx = self.signal_tx.clone();
        let result = match role {
            Role::Host => {
                OnlineLink::host(id, room.clone(), store, transport, transport_tx, signal_tx).await
            }
            Role::Joiner => {
                OnlineLink::join(id, room.clone(), store, transport, transport_tx, signal_tx).await
            }
        };

        match result {
            Ok(link) => {
                self.link = Some(link);
                if role == Role::Host {
                    let link = self
                        .config
                        .share_base_url
                        .as_deref()
                        .and_then(|base| room.share_link(base));
                    self.presenter
                        .on_notice(&Notice::RoomCreated { room, link })
                        .await;
                }
            }
            Err(e) => self.setup_failed(e).await,
        }
    }

    async fn setup_failed(&mut self, e: anyhow::Error) {
        error!("Online setup failed: {:?}", e);
        self.presenter
            .on_notice(&Notice::SetupFailed(e.to_string()))
            .await;
    }

    async fn close_link(&mut self) {
        if let Some(link) = self.link.take() {
            info!("Closing link {} for room {}", link.id(), link.room());
            link.close().await;
        }
    }

    fn current_link(&mut self, id: LinkId) -> Option<&mut OnlineLink> {
        self.link.as_mut().filter(|link| link.id() == id)
    }

    async fn render(&self) {
        let game = self.sync.game();
        self.presenter
            .on_state_changed(game.board(), game.turn(), &game.status())
            .await;
    }

    async fn announce_turn(&self) {
        let game = self.sync.game();
        let notice = match game.status() {
            GameStatus::Active if self.sync.is_local_turn() => Notice::Turn(game.turn()),
            GameStatus::Active => Notice::WaitingFor(game.turn()),
            status => Notice::Outcome(status),
        };
        self.presenter.on_notice(&notice).await;
    }
}
