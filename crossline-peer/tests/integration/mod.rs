pub mod cleanup_tests;
pub mod connection_tests;
pub mod game_tests;

use std::sync::Arc;

use crossline_core::RoomId;
use crossline_peer::{Session, SessionConfig, SessionHandle, TransportConfig};
use crossline_store::{MemoryStore, SignalingStore};
use tracing::Level;

use crate::utils::{CONNECTION_TIMEOUT_MS, RecordingPresenter, STORE_TIMEOUT_MS, wait_for_path};

pub const LINK_BASE: &str = "https://play.example/";

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_test_writer()
        .try_init();
}

pub fn create_test_session(store: Option<&MemoryStore>) -> (SessionHandle, RecordingPresenter) {
    let presenter = RecordingPresenter::new();
    let config = SessionConfig {
        transport: TransportConfig::local_only(),
        share_base_url: Some(LINK_BASE.to_owned()),
    };
    let store = store.map(|s| Arc::new(s.clone()) as Arc<dyn SignalingStore>);

    let (session, handle) = Session::new(Box::new(presenter.clone()), store, config);

    tokio::spawn(async move {
        session.run().await;
    });

    (handle, presenter)
}

/// Two sessions sharing one store, connected through room `room`.
pub struct ConnectedPair {
    pub host: SessionHandle,
    pub host_view: RecordingPresenter,
    pub joiner: SessionHandle,
    pub joiner_view: RecordingPresenter,
}

pub async fn connect_pair(store: &MemoryStore, room: &str) -> ConnectedPair {
    let (host, host_view) = create_test_session(Some(store));
    let (joiner, joiner_view) = create_test_session(Some(store));

    host.host(Some(RoomId::parse(room).expect("valid room id")))
        .await
        .expect("host session running");
    let (_, link) = host_view
        .wait_for_room(STORE_TIMEOUT_MS)
        .await
        .expect("room announced");
    assert!(
        wait_for_path(store, &format!("rooms/{}/offer", room), true).await,
        "host never published an offer"
    );
    let link = link.expect("share link built");
    joiner
        .join(RoomId::parse(&link).expect("link carries the room"))
        .await
        .expect("joiner session running");

    assert!(
        host_view.wait_for_connection(CONNECTION_TIMEOUT_MS).await,
        "host never connected"
    );
    assert!(
        joiner_view.wait_for_connection(CONNECTION_TIMEOUT_MS).await,
        "joiner never connected"
    );

    ConnectedPair {
        host,
        host_view,
        joiner,
        joiner_view,
    }
}
