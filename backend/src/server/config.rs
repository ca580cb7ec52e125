//! HTTP server configuration object.

use std::net::SocketAddr;

use clinic_backend::inbound::http::session_config::SessionSettings;
use clinic_backend::inbound::http::state::HttpState;

/// Everything [`super::create_server`] needs beyond the health flags.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) http_state: HttpState,
}

impl ServerConfig {
    /// Bundle session settings, listen address, and wired ports.
    #[must_use]
    pub const fn new(session: SessionSettings, bind_addr: SocketAddr, http_state: HttpState) -> Self {
        Self {
            session,
            bind_addr,
            http_state,
        }
    }
}
