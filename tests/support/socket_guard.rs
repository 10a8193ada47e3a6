use std::net::TcpListener;

use wiremock::MockServer;

/// Starts a wiremock server, or returns `None` when localhost sockets are unavailable.
pub async fn start_mock_server_or_skip() -> Option<MockServer> {
    if TcpListener::bind("127.0.0.1:0").is_err() {
        eprintln!("[socket-bound-test] cannot bind a localhost socket; skipping test");
        return None;
    }
    Some(MockServer::start().await)
}
