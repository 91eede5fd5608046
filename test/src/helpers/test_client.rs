use shogi_client::{ClientConfig, MemoryStorage, ShogiClient};

use super::mock_transport::MockTransport;

/// Config pointing at the local origin with the default delays; tests run
/// under a paused clock, so the real durations never elapse.
pub fn test_config() -> ClientConfig {
    ClientConfig {
        page_host: "localhost".to_string(),
        local_origin: "http://127.0.0.1:5000".to_string(),
        ..ClientConfig::default()
    }
}

/// A client over a scripted transport and in-memory storage. Keep a clone of
/// the transport to script replies and inspect recorded requests.
pub fn test_client(transport: MockTransport) -> ShogiClient<MockTransport, MemoryStorage> {
    ShogiClient::new(test_config(), transport, MemoryStorage::new())
}
