pub mod mock_transport;
pub mod test_client;

pub use fixtures::*;
pub use mock_transport::{path_of, MockTransport, Scripted};
pub use test_client::{test_client, test_config};
