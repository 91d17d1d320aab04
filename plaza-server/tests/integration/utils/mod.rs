mod test_conn;

pub use test_conn::*;

use std::sync::Arc;

use plaza_server::{Gateway, HubConfig};
use tracing::Level;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// A gateway with default settings and deterministic spawn points.
pub fn test_gateway() -> Arc<Gateway> {
    Arc::new(Gateway::with_seed(HubConfig::default(), 7))
}
