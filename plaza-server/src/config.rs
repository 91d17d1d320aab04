use std::time::Duration;

/// Tunables for the hub.
///
/// The defaults mirror the transport settings the production deployment ran
/// with: ping every 25 s, declare a connection dead after 60 s of silence,
/// and spawn new avatars somewhere in the 0..1000 square.
#[derive(Debug, Clone)]
pub struct HubConfig {
    /// Half-open range for randomly assigned spawn coordinates.
    pub spawn_range: (f64, f64),
    /// How often the server pings a quiet connection.
    pub heartbeat_interval: Duration,
    /// Idle threshold after which a silent connection is considered dead.
    pub idle_timeout: Duration,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            spawn_range: (0.0, 1000.0),
            heartbeat_interval: Duration::from_secs(25),
            idle_timeout: Duration::from_secs(60),
        }
    }
}
