mod gateway;
mod session;

pub use gateway::*;
pub use session::*;
