mod config;
mod http;
mod relay;
mod room;
mod server;
mod signaling;

pub use config::*;
pub use http::*;
pub use relay::*;
pub use room::*;
pub use server::*;
pub use signaling::*;
