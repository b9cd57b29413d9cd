mod frame;
mod relay_command;
mod signaling_relay;

pub use frame::*;
pub use relay_command::*;
pub use signaling_relay::*;
