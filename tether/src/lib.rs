pub use tether_core::{ConnectionId, RoomId, SignalMessage};

pub mod model {
    pub use tether_core::model::*;
}

pub mod negotiation {
    pub use tether_core::negotiation::*;
}

pub mod game {
    pub use tether_core::game::*;
}

#[cfg(feature = "server")]
pub mod server {
    pub use tether_server::*;
}

#[cfg(feature = "client")]
pub mod client {
    pub use tether_client::*;
}
