mod admission;
mod room;
mod room_registry;

pub use admission::*;
pub use room::*;
pub use room_registry::*;
