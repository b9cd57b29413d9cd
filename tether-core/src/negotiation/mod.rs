mod error;
mod session;
mod state;
mod transport;

pub use error::*;
pub use session::*;
pub use state::*;
pub use transport::*;
