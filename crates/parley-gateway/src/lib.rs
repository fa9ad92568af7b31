pub mod error;
pub mod router;
pub mod sanitizer;
pub mod server;

pub use error::ApiError;
pub use router::{ChatReply, ChatRequest, ChatRouter};
pub use sanitizer::{Rejection, Sanitizer};
pub use server::GatewayServer;
