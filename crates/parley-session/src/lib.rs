pub mod registry;
pub mod session;
pub mod source;
pub mod transcript;

pub use registry::{SessionHandle, SessionRegistry};
pub use session::{ConversationSession, EMPTY_INPUT_PROMPT};
pub use source::{BundledCatalog, CatalogSource, FileCatalog, StaticCatalog};
pub use transcript::{Transcript, TranscriptEntry};
