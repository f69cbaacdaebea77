// System Layer
pub mod config;
pub mod logging;
pub mod preferences;

pub use config::Config;
pub use logging::setup_tracing;
pub use preferences::{MemoryBackend, PreferenceBackend, PreferenceStore, TomlFileBackend};
