/*
[INPUT]:  Public API exports for the taskboard-tui crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod board;
pub mod config;
pub mod status;
pub mod tui;

// Re-export main types for convenience
pub use board::{BoardController, BoardState};
pub use config::AppConfig;
