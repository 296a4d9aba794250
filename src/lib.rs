// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod app_dirs;
pub mod clock;
pub mod competition;
pub mod config;
pub mod error;
pub mod events;
pub mod leaderboard;
pub mod logging;
pub mod passage;
pub mod practice;
pub mod roster;
pub mod runtime;
pub mod scoring;
pub mod sequencer;
pub mod session;
pub mod time_series;
pub mod timers;
pub mod typing;
pub mod util;
