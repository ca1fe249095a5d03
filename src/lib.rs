//! Business core of a multiple-choice quiz: session state machine, scoring
//! and result history. A UI shell builds an [`app_state::AppState`], opens a
//! session with [`app_state::AppState::new_session`] and renders the
//! snapshots it returns.

pub mod app_state;
pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod repositories;
pub mod services;

#[cfg(test)]
pub mod test_utils;

/// Installs `env_logger` as the `log` backend, honouring `RUST_LOG`
/// (default `info`). Safe to call more than once.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}
