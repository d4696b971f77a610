pub mod orchestrator;

pub use orchestrator::{execute, run, run_session};
