pub mod engine;
pub mod report;

pub use engine::SettlementEngine;
pub use report::Report;
