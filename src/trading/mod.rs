pub mod executor;
pub mod learning;
pub mod trade_log;

pub use learning::{ConfidenceMemory, LearningStore};
pub use trade_log::TradeLog;
