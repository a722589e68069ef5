pub mod order;
pub mod side;

pub use order::{OrderRequest, TopOfBook, TradeLogEntry};
pub use side::Side;
