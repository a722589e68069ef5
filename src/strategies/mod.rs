pub mod selector;
pub mod signals;

pub use selector::Selector;
pub use signals::Signal;
