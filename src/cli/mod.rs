pub mod actions;
pub mod commands;
pub mod dispatch;
pub mod script;
pub mod terminal;

mod start;
pub use self::start::start;
