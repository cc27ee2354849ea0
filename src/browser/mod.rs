pub mod script;
pub mod selector;
pub mod session;
