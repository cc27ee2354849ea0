pub mod coordinator;
pub mod display;
pub mod input;
