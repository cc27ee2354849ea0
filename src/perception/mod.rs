pub mod mapper;
pub mod traits;
pub mod types;
