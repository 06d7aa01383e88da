pub mod aggregate;
pub mod log;
pub mod logger;
pub mod repository;
