pub mod date;
pub mod error;
pub mod repo;
pub mod seed;
