pub mod config;
pub mod db;
pub mod store;
pub mod target;
