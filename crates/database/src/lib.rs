pub mod client;
pub mod connect;
