pub mod api;
pub mod config;
pub mod error;
pub mod server;
pub mod storage;
pub mod sysinfo;

pub use server::Server;
