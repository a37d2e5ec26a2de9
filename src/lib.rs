//! ferry — minimal LAN file drop
//!
//! One TCP connection carries one operation: fetch the server's catalog and
//! download a file, or push a file into the server's upload directory.

pub mod catalog;
pub mod cli;
pub mod client;
pub mod error;
pub mod logger;
pub mod progress;
pub mod protocol;
pub mod server;
pub mod session;
pub mod transfer;
pub mod wire;
