//! A minimal RESP key-value server: an in-memory store with per-key expiry,
//! served over TCP, with optional replica bootstrap against a master.

pub mod commands;
pub mod connection;
pub mod handshake;
pub mod key_value_store;
pub mod resp;
pub mod server;
