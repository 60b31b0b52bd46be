//! CUBE terminal: a token query console for Solana.
//!
//! Two halves share this crate. The gateway (`serve`) aggregates Solana RPC
//! and Dextools behind a small HTTP API; the shell (`shell`) is a line-driven
//! console that talks only to that API.

pub mod api;
pub mod config;
pub mod error;
pub mod format;
pub mod gateway;
pub mod models;
pub mod shell;
pub mod solana;
pub mod web;
