//! Freight CLI Library
//!
//! Client for the Freight deploy service: task references, the
//! authenticated JSON transport, log tailing and the command implementations.

pub mod cli;
pub mod commands;
pub mod config;
pub mod editor;
pub mod errors;
pub mod http;
pub mod logs;
pub mod models;
pub mod prompt;
pub mod render;
pub mod tail;
pub mod task;
pub mod webhook;
