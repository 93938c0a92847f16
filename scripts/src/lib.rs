//! Scripts for deploying the ERC20Test token and interacting with it.

#![deny(clippy::missing_docs_in_private_items)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod constants;
pub mod env;
pub mod errors;

/// Our deploy utils
pub mod deploy;

/// Our deploy tasks
pub mod tasks;

/// Contract bindings, reads & writes
pub mod tx;
