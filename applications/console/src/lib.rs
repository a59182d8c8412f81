//! Muse Console
//!
//! Command-line front end for the Muse catalog administration controllers.

pub mod cli;
pub mod commands;
pub mod config;
pub mod render;
