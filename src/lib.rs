//! Host side of the signup flow.
//!
//! The capture widget itself lives in the `signature` crate. This crate wires
//! it into a registration: configuration from the environment, the two form
//! steps with their validation, the signature slot the widget saves into, the
//! JSON payload for the backend, and stroke-file replay for the CLI.

pub mod commands;
pub mod config;
pub mod form;
pub mod replay;
