//! # Background Tasks
//!
//! Functions that take a short state lock, spawn onto
//! [`TOKIO_RT`](crate::utils::runtime::TOKIO_RT) and write the result back.

pub(crate) mod auth;
pub(crate) mod chat;
