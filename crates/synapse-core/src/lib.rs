//! Core library for Synapse: conversation model, session store, the stubbed
//! candidate-search collaborator, and configuration.

pub mod chat;
pub mod config;
pub mod search;
pub mod session;
