//! Chart Assistant - conversational data assistant with chart extraction.
//!
//! Sends user questions to a chat backend and turns free-text answers
//! (embedded JSON, bulleted lists, literal arrays) into chart-ready
//! datasets that the user can visualize in several styles.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
