//! Folio Library
//!
//! This library provides the state core of a single-page portfolio: the
//! persisted accent preference and the scroll-driven reveal flags that gate
//! section entrance animations. Rendering is left to the consumer, which
//! reads both through a [`session::Session`].

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod models;
pub mod reveal;
pub mod session;
pub mod storage;
pub mod theme;
