//! Decoding and analysis of binary signal-capture files.
//!
//! [`dsp`] holds the record decoder and the signal transforms; [`gui`] and
//! [`export`] present them interactively or as PNG files.
pub mod config;
pub mod dsp;
pub mod export;
pub mod gui;
pub mod types;
