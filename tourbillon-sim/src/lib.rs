//! Virtual host for the tourbillon core
//!
//! Implements the directive surface (frame timer, calendar ticks, motion
//! sampling, redraw requests) against a virtual clock, so the full mode
//! cycle runs deterministically on a desktop with no hardware attached.

pub mod shell;

pub use shell::VirtualShell;
