//! Fixed-tick snake simulation with a neon terminal front end.
//!
//! The simulation core ([`engine`], [`session`]) knows nothing about the
//! terminal: the binary drives it from a [`scheduler::TickScheduler`] and
//! draws read-only snapshots through [`renderer`].

pub mod config;
pub mod engine;
pub mod food;
pub mod grid;
pub mod input;
pub mod renderer;
pub mod scheduler;
pub mod score;
pub mod session;
pub mod snake;
pub mod terminal;
pub mod ui;
