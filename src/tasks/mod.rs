//! Background Tasks Module
//!
//! # Tasks
//! - Sweep: purges expired discovery records and nonces, opt-in via `SWEEP_INTERVAL`

mod cleanup;

pub use cleanup::spawn_sweep_task;
