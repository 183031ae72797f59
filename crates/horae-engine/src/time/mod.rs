//! Time subsystem.
//!
//! Provides the redraw tick source without coupling to the runtime.
//! Intended usage:
//! - the runtime owns one `Ticker` and parks the event loop until `deadline()`
//! - on wake-up, `poll(now)` yields a `Tick` and the runtime requests a redraw

mod ticker;

pub use ticker::{phase_delay, Tick, TickSchedule, Ticker};
