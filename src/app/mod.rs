//! Application lifecycle helpers.

mod shutdown;

pub use shutdown::{cancel_on_ctrl_c, shutdown_gracefully};
