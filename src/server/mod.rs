//! TCP server for the wire protocol.

mod handler;

pub use handler::{run_server, run_server_on_listener};
