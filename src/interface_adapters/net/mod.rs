// Network adapters split by viewer sockets vs HTTP control routes.

pub mod controls;
pub mod viewer;

pub use controls::{control_handler, shutdown_handler, state_handler};
pub use viewer::ws_handler;
