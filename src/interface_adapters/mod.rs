// Interface adapters: display surface, wire protocol and control sources.

pub mod console;
pub mod display;
pub mod http;
pub mod net;
pub mod protocol;
pub mod state;
