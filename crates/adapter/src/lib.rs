//! View adapter - line-delimited JSON bridge to an external view layer
//!
//! The orchestrator drives a [`tile_blast_engine::GameView`]; this crate
//! provides an implementation that serializes every view callback to a
//! JSON line on an outbound channel and feeds inbound JSON lines back in
//! as input events and animation acknowledgements.

pub mod protocol;
pub mod runtime;

pub use protocol::{parse_message, ParsedMessage};
pub use runtime::{run_session, ChannelView, Session};
