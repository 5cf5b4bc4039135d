//! Tile Blast (workspace facade crate).
//!
//! This package keeps the `tile_blast::{core,engine,adapter,types}` public
//! API stable while the implementation lives in dedicated crates under
//! `crates/`.

pub use tile_blast_adapter as adapter;
pub use tile_blast_core as core;
pub use tile_blast_engine as engine;
pub use tile_blast_types as types;
