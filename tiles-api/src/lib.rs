//! Tiles API - Shared types for the Tiles photo mosaic.
//!
//! The layout engine, the CLI and any renderer exchange these plain data
//! types. Everything here is `Serialize + Deserialize` so layouts can be
//! cached or shipped to a front end as JSON.

mod photo;
mod stream;
mod tile;

pub use photo::*;
pub use stream::*;
pub use tile::*;
