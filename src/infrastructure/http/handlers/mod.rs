//! HTTP Handlers

mod convert;
mod generation;
mod ping;

pub use convert::*;
pub use generation::*;
pub use ping::*;
