//! Command Handlers 实现

mod convert_handlers;
mod generate_handlers;

pub use convert_handlers::*;
pub use generate_handlers::*;
