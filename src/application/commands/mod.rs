//! 应用层 - 命令
//!
//! 每个外部触发（generate / regenerate / convert / retire）对应一个命令

mod convert_commands;
mod generate_commands;

pub mod handlers;

pub use convert_commands::*;
pub use generate_commands::*;
