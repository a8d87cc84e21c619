//! Infrastructure Adapters
//!
//! 六边形架构的适配器实现

pub mod converter;
pub mod generator;

pub use converter::*;
pub use generator::*;
