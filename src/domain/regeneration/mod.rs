//! Regeneration Context - 重新生成限界上下文
//!
//! 职责:
//! - 每个生成结果一个 RegenerationSession
//! - Idle / InFlight 单飞守卫
//! - 发起者身份校验

mod aggregate;
mod errors;

pub use aggregate::{RegenerationGuard, RegenerationSession, SessionState};
pub use errors::RegenerationError;
