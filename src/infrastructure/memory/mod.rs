//! Memory Layer - In-Memory State Management
//!
//! 实现 SessionRegistry，管理重新生成会话的内存状态

mod session_registry;

pub use session_registry::InMemorySessionRegistry;
