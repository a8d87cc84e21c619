//! Imagebot - 聊天机器人图像功能核心
//!
//! 架构设计: DDD + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Generation: prompt / model / seed 值对象
//! - Regeneration: 重新生成会话聚合（单飞守卫）
//! - Conversion: 图片转 GIF 任务
//!
//! 应用层 (application/):
//! - Ports: 端口定义（ImageGenerator, ImageConverter, SessionRegistry）
//! - Commands: 命令与处理器
//! - Orchestrator: 外部触发的统一入口
//!
//! 基础设施层 (infrastructure/):
//! - Adapters: HTTP 图像生成客户端, GIF 转换器
//! - Memory: SessionRegistry 内存实现
//! - Worker: SessionSweeper 过期会话回收
//! - HTTP: 聊天网关调用的触发接口

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
