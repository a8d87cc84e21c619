//! Session Sweeper - 定期清理过期的重新生成会话

use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::SessionRegistryPort;

/// Sweeper 配置
#[derive(Debug, Clone)]
pub struct SessionSweeperConfig {
    /// 扫描间隔（秒）
    pub interval_secs: u64,
    /// 会话空闲过期时间（秒）
    pub session_expire_secs: u64,
}

impl Default for SessionSweeperConfig {
    fn default() -> Self {
        Self {
            interval_secs: 3600,
            session_expire_secs: 86400,
        }
    }
}

/// 会话清理 Worker
///
/// 只移除 Idle 且超时的会话，InFlight 会话留到下一轮
pub struct SessionSweeper {
    config: SessionSweeperConfig,
    sessions: Arc<dyn SessionRegistryPort>,
}

impl SessionSweeper {
    pub fn new(config: SessionSweeperConfig, sessions: Arc<dyn SessionRegistryPort>) -> Self {
        Self { config, sessions }
    }

    /// 启动 Worker
    pub async fn run(self) {
        tracing::info!(
            interval_secs = self.config.interval_secs,
            session_expire_secs = self.config.session_expire_secs,
            "SessionSweeper started"
        );

        let mut ticker = tokio::time::interval(Duration::from_secs(self.config.interval_secs.max(1)));
        // 第一次 tick 立即返回
        ticker.tick().await;

        loop {
            ticker.tick().await;
            self.sweep_once();
        }
    }

    /// 执行一轮清理，返回移除的会话数
    pub fn sweep_once(&self) -> usize {
        let expired = self.sessions.expired(self.config.session_expire_secs);
        let mut removed = 0;
        for id in expired {
            if self.sessions.retire(id).is_ok() {
                removed += 1;
            }
        }

        if removed > 0 {
            tracing::info!(
                removed = removed,
                remaining = self.sessions.len(),
                "Expired sessions swept"
            );
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::generation::{ImageModel, Prompt};
    use crate::domain::regeneration::RegenerationSession;
    use crate::infrastructure::memory::InMemorySessionRegistry;

    #[tokio::test]
    async fn test_sweep_removes_only_expired_idle_sessions() {
        let registry = Arc::new(InMemorySessionRegistry::new());
        let prompt = Prompt::new("a cat").unwrap();
        let idle = registry
            .create(RegenerationSession::new(prompt.clone(), ImageModel::Flux, 1))
            .unwrap();
        let busy = registry
            .create(RegenerationSession::new(prompt, ImageModel::Flux, 2))
            .unwrap();
        let _guard = busy.request(2).unwrap();

        tokio::time::sleep(Duration::from_millis(1100)).await;

        let sweeper = SessionSweeper::new(
            SessionSweeperConfig {
                interval_secs: 1,
                session_expire_secs: 0,
            },
            registry.clone(),
        );
        assert_eq!(sweeper.sweep_once(), 1);
        assert!(registry.get(idle.id()).is_err());
        assert!(registry.get(busy.id()).is_ok());
    }

    #[tokio::test]
    async fn test_sweep_keeps_fresh_sessions() {
        let registry = Arc::new(InMemorySessionRegistry::new());
        registry
            .create(RegenerationSession::new(Prompt::new("a").unwrap(), ImageModel::Flux, 1))
            .unwrap();

        let sweeper = SessionSweeper::new(SessionSweeperConfig::default(), registry.clone());
        assert_eq!(sweeper.sweep_once(), 0);
        assert_eq!(registry.len(), 1);
    }
}
