//! Regeneration Context - Aggregate Root

use chrono::{DateTime, TimeZone, Utc};
use std::sync::atomic::{AtomicI64, AtomicU32, AtomicU8, Ordering};
use std::sync::Arc;
use uuid::Uuid;

use super::RegenerationError;
use crate::domain::generation::{ImageModel, Prompt};

/// 会话状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// 空闲，可以发起重新生成
    Idle,
    /// 正在重新生成
    InFlight,
}

impl SessionState {
    const IDLE: u8 = 0;
    const IN_FLIGHT: u8 = 1;

    fn from_u8(value: u8) -> Self {
        match value {
            Self::IN_FLIGHT => SessionState::InFlight,
            _ => SessionState::Idle,
        }
    }
}

/// RegenerationSession 聚合根
///
/// 绑定到一次成功生成的结果，在 Idle 与 InFlight 之间循环，没有终止状态。
///
/// 不变量:
/// - 同一会话不会同时存在两个 InFlight 尝试（state 只通过 CAS 进入 InFlight）
/// - 只有 owner 可以发起重新生成
/// - prompt / model 在会话生命周期内不变
#[derive(Debug)]
pub struct RegenerationSession {
    id: Uuid,
    prompt: Prompt,
    model: ImageModel,
    owner_id: u64,
    state: AtomicU8,
    attempts: AtomicU32,
    created_at: DateTime<Utc>,
    last_activity_ms: AtomicI64,
}

impl RegenerationSession {
    /// 创建新会话（初始状态 Idle）
    pub fn new(prompt: Prompt, model: ImageModel, owner_id: u64) -> Self {
        Self::with_id(Uuid::new_v4(), prompt, model, owner_id)
    }

    pub fn with_id(id: Uuid, prompt: Prompt, model: ImageModel, owner_id: u64) -> Self {
        let now = Utc::now();
        Self {
            id,
            prompt,
            model,
            owner_id,
            state: AtomicU8::new(SessionState::IDLE),
            attempts: AtomicU32::new(0),
            created_at: now,
            last_activity_ms: AtomicI64::new(now.timestamp_millis()),
        }
    }

    /// 请求一次重新生成
    ///
    /// 先校验身份，再以单次 CAS 完成 Idle -> InFlight。
    /// 返回的 guard 在 `complete` 或 drop 时把会话恢复为 Idle。
    pub fn request(self: &Arc<Self>, actor_id: u64) -> Result<RegenerationGuard, RegenerationError> {
        if actor_id != self.owner_id {
            tracing::debug!(
                result_id = %self.id,
                actor_id = actor_id,
                owner_id = self.owner_id,
                "Regeneration rejected: not the owner"
            );
            return Err(RegenerationError::Permission { actor_id });
        }

        self.state
            .compare_exchange(
                SessionState::IDLE,
                SessionState::IN_FLIGHT,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .map_err(|_| RegenerationError::AlreadyInProgress(self.id))?;

        let attempt = self.attempts.fetch_add(1, Ordering::Relaxed) + 1;
        self.touch();
        tracing::debug!(result_id = %self.id, attempt = attempt, "Regeneration started");

        Ok(RegenerationGuard {
            session: Arc::clone(self),
            completed: false,
        })
    }

    /// 更新最后活动时间
    pub fn touch(&self) {
        self.last_activity_ms
            .store(Utc::now().timestamp_millis(), Ordering::Relaxed);
    }

    /// 距离最后活动的时长
    pub fn idle_for(&self, now: DateTime<Utc>) -> chrono::Duration {
        now - self.last_activity()
    }

    fn release(&self) {
        self.state.store(SessionState::IDLE, Ordering::Release);
        self.touch();
    }

    // Getters
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn prompt(&self) -> &Prompt {
        &self.prompt
    }

    pub fn model(&self) -> ImageModel {
        self.model
    }

    pub fn owner_id(&self) -> u64 {
        self.owner_id
    }

    pub fn state(&self) -> SessionState {
        SessionState::from_u8(self.state.load(Ordering::Acquire))
    }

    pub fn attempts(&self) -> u32 {
        self.attempts.load(Ordering::Relaxed)
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn last_activity(&self) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(self.last_activity_ms.load(Ordering::Relaxed))
            .single()
            .unwrap_or(self.created_at)
    }
}

/// InFlight 期间的许可
///
/// 持有者负责调用 `complete`；若任务被取消或 panic，drop 时同样恢复 Idle
#[derive(Debug)]
pub struct RegenerationGuard {
    session: Arc<RegenerationSession>,
    completed: bool,
}

impl RegenerationGuard {
    pub fn session(&self) -> &Arc<RegenerationSession> {
        &self.session
    }

    /// 结束本次尝试，无论成功与否都回到 Idle
    pub fn complete(mut self, succeeded: bool) {
        self.completed = true;
        self.session.release();
        tracing::debug!(
            result_id = %self.session.id,
            succeeded = succeeded,
            "Regeneration completed"
        );
    }
}

impl Drop for RegenerationGuard {
    fn drop(&mut self) {
        if !self.completed {
            tracing::warn!(
                result_id = %self.session.id,
                "Regeneration guard dropped before completion, releasing session"
            );
            self.session.release();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OWNER: u64 = 42;
    const STRANGER: u64 = 7;

    fn session() -> Arc<RegenerationSession> {
        Arc::new(RegenerationSession::new(
            Prompt::new("a red circle").unwrap(),
            ImageModel::Flux,
            OWNER,
        ))
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = session();
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.attempts(), 0);
        assert_eq!(session.model(), ImageModel::Flux);
        assert_eq!(session.prompt().as_str(), "a red circle");
    }

    #[test]
    fn test_owner_request_enters_in_flight() {
        let session = session();
        let guard = session.request(OWNER).unwrap();
        assert_eq!(session.state(), SessionState::InFlight);
        assert_eq!(session.attempts(), 1);

        guard.complete(true);
        assert_eq!(session.state(), SessionState::Idle);
    }

    #[test]
    fn test_request_while_in_flight_is_rejected() {
        let session = session();
        let _guard = session.request(OWNER).unwrap();

        let second = session.request(OWNER);
        assert!(matches!(second, Err(RegenerationError::AlreadyInProgress(id)) if id == session.id()));
        assert_eq!(session.state(), SessionState::InFlight);
        assert_eq!(session.attempts(), 1);
    }

    #[test]
    fn test_stranger_is_rejected_in_both_states() {
        let session = session();

        let idle = session.request(STRANGER);
        assert!(matches!(idle, Err(RegenerationError::Permission { actor_id: STRANGER })));
        assert_eq!(session.state(), SessionState::Idle);

        let _guard = session.request(OWNER).unwrap();
        let in_flight = session.request(STRANGER);
        assert!(matches!(in_flight, Err(RegenerationError::Permission { actor_id: STRANGER })));
        assert_eq!(session.state(), SessionState::InFlight);
    }

    #[test]
    fn test_failed_attempt_leaves_session_reusable() {
        let session = session();
        session.request(OWNER).unwrap().complete(false);
        assert_eq!(session.state(), SessionState::Idle);

        let guard = session.request(OWNER).unwrap();
        assert_eq!(session.attempts(), 2);
        guard.complete(true);
        assert_eq!(session.prompt().as_str(), "a red circle");
    }

    #[test]
    fn test_dropped_guard_releases_session() {
        let session = session();
        {
            let _guard = session.request(OWNER).unwrap();
        }
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.request(OWNER).is_ok());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_requests_admit_exactly_one() {
        let session = session();
        let barrier = Arc::new(tokio::sync::Barrier::new(16));

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let session = session.clone();
                let barrier = barrier.clone();
                tokio::spawn(async move {
                    barrier.wait().await;
                    session.request(OWNER)
                })
            })
            .collect();

        let mut guards = Vec::new();
        let mut rejected = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(guard) => guards.push(guard),
                Err(RegenerationError::AlreadyInProgress(_)) => rejected += 1,
                Err(e) => panic!("unexpected error: {e}"),
            }
        }

        assert_eq!(guards.len(), 1);
        assert_eq!(rejected, 15);
        assert_eq!(session.attempts(), 1);
    }
}
