//! Fake Image Generator - 用于测试的生成客户端
//!
//! 始终返回固定字节，不实际调用上游服务；可注入延迟和失败

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::application::ports::{GenerationError, ImageGeneratorPort};
use crate::domain::generation::GenerationRequest;

/// Fake Image Generator
pub struct FakeImageGenerator {
    payload: Vec<u8>,
    delay: Duration,
    failures: Mutex<VecDeque<GenerationError>>,
    requests: Mutex<Vec<GenerationRequest>>,
    calls: AtomicUsize,
}

impl FakeImageGenerator {
    pub fn new(payload: Vec<u8>) -> Self {
        Self {
            payload,
            delay: Duration::ZERO,
            failures: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// 模拟上游延迟
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// 下一次调用返回指定错误（按入队顺序消费）
    pub fn push_failure(&self, error: GenerationError) {
        if let Ok(mut failures) = self.failures.lock() {
            failures.push_back(error);
        }
    }

    /// 已发起的调用次数
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// 已收到的请求
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl ImageGeneratorPort for FakeImageGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<Vec<u8>, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(request.clone());
        }

        tracing::debug!(
            model = %request.model,
            seed = %request.seed,
            "FakeImageGenerator: returning fixed payload"
        );

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let failure = self.failures.lock().ok().and_then(|mut f| f.pop_front());
        match failure {
            Some(error) => Err(error),
            None => Ok(self.payload.clone()),
        }
    }
}
