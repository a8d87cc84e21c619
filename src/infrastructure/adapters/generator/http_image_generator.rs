//! HTTP Image Generator - 调用外部图像生成服务
//!
//! 实现 ImageGeneratorPort trait
//!
//! 外部 API:
//! GET {base_url}/prompt/{prompt}?width=1024&height=1024&nologo=true&model=flux&seed=123&private=true&safe=true
//! Response: 200 + 原始图像字节；其他状态码一律视为失败，不解析响应体

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{GenerationError, ImageGeneratorPort};
use crate::domain::generation::GenerationRequest;

/// 请求观察钩子，每次发送前调用（用于检查种子等请求参数）
pub type RequestObserver = Arc<dyn Fn(&GenerationRequest) + Send + Sync>;

/// HTTP 图像生成客户端配置
#[derive(Debug, Clone)]
pub struct HttpImageGeneratorConfig {
    /// 生成服务基础 URL
    pub base_url: String,
    /// 请求超时时间（秒），0 表示不超时
    pub timeout_secs: u64,
    pub width: u32,
    pub height: u32,
}

impl Default for HttpImageGeneratorConfig {
    fn default() -> Self {
        Self {
            base_url: "https://image.pollinations.ai".to_string(),
            timeout_secs: 120,
            width: 1024,
            height: 1024,
        }
    }
}

impl HttpImageGeneratorConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// HTTP 图像生成客户端
pub struct HttpImageGenerator {
    client: Client,
    config: HttpImageGeneratorConfig,
    observer: Option<RequestObserver>,
}

impl HttpImageGenerator {
    /// 创建新的客户端
    pub fn new(config: HttpImageGeneratorConfig) -> Result<Self, GenerationError> {
        let mut builder = Client::builder();
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        let client = builder
            .build()
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            config,
            observer: None,
        })
    }

    /// 注册请求观察钩子
    pub fn with_observer(mut self, observer: RequestObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    /// 构造请求 URL
    pub fn request_url(&self, request: &GenerationRequest) -> String {
        format!(
            "{}/prompt/{}?width={}&height={}&nologo=true&model={}&seed={}&private=true&safe=true",
            self.config.base_url.trim_end_matches('/'),
            urlencoding::encode(request.prompt.as_str()),
            self.config.width,
            self.config.height,
            request.model.as_str(),
            request.seed,
        )
    }
}

#[async_trait]
impl ImageGeneratorPort for HttpImageGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<Vec<u8>, GenerationError> {
        if let Some(observer) = &self.observer {
            observer(request);
        }

        let url = self.request_url(request);
        tracing::debug!(
            model = %request.model,
            seed = %request.seed,
            prompt_len = request.prompt.as_str().len(),
            "Sending image generation request"
        );

        let response = self.client.get(&url).send().await.map_err(|e| {
            if e.is_timeout() {
                GenerationError::TimedOut
            } else if e.is_connect() {
                GenerationError::Transport(format!("Cannot connect to image service: {}", e))
            } else {
                GenerationError::Transport(e.to_string())
            }
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::warn!(status = %status, "Image service returned non-success status");
            return Err(GenerationError::Api {
                status_code: status.as_u16(),
            });
        }

        let data = response
            .bytes()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerationError::TimedOut
                } else {
                    GenerationError::InvalidResponse(format!("Failed to read image: {}", e))
                }
            })?
            .to_vec();

        tracing::debug!(size = data.len(), "Image generation completed");

        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::generation::{ImageModel, Prompt, Seed};
    use axum::{
        extract::{Query, State},
        http::StatusCode as AxumStatus,
        routing::get,
        Router,
    };
    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;
    use tokio::net::TcpListener;

    type Captured = Arc<Mutex<Vec<HashMap<String, String>>>>;

    /// 启动本地桩服务，返回 base URL
    async fn spawn_stub(status: AxumStatus, body: &'static [u8], delay: Duration) -> (String, Captured) {
        let captured: Captured = Arc::new(Mutex::new(Vec::new()));
        let app = Router::new()
            .route(
                "/prompt/:prompt",
                get(
                    move |State(captured): State<Captured>,
                          Query(params): Query<HashMap<String, String>>| async move {
                        captured.lock().unwrap().push(params);
                        tokio::time::sleep(delay).await;
                        (status, body.to_vec())
                    },
                ),
            )
            .with_state(captured.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{}", addr), captured)
    }

    fn request(prompt: &str) -> GenerationRequest {
        GenerationRequest::new(Prompt::new(prompt).unwrap(), ImageModel::Flux)
    }

    #[test]
    fn test_config_default() {
        let config = HttpImageGeneratorConfig::default();
        assert_eq!(config.base_url, "https://image.pollinations.ai");
        assert_eq!(config.timeout_secs, 120);
        assert_eq!((config.width, config.height), (1024, 1024));
    }

    #[test]
    fn test_request_url() {
        let generator =
            HttpImageGenerator::new(HttpImageGeneratorConfig::new("http://upstream.test/")).unwrap();
        let request = GenerationRequest {
            prompt: Prompt::new("a red circle / blue?").unwrap(),
            model: ImageModel::FluxPro,
            seed: Seed::new(42).unwrap(),
        };

        assert_eq!(
            generator.request_url(&request),
            "http://upstream.test/prompt/a%20red%20circle%20%2F%20blue%3F\
             ?width=1024&height=1024&nologo=true&model=flux-pro&seed=42&private=true&safe=true"
        );
    }

    #[tokio::test]
    async fn test_success_returns_body_verbatim() {
        let (base_url, captured) = spawn_stub(AxumStatus::OK, b"\x89PNG-bytes", Duration::ZERO).await;
        let generator = HttpImageGenerator::new(HttpImageGeneratorConfig::new(base_url)).unwrap();
        let request = request("a red circle");

        let data = generator.generate(&request).await.unwrap();

        assert_eq!(data, b"\x89PNG-bytes");
        let params = captured.lock().unwrap()[0].clone();
        assert_eq!(params["model"], "flux");
        assert_eq!(params["seed"], request.seed.to_string());
        assert_eq!(params["width"], "1024");
        assert_eq!(params["nologo"], "true");
        assert_eq!(params["private"], "true");
        assert_eq!(params["safe"], "true");
    }

    #[tokio::test]
    async fn test_server_error_yields_status_code() {
        let (base_url, _) =
            spawn_stub(AxumStatus::INTERNAL_SERVER_ERROR, b"boom", Duration::ZERO).await;
        let generator = HttpImageGenerator::new(HttpImageGeneratorConfig::new(base_url)).unwrap();

        let result = generator.generate(&request("a red circle")).await;

        assert_eq!(result.unwrap_err(), GenerationError::Api { status_code: 500 });
    }

    #[tokio::test]
    async fn test_non_200_success_status_is_failure() {
        let (base_url, _) = spawn_stub(AxumStatus::NO_CONTENT, b"", Duration::ZERO).await;
        let generator = HttpImageGenerator::new(HttpImageGeneratorConfig::new(base_url)).unwrap();

        let result = generator.generate(&request("a red circle")).await;

        assert_eq!(result.unwrap_err(), GenerationError::Api { status_code: 204 });
    }

    #[tokio::test]
    async fn test_connection_failure_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let generator =
            HttpImageGenerator::new(HttpImageGeneratorConfig::new(format!("http://{}", addr))).unwrap();

        let result = generator.generate(&request("a red circle")).await;

        assert!(matches!(result, Err(GenerationError::Transport(_))));
    }

    #[tokio::test]
    async fn test_slow_upstream_times_out() {
        let (base_url, _) = spawn_stub(AxumStatus::OK, b"late", Duration::from_secs(3)).await;
        let generator =
            HttpImageGenerator::new(HttpImageGeneratorConfig::new(base_url).with_timeout(1)).unwrap();

        let result = generator.generate(&request("a red circle")).await;

        assert_eq!(result.unwrap_err(), GenerationError::TimedOut);
    }

    #[tokio::test]
    async fn test_observer_sees_distinct_seeds() {
        let (base_url, _) = spawn_stub(AxumStatus::OK, b"img", Duration::ZERO).await;
        let seeds = Arc::new(Mutex::new(Vec::new()));
        let observer: RequestObserver = {
            let seeds = seeds.clone();
            Arc::new(move |request: &GenerationRequest| {
                seeds.lock().unwrap().push(request.seed.value());
            })
        };
        let generator = HttpImageGenerator::new(HttpImageGeneratorConfig::new(base_url))
            .unwrap()
            .with_observer(observer);

        for _ in 0..20 {
            generator.generate(&request("same prompt")).await.unwrap();
        }

        let seeds = seeds.lock().unwrap();
        assert_eq!(seeds.len(), 20);
        let distinct: HashSet<u32> = seeds.iter().copied().collect();
        assert!(distinct.len() > 1);
    }
}
