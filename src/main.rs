//! Imagebot - 聊天机器人图像功能核心
//!
//! 启动流程：加载配置 → 初始化日志 → 组装适配器与编排器 → 启动会话回收与 HTTP 服务

use std::sync::Arc;

use imagebot::application::{CommandOrchestrator, OrchestratorConfig};
use imagebot::config::{load_config, print_config, AppConfig};
use imagebot::infrastructure::adapters::{
    GifConverter, GifConverterConfig, HttpImageGenerator, HttpImageGeneratorConfig,
};
use imagebot::infrastructure::http::{AppState, HttpServer, ServerConfig};
use imagebot::infrastructure::memory::InMemorySessionRegistry;
use imagebot::infrastructure::worker::{SessionSweeper, SessionSweeperConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config);

    tracing::info!("Imagebot - 图像生成与转换服务");
    print_config(&config);

    // 图像生成客户端
    let generator_config = HttpImageGeneratorConfig {
        base_url: config.generator.base_url.clone(),
        timeout_secs: config.generator.timeout_secs,
        width: config.generator.width,
        height: config.generator.height,
    };
    let generator = Arc::new(HttpImageGenerator::new(generator_config)?);

    // GIF 转换器
    let converter = Arc::new(GifConverter::new(GifConverterConfig {
        max_input_bytes: config.conversion.max_input_bytes,
        max_output_bytes: config.conversion.max_output_bytes,
        speed: config.conversion.speed,
    }));

    // 重新生成会话表
    let sessions = Arc::new(InMemorySessionRegistry::new());

    let orchestrator = CommandOrchestrator::new(
        OrchestratorConfig {
            default_model: config.generator.default_model,
            frame_duration_ms: config.conversion.frame_duration_ms,
            repeat: config.conversion.repeat(),
        },
        generator,
        converter,
        sessions.clone(),
    );

    // 启动会话回收
    if config.gc.enabled {
        let sweeper = SessionSweeper::new(
            SessionSweeperConfig {
                interval_secs: config.gc.interval_secs,
                session_expire_secs: config.gc.session_expire_secs,
            },
            sessions,
        );
        tokio::spawn(sweeper.run());
    }

    // 创建 HTTP 服务器
    let server_config = ServerConfig::new(&config.server.host, config.server.port)
        .with_max_body_bytes(config.server.max_body_bytes);
    let state = AppState::new(Arc::new(orchestrator))
        .with_max_input_bytes(config.conversion.max_input_bytes);
    let server = HttpServer::new(server_config, state);

    tracing::info!("Starting HTTP server...");

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                return;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

/// 初始化日志，RUST_LOG 优先于配置文件
fn init_tracing(config: &AppConfig) {
    let log_filter = format!(
        "{},imagebot={},tower_http=debug",
        config.log.level, config.log.level
    );
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if config.log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
