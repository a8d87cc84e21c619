//! GIF Converter - 基于 image crate 的图片转 GIF 流水线
//!
//! 流程：
//! 1. 校验 content type 与输入大小（解码前）
//! 2. 解码为位图
//! 3. 归一化到 RGBA，保留透明通道
//! 4. 构造帧序列（当前只有一帧）
//! 5. 按帧时长与循环次数编码为 GIF
//! 6. 检查输出大小
//!
//! 解码/编码为 CPU 密集操作，放在 `spawn_blocking` 中执行

use async_trait::async_trait;
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, DynamicImage, Frame, RgbaImage};

use crate::application::ports::{ConversionError, ConvertedImage, ImageConverterPort};
use crate::domain::conversion::{ConversionJob, LoopCount, SupportedContentType};

/// GIF 转换器配置
#[derive(Debug, Clone)]
pub struct GifConverterConfig {
    /// 输入大小上限（字节）
    pub max_input_bytes: u64,
    /// 输出大小上限（字节）
    pub max_output_bytes: u64,
    /// 量化速度 1-30，越小质量越好、越慢
    pub speed: i32,
}

impl Default for GifConverterConfig {
    fn default() -> Self {
        Self {
            max_input_bytes: 8 * 1024 * 1024,
            max_output_bytes: 10 * 1024 * 1024,
            speed: 10,
        }
    }
}

/// GIF 转换器
pub struct GifConverter {
    config: GifConverterConfig,
}

impl GifConverter {
    pub fn new(config: GifConverterConfig) -> Self {
        Self { config }
    }

    pub fn with_defaults() -> Self {
        Self::new(GifConverterConfig::default())
    }

    /// 解码前的校验
    fn validate(&self, job: &ConversionJob) -> Result<SupportedContentType, ConversionError> {
        let kind = SupportedContentType::detect(job.content_type.as_deref())
            .ok_or_else(|| ConversionError::UnsupportedContentType(job.content_type.clone()))?;

        // 声明大小与实际大小取较大者
        let size = job.declared_size.max(job.input.len() as u64);
        if size > self.config.max_input_bytes {
            return Err(ConversionError::InputTooLarge {
                size,
                limit: self.config.max_input_bytes,
            });
        }

        Ok(kind)
    }

    /// 同步执行解码 -> 编码 -> 大小检查
    fn process(config: &GifConverterConfig, job: ConversionJob) -> Result<ConvertedImage, ConversionError> {
        let file_name = job.output_file_name();
        let decoded = decode(&job.input)?;
        drop(job.input);

        let rgba = normalize(decoded);
        let (width, height) = rgba.dimensions();

        let frames = build_frames(vec![rgba], job.frame_duration_ms);
        let frame_count = frames.len();
        let data = encode(frames, job.repeat, config.speed)?;

        let size = data.len() as u64;
        if size > config.max_output_bytes {
            return Err(ConversionError::OutputTooLarge {
                size,
                limit: config.max_output_bytes,
            });
        }

        Ok(ConvertedImage {
            data,
            file_name,
            width,
            height,
            frame_count,
        })
    }
}

impl Default for GifConverter {
    fn default() -> Self {
        Self::with_defaults()
    }
}

fn decode(bytes: &[u8]) -> Result<DynamicImage, ConversionError> {
    image::load_from_memory(bytes).map_err(|e| ConversionError::Decode(e.to_string()))
}

/// 统一转为 RGBA，透明像素不与背景合成
fn normalize(image: DynamicImage) -> RgbaImage {
    image.into_rgba8()
}

/// 按顺序构造帧，每帧使用相同的显示时长
fn build_frames(images: Vec<RgbaImage>, frame_duration_ms: u32) -> Vec<Frame> {
    images
        .into_iter()
        .map(|image| {
            Frame::from_parts(image, 0, 0, Delay::from_numer_denom_ms(frame_duration_ms, 1))
        })
        .collect()
}

fn encode(frames: Vec<Frame>, repeat: LoopCount, speed: i32) -> Result<Vec<u8>, ConversionError> {
    let mut output = Vec::new();
    {
        // encoder 在作用域结束时写入 trailer
        let mut encoder = GifEncoder::new_with_speed(&mut output, speed.clamp(1, 30));
        let repeat = match repeat {
            LoopCount::Infinite => Repeat::Infinite,
            LoopCount::Finite(n) => Repeat::Finite(n),
        };
        encoder
            .set_repeat(repeat)
            .map_err(|e| ConversionError::Encode(e.to_string()))?;
        encoder
            .encode_frames(frames)
            .map_err(|e| ConversionError::Encode(e.to_string()))?;
    }
    Ok(output)
}

#[async_trait]
impl ImageConverterPort for GifConverter {
    async fn convert(&self, job: ConversionJob) -> Result<ConvertedImage, ConversionError> {
        let kind = self.validate(&job)?;

        tracing::debug!(
            content_type = kind.mime(),
            declared_size = job.declared_size,
            frame_duration_ms = job.frame_duration_ms,
            "Decoding image for GIF conversion"
        );

        let config = self.config.clone();
        let result = tokio::task::spawn_blocking(move || Self::process(&config, job))
            .await
            .map_err(|e| ConversionError::Encode(format!("Conversion task failed: {}", e)))?;

        if let Err(ConversionError::OutputTooLarge { size, limit }) = &result {
            tracing::warn!(size = size, limit = limit, "Encoded GIF exceeds output limit");
        }

        result
    }
}
