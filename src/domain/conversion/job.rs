//! Conversion Context - 转换任务

use serde::{Deserialize, Serialize};
use std::path::Path;

/// 输出文件名后缀
pub const OUTPUT_SUFFIX: &str = "_converted";

/// 支持的输入格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupportedContentType {
    Jpeg,
    Png,
    Webp,
}

impl SupportedContentType {
    const PREFIXES: [(&'static str, SupportedContentType); 3] = [
        ("image/jpeg", SupportedContentType::Jpeg),
        ("image/png", SupportedContentType::Png),
        ("image/webp", SupportedContentType::Webp),
    ];

    /// 按前缀匹配（允许 `image/png; charset=...` 这类带参数的值）
    pub fn detect(content_type: Option<&str>) -> Option<Self> {
        let content_type = content_type?.trim().to_ascii_lowercase();
        Self::PREFIXES
            .iter()
            .find(|(prefix, _)| content_type.starts_with(prefix))
            .map(|(_, kind)| *kind)
    }

    pub fn mime(&self) -> &'static str {
        match self {
            SupportedContentType::Jpeg => "image/jpeg",
            SupportedContentType::Png => "image/png",
            SupportedContentType::Webp => "image/webp",
        }
    }
}

/// 循环次数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LoopCount {
    /// 无限循环
    #[default]
    Infinite,
    /// 固定次数
    Finite(u16),
}

impl LoopCount {
    /// 配置中 0 表示无限循环
    pub fn from_config(value: u16) -> Self {
        match value {
            0 => LoopCount::Infinite,
            n => LoopCount::Finite(n),
        }
    }
}

/// 一次转换请求
///
/// 只在一次 convert 调用期间存在，调用结束后不保留任何缓冲区
#[derive(Debug, Clone)]
pub struct ConversionJob {
    /// 原始字节
    pub input: Vec<u8>,
    /// 附件声明的 content type
    pub content_type: Option<String>,
    /// 附件声明的大小（字节）
    pub declared_size: u64,
    /// 原始文件名
    pub file_name: String,
    /// 每帧显示时长（毫秒）
    pub frame_duration_ms: u32,
    /// 循环次数
    pub repeat: LoopCount,
}

impl ConversionJob {
    pub fn new(
        input: Vec<u8>,
        content_type: Option<String>,
        declared_size: u64,
        file_name: impl Into<String>,
    ) -> Self {
        Self {
            input,
            content_type,
            declared_size,
            file_name: file_name.into(),
            frame_duration_ms: 100,
            repeat: LoopCount::Infinite,
        }
    }

    pub fn with_frame_duration(mut self, ms: u32) -> Self {
        self.frame_duration_ms = ms;
        self
    }

    pub fn with_repeat(mut self, repeat: LoopCount) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn output_file_name(&self) -> String {
        output_file_name(&self.file_name)
    }
}

/// 去掉扩展名并追加 `_converted.gif`
pub fn output_file_name(input_name: &str) -> String {
    let stem = Path::new(input_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("image");
    format!("{}{}.gif", stem, OUTPUT_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_content_type() {
        assert_eq!(
            SupportedContentType::detect(Some("image/png")),
            Some(SupportedContentType::Png)
        );
        assert_eq!(
            SupportedContentType::detect(Some("image/jpeg; charset=binary")),
            Some(SupportedContentType::Jpeg)
        );
        assert_eq!(
            SupportedContentType::detect(Some("IMAGE/WEBP")),
            Some(SupportedContentType::Webp)
        );
        assert_eq!(SupportedContentType::detect(Some("image/gif")), None);
        assert_eq!(SupportedContentType::detect(Some("text/plain")), None);
        assert_eq!(SupportedContentType::detect(None), None);
    }

    #[test]
    fn test_output_file_name() {
        assert_eq!(output_file_name("cat.png"), "cat_converted.gif");
        assert_eq!(output_file_name("holiday.photo.jpeg"), "holiday.photo_converted.gif");
        assert_eq!(output_file_name("noext"), "noext_converted.gif");
        assert_eq!(output_file_name(""), "image_converted.gif");
    }

    #[test]
    fn test_loop_count_from_config() {
        assert_eq!(LoopCount::from_config(0), LoopCount::Infinite);
        assert_eq!(LoopCount::from_config(3), LoopCount::Finite(3));
    }

    #[test]
    fn test_job_defaults() {
        let job = ConversionJob::new(vec![1, 2, 3], Some("image/png".into()), 3, "a.png");
        assert_eq!(job.frame_duration_ms, 100);
        assert_eq!(job.repeat, LoopCount::Infinite);
        assert_eq!(job.output_file_name(), "a_converted.gif");
    }
}
