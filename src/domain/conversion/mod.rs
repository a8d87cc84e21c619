//! Conversion Context - 图片转 GIF 限界上下文
//!
//! 职责:
//! - 输入格式识别
//! - 转换任务参数（帧时长、循环次数）
//! - 输出文件名

mod job;

pub use job::{output_file_name, ConversionJob, LoopCount, SupportedContentType, OUTPUT_SUFFIX};
