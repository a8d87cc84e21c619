//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod image_converter;
mod image_generator;
mod session_registry;

pub use image_converter::{ConversionError, ConvertedImage, ImageConverterPort};
pub use image_generator::{GenerationError, ImageGeneratorPort};
pub use session_registry::{SessionError, SessionRegistryPort};
