//! Generator Adapter - 图像生成客户端实现

mod fake_image_generator;
mod http_image_generator;

pub use fake_image_generator::FakeImageGenerator;
pub use http_image_generator::*;
