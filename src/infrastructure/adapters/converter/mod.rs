//! Converter Adapter - 图片转 GIF 实现

mod gif_converter;

pub use gif_converter::{GifConverter, GifConverterConfig};
