//! Conversion Commands - 图片转 GIF 命令

/// 转换附件命令
#[derive(Debug, Clone)]
pub struct ConvertImageCommand {
    pub file_name: String,
    pub content_type: Option<String>,
    /// 附件声明的大小
    pub declared_size: u64,
    pub data: Vec<u8>,
}
