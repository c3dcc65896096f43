//! # 错误类型模块
//!
//! 定义水印核心协议的错误分类。图像文件的读写错误由 `image` 库产生，
//! 在 handler 层通过 `anyhow::Context` 原样上抛，不在此处重新包装。

use thiserror::Error;

/// 水印嵌入与提取过程中可能产生的错误。
#[derive(Debug, Error)]
pub enum WatermarkError {
    /// 水印比特流 (含结束标记) 超出图像的可用容量。
    /// 在任何像素被修改之前报告。
    #[error(
        "The watermark does not fit into the image. Required: {required} bits, Available: {available} bits"
    )]
    CapacityExceeded { required: u64, available: u64 },

    /// 遍历完整张图像也没有找到结束标记。
    #[error(
        "No terminator was found in the image. It probably carries no watermark, or the watermark was destroyed"
    )]
    TerminatorNotFound,

    /// 水印文本中含有 NUL 字节，与结束标记冲突。
    #[error("The watermark text contains a NUL byte, which collides with the terminator")]
    InvalidPayload,
}
