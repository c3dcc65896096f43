//! # lsb_watermark 库
//!
//! 本库包含 LSB 数字水印工具的核心逻辑。

// 声明库包含的所有模块。

pub mod attack;
pub mod cli;
pub mod constants;
pub mod error;
pub mod handler;
pub mod watermark;
