//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use clap::Parser;
use std::path::PathBuf;

/// 一款基于 LSB (最低有效位) 的数字水印命令行工具，用于在无损格式图像 (如 PNG, BMP) 中嵌入或提取文本水印，并生成受攻击图像进行鲁棒性测试。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款基于 LSB (最低有效位) 的数字水印命令行工具，用于在无损格式图像 (如 PNG, BMP) 中嵌入或提取文本水印，并生成受攻击图像进行鲁棒性测试。"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令：embed (嵌入)、extract (提取) 和 test (鲁棒性测试)。
#[derive(Parser, Debug)]
pub enum Commands {
    /// 在无损格式图像 (如 PNG, BMP) 中嵌入文本水印。
    Embed(EmbedArgs),

    /// 从含水印的图像中提取水印文本。
    Extract(ExtractArgs),

    /// 对图像施加一系列攻击，生成用于鲁棒性测试的退化副本。
    Test(TestArgs),
}

/// 'embed' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct EmbedArgs {
    /// 用于嵌入水印的输入图像文件路径 (如 PNG, BMP)。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 嵌入完成后，保存结果图像的输出路径 (必须是无损格式)。
    #[arg(short, long)]
    pub output: PathBuf,

    /// 要嵌入的水印文本。
    #[arg(short, long)]
    pub text: String,

    /// 输出文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,
}

/// 'extract' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct ExtractArgs {
    /// 已嵌入水印的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,
}

/// 'test' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct TestArgs {
    /// 要进行攻击测试的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 保存受攻击图像的输出目录。
    #[arg(short, long, default_value = "output")]
    pub dest: PathBuf,
}
