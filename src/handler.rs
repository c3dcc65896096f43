//! # 命令处理逻辑模块
//!
//! 包含处理 `embed`、`extract` 和 `test` 子命令的高级业务逻辑。
//! 本模块负责协调图像 I/O、调用核心水印算法以及向用户报告结果。

use crate::attack;
use crate::cli::{EmbedArgs, ExtractArgs, TestArgs};
use crate::watermark::{capacity, check_capacity, decode_bits, embed_bits, encode_bits, extract_bits};
use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::Path;

/// 判断输出路径是否指向有损格式。
/// 有损压缩会整体改写 LSB 平面，嵌入结果必须保存为无损格式。
fn is_lossy_output(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| matches!(ext.to_ascii_lowercase().as_str(), "jpg" | "jpeg"))
}

/// 处理 'embed' 命令的执行逻辑。
///
/// 负责加载输入图像、将水印文本展开为比特流、校验图像容量是否足够、
/// 调用核心函数写入各通道的最低有效位，最后将结果保存到输出路径。
/// 容量校验发生在任何像素被修改之前，嵌入要么完整发生、要么完全不发生。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径、水印文本和覆盖开关的 `EmbedArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 输出路径指向有损格式，或输出文件已存在且未指定 `--force`。
/// * 无法读取或解码输入图像。
/// * 水印文本含有 NUL 字节。
/// * 图像容量不足以容纳完整的水印比特流。
/// * 无法写入输出图像文件。
pub fn handle_embed(args: EmbedArgs) -> Result<()> {
    anyhow::ensure!(
        !is_lossy_output(&args.output),
        "The output must be a lossless format (e.g. PNG, BMP); a JPEG save would destroy the watermark: {}",
        args.output.to_string_lossy().red().bold()
    );

    anyhow::ensure!(
        args.force || !args.output.exists(),
        "Output file already exists: {}. Use --force to overwrite it.",
        args.output.to_string_lossy().red().bold()
    );

    let mut picture = image::open(&args.image)
        .with_context(|| {
            format!(
                "Unable to read image file: {}",
                args.image.to_string_lossy().red().bold()
            )
        })?
        .to_rgb8();
    let (width, height) = picture.dimensions();

    println!(
        "Image loaded: {} ({}x{})",
        args.image.to_string_lossy().green().bold(),
        width,
        height
    );

    let bits = encode_bits(args.text.as_bytes())?;
    check_capacity(bits.len(), width, height)?;

    println!(
        "Watermark length (with terminator): {} bits, image capacity: {} bits",
        bits.len().to_string().green().bold(),
        capacity(width, height).to_string().green().bold()
    );

    embed_bits(&mut picture, &bits);

    picture.save(&args.output).with_context(|| {
        format!(
            "Unable to write to target image file: {}",
            args.output.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The watermark has been successfully embedded and saved: {}",
        args.output.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'extract' 命令的执行逻辑。
///
/// 负责加载含水印的图像、从各通道的最低有效位读出比特流直到结束标记、
/// 将比特流重组为文本并打印。返回提取到的文本，便于上层复用。
///
/// # Arguments
///
/// * `args` - 包含输入路径的 `ExtractArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取或解码输入图像。
/// * 遍历完整张图像也没有找到结束标记 (图像不含水印或水印已被破坏)。
pub fn handle_extract(args: ExtractArgs) -> Result<String> {
    let picture = image::open(&args.image)
        .with_context(|| {
            format!(
                "Unable to read image file: {}",
                args.image.to_string_lossy().red().bold()
            )
        })?
        .to_rgb8();

    let bits = extract_bits(&picture).with_context(|| {
        format!(
            "Failed to extract a watermark from: {}",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    let text = String::from_utf8_lossy(&decode_bits(&bits)).into_owned();

    println!("Extracted watermark: \"{}\"", text.green().bold());

    Ok(text)
}

/// 处理 'test' 命令的执行逻辑。
///
/// 对输入图像依次施加翻转、旋转、裁剪、调色和 JPEG 压缩攻击，
/// 将退化副本保存到输出目录，供手动提取验证水印的鲁棒性。
pub fn handle_test(args: TestArgs) -> Result<()> {
    let picture = image::open(&args.image)
        .with_context(|| {
            format!(
                "Unable to read image file: {}",
                args.image.to_string_lossy().red().bold()
            )
        })?
        .to_rgb8();

    fs::create_dir_all(&args.dest).with_context(|| {
        format!(
            "Unable to create output directory: {}",
            args.dest.to_string_lossy().red().bold()
        )
    })?;

    let attacked = [
        ("flipped", attack::flip(&picture)),
        ("rotated", attack::rotate(&picture)),
        ("cropped", attack::crop(&picture)),
        ("adjusted", attack::adjust(&picture)),
    ];

    for (name, variant) in &attacked {
        let path = args.dest.join(format!("attack_{name}.bmp"));
        variant.save(&path).with_context(|| {
            format!(
                "Unable to write attacked image: {}",
                path.to_string_lossy().red().bold()
            )
        })?;
        println!(
            "Generated {} attack: {}",
            name.bold(),
            path.to_string_lossy().green()
        );
    }

    let jpeg_path = args.dest.join("attack_compressed.jpg");
    attack::compress_jpeg(&picture, &jpeg_path).with_context(|| {
        format!(
            "Unable to write attacked image: {}",
            jpeg_path.to_string_lossy().red().bold()
        )
    })?;
    println!(
        "Generated {} attack: {}",
        "compressed".bold(),
        jpeg_path.to_string_lossy().green()
    );

    println!("\nAll attacked images have been generated. Try extracting from them, e.g.:");
    println!(
        "  lsb_watermark extract --image {}",
        jpeg_path.to_string_lossy()
    );

    Ok(())
}
