//! # 攻击变换模块
//!
//! 为鲁棒性测试生成退化图像。所有几何与色调变换都委托给 `image` 库，
//! 本模块只是薄封装。

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageError, RgbImage, imageops};

use crate::constants::{BRIGHTEN_OFFSET, CONTRAST_ADJUST, CROP_RATIO, JPEG_QUALITY};

/// 翻转攻击：水平镜像。
pub fn flip(image: &RgbImage) -> RgbImage {
    imageops::flip_horizontal(image)
}

/// 旋转攻击：顺时针旋转 90 度，破坏嵌入时的遍历对齐。
pub fn rotate(image: &RgbImage) -> RgbImage {
    imageops::rotate90(image)
}

/// 裁剪攻击：只保留左上角 90% x 90% 的区域。
pub fn crop(image: &RgbImage) -> RgbImage {
    let width = ((f64::from(image.width()) * CROP_RATIO) as u32).max(1);
    let height = ((f64::from(image.height()) * CROP_RATIO) as u32).max(1);

    imageops::crop_imm(image, 0, 0, width, height).to_image()
}

/// 调色攻击：压缩对比度并提高亮度。
pub fn adjust(image: &RgbImage) -> RgbImage {
    imageops::brighten(&imageops::contrast(image, CONTRAST_ADJUST), BRIGHTEN_OFFSET)
}

/// 压缩攻击：以 80% 质量重新编码为 JPEG 并写入目标路径。
/// 有损压缩会整体改写 LSB 平面，是对水印最强的一种攻击。
pub fn compress_jpeg(image: &RgbImage, path: &Path) -> Result<(), ImageError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    let encoder = JpegEncoder::new_with_quality(&mut writer, JPEG_QUALITY);
    encoder.write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        ExtendedColorType::Rgb8,
    )?;
    writer.flush()?;

    Ok(())
}
