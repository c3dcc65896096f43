use image::RgbImage;

use crate::constants::{EMBED_CHANNELS, TERMINATOR_BITS};
use crate::error::WatermarkError;

/// 将水印文本展开为比特流：每个字节按高位在前展开为 8 bits，
/// 末尾追加 8 个 0 作为结束标记。
///
/// 文本中不允许出现 NUL 字节，否则与结束标记无法区分。
pub fn encode_bits(text: &[u8]) -> Result<Vec<bool>, WatermarkError> {
    if text.contains(&0) {
        return Err(WatermarkError::InvalidPayload);
    }

    let mut bits = Vec::with_capacity((text.len() + 1) * 8);
    for &byte in text {
        for shift in (0..8).rev() {
            bits.push((byte >> shift) & 1 == 1);
        }
    }
    bits.extend(std::iter::repeat_n(false, TERMINATOR_BITS));

    Ok(bits)
}

/// 将比特流按 8 bits 一组、高位在前重组为字节。
/// 末尾不足 8 bits 的残组直接丢弃。
pub fn decode_bits(bits: &[bool]) -> Vec<u8> {
    bits.chunks_exact(8)
        .map(|chunk| chunk.iter().fold(0u8, |byte, &bit| (byte << 1) | u8::from(bit)))
        .collect()
}

/// 图像的水印容量 (bits)：每个像素的 R、G、B 通道各提供 1 bit。
pub fn capacity(width: u32, height: u32) -> u64 {
    u64::from(width) * u64::from(height) * u64::from(EMBED_CHANNELS)
}

/// 校验水印比特流能否放进给定尺寸的图像。
/// 必须在修改任何像素之前调用，保证嵌入要么完整发生、要么完全不发生。
pub fn check_capacity(
    required_bits: usize,
    width: u32,
    height: u32,
) -> Result<(), WatermarkError> {
    let available = capacity(width, height);
    let required = required_bits as u64;

    if required > available {
        return Err(WatermarkError::CapacityExceeded {
            required,
            available,
        });
    }

    Ok(())
}

/// 将比特流写入图像各通道的最低有效位。
///
/// 遍历顺序为：y 外层、x 中层、通道内层 (R, G, B)。
/// 提取端依赖完全相同的遍历顺序，这是嵌入与提取之间唯一的同步机制。
///
/// 调用方必须先通过 [`check_capacity`]；若未校验且比特流超出容量，
/// 嵌入会在最后一个通道处静默截断。
pub fn embed_bits(image: &mut RgbImage, bits: &[bool]) {
    let (width, height) = image.dimensions();
    let mut cursor = bits.iter();

    'pixels: for y in 0..height {
        for x in 0..width {
            let pixel = image.get_pixel_mut(x, y);
            for channel in pixel.0.iter_mut() {
                match cursor.next() {
                    Some(true) => *channel |= 1,
                    Some(false) => *channel &= !1,
                    None => break 'pixels,
                }
            }
        }
    }
}

/// 从图像各通道的最低有效位读出水印比特流。
///
/// 遍历顺序与 [`embed_bits`] 完全一致。每收集满一个字节 (8 bits)
/// 就检查最近的 8 bits 是否全为 0：是则去掉这 8 bits 并立即返回。
/// 只在字节边界上检查，字节内部跨界的零串不会被误判为结束标记。
/// 遍历完整张图像仍未遇到结束标记时返回 [`WatermarkError::TerminatorNotFound`]。
pub fn extract_bits(image: &RgbImage) -> Result<Vec<bool>, WatermarkError> {
    let (width, height) = image.dimensions();
    let mut bits = Vec::new();

    for y in 0..height {
        for x in 0..width {
            let pixel = image.get_pixel(x, y);
            for &channel in pixel.0.iter() {
                bits.push(channel & 1 == 1);

                if bits.len() % TERMINATOR_BITS == 0
                    && bits[bits.len() - TERMINATOR_BITS..].iter().all(|&bit| !bit)
                {
                    bits.truncate(bits.len() - TERMINATOR_BITS);
                    return Ok(bits);
                }
            }
        }
    }

    Err(WatermarkError::TerminatorNotFound)
}
