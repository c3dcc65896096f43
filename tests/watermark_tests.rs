use image::{Rgb, RgbImage};
use lsb_watermark::constants::TERMINATOR_BITS;
use lsb_watermark::error::WatermarkError;
use lsb_watermark::watermark::{
    capacity, check_capacity, decode_bits, embed_bits, encode_bits, extract_bits,
};

/// 构造一张像素值有变化的测试图像，避免测试只覆盖全零缓冲区
fn patterned_image(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        let base = (x * 7 + y * 13) as u8;
        Rgb([base.wrapping_mul(3), base.wrapping_add(89), base ^ 0x5A])
    })
}

#[test]
fn encode_expands_msb_first_and_appends_terminator() {
    let bits = encode_bits(b"Hi").expect("'Hi' must encode");

    // 2 个字节 + 1 个结束标记字节
    assert_eq!(bits.len(), 24);

    // 'H' = 0x48 = 01001000，高位在前
    let h: Vec<bool> = bits[..8].to_vec();
    assert_eq!(
        h,
        vec![false, true, false, false, true, false, false, false]
    );

    // 末尾 8 bits 全为 0
    assert!(bits[16..].iter().all(|&bit| !bit));
}

#[test]
fn encode_rejects_nul_bytes() {
    let result = encode_bits(b"water\0mark");
    assert!(matches!(result, Err(WatermarkError::InvalidPayload)));
}

#[test]
fn encode_of_empty_text_is_terminator_only() {
    let bits = encode_bits(b"").expect("empty text must encode");
    assert_eq!(bits.len(), TERMINATOR_BITS);
    assert!(bits.iter().all(|&bit| !bit));
}

#[test]
fn decode_reassembles_msb_first() {
    let bits = encode_bits(b"Hi").expect("'Hi' must encode");

    // 去掉结束标记后解码应还原原文
    let payload = decode_bits(&bits[..bits.len() - TERMINATOR_BITS]);
    assert_eq!(payload, b"Hi");
}

#[test]
fn decode_drops_trailing_partial_group() {
    let mut bits = encode_bits(b"Hi").expect("'Hi' must encode");
    bits.truncate(16);

    // 追加 5 个比特的残组，应被静默丢弃
    bits.extend([true, false, true, true, false]);
    assert_eq!(decode_bits(&bits), b"Hi");
}

#[test]
fn capacity_is_three_bits_per_pixel() {
    assert_eq!(capacity(10, 10), 300);
    assert_eq!(capacity(0, 10), 0);
    // 大尺寸不会在 u32 上溢出
    assert_eq!(capacity(u32::MAX, 2), u64::from(u32::MAX) * 6);
}

#[test]
fn check_capacity_boundary() {
    assert!(check_capacity(300, 10, 10).is_ok());

    let result = check_capacity(301, 10, 10);
    match result {
        Err(WatermarkError::CapacityExceeded {
            required,
            available,
        }) => {
            assert_eq!(required, 301);
            assert_eq!(available, 300);
        }
        other => panic!("expected CapacityExceeded, got {other:?}"),
    }
}

#[test]
fn exactly_full_image_round_trips() {
    // 8x8 图像容量 192 bits，23 个字符 (含结束标记共 192 bits) 恰好填满
    let text = [b'x'; 23];
    let bits = encode_bits(&text).expect("text must encode");
    assert_eq!(bits.len() as u64, capacity(8, 8));
    assert!(check_capacity(bits.len(), 8, 8).is_ok());

    let mut image = patterned_image(8, 8);
    embed_bits(&mut image, &bits);

    let extracted = extract_bits(&image).expect("terminator must be found");
    assert_eq!(decode_bits(&extracted), text);

    // 再多一个字符就放不下了
    let too_long = [b'x'; 24];
    let bits = encode_bits(&too_long).expect("text must encode");
    assert!(matches!(
        check_capacity(bits.len(), 8, 8),
        Err(WatermarkError::CapacityExceeded { .. })
    ));
}

#[test]
fn embed_extract_round_trip() {
    let mut image = patterned_image(10, 10);
    let bits = encode_bits(b"Hi").expect("'Hi' must encode");

    check_capacity(bits.len(), 10, 10).expect("24 bits fit into 300");
    embed_bits(&mut image, &bits);

    let extracted = extract_bits(&image).expect("terminator must be found");
    assert_eq!(decode_bits(&extracted), b"Hi");
}

#[test]
fn round_trip_survives_trailing_zero_bits_in_payload() {
    // 'd' = 0x64 以两个 0 bit 结尾，结束标记检测必须不受其影响
    let mut image = patterned_image(16, 16);
    let bits = encode_bits(b"Hold").expect("'Hold' must encode");
    embed_bits(&mut image, &bits);

    let extracted = extract_bits(&image).expect("terminator must be found");
    assert_eq!(decode_bits(&extracted), b"Hold");
}

#[test]
fn embed_touches_exactly_the_embedded_bits() {
    let original = patterned_image(10, 10);
    let mut image = original.clone();
    let bits = encode_bits(b"Hi").expect("'Hi' must encode");
    embed_bits(&mut image, &bits);

    // RgbImage 的原始缓冲区布局与遍历顺序一致：行优先、通道最内层
    let before = original.as_raw();
    let after = image.as_raw();
    assert_eq!(before.len(), after.len());

    for (index, (&old, &new)) in before.iter().zip(after.iter()).enumerate() {
        if index < bits.len() {
            // 被嵌入的通道只有最低位可以变化
            assert_eq!(old & 0xFE, new & 0xFE, "non-LSB bits changed at {index}");
            assert_eq!(new & 1 == 1, bits[index], "wrong LSB at {index}");
        } else {
            assert_eq!(old, new, "channel {index} past the watermark was touched");
        }
    }
}

#[test]
fn extraction_is_idempotent() {
    let mut image = patterned_image(10, 10);
    let bits = encode_bits(b"again and again").expect("text must encode");
    embed_bits(&mut image, &bits);

    let first = extract_bits(&image).expect("terminator must be found");
    let second = extract_bits(&image).expect("terminator must be found");
    assert_eq!(first, second);
}

#[test]
fn terminator_not_found_when_all_lsbs_are_set() {
    // 所有通道均为奇数值，LSB 全为 1，整张图不存在零字节
    let image = RgbImage::from_pixel(10, 10, Rgb([255, 255, 255]));

    let result = extract_bits(&image);
    assert!(matches!(result, Err(WatermarkError::TerminatorNotFound)));
}

#[test]
fn immediate_terminator_yields_empty_payload() {
    let mut image = RgbImage::from_pixel(10, 10, Rgb([255, 255, 255]));
    let bits = encode_bits(b"").expect("empty text must encode");
    embed_bits(&mut image, &bits);

    let extracted = extract_bits(&image).expect("terminator must be found");
    assert!(extracted.is_empty());
    assert!(decode_bits(&extracted).is_empty());
}

#[test]
fn cjk_text_round_trips() {
    let text = "数字水印测试".as_bytes();
    let mut image = patterned_image(16, 16);

    let bits = encode_bits(text).expect("CJK text must encode");
    check_capacity(bits.len(), 16, 16).expect("text fits");
    embed_bits(&mut image, &bits);

    let extracted = extract_bits(&image).expect("terminator must be found");
    assert_eq!(decode_bits(&extracted), text);
}
