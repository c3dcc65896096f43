/// 每个像素参与嵌入的通道数 (R, G, B)。
/// Alpha 通道不参与嵌入，加载图像时会被直接丢弃。
pub const EMBED_CHANNELS: u32 = 3;

/// 结束标记的比特长度。
/// 嵌入时在水印比特流末尾追加 8 个 0，
/// 提取时检测到连续 8 个 0 即认为水印结束。
pub const TERMINATOR_BITS: usize = 8;

/// 鲁棒性测试中 JPEG 有损压缩攻击的质量参数。
pub const JPEG_QUALITY: u8 = 80;

/// 鲁棒性测试中裁剪攻击保留的宽高比例 (左上角 90% 区域)。
pub const CROP_RATIO: f64 = 0.9;

/// 鲁棒性测试中调色攻击增加的亮度值。
pub const BRIGHTEN_OFFSET: i32 = 20;

/// 鲁棒性测试中调色攻击的对比度调整量 (负值压缩动态范围)。
pub const CONTRAST_ADJUST: f32 = -10.0;
