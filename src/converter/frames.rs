//! # 帧提取模块
//!
//! 从左到右把源图像切成固定 32×32 的帧，每个像素打包为 24 位 RGB。
//! 几何约束在提取前一次性校验，失败时不会产生任何输出。

use super::config::FRAME_SIZE;
use super::source::{Frame, SourceImage};
use super::ConvertError;

/// 单帧像素数量。
pub const FRAME_PIXELS: usize = (FRAME_SIZE * FRAME_SIZE) as usize;

/// 源图像能容纳的完整帧数量（向下取整）。
pub fn frame_count(image: &SourceImage) -> usize {
    (image.width() / FRAME_SIZE) as usize
}

/// 提取所有完整帧。
///
/// 像素索引：`row * width + column + frame_index * 32`。
/// 宽度不足一帧或高度不足 32 时返回 `ConvertError::Geometry`。
pub fn extract_frames(image: &SourceImage) -> Result<Vec<Frame>, ConvertError> {
    let (width, height) = (image.width(), image.height());
    if width < FRAME_SIZE || height < FRAME_SIZE {
        return Err(ConvertError::Geometry(format!(
            "图像 {}x{} 小于单帧尺寸 {}x{}",
            width, height, FRAME_SIZE, FRAME_SIZE
        )));
    }

    let remainder = width % FRAME_SIZE;
    if remainder != 0 {
        log::warn!(
            "⚠️ 图像宽度 {} 不是 {} 的整数倍，末尾 {} 列被丢弃",
            width,
            FRAME_SIZE,
            remainder
        );
    }

    let count = frame_count(image);
    let width = width as usize;
    let mut frames = Vec::with_capacity(count);

    for index in 0..count {
        let mut pixels = Vec::with_capacity(FRAME_PIXELS);
        for row in 0..FRAME_SIZE as usize {
            for col in 0..FRAME_SIZE as usize {
                let pixel_index = row * width + col + index * FRAME_SIZE as usize;
                let pixel = image.pixel(pixel_index).ok_or_else(|| {
                    ConvertError::Geometry(format!("像素索引 {} 越界", pixel_index))
                })?;
                pixels.push(pixel.packed_rgb());
            }
        }
        frames.push(Frame { index, pixels });
    }

    log::debug!("🎞️ 已提取 {} 帧", frames.len());
    Ok(frames)
}
