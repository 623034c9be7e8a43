//! # 数据源与中间模型
//!
//! ## 设计思路
//!
//! 将“已解码图像”和“流水线中间结果”解耦：
//! - `SourceImage` 表示加载后不可变的像素网格
//! - `Frame` 表示一个 32×32 帧的打包 RGB 值
//! - `LetterBoundary` / `LetterGlyph` 表示字体表的分割与裁剪结果
//! - `FontTable` 表示生成阶段一次性构建完成的 128 项查找表

use image::{DynamicImage, GrayImage};

/// 查找表容量（按字符编码索引）。
pub const FONT_TABLE_SIZE: usize = 128;

/// 单个像素，灰度图会将亮度广播到 R/G/B。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: Option<u8>,
}

impl Pixel {
    /// `(R<<16)|(G<<8)|B`，alpha 丢弃。
    pub fn packed_rgb(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }
}

/// 解码后的源图像。
///
/// 内部只保留 L8 / Rgb8 / Rgba8 三种布局，对应 1 / 3 / 4 个通道。
#[derive(Debug, Clone)]
pub struct SourceImage {
    image: DynamicImage,
    channels: u8,
}

impl SourceImage {
    /// 将任意解码结果归一化为 1 / 3 / 4 通道的 8 位图像。
    pub fn from_dynamic(image: DynamicImage) -> Self {
        let image = match image {
            DynamicImage::ImageLuma8(_) | DynamicImage::ImageRgb8(_) | DynamicImage::ImageRgba8(_) => {
                image
            }
            DynamicImage::ImageLuma16(_) => DynamicImage::ImageLuma8(image.to_luma8()),
            DynamicImage::ImageRgb16(_) | DynamicImage::ImageRgb32F(_) => {
                DynamicImage::ImageRgb8(image.to_rgb8())
            }
            other => DynamicImage::ImageRgba8(other.to_rgba8()),
        };
        let channels = image.color().channel_count();
        Self { image, channels }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// 按行优先线性索引读取像素，越界返回 `None`。
    pub fn pixel(&self, index: usize) -> Option<Pixel> {
        let channels = self.channels as usize;
        let start = index.checked_mul(channels)?;
        let raw = self.image.as_bytes().get(start..start + channels)?;
        Some(match raw {
            [v] => Pixel { r: *v, g: *v, b: *v, a: None },
            [r, g, b] => Pixel { r: *r, g: *g, b: *b, a: None },
            [r, g, b, a] => Pixel { r: *r, g: *g, b: *b, a: Some(*a) },
            _ => return None,
        })
    }

    pub fn pixel_at(&self, x: u32, y: u32) -> Option<Pixel> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        self.pixel(y as usize * self.width() as usize + x as usize)
    }

    /// 转换为灰度图（字体表流水线使用）。
    pub fn to_luma(&self) -> GrayImage {
        self.image.to_luma8()
    }
}

/// 一个 32×32 帧：从零开始的序号与 1024 个打包 RGB 值（行优先）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub index: usize,
    pub pixels: Vec<u32>,
}

/// 字形的列边界，半开区间 `[start, end)`。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LetterBoundary {
    pub start: u32,
    pub end: u32,
}

impl LetterBoundary {
    pub fn width(&self) -> u32 {
        self.end - self.start
    }
}

/// 裁剪后的字形及其对应字符。
#[derive(Debug, Clone)]
pub struct LetterGlyph {
    pub character: char,
    pub bitmap: GrayImage,
}

impl LetterGlyph {
    pub fn width(&self) -> u32 {
        self.bitmap.width()
    }

    pub fn height(&self) -> u32 {
        self.bitmap.height()
    }

    /// 行优先的灰度字节。
    pub fn pixels(&self) -> &[u8] {
        self.bitmap.as_raw()
    }

    /// 输出数组名：字母数字直接使用，其余字符使用十六进制编码。
    pub fn array_name(&self) -> String {
        if self.character.is_ascii_alphanumeric() {
            format!("Letter_{}", self.character)
        } else {
            format!("Letter_x{:02X}", self.character as u32)
        }
    }
}

/// 查找表中的一项。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphEntry {
    /// 对应 `LetterGlyph` 在字形列表中的位置。
    pub glyph_index: usize,
    pub array_name: String,
    pub width: u32,
    pub height: u32,
}

/// 生成阶段一次性构建的不可变查找表，按字符编码索引。
#[derive(Debug, Clone)]
pub struct FontTable {
    entries: [Option<GlyphEntry>; FONT_TABLE_SIZE],
}

impl FontTable {
    /// 由字形列表构建查找表；重复字符以后出现者为准。
    ///
    /// 调用方需保证字符编码均小于 128，超出范围的字形会被跳过。
    pub fn build(glyphs: &[LetterGlyph]) -> Self {
        let mut entries: [Option<GlyphEntry>; FONT_TABLE_SIZE] = std::array::from_fn(|_| None);
        for (glyph_index, glyph) in glyphs.iter().enumerate() {
            let code = glyph.character as usize;
            let Some(slot) = entries.get_mut(code) else {
                log::warn!("⚠️ 字符 {:?} 超出查找表范围，已跳过", glyph.character);
                continue;
            };
            if slot.is_some() {
                log::warn!("⚠️ 字符 {:?} 重复出现，查找表使用最后一个字形", glyph.character);
            }
            *slot = Some(GlyphEntry {
                glyph_index,
                array_name: glyph.array_name(),
                width: glyph.width(),
                height: glyph.height(),
            });
        }
        Self { entries }
    }

    pub fn get(&self, c: char) -> Option<&GlyphEntry> {
        self.entries.get(c as usize).and_then(|e| e.as_ref())
    }

    /// 依编码顺序遍历全部 128 项。
    pub fn entries(&self) -> impl Iterator<Item = (usize, Option<&GlyphEntry>)> {
        self.entries.iter().enumerate().map(|(code, e)| (code, e.as_ref()))
    }

    pub fn populated(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }
}
