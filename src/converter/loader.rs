//! # 加载与解码模块
//!
//! ## 设计思路
//!
//! 统一处理“文件 → 字节 → 解码图像”，并在“尽可能早”的阶段执行输入校验。
//! 目标是尽快失败，减少不必要内存与 CPU 消耗。
//!
//! ## 实现思路
//!
//! 1. 存在性 + metadata 体积限制 + 读取
//! 2. 猜测格式并读取 header 尺寸
//! 3. 按像素上限快速拒绝
//! 4. 完整解码并归一化通道布局

use std::io::Cursor;
use std::path::Path;

use image::{GenericImageView, ImageReader};

use super::source::SourceImage;
use super::{ConverterConfig, ConvertError, TableConverter};

/// 加载阶段输出：原始字节与来源标识。
pub(crate) struct RawImageData {
    pub(crate) bytes: Vec<u8>,
    /// 来源提示（用于日志与诊断）。
    pub(crate) source_hint: String,
}

impl TableConverter {
    /// 从本地路径加载并解码图片。
    pub fn load_image(&self, path: &Path) -> Result<SourceImage, ConvertError> {
        let raw = Self::load_from_file(path, &self.config)?;
        Self::decode(raw, &self.config)
    }

    /// 解码已在内存中的图片字节。
    pub fn load_image_from_memory(&self, bytes: Vec<u8>) -> Result<SourceImage, ConvertError> {
        Self::validate_file_size(bytes.len() as u64, &self.config)?;
        Self::decode(
            RawImageData {
                bytes,
                source_hint: "memory".to_string(),
            },
            &self.config,
        )
    }

    fn load_from_file(path: &Path, config: &ConverterConfig) -> Result<RawImageData, ConvertError> {
        log::info!("📁 开始读取本地图片 - 路径: {}", path.display());

        if !path.exists() {
            return Err(ConvertError::FileSystem(format!(
                "文件不存在：{}",
                path.display()
            )));
        }

        let metadata = std::fs::metadata(path)
            .map_err(|e| ConvertError::FileSystem(format!("无法读取文件信息：{}", e)))?;
        Self::validate_file_size(metadata.len(), config)?;

        let bytes = std::fs::read(path)
            .map_err(|e| ConvertError::FileSystem(format!("无法读取图片文件：{}", e)))?;

        Ok(RawImageData {
            bytes,
            source_hint: path.display().to_string(),
        })
    }

    fn decode(raw: RawImageData, config: &ConverterConfig) -> Result<SourceImage, ConvertError> {
        image::guess_format(&raw.bytes)
            .map_err(|e| ConvertError::InvalidFormat(format!("不支持的图片格式：{}", e)))?;

        let (header_width, header_height) = Self::inspect_dimensions_from_memory(&raw.bytes)?;
        Self::validate_pixel_limits(config, header_width, header_height)?;

        let decoded = image::load_from_memory(&raw.bytes)
            .map_err(|e| ConvertError::Decode(format!("图片解码失败：{}", e)))?;
        let (width, height) = decoded.dimensions();
        Self::validate_pixel_limits(config, width, height)?;

        let color = decoded.color();
        let image = SourceImage::from_dynamic(decoded);

        log::info!(
            "✅ 图片解码成功 - 来源: {} 尺寸: {}x{} 颜色: {:?} 通道: {}",
            raw.source_hint,
            width,
            height,
            color,
            image.channels()
        );

        Ok(image)
    }

    /// 仅通过图片头信息读取宽高。
    fn inspect_dimensions_from_memory(bytes: &[u8]) -> Result<(u32, u32), ConvertError> {
        let reader = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| ConvertError::InvalidFormat(format!("无法识别图片格式：{}", e)))?;

        reader
            .into_dimensions()
            .map_err(|e| ConvertError::InvalidFormat(format!("无法读取图片尺寸：{}", e)))
    }

    fn validate_file_size(len: u64, config: &ConverterConfig) -> Result<(), ConvertError> {
        if len > config.max_file_size {
            return Err(ConvertError::ResourceLimit(format!(
                "文件过大：{:.2} MB（限制：{:.2} MB）",
                len as f64 / 1024.0 / 1024.0,
                config.max_file_size as f64 / 1024.0 / 1024.0
            )));
        }
        Ok(())
    }

    fn validate_pixel_limits(
        config: &ConverterConfig,
        width: u32,
        height: u32,
    ) -> Result<(), ConvertError> {
        let pixels = (width as u64)
            .checked_mul(height as u64)
            .ok_or_else(|| ConvertError::ResourceLimit("图片像素数溢出".to_string()))?;

        if pixels > config.max_decoded_pixels {
            return Err(ConvertError::ResourceLimit(format!(
                "图片像素过大：{} 像素（限制：{} 像素）",
                pixels, config.max_decoded_pixels
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use image::{DynamicImage, GrayImage, ImageFormat, Luma};

    use super::*;

    fn png_bytes(image: &DynamicImage) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        image.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn decodes_png_from_memory() {
        let converter = TableConverter::new(ConverterConfig::default()).unwrap();
        let bytes = png_bytes(&DynamicImage::ImageLuma8(GrayImage::from_pixel(8, 4, Luma([9]))));

        let image = converter.load_image_from_memory(bytes).unwrap();
        assert_eq!((image.width(), image.height(), image.channels()), (8, 4, 1));
    }

    #[test]
    fn rejects_non_image_payload() {
        let converter = TableConverter::new(ConverterConfig::default()).unwrap();
        let result = converter.load_image_from_memory(b"plain text".to_vec());
        assert!(matches!(result, Err(ConvertError::InvalidFormat(_))));
    }

    #[test]
    fn rejects_images_over_pixel_limit_before_decode() {
        let mut config = ConverterConfig::default();
        config.max_decoded_pixels = 1024;
        let converter = TableConverter::new(config).unwrap();
        let bytes = png_bytes(&DynamicImage::new_rgb8(64, 32));

        let result = converter.load_image_from_memory(bytes);
        assert!(matches!(result, Err(ConvertError::ResourceLimit(_))));
    }

    #[test]
    fn missing_file_is_filesystem_error() {
        let converter = TableConverter::new(ConverterConfig::default()).unwrap();
        let result = converter.load_image(Path::new("/nonexistent/bitmap_tables/sheet.png"));
        assert!(matches!(result, Err(ConvertError::FileSystem(_))));
    }
}
