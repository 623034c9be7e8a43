//! # 核心编排模块
//!
//! ## 设计思路
//!
//! `TableConverter` 只负责流程编排与配置持有，不直接与命令行绑定。
//! 两条处理链路均固定为：
//! 1. 加载并解码源图像
//! 2. 提取帧 / 字形
//! 3. 在内存中渲染完整输出
//! 4. 一次性写入目标文件
//!
//! ## 实现思路
//!
//! - 输出先完整渲染到内存，失败时目标文件不会被截断写入。
//! - 返回带统计信息的报告，调用方可区分“成功”与“失败原因”。
//! - 记录 `load/extract/emit/total` 阶段耗时，便于诊断。

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use super::emit::{write_font_source, write_frame_table};
use super::frames::extract_frames;
use super::glyphs::extract_letters;
use super::source::FontTable;
use super::{ConverterConfig, ConvertError};

/// 帧表转换结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameReport {
    pub output: PathBuf,
    pub frames: usize,
    pub bytes_written: usize,
}

/// 字体表转换结果。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontReport {
    pub output: PathBuf,
    pub glyphs: usize,
    /// 查找表中实际填充的项数（重复字符只计一次）。
    pub table_entries: usize,
    pub bytes_written: usize,
}

/// 转换器。
///
/// 持有一份已校验的配置，并编排各子模块完成转换。
#[derive(Debug, Clone)]
pub struct TableConverter {
    pub(super) config: ConverterConfig,
}

impl TableConverter {
    /// 根据配置创建转换器。
    ///
    /// # 示例
    /// ```rust,ignore
    /// use bitmap_tables::converter::{ConverterConfig, TableConverter};
    ///
    /// let converter = TableConverter::new(ConverterConfig::default())?;
    /// # Ok::<(), bitmap_tables::converter::ConvertError>(())
    /// ```
    pub fn new(config: ConverterConfig) -> Result<Self, ConvertError> {
        config.validate()?;
        log::debug!(
            "⚙️ 转换器配置 - threshold={} rows={}..{:?} alphabet_policy={}",
            config.font.blank_threshold,
            config.font.row_top,
            config.font.row_bottom,
            config.font.alphabet_policy.as_str()
        );
        Ok(Self { config })
    }

    pub fn config(&self) -> &ConverterConfig {
        &self.config
    }

    /// 图片 → 帧表。
    pub fn convert_frames(&self, input: &Path, output: &Path) -> Result<FrameReport, ConvertError> {
        let total_start = Instant::now();

        let load_start = Instant::now();
        let image = self.load_image(input)?;
        let load_ms = load_start.elapsed().as_millis();

        let extract_start = Instant::now();
        let frames = extract_frames(&image)?;
        let extract_ms = extract_start.elapsed().as_millis();

        let emit_start = Instant::now();
        let mut rendered = Vec::new();
        write_frame_table(&mut rendered, &frames, &self.config.frame)
            .map_err(|e| ConvertError::FileSystem(format!("渲染帧表失败：{}", e)))?;
        Self::write_output(output, &rendered)?;
        let emit_ms = emit_start.elapsed().as_millis();

        log::info!(
            "⏱️ 帧表转换耗时 - load: {}ms extract: {}ms emit: {}ms total: {}ms",
            load_ms,
            extract_ms,
            emit_ms,
            total_start.elapsed().as_millis()
        );

        Ok(FrameReport {
            output: output.to_path_buf(),
            frames: frames.len(),
            bytes_written: rendered.len(),
        })
    }

    /// 字体图 → 字体源文件。
    pub fn convert_font(
        &self,
        input: &Path,
        output: &Path,
        alphabet: &str,
    ) -> Result<FontReport, ConvertError> {
        let total_start = Instant::now();

        let load_start = Instant::now();
        let image = self.load_image(input)?;
        let gray = image.to_luma();
        let load_ms = load_start.elapsed().as_millis();

        let extract_start = Instant::now();
        let glyphs = extract_letters(&gray, alphabet, &self.config.font)?;
        if let Some(glyph) = glyphs
            .iter()
            .find(|g| g.width() > u16::MAX as u32 || g.height() > u16::MAX as u32)
        {
            return Err(ConvertError::ResourceLimit(format!(
                "字形 {:?} 尺寸 {}x{} 超出 uint16_t 范围",
                glyph.character,
                glyph.width(),
                glyph.height()
            )));
        }
        let table = FontTable::build(&glyphs);
        let extract_ms = extract_start.elapsed().as_millis();

        let emit_start = Instant::now();
        let mut rendered = Vec::new();
        write_font_source(&mut rendered, &glyphs, &table, &self.config.font)
            .map_err(|e| ConvertError::FileSystem(format!("渲染字体表失败：{}", e)))?;
        Self::write_output(output, &rendered)?;
        let emit_ms = emit_start.elapsed().as_millis();

        log::info!(
            "⏱️ 字体表转换耗时 - load: {}ms extract: {}ms emit: {}ms total: {}ms",
            load_ms,
            extract_ms,
            emit_ms,
            total_start.elapsed().as_millis()
        );

        Ok(FontReport {
            output: output.to_path_buf(),
            glyphs: glyphs.len(),
            table_entries: table.populated(),
            bytes_written: rendered.len(),
        })
    }

    fn write_output(output: &Path, bytes: &[u8]) -> Result<(), ConvertError> {
        fs::write(output, bytes).map_err(|e| {
            ConvertError::FileSystem(format!("写入输出文件 '{}' 失败：{}", output.display(), e))
        })?;
        log::debug!("💾 已写入 {} ({} bytes)", output.display(), bytes.len());
        Ok(())
    }
}
