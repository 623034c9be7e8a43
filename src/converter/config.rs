//! # 配置模块
//!
//! ## 设计思路
//!
//! 将所有“可调策略”集中到 `ConverterConfig`，保证运行时行为可观测、可调整、可测试。
//! 帧尺寸固定为 32×32，不属于可调项。
//!
//! ## 实现思路
//!
//! - `Default` 提供与历史输出完全一致的配置。
//! - 通过 `serde` + `#[serde(default)]` 支持 JSON 局部覆盖。
//! - `load_from_path` 读取配置文件，`validate` 负责取值范围校验。

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::ConvertError;

/// 帧的边长（像素）。
pub const FRAME_SIZE: u32 = 32;

/// 未指定字母表时使用的默认顺序。
pub const DEFAULT_ALPHABET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// 字形数量与字母表长度不一致时的处理策略。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlphabetPolicy {
    /// 视为错误，不产生输出。
    Strict,
    /// 记录警告并按位置继续映射。
    Lenient,
}

impl AlphabetPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Lenient => "lenient",
        }
    }
}

/// 帧表输出配置。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameTableConfig {
    /// 数组名前缀，输出为 `{prefix}{n}`。
    pub array_prefix: String,
    /// 数组声明后的存储修饰符（如 AVR 的 `PROGMEM`），为空则省略。
    pub storage_qualifier: String,
}

impl Default for FrameTableConfig {
    fn default() -> Self {
        Self {
            array_prefix: "wa".to_string(),
            storage_qualifier: "PROGMEM".to_string(),
        }
    }
}

/// 字体表提取与输出配置。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontTableConfig {
    /// 灰度 >= 该值的像素视为空白。
    pub blank_threshold: u8,
    /// 参与空白判定与裁剪的起始行（含）。
    pub row_top: u32,
    /// 结束行（不含），`None` 表示图像底部。
    pub row_bottom: Option<u32>,
    /// 每行输出的字节数。
    pub bytes_per_line: usize,
    pub alphabet_policy: AlphabetPolicy,
}

impl Default for FontTableConfig {
    fn default() -> Self {
        Self {
            blank_threshold: 250,
            row_top: 0,
            row_bottom: None,
            bytes_per_line: 12,
            alphabet_policy: AlphabetPolicy::Lenient,
        }
    }
}

/// 转换器总配置。
///
/// 字段覆盖了加载、帧表输出与字体表输出三个阶段。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConverterConfig {
    /// 读取原始字节时允许的最大文件体积（字节）。
    pub max_file_size: u64,
    /// 解码后的像素上限（`width * height`）。
    pub max_decoded_pixels: u64,
    pub frame: FrameTableConfig,
    pub font: FontTableConfig,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            max_file_size: 50 * 1024 * 1024,
            max_decoded_pixels: 40_000_000,
            frame: FrameTableConfig::default(),
            font: FontTableConfig::default(),
        }
    }
}

impl ConverterConfig {
    /// 从 JSON 文件加载配置，缺省字段使用默认值。
    pub fn load_from_path(path: &Path) -> Result<Self, ConvertError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConvertError::Config(format!("读取配置文件 '{}' 失败：{}", path.display(), e))
        })?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| ConvertError::Config(format!("解析配置文件失败：{}", e)))?;
        config.validate()?;

        log::info!("⚙️ 已加载配置文件：{}", path.display());
        Ok(config)
    }

    /// 校验取值范围。
    pub fn validate(&self) -> Result<(), ConvertError> {
        if self.max_file_size == 0 {
            return Err(ConvertError::Config("max_file_size 不能为 0".to_string()));
        }
        if self.max_decoded_pixels < (FRAME_SIZE * FRAME_SIZE) as u64 {
            return Err(ConvertError::Config(format!(
                "max_decoded_pixels 不能小于 {}",
                FRAME_SIZE * FRAME_SIZE
            )));
        }
        if self.font.bytes_per_line == 0 {
            return Err(ConvertError::Config("font.bytes_per_line 不能为 0".to_string()));
        }
        if let Some(bottom) = self.font.row_bottom {
            if bottom <= self.font.row_top {
                return Err(ConvertError::Config(format!(
                    "font.row_bottom ({}) 必须大于 font.row_top ({})",
                    bottom, self.font.row_top
                )));
            }
        }
        if !is_c_identifier(&self.frame.array_prefix) {
            return Err(ConvertError::Config(format!(
                "frame.array_prefix 不是合法标识符：{}",
                self.frame.array_prefix
            )));
        }
        Ok(())
    }
}

fn is_c_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
