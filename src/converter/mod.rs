//! # 图片转源码表模块（converter）
//!
//! ## 设计思路
//!
//! 该模块将“加载解码 → 提取 → 渲染输出”按职责拆分为多个子模块，避免单文件膨胀与耦合。
//!
//! - `handler`：编排整条处理流水线
//! - `loader`：负责文件加载、格式与尺寸校验、解码
//! - `frames`：固定 32×32 帧提取
//! - `glyphs`：空白列分割字形
//! - `emit`：帧表 / 字体表的文本输出
//! - `config/error/source`：配置、错误、中间数据模型
//!
//! ## 调用链
//!
//! ```text
//! cli.rs（参数解析）
//!    ↓
//! handler.rs（统一编排 + 阶段耗时日志）
//!    ├─ loader.rs（加载 + 解码）
//!    ├─ frames.rs / glyphs.rs（提取）
//!    └─ emit.rs（渲染）
//!    ↓
//! 返回 ConvertError 给调用方
//! ```

mod config;
pub mod emit;
mod error;
pub mod frames;
pub mod glyphs;
mod handler;
mod loader;
mod source;

pub use config::{
    AlphabetPolicy, ConverterConfig, DEFAULT_ALPHABET, FRAME_SIZE, FontTableConfig,
    FrameTableConfig,
};
pub use error::ConvertError;
pub use handler::{FontReport, FrameReport, TableConverter};
pub use source::{
    FONT_TABLE_SIZE, FontTable, Frame, GlyphEntry, LetterBoundary, LetterGlyph, Pixel,
    SourceImage,
};
