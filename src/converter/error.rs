//! # 错误模型模块
//!
//! ## 设计思路
//!
//! 使用单一错误枚举承载转换链路中的所有错误来源，避免“打印后继续”的吞错模式。
//! 通过 `thiserror` 保持人类可读错误，同时让调用侧可按分支匹配，
//! 区分“未写出任何内容”与“已完整写出”两种结果。

/// 转换链路统一错误类型。
///
/// 该类型会在命令行层被上转为 `AppError`。
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error("文件错误：{0}")]
    FileSystem(String),

    #[error("解码错误：{0}")]
    Decode(String),

    #[error("格式错误：{0}")]
    InvalidFormat(String),

    #[error("资源限制：{0}")]
    ResourceLimit(String),

    /// 图像尺寸不满足固定帧 / 行范围几何约束。
    #[error("尺寸错误：{0}")]
    Geometry(String),

    #[error("字母表错误：{0}")]
    InvalidAlphabet(String),

    /// 检测到的字形数量与字母表长度不一致（严格模式）。
    #[error("字形数量与字母表不匹配：检测到 {found} 个，字母表 {expected} 个")]
    AlphabetMismatch { found: usize, expected: usize },

    #[error("配置错误：{0}")]
    Config(String),
}

