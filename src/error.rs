//! 统一错误类型模块
//!
//! # 设计思路
//!
//! 命令行入口统一返回 `Result<T, AppError>`，由二进制决定退出码。
//! 用法错误与转换错误分开，前者需要额外打印用法说明。
//!
//! # 实现思路
//!
//! - 使用 `thiserror` 派生可读错误消息。
//! - 为 `ConvertError` 提供 `From` 转换，无需手动 map。

use crate::converter::ConvertError;

/// 应用级统一错误类型
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 参数不足或无法解析，内容为完整用法说明
    #[error("{0}")]
    Usage(String),

    /// 转换流水线错误（加载 / 提取 / 输出）
    #[error("{0}")]
    Convert(#[from] ConvertError),
}
