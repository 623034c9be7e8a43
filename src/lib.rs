//! # 图片转固件源码表工具 — 库入口
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  bin/frame_table.rs        bin/font_table.rs             │
//! │        │  (env_logger 初始化 + 退出码)  │                 │
//! │        └──────────── cli ──────────────┘                 │
//! │                       │  (参数解析 + 配置加载)            │
//! │                       ↓                                  │
//! │  converter ── TableConverter                             │
//! │   ├─ loader    文件读取·格式校验·解码                    │
//! │   ├─ frames    32×32 帧提取（流水线 A）                  │
//! │   ├─ glyphs    空白列字形分割（流水线 B）                │
//! │   └─ emit      帧表 / 字体表文本输出                     │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 统一错误类型 `AppError`，命令行入口的返回类型 |
//! | [`cli`] | 参数解析、`BITMAP_TABLES_CONFIG` 配置加载 |
//! | [`converter`] | 加载图片、提取帧 / 字形、渲染源码表 |

pub mod cli;
pub mod converter;
pub mod error;
