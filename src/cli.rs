//! 命令行适配模块
//!
//! # 设计思路
//!
//! 仅做参数解析与配置加载的薄封装，业务逻辑全部在 `converter` 中。
//! 二进制入口只负责初始化日志、打印结果与设置退出码。

use std::path::PathBuf;

use crate::converter::{
    ConverterConfig, DEFAULT_ALPHABET, FontReport, FrameReport, TableConverter,
};
use crate::error::AppError;

/// 指向 JSON 配置文件的环境变量。
pub const CONFIG_ENV: &str = "BITMAP_TABLES_CONFIG";

/// 帧表默认输出文件。
pub const DEFAULT_FRAME_OUTPUT: &str = "output.txt";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameArgs {
    pub input: PathBuf,
    pub output: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontArgs {
    pub input: PathBuf,
    pub output: PathBuf,
    pub alphabet: String,
}

fn program_name(args: &[String], fallback: &str) -> String {
    args.first().cloned().unwrap_or_else(|| fallback.to_string())
}

/// 解析 `frame-table input_image [output_file]`。
pub fn parse_frame_args(args: &[String]) -> Result<FrameArgs, AppError> {
    let program = program_name(args, "frame-table");
    let Some(input) = args.get(1) else {
        return Err(AppError::Usage(format!(
            "Usage: {} input_image [output_file]",
            program
        )));
    };
    if args.len() > 3 {
        log::warn!("忽略多余参数: {:?}", &args[3..]);
    }
    let output = args
        .get(2)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_FRAME_OUTPUT));

    Ok(FrameArgs {
        input: PathBuf::from(input),
        output,
    })
}

/// 解析 `font-table input_image output_source [alphabet_string]`。
pub fn parse_font_args(args: &[String]) -> Result<FontArgs, AppError> {
    let program = program_name(args, "font-table");
    if args.len() < 3 {
        return Err(AppError::Usage(format!(
            "Usage: {} input_image output_source [alphabet_string]",
            program
        )));
    }
    if args.len() > 4 {
        log::warn!("忽略多余参数: {:?}", &args[4..]);
    }
    let alphabet = args
        .get(3)
        .cloned()
        .unwrap_or_else(|| DEFAULT_ALPHABET.to_string());

    Ok(FontArgs {
        input: PathBuf::from(&args[1]),
        output: PathBuf::from(&args[2]),
        alphabet,
    })
}

/// 加载配置：设置了 `BITMAP_TABLES_CONFIG` 时读取该文件，否则使用默认值。
pub fn load_config() -> Result<ConverterConfig, AppError> {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) => Ok(ConverterConfig::load_from_path(&PathBuf::from(path))?),
        None => Ok(ConverterConfig::default()),
    }
}

pub fn run_frame_table(args: &[String], config: ConverterConfig) -> Result<FrameReport, AppError> {
    let args = parse_frame_args(args)?;
    let converter = TableConverter::new(config)?;
    Ok(converter.convert_frames(&args.input, &args.output)?)
}

pub fn run_font_table(args: &[String], config: ConverterConfig) -> Result<FontReport, AppError> {
    let args = parse_font_args(args)?;
    let converter = TableConverter::new(config)?;
    Ok(converter.convert_font(&args.input, &args.output, &args.alphabet)?)
}
