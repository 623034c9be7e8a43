//! # 字体表生成工具
//!
//! 用法：`font-table input_image output_source [alphabet_string]`

use bitmap_tables::cli;
use bitmap_tables::error::AppError;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let result = cli::load_config().and_then(|config| cli::run_font_table(&args, config));

    match result {
        Ok(report) => {
            println!(
                "Generated font source: {} ({} glyphs, {} table entries)",
                report.output.display(),
                report.glyphs,
                report.table_entries
            );
        }
        Err(AppError::Usage(usage)) => {
            println!("{usage}");
            std::process::exit(1);
        }
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    }
}
