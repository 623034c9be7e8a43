//! # 帧表生成工具
//!
//! 用法：`frame-table input_image [output_file]`

use bitmap_tables::cli;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let result = cli::load_config().and_then(|config| cli::run_frame_table(&args, config));

    match result {
        Ok(report) => {
            println!(
                "Output file generated successfully: {} ({} frames, {} bytes)",
                report.output.display(),
                report.frames,
                report.bytes_written
            );
        }
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    }
}
