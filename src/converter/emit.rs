//! # 源码表输出模块
//!
//! 两个互不共享状态的格式化例程：
//! - 帧表：每帧一个 `const long waN[] PROGMEM` 数组，1024 个 24 位十六进制值
//! - 字体表：每个字形一个 `uint8_t` 数组，完整的 128 项静态查找表与访问函数
//!
//! 输出目标为任意 `io::Write`，调用方负责落盘。

use std::io::{self, Write};

use super::config::{FRAME_SIZE, FontTableConfig, FrameTableConfig};
use super::source::{FontTable, Frame, LetterGlyph};

/// 写出帧表。
///
/// 每帧的值以 `0x{:06X}, ` 输出，偶数行（0, 2, …）结束后换行。
pub fn write_frame_table<W: Write>(
    out: &mut W,
    frames: &[Frame],
    config: &FrameTableConfig,
) -> io::Result<()> {
    let qualifier = if config.storage_qualifier.is_empty() {
        String::new()
    } else {
        format!(" {}", config.storage_qualifier)
    };

    for frame in frames {
        write!(
            out,
            "const long {}{}[]{} = {{",
            config.array_prefix,
            frame.index + 1,
            qualifier
        )?;
        for (row, values) in frame.pixels.chunks(FRAME_SIZE as usize).enumerate() {
            for value in values {
                write!(out, "0x{:06X}, ", value)?;
            }
            if row % 2 == 0 {
                writeln!(out)?;
            }
        }
        write!(out, "}};\n\n")?;
    }
    Ok(())
}

/// 写出字体源文件。
///
/// 查找表在生成阶段已完整构建，这里直接输出完整的静态初始化列表，
/// 未出现的字符输出为 `{ 0, 0, 0 }`。
pub fn write_font_source<W: Write>(
    out: &mut W,
    glyphs: &[LetterGlyph],
    table: &FontTable,
    config: &FontTableConfig,
) -> io::Result<()> {
    writeln!(out, "// Auto-generated font data")?;
    writeln!(out, "#include <stdint.h>")?;
    writeln!(out)?;

    // 重复字符只输出查找表引用的那个字形，避免同名数组重复定义
    for (index, glyph) in glyphs.iter().enumerate() {
        let referenced = table
            .get(glyph.character)
            .is_some_and(|entry| entry.glyph_index == index);
        if referenced {
            write_glyph_array(out, glyph, config.bytes_per_line)?;
        }
    }

    writeln!(out, "struct LetterData {{")?;
    writeln!(out, "    const uint8_t* data;")?;
    writeln!(out, "    uint16_t width;")?;
    writeln!(out, "    uint16_t height;")?;
    writeln!(out, "}};")?;
    writeln!(out)?;

    writeln!(out, "static const LetterData fontTable[128] = {{")?;
    for (code, entry) in table.entries() {
        let label = char_label(code);
        match entry {
            Some(e) => writeln!(out, "    {{ {}, {}, {} }}, // {}", e.array_name, e.width, e.height, label)?,
            None => writeln!(out, "    {{ 0, 0, 0 }}, // {}", label)?,
        }
    }
    writeln!(out, "}};")?;
    writeln!(out)?;

    writeln!(out, "const LetterData& getLetterData(char c)")?;
    writeln!(out, "{{")?;
    writeln!(out, "    unsigned char uc = (unsigned char)c;")?;
    writeln!(out, "    if (uc >= 128) {{")?;
    writeln!(out, "        uc = 0;")?;
    writeln!(out, "    }}")?;
    writeln!(out, "    return fontTable[uc];")?;
    writeln!(out, "}}")?;
    Ok(())
}

fn write_glyph_array<W: Write>(out: &mut W, glyph: &LetterGlyph, per_line: usize) -> io::Result<()> {
    writeln!(out, "// Letter: {}", glyph.character)?;
    write!(out, "static const uint8_t {}[] = {{\n    ", glyph.array_name())?;

    let pixels = glyph.pixels();
    for (idx, value) in pixels.iter().enumerate() {
        write!(out, "{:3}, ", value)?;
        if (idx + 1) % per_line == 0 && idx + 1 < pixels.len() {
            write!(out, "\n    ")?;
        }
    }
    write!(out, "\n}};\n\n")
}

fn char_label(code: usize) -> String {
    match u8::try_from(code) {
        Ok(b) if b.is_ascii_graphic() || b == b' ' => format!("0x{:02X} '{}'", code, b as char),
        _ => format!("0x{:02X}", code),
    }
}

#[cfg(test)]
mod tests {
    use image::{GrayImage, Luma};

    use super::*;

    fn to_string(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn frame_table_layout() {
        let frames = vec![Frame {
            index: 0,
            pixels: vec![0x00FF00; 1024],
        }];
        let mut out = Vec::new();
        write_frame_table(&mut out, &frames, &FrameTableConfig::default()).unwrap();
        let text = to_string(out);

        assert!(text.starts_with("const long wa1[] PROGMEM = {0x00FF00, "));
        assert!(text.ends_with("};\n\n"));
        assert_eq!(text.matches("0x00FF00").count(), 1024);
        // 16 个偶数行各换行一次，外加结尾的两个换行
        assert_eq!(text.matches('\n').count(), 16 + 2);
    }

    #[test]
    fn frame_table_without_qualifier() {
        let frames = vec![Frame {
            index: 4,
            pixels: vec![0; 1024],
        }];
        let config = FrameTableConfig {
            array_prefix: "anim".to_string(),
            storage_qualifier: String::new(),
        };
        let mut out = Vec::new();
        write_frame_table(&mut out, &frames, &config).unwrap();
        assert!(to_string(out).starts_with("const long anim5[] = {"));
    }

    #[test]
    fn glyph_arrays_wrap_at_bytes_per_line() {
        let glyph = LetterGlyph {
            character: 'A',
            bitmap: GrayImage::from_pixel(5, 5, Luma([7])),
        };
        let mut out = Vec::new();
        write_glyph_array(&mut out, &glyph, 12).unwrap();
        let text = to_string(out);

        let body: Vec<&str> = text.lines().skip(2).take_while(|l| *l != "};").collect();
        assert_eq!(body.len(), 3);
        assert_eq!(body[0].matches(',').count(), 12);
        assert_eq!(body[2].matches(',').count(), 1);
        assert!(text.contains("static const uint8_t Letter_A[] = {\n      7,   7,"));
    }

    #[test]
    fn font_source_has_complete_static_table() {
        let glyphs = vec![LetterGlyph {
            character: '!',
            bitmap: GrayImage::from_pixel(2, 3, Luma([0])),
        }];
        let table = FontTable::build(&glyphs);
        let mut out = Vec::new();
        write_font_source(&mut out, &glyphs, &table, &FontTableConfig::default()).unwrap();
        let text = to_string(out);

        assert!(text.contains("// Letter: !\nstatic const uint8_t Letter_x21[] = {"));
        assert!(text.contains("    { Letter_x21, 2, 3 }, // 0x21 '!'\n"));
        assert_eq!(text.matches("{ 0, 0, 0 },").count(), 127);
        assert!(text.contains("const LetterData& getLetterData(char c)"));
        assert!(!text.contains("initFontTable"));
    }

    #[test]
    fn duplicate_glyphs_emit_only_the_table_winner() {
        let glyphs = vec![
            LetterGlyph {
                character: 'A',
                bitmap: GrayImage::from_pixel(1, 1, Luma([11])),
            },
            LetterGlyph {
                character: 'A',
                bitmap: GrayImage::from_pixel(1, 1, Luma([22])),
            },
        ];
        let table = FontTable::build(&glyphs);
        let mut out = Vec::new();
        write_font_source(&mut out, &glyphs, &table, &FontTableConfig::default()).unwrap();
        let text = to_string(out);

        assert_eq!(text.matches("static const uint8_t Letter_A[]").count(), 1);
        assert!(text.contains(" 22, "));
        assert!(!text.contains(" 11, "));
    }

    #[test]
    fn char_labels() {
        assert_eq!(char_label(0x41), "0x41 'A'");
        assert_eq!(char_label(0x0A), "0x0A");
        assert_eq!(char_label(0x7F), "0x7F");
    }
}
