//! # 字形分割模块
//!
//! ## 设计思路
//!
//! 假定字体图按水平方向排列，字形之间由整列空白（接近白色）分隔。
//! 扫描使用两态状态机（字形外 / 字形内），遇到空白列闭合当前字形。
//!
//! ## 实现思路
//!
//! - 扫描的停止条件与标注使用同一个字母表，数量达到字母表长度即停止。
//! - 扫描结束时仍处于字形内，则以图像右边缘闭合最后一个字形。
//! - 数量不一致时按 `AlphabetPolicy` 决定报错还是告警后继续。

use std::ops::Range;

use image::GrayImage;
use image::imageops;

use super::config::{AlphabetPolicy, FontTableConfig};
use super::source::{FONT_TABLE_SIZE, LetterBoundary, LetterGlyph};
use super::ConvertError;

/// 按配置解析参与扫描的行范围，并校验不超出图像高度。
pub fn resolve_rows(config: &FontTableConfig, height: u32) -> Result<Range<u32>, ConvertError> {
    let bottom = config.row_bottom.unwrap_or(height);
    if bottom > height || config.row_top >= bottom {
        return Err(ConvertError::Geometry(format!(
            "行范围 {}..{} 超出图像高度 {}",
            config.row_top, bottom, height
        )));
    }
    Ok(config.row_top..bottom)
}

/// 判断某一列在 `rows` 范围内是否全部为空白。
pub fn is_column_blank(gray: &GrayImage, x: u32, rows: Range<u32>, threshold: u8) -> bool {
    rows.into_iter().all(|y| gray.get_pixel(x, y)[0] >= threshold)
}

/// 从左到右扫描字形边界，闭合数量达到 `limit` 时停止。
pub fn scan_letter_boundaries(
    gray: &GrayImage,
    rows: Range<u32>,
    threshold: u8,
    limit: usize,
) -> Vec<LetterBoundary> {
    let width = gray.width();
    let mut boundaries = Vec::new();
    let mut in_letter = false;
    let mut start = 0;

    for x in 0..width {
        let blank = is_column_blank(gray, x, rows.clone(), threshold);
        if !blank && !in_letter {
            in_letter = true;
            start = x;
        } else if blank && in_letter {
            in_letter = false;
            boundaries.push(LetterBoundary { start, end: x });
            if boundaries.len() >= limit {
                break;
            }
        }
    }

    if in_letter {
        boundaries.push(LetterBoundary { start, end: width });
    }

    boundaries
}

/// 校验字母表：非空，且每个字符都能放入 128 项查找表。
pub fn validate_alphabet(alphabet: &str) -> Result<Vec<char>, ConvertError> {
    let chars: Vec<char> = alphabet.chars().collect();
    if chars.is_empty() {
        return Err(ConvertError::InvalidAlphabet("字母表不能为空".to_string()));
    }
    if let Some(c) = chars.iter().find(|c| (**c as usize) >= FONT_TABLE_SIZE) {
        return Err(ConvertError::InvalidAlphabet(format!(
            "字符 {:?} 超出查找表范围（仅支持 0..{}）",
            c, FONT_TABLE_SIZE
        )));
    }
    Ok(chars)
}

/// 分割并裁剪字形，按位置与字母表字符对应。
pub fn extract_letters(
    gray: &GrayImage,
    alphabet: &str,
    config: &FontTableConfig,
) -> Result<Vec<LetterGlyph>, ConvertError> {
    let chars = validate_alphabet(alphabet)?;
    let rows = resolve_rows(config, gray.height())?;
    let boundaries = scan_letter_boundaries(gray, rows.clone(), config.blank_threshold, chars.len());

    if boundaries.len() != chars.len() {
        match config.alphabet_policy {
            AlphabetPolicy::Strict => {
                return Err(ConvertError::AlphabetMismatch {
                    found: boundaries.len(),
                    expected: chars.len(),
                });
            }
            AlphabetPolicy::Lenient => {
                log::warn!(
                    "⚠️ 字形数量与字母表不匹配，映射可能错位 - 检测到: {} 字母表: {}",
                    boundaries.len(),
                    chars.len()
                );
            }
        }
    }

    let height = rows.end - rows.start;
    let glyphs = boundaries
        .iter()
        .zip(chars)
        .map(|(boundary, character)| LetterGlyph {
            character,
            bitmap: imageops::crop_imm(gray, boundary.start, rows.start, boundary.width(), height)
                .to_image(),
        })
        .collect::<Vec<_>>();

    log::debug!("🔤 已分割 {} 个字形", glyphs.len());
    Ok(glyphs)
}

#[cfg(test)]
mod tests {
    use image::Luma;

    use super::*;

    /// 白底图像，`runs` 中的列区间涂黑。
    fn sheet(width: u32, height: u32, runs: &[(u32, u32)]) -> GrayImage {
        let mut img = GrayImage::from_pixel(width, height, Luma([255]));
        for &(start, end) in runs {
            for x in start..end {
                for y in 0..height {
                    img.put_pixel(x, y, Luma([0]));
                }
            }
        }
        img
    }

    #[test]
    fn blank_sheet_has_no_boundaries() {
        let img = sheet(40, 8, &[]);
        assert!(scan_letter_boundaries(&img, 0..8, 250, 60).is_empty());
    }

    #[test]
    fn two_runs_give_two_ordered_boundaries() {
        let img = sheet(20, 5, &[(2, 5), (7, 9)]);
        let b = scan_letter_boundaries(&img, 0..5, 250, 60);
        assert_eq!(
            b,
            vec![LetterBoundary { start: 2, end: 5 }, LetterBoundary { start: 7, end: 9 }]
        );
    }

    #[test]
    fn run_touching_right_edge_closes_at_width() {
        let img = sheet(10, 3, &[(1, 2), (8, 10)]);
        let b = scan_letter_boundaries(&img, 0..3, 250, 60);
        assert_eq!(b.last(), Some(&LetterBoundary { start: 8, end: 10 }));
        assert_eq!(b[0].width(), 1);
    }

    #[test]
    fn scan_stops_at_limit() {
        let img = sheet(20, 3, &[(0, 1), (2, 3), (4, 5), (6, 7)]);
        assert_eq!(scan_letter_boundaries(&img, 0..3, 250, 2).len(), 2);
    }

    #[test]
    fn threshold_is_inclusive() {
        let img = GrayImage::from_pixel(3, 3, Luma([250]));
        assert!(is_column_blank(&img, 1, 0..3, 250));
        assert!(!is_column_blank(&img, 1, 0..3, 251));
    }

    #[test]
    fn row_range_limits_blank_check() {
        let mut img = GrayImage::from_pixel(4, 6, Luma([255]));
        img.put_pixel(2, 5, Luma([0]));
        assert!(is_column_blank(&img, 2, 0..5, 250));
        assert!(!is_column_blank(&img, 2, 0..6, 250));
    }

    #[test]
    fn letters_are_cropped_and_labelled() {
        let img = sheet(12, 4, &[(1, 3), (5, 8)]);
        let glyphs = extract_letters(&img, "AB", &FontTableConfig::default()).unwrap();
        assert_eq!(glyphs.len(), 2);
        assert_eq!((glyphs[0].character, glyphs[0].width(), glyphs[0].height()), ('A', 2, 4));
        assert_eq!((glyphs[1].character, glyphs[1].width()), ('B', 3));
        assert!(glyphs[1].pixels().iter().all(|&v| v == 0));
    }

    #[test]
    fn mismatch_is_error_in_strict_mode() {
        let img = sheet(12, 4, &[(1, 3)]);
        let config = FontTableConfig {
            alphabet_policy: AlphabetPolicy::Strict,
            ..FontTableConfig::default()
        };
        let result = extract_letters(&img, "AB", &config);
        assert!(matches!(
            result,
            Err(ConvertError::AlphabetMismatch { found: 1, expected: 2 })
        ));
    }

    #[test]
    fn mismatch_maps_positionally_in_lenient_mode() {
        let img = sheet(12, 4, &[(1, 3)]);
        let config = FontTableConfig {
            alphabet_policy: AlphabetPolicy::Lenient,
            ..FontTableConfig::default()
        };
        let glyphs = extract_letters(&img, "XYZ", &config).unwrap();
        assert_eq!(glyphs.len(), 1);
        assert_eq!(glyphs[0].character, 'X');
    }

    #[test]
    fn alphabet_validation() {
        assert!(matches!(validate_alphabet(""), Err(ConvertError::InvalidAlphabet(_))));
        assert!(matches!(validate_alphabet("AÄ"), Err(ConvertError::InvalidAlphabet(_))));
        assert_eq!(validate_alphabet("a.!").unwrap(), vec!['a', '.', '!']);
    }

    #[test]
    fn row_range_outside_image_is_rejected() {
        let config = FontTableConfig {
            row_bottom: Some(20),
            ..FontTableConfig::default()
        };
        assert!(matches!(resolve_rows(&config, 10), Err(ConvertError::Geometry(_))));
        assert_eq!(resolve_rows(&FontTableConfig::default(), 10).unwrap(), 0..10);
    }
}
