// Formatters - 파일 크기, 백엔드 타임스탬프, 개수 포맷팅

use chrono::{DateTime, Local};

/// 파일 크기를 읽기 쉬운 형식으로 포맷팅 (숫자와 단위 사이 공백)
///
/// # Examples
/// ```ignore
/// assert_eq!(format_file_size(0), "0 B");
/// assert_eq!(format_file_size(1536), "1.5 KB");
/// ```
pub fn format_file_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes == 0 {
        "0 B".to_string()
    } else if bytes < KB {
        format!("{} B", bytes)
    } else if bytes < MB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else if bytes < GB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    }
}

/// 백엔드가 돌려주는 날짜 문자열을 "YYYY-MM-DD HH:MM" 로컬 시간으로 변환
///
/// Flask `jsonify`는 RFC 2822 형식("Tue, 15 Oct 2024 10:00:00 GMT")을,
/// 일부 필드는 ISO 8601을 사용한다. 둘 다 아니면 원문을 그대로 돌려준다.
pub fn format_timestamp(raw: &str) -> String {
    let trimmed = raw.trim();
    let parsed = DateTime::parse_from_rfc2822(trimmed)
        .or_else(|_| DateTime::parse_from_rfc3339(trimmed))
        .ok();

    match parsed {
        Some(dt) => dt
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M")
            .to_string(),
        None => trimmed.to_string(),
    }
}

/// 개수에 따라 단수/복수형 반환
pub fn pluralize(count: u64, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

/// 숫자를 천단위 콤마로 포맷팅
pub fn format_number_with_commas(n: u64) -> String {
    let s = n.to_string();
    let bytes = s.as_bytes();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, &b) in bytes.iter().enumerate() {
        if i > 0 && (bytes.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(b as char);
    }
    result
}

/// 표 셀 너비에 맞게 문자열 자르기 (말줄임표 포함)
pub fn truncate_cell(value: &str, width: usize) -> String {
    use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

    if value.width() <= width {
        return value.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in value.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 B");
        assert_eq!(format_file_size(512), "512 B");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(1_048_576), "1.0 MB");
        assert_eq!(format_file_size(1_073_741_824), "1.0 GB");
    }

    #[test]
    fn test_format_timestamp_rfc2822() {
        let formatted = format_timestamp("Tue, 15 Oct 2024 10:00:00 GMT");
        // 로컬 타임존에 따라 시각은 달라지지만 형식은 16자 고정
        assert_eq!(formatted.len(), 16);
        assert!(formatted.starts_with("2024-10-1"));
    }

    #[test]
    fn test_format_timestamp_rfc3339() {
        let formatted = format_timestamp("2024-10-15T10:00:00+00:00");
        assert_eq!(formatted.len(), 16);
    }

    #[test]
    fn test_format_timestamp_passthrough() {
        assert_eq!(format_timestamp("yesterday"), "yesterday");
        assert_eq!(format_timestamp(""), "");
    }

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize(1, "device", "devices"), "1 device");
        assert_eq!(pluralize(3, "device", "devices"), "3 devices");
        assert_eq!(pluralize(0, "item", "items"), "0 items");
    }

    #[test]
    fn test_format_number_with_commas() {
        assert_eq!(format_number_with_commas(0), "0");
        assert_eq!(format_number_with_commas(999), "999");
        assert_eq!(format_number_with_commas(1234), "1,234");
        assert_eq!(format_number_with_commas(1234567), "1,234,567");
    }

    #[test]
    fn test_truncate_cell() {
        assert_eq!(truncate_cell("scanner", 10), "scanner");
        assert_eq!(truncate_cell("fingerprint-scanner", 8), "fingerp…");
        assert_eq!(truncate_cell("abc", 0), "");
    }
}
