//! Safe filename generation utilities

use regex::Regex;

/// Convert a title to a safe filename by removing/replacing invalid characters
pub fn to_safe_filename(title: &str, extension: &str) -> String {
    let mut safe_title = sanitize_component(title);

    if safe_title.is_empty() {
        safe_title = "video".to_string();
    }

    if !extension.is_empty() {
        let ext = if extension.starts_with('.') {
            extension.to_string()
        } else {
            format!(".{}", extension)
        };
        format!("{}{}", safe_title, ext)
    } else {
        safe_title
    }
}

/// Sanitize a single path component (e.g. a collection title used as a
/// directory name). Does not append an extension or substitute a fallback.
pub fn sanitize_component(name: &str) -> String {
    // Remove or replace characters invalid in filenames
    let invalid_chars = Regex::new(r#"[<>:"/\\|?*\x00-\x1f]"#).unwrap();
    let mut safe = invalid_chars.replace_all(name, "_").to_string();

    // Remove leading/trailing dots and spaces
    safe = safe.trim_matches(|c: char| c == '.' || c == ' ').to_string();

    // Limit length (Windows has 255 char limit, be conservative);
    // cut on a char boundary so multibyte titles survive
    if safe.len() > 200 {
        let mut cut = 200;
        while !safe.is_char_boundary(cut) {
            cut -= 1;
        }
        safe.truncate(cut);
        safe = safe.trim_end().to_string();
    }

    safe
}
