//! MIME type utilities for determining file extensions

/// Get file extension from MIME type
pub fn ext_from_mime(mime_type: &str) -> &'static str {
    // Container parameters (e.g. codecs=) are irrelevant for the extension
    let base = mime_type.split(';').next().unwrap_or(mime_type).trim();
    match base {
        // Video formats
        "video/mp4" => "mp4",
        "video/webm" => "webm",
        "video/3gpp" => "3gp",
        "video/x-flv" => "flv",
        "video/quicktime" => "mov",
        "video/mp2t" => "ts",
        "video/mpeg" => "mpeg",
        "video/ogg" => "ogv",
        "video/x-matroska" => "mkv",

        // Audio formats
        "audio/mp4" => "m4a",
        "audio/webm" => "webm",
        "audio/mpeg" => "mp3",
        "audio/ogg" => "ogg",
        "audio/opus" => "opus",

        // Default fallback
        _ => "bin",
    }
}

/// Check if MIME type is a video format
pub fn is_video_mime(mime_type: &str) -> bool {
    mime_type.starts_with("video/")
}
