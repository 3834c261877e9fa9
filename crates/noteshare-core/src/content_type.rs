//! Content-type resolution.
//!
//! A caller-declared type is trusted unless it is blank or the generic
//! fallback; otherwise the type is inferred from the filename extension.

/// The generic fallback MIME type.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Extension to MIME type table for documents, images, audio, video and
/// archives.
const EXTENSION_TABLE: &[(&str, &str)] = &[
    ("pdf", "application/pdf"),
    ("txt", "text/plain"),
    ("csv", "text/csv"),
    ("doc", "application/msword"),
    (
        "docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    ),
    ("ppt", "application/vnd.ms-powerpoint"),
    (
        "pptx",
        "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    ),
    ("xls", "application/vnd.ms-excel"),
    (
        "xlsx",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    ),
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("svg", "image/svg+xml"),
    ("mp4", "video/mp4"),
    ("mp3", "audio/mpeg"),
    ("wav", "audio/wav"),
    ("zip", "application/zip"),
];

/// Resolve the MIME type for a file.
///
/// Trusts `provided` when it is non-blank and not the generic fallback;
/// otherwise looks the (case-insensitive) filename extension up in a fixed
/// table. Unknown or missing extensions resolve to
/// `application/octet-stream`. Pure lookup, no I/O, no error path.
pub fn resolve_content_type(filename: &str, provided: Option<&str>) -> String {
    if let Some(provided) = provided {
        let declared = provided.trim();
        if !declared.is_empty() && !declared.eq_ignore_ascii_case(OCTET_STREAM) {
            return declared.to_string();
        }
    }

    let lower = filename.to_lowercase();
    if let Some((_, extension)) = lower.rsplit_once('.') {
        for (ext, mime) in EXTENSION_TABLE {
            if *ext == extension {
                return (*mime).to_string();
            }
        }
    }
    OCTET_STREAM.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provided_type_is_trusted() {
        assert_eq!(
            resolve_content_type("report.pdf", Some("text/markdown")),
            "text/markdown"
        );
    }

    #[test]
    fn test_blank_or_generic_provided_type_falls_back_to_extension() {
        assert_eq!(
            resolve_content_type("report.PDF", None),
            "application/pdf"
        );
        assert_eq!(
            resolve_content_type("report.pdf", Some("  ")),
            "application/pdf"
        );
        assert_eq!(
            resolve_content_type("report.pdf", Some("Application/Octet-Stream")),
            "application/pdf"
        );
    }

    #[test]
    fn test_unknown_extension_resolves_to_octet_stream() {
        assert_eq!(resolve_content_type("x", Some(OCTET_STREAM)), OCTET_STREAM);
        assert_eq!(resolve_content_type("binary.dat", None), OCTET_STREAM);
        assert_eq!(resolve_content_type("no_extension", None), OCTET_STREAM);
    }

    #[test]
    fn test_common_extensions() {
        assert_eq!(resolve_content_type("song.MP3", None), "audio/mpeg");
        assert_eq!(resolve_content_type("photo.jpeg", None), "image/jpeg");
        assert_eq!(resolve_content_type("bundle.zip", None), "application/zip");
        assert_eq!(
            resolve_content_type("sheet.xlsx", None),
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        );
    }

    #[test]
    fn test_only_last_extension_counts() {
        assert_eq!(resolve_content_type("notes.txt.png", None), "image/png");
    }
}
