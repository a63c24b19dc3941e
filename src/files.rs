//! Uploaded-attachment storage: collision-resistant naming and writing
//! into the uploads directory.

use std::io;
use std::path::Path;

/// Sanitize a filename: removes path traversal and special characters.
pub fn sanitize_filename(name: &str) -> String {
    // Remove path separators and null bytes, replace other special chars
    let sanitized: String = name
        .chars()
        .filter(|&c| c != '/' && c != '\\' && c != '\0')
        .map(|c| {
            if c.is_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    // Remove consecutive dots (path traversal prevention)
    let sanitized = sanitized.replace("..", "");

    // Truncate to 100 characters (char-wise, so multi-byte names stay valid)
    let sanitized: String = sanitized.chars().take(100).collect();

    if sanitized.is_empty() {
        "documento".into()
    } else {
        sanitized
    }
}

/// Generated storage name for an uploaded attachment: upload time in
/// unix milliseconds plus the sanitized original name.
pub fn attachment_name(original: &str, millis: i64) -> String {
    format!("{}_{}", millis, sanitize_filename(original))
}

/// Write uploaded bytes under a generated name inside `uploads_dir`.
///
/// Returns the relative reference recorded in the exame row, not the
/// absolute path.
pub fn store_attachment(
    uploads_dir: &Path,
    original_name: &str,
    bytes: &[u8],
) -> io::Result<String> {
    std::fs::create_dir_all(uploads_dir)?;
    let name = attachment_name(original_name, chrono::Utc::now().timestamp_millis());
    std::fs::write(uploads_dir.join(&name), bytes)?;
    Ok(name)
}
