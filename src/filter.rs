//! Attachment skip filter.

/// True if an attachment with this display name should not be downloaded.
///
/// Case-insensitive substring match rather than a suffix check: the
/// displayed label can carry surrounding whitespace and newlines, so an
/// exact suffix comparison would be too brittle.
pub fn should_skip(display_name: &str, skip_extensions: &[String]) -> bool {
    let name = display_name.to_lowercase();
    skip_extensions
        .iter()
        .any(|ext| name.contains(&ext.to_lowercase()))
}
