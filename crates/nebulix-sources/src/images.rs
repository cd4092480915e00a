/// Absolute image URL for a provider-relative image path.
///
/// `size` is a provider size bucket such as `w500` or `original`. Returns
/// `None` when the record has no image, so callers can omit the element.
pub fn image_url(image_base_url: &str, size: &str, path: Option<&str>) -> Option<String> {
    let path = path.filter(|p| !p.is_empty())?;
    let base = image_base_url.trim_end_matches('/');
    if path.starts_with('/') {
        Some(format!("{}/{}{}", base, size, path))
    } else {
        Some(format!("{}/{}/{}", base, size, path))
    }
}
