//! Helpers for `repository[:tag]` image references.
//!
//! These never fail: malformed references degrade to an empty tag or are passed through as is.

/// The text after the last `:`, or an empty string when there is no tag.
pub fn image_tag(image: &str) -> &str {
    image.rsplit_once(':').map_or("", |(_, tag)| tag)
}

/// The text before the last `:`, or the whole reference when there is no tag.
pub fn image_except_tag(image: &str) -> &str {
    image.rsplit_once(':').map_or(image, |(repository, _)| repository)
}

/// Whether both references name the same repository, ignoring tags.
pub fn same_repository(a: &str, b: &str) -> bool {
    image_except_tag(a) == image_except_tag(b)
}
