//! Destination path normalization
//!
//! The canonical directory is computed client-side, used to build the full
//! destination key, and also transmitted to the service as an explicit
//! field, so both sides agree on the same prefix.

use url::Url;

/// Canonicalize a destination directory.
///
/// Leading separators are stripped, runs of separators collapse to one,
/// and a non-empty result carries exactly one trailing separator. An input
/// of only separators normalizes to the empty prefix. Idempotent.
pub fn normalize_directory(raw: &str) -> String {
    let mut directory = String::with_capacity(raw.len() + 1);
    let mut at_separator = true;
    for c in raw.chars() {
        if c == '/' {
            if !at_separator {
                directory.push('/');
                at_separator = true;
            }
        } else {
            directory.push(c);
            at_separator = false;
        }
    }
    if !directory.is_empty() && !directory.ends_with('/') {
        directory.push('/');
    }
    directory
}

/// Join a canonical directory prefix and an opaque file name.
///
/// The name is never split, even when it contains separators.
pub fn full_key(directory: &str, name: &str) -> String {
    format!("{directory}{name}")
}

/// Ensure a folder name carries exactly one trailing separator
pub(crate) fn ensure_trailing_separator(name: &str) -> String {
    if name.ends_with('/') {
        name.to_string()
    } else {
        format!("{name}/")
    }
}

/// Rewrite a service-returned location to carry the canonical directory
/// immediately after the bucket segment. An empty directory leaves the
/// location untouched.
pub(crate) fn rewrite_location(location: &str, bucket: &str, directory: &str) -> String {
    if directory.is_empty() {
        return location.to_string();
    }
    let marker = format!("/{bucket}/");
    match location.find(&marker) {
        Some(position) => {
            let insert_at = position + marker.len();
            format!(
                "{}{}{}",
                &location[..insert_at],
                directory,
                &location[insert_at..]
            )
        }
        None => location.to_string(),
    }
}

/// Extract the object key from a full URL; everything after the bucket
/// segment is the key. Inputs that are not URLs pass through unchanged.
pub(crate) fn object_key_from_url(file_url: &str, bucket: &str) -> String {
    match Url::parse(file_url) {
        Ok(url) => {
            let segments: Vec<&str> = url.path().split('/').collect();
            match segments.iter().position(|segment| *segment == bucket) {
                Some(index) if index + 1 < segments.len() => segments[index + 1..].join("/"),
                _ => file_url.to_string(),
            }
        }
        Err(_) => file_url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_directories() {
        assert_eq!(normalize_directory(""), "");
        assert_eq!(normalize_directory("/"), "");
        assert_eq!(normalize_directory("///"), "");
        assert_eq!(normalize_directory("a/b"), "a/b/");
        assert_eq!(normalize_directory("a//b/"), "a/b/");
        assert_eq!(normalize_directory("/docs"), "docs/");
        assert_eq!(normalize_directory("docs/"), "docs/");
    }

    #[test]
    fn normalization_is_idempotent() {
        for raw in ["", "/", "a/b", "a//b/", "//nested///deep//"] {
            let once = normalize_directory(raw);
            assert_eq!(normalize_directory(&once), once, "input {raw:?}");
        }
    }

    #[test]
    fn full_key_keeps_names_opaque() {
        assert_eq!(full_key("docs/", "file.jpg"), "docs/file.jpg");
        assert_eq!(full_key("", "file.jpg"), "file.jpg");
        // a name containing separators is not split further
        assert_eq!(full_key("docs/", "a/b.jpg"), "docs/a/b.jpg");
    }

    #[test]
    fn full_key_round_trips_through_normalization() {
        for raw in ["", "/", "a/b", "a//b/"] {
            let once = normalize_directory(raw);
            let twice = normalize_directory(&once);
            assert_eq!(full_key(&once, "f.txt"), full_key(&twice, "f.txt"));
        }
    }

    #[test]
    fn rewrites_location_after_bucket_segment() {
        assert_eq!(
            rewrite_location(
                "https://shdw-drive.genesysgo.net/bucketA/file.jpg",
                "bucketA",
                "docs/"
            ),
            "https://shdw-drive.genesysgo.net/bucketA/docs/file.jpg"
        );
        assert_eq!(
            rewrite_location(
                "https://shdw-drive.genesysgo.net/bucketA/file.jpg",
                "bucketA",
                ""
            ),
            "https://shdw-drive.genesysgo.net/bucketA/file.jpg"
        );
        // unknown bucket segment leaves the location alone
        assert_eq!(
            rewrite_location("https://host/other/file.jpg", "bucketA", "docs/"),
            "https://host/other/file.jpg"
        );
    }

    #[test]
    fn folder_names_gain_exactly_one_separator() {
        assert_eq!(ensure_trailing_separator("album"), "album/");
        assert_eq!(ensure_trailing_separator("album/"), "album/");
    }

    #[test]
    fn extracts_object_key_from_urls() {
        assert_eq!(
            object_key_from_url(
                "https://shdw-drive.genesysgo.net/bucketA/docs/file.jpg",
                "bucketA"
            ),
            "docs/file.jpg"
        );
        // plain names pass through
        assert_eq!(object_key_from_url("file.jpg", "bucketA"), "file.jpg");
        // URL without the bucket segment passes through
        assert_eq!(
            object_key_from_url("https://host/elsewhere/file.jpg", "bucketA"),
            "https://host/elsewhere/file.jpg"
        );
    }
}
