use std::path::Path;

/// Substrings replaced by `_`, in order. `%20` must come before `%`.
const UNSAFE_SEQUENCES: [&str; 6] = ["%20", "%", "*", "~", "(", ")"];

/// Turn a URI or path into a filesystem-safe file name.
///
/// The query string and fragment are dropped, only the last path segment
/// is kept and wildcard-ish characters become underscores. No extension is
/// added here; see [`crate::utils::files::write_download`] for that.
pub fn sanitize_name(uri: &str) -> String {
    let without_query = uri.split(['?', '#']).next().unwrap_or_default();
    let base = without_query
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default();

    UNSAFE_SEQUENCES
        .iter()
        .fold(base.to_string(), |name, seq| name.replace(seq, "_"))
}

/// Whether `name` already carries a file extension
pub fn has_extension(name: &str) -> bool {
    Path::new(name)
        .extension()
        .map_or(false, |ext| !ext.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_query_string() {
        assert_eq!(sanitize_name("https://x.com/img.jpg?v=2"), "img.jpg");
    }

    #[test]
    fn replaces_unsafe_characters() {
        let name = sanitize_name("https://x.com/a%20b%c*d~e(f).png");
        assert_eq!(name, "a_b_c_d_e_f_.png");
        for bad in ["%", "*", "~", "(", ")"] {
            assert!(!name.contains(bad), "{} left in {}", bad, name);
        }
    }

    #[test]
    fn encoded_space_becomes_single_underscore() {
        assert_eq!(sanitize_name("moon%20night.jpg"), "moon_night.jpg");
    }

    #[test]
    fn query_containing_slashes_does_not_leak_into_name() {
        assert_eq!(
            sanitize_name("https://cdn.example.com/p/full.jpg?ref=/a/b"),
            "full.jpg"
        );
    }

    #[test]
    fn fragments_are_dropped() {
        assert_eq!(sanitize_name("https://x.com/pic.png#top"), "pic.png");
    }

    #[test]
    fn local_paths_keep_basename() {
        assert_eq!(sanitize_name("/data/raw/moon (1).jpg"), "moon _1_.jpg");
        assert_eq!(sanitize_name(r"C:\raw\moon.jpg"), "moon.jpg");
    }

    #[test]
    fn flickr_static_url() {
        assert_eq!(
            sanitize_name("https://farm66.staticflickr.com/65535/4901_ab12cd_b.jpg"),
            "4901_ab12cd_b.jpg"
        );
    }

    #[test]
    fn trailing_slash_gives_empty_name() {
        assert_eq!(sanitize_name("https://x.com/photos/"), "");
    }

    #[test]
    fn extension_detection() {
        assert!(has_extension("img.jpg"));
        assert!(!has_extension("img"));
        assert!(!has_extension("img."));
        assert!(!has_extension(".hidden"));
    }
}
