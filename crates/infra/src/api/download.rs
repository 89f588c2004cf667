//! Binary downloads and `Content-Disposition` parsing

use once_cell::sync::Lazy;
use regex::Regex;

/// A downloaded file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub content_type: String,
}

impl Download {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// `filename*=` (RFC 5987); the value must run to `;` or the end so an empty
/// value cannot backtrack into the charset prefix
static EXTENDED_FILENAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)filename\*\s*=\s*(?:[a-z0-9_-]+'[^']*')?"?([^";']+)"?\s*(?:;|$)"#)
        .expect("EXTENDED_FILENAME should compile - this is a bug")
});

static QUOTED_FILENAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)filename\s*=\s*"([^"]*)""#)
        .expect("QUOTED_FILENAME should compile - this is a bug")
});

static BARE_FILENAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)filename\s*=\s*([^;"]+)"#)
        .expect("BARE_FILENAME should compile - this is a bug")
});

/// Extract the filename from a `Content-Disposition` header value.
///
/// `filename*=` (RFC 5987) wins over `filename=`; the value is
/// percent-decoded, keeping the raw text when decoding fails. Only the last
/// path component survives, without control characters. Returns `None`
/// when no usable filename is present.
pub fn filename_from_disposition(header: &str) -> Option<String> {
    [&*EXTENDED_FILENAME, &*QUOTED_FILENAME, &*BARE_FILENAME].into_iter().find_map(|regex| {
        let raw = regex.captures(header)?.get(1)?.as_str().trim();
        let decoded = urlencoding::decode(raw).map_or_else(|_| raw.to_string(), |d| d.into_owned());
        sanitize_filename(&decoded)
    })
}

fn sanitize_filename(name: &str) -> Option<String> {
    let last = name.rsplit(&['/', '\\'][..]).next().unwrap_or_default();
    let cleaned: String = last.chars().filter(|c| !c.is_control()).collect();
    let cleaned = cleaned.trim();
    match cleaned {
        "" | "." | ".." => None,
        _ => Some(cleaned.to_string()),
    }
}
