//! Source links into the hosted repository

use bindscan_core::SourceLocation;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left as-is in a path; everything else is percent-encoded
const PATH: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'/')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// `<base>/<encoded path>#L<line>`
pub fn source_link(base: &str, location: &SourceLocation) -> String {
    format!(
        "{}/{}#L{}",
        base.trim_end_matches('/'),
        utf8_percent_encode(location.file.trim_start_matches('/'), PATH),
        location.line
    )
}
