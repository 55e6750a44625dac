//! Cleanup of rendered manifests
//!
//! When a template prints a value that is unset, the rendering engine leaves
//! the Go formatting residue `%!s(<nil>)` in the output. Three passes turn
//! that back into valid YAML:
//!
//! 1. inline ` %!s(<nil>)` is deleted (`key: %!s(<nil>)` becomes `key:`)
//! 2. a list item holding nothing but the marker becomes an empty mapping
//!    (`- %!s(<nil>)` becomes `- {}`)
//! 3. runs of blank lines left behind collapse into a single empty line
//!
//! Pass 1 runs first but leaves bare list items alone so pass 2 can still
//! recognise them.

use once_cell::sync::Lazy;
use regex::bytes::{Captures, Regex};

/// Pass 1: group 1 is a bare list item (kept), otherwise an inline marker
static INLINE_NIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)(^[ \t]*-[ \t]+%!s\(<nil>\)[ \t]*$)| %!s\(<nil>\)").expect("valid regex")
});

static NIL_LIST_ITEM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^([ \t]*-[ \t]+)%!s\(<nil>\)[ \t]*$").expect("valid regex")
});

static BLANK_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^[ \t]*\n(?:[ \t]*\n)+").expect("valid regex"));

/// Remove `%!s(<nil>)` artifacts from rendered manifest bytes.
///
/// The transform is idempotent: cleaning already-clean output is a no-op.
pub fn clean_nil_values(data: &[u8]) -> Vec<u8> {
    let mut cleaned = data.to_vec();

    // Deleting a marker can splice a new one together; repeat until stable.
    loop {
        let next = INLINE_NIL
            .replace_all(&cleaned, |caps: &Captures| {
                if caps.get(1).is_some() {
                    caps[0].to_vec()
                } else {
                    Vec::new()
                }
            })
            .into_owned();
        if next == cleaned {
            break;
        }
        cleaned = next;
    }

    let cleaned = NIL_LIST_ITEM.replace_all(&cleaned, &b"${1}{}"[..]);
    BLANK_RUN.replace_all(&cleaned, &b"\n"[..]).into_owned()
}
