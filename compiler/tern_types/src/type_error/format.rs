//! Mismatch message templates.

use crate::{Idx, TypeFormatter};

/// Fill a message template: `$1` becomes the first type and `$2` the
/// second, each in backticks. Shared structure and differing subtrees are
/// colored when the formatter has color on.
pub fn format_mismatch(formatter: &mut TypeFormatter<'_>, template: &str, a: Idx, b: Idx) -> String {
    let (first, second) = formatter.format_pair(a, b);
    let mut out = String::with_capacity(template.len() + first.len() + second.len());
    let mut rest = template;
    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let marker = &rest[pos..];
        if marker.starts_with("$1") {
            out.push('`');
            out.push_str(&first);
            out.push('`');
            rest = &marker[2..];
        } else if marker.starts_with("$2") {
            out.push('`');
            out.push_str(&second);
            out.push('`');
            rest = &marker[2..];
        } else {
            out.push('$');
            rest = &marker[1..];
        }
    }
    out.push_str(rest);
    out
}
