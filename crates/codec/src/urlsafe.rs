//! URL-safe projection of standard base64 used in path segments
//! (`spec.md` §4.1, §6): `=`↔`-`, `/`↔`_`, `+`↔`.`, reversible both ways.

const MAP: [(char, char); 3] = [('=', '-'), ('/', '_'), ('+', '.')];

/// Project standard base64 into the URL-safe alphabet for use in a path segment.
pub fn to_url_safe(standard: &str) -> String {
    let mut out = standard.to_string();
    for (from, to) in MAP {
        out = out.replace(from, &to.to_string());
    }
    out
}

/// Reverse [`to_url_safe`], recovering the standard base64 string.
pub fn from_url_safe(projected: &str) -> String {
    let mut out = projected.to_string();
    for (standard, url) in MAP {
        out = out.replace(url, &standard.to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projection_is_reversible() {
        let standard = "abc+def/ghi==";
        let projected = to_url_safe(standard);
        assert_eq!(from_url_safe(&projected), standard);
    }

    #[test]
    fn projection_uses_expected_characters() {
        let projected = to_url_safe("a+b/c=");
        assert_eq!(projected, "a.b_c-");
    }
}
