// Prop name conversion between surface syntaxes.
//
// The catalog stores props under their Rails snake_case names; React usage
// writes them in camelCase. Both directions are mechanical and lossless for
// the names the catalog actually contains.

/// Convert a camelCase prop name to its snake_case catalog key.
///
/// Every ASCII uppercase letter becomes an underscore plus its lowercase
/// form, so `htmlType` maps to `html_type` and `marginX` to `margin_x`.
pub fn camel_to_snake(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    for ch in name.chars() {
        if ch.is_ascii_uppercase() {
            out.push('_');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Convert a snake_case catalog key to the camelCase name React usage expects.
///
/// An underscore followed by an ASCII lowercase letter collapses into the
/// uppercase letter; any other underscore is left alone.
pub fn snake_to_camel(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut chars = name.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '_' {
            match chars.peek() {
                Some(next) if next.is_ascii_lowercase() => {
                    out.push(next.to_ascii_uppercase());
                    chars.next();
                }
                _ => out.push(ch),
            }
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camel_to_snake() {
        assert_eq!(camel_to_snake("htmlType"), "html_type");
        assert_eq!(camel_to_snake("marginX"), "margin_x");
        assert_eq!(camel_to_snake("variant"), "variant");
        assert_eq!(camel_to_snake(""), "");
    }

    #[test]
    fn test_snake_to_camel() {
        assert_eq!(snake_to_camel("html_type"), "htmlType");
        assert_eq!(snake_to_camel("margin_x"), "marginX");
        assert_eq!(snake_to_camel("variant"), "variant");
        assert_eq!(snake_to_camel(""), "");
    }

    #[test]
    fn test_round_trip() {
        for name in ["html_type", "margin_x", "max_width", "dark"] {
            assert_eq!(camel_to_snake(&snake_to_camel(name)), name);
        }
    }

    #[test]
    fn test_underscore_before_digit_is_kept() {
        assert_eq!(snake_to_camel("level_2"), "level_2");
        assert_eq!(snake_to_camel("a__b"), "a_B");
    }
}
