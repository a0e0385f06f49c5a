//! Language routing for the two template surfaces.
//!
//! Every request and every scanned line is interpreted in one of two syntax
//! contexts. Rails templates invoke components through the `pb_rails` helper;
//! React files use capitalized JSX tags. The editor language id is the single
//! source of truth for which context a document starts in.

/// The surface syntax a piece of template text is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxContext {
    /// `pb_rails("kit", props: { ... })` helper calls.
    Rails,
    /// `<Kit prop="value" />` JSX tags.
    React,
}

impl SyntaxContext {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyntaxContext::Rails => "rails",
            SyntaxContext::React => "react",
        }
    }
}

impl std::fmt::Display for SyntaxContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Language ids the validator runs on. Anything else is left untouched.
pub const SUPPORTED_LANGUAGES: [&str; 8] = [
    "ruby",
    "erb",
    "html.erb",
    "html",
    "javascript",
    "javascriptreact",
    "typescript",
    "typescriptreact",
];

/// Map an editor language id to the syntax context its component usages use.
///
/// HTML and ERB files resolve to Rails because that is where the helper
/// syntax lives; plain `.html` is included for templates served through
/// the asset pipeline.
pub fn syntax_for_language(language_id: &str) -> Option<SyntaxContext> {
    match language_id {
        "ruby" | "erb" | "html.erb" | "html" => Some(SyntaxContext::Rails),
        "javascript" | "javascriptreact" | "typescript" | "typescriptreact" => {
            Some(SyntaxContext::React)
        }
        _ => None,
    }
}

/// Whether documents of this language id should be validated at all.
pub fn should_validate(language_id: &str) -> bool {
    SUPPORTED_LANGUAGES.contains(&language_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rails_language_ids() {
        for id in ["ruby", "erb", "html.erb", "html"] {
            assert_eq!(syntax_for_language(id), Some(SyntaxContext::Rails));
        }
    }

    #[test]
    fn test_react_language_ids() {
        for id in [
            "javascript",
            "javascriptreact",
            "typescript",
            "typescriptreact",
        ] {
            assert_eq!(syntax_for_language(id), Some(SyntaxContext::React));
        }
    }

    #[test]
    fn test_unknown_language_ids() {
        assert_eq!(syntax_for_language("python"), None);
        assert_eq!(syntax_for_language(""), None);
        assert!(!should_validate("markdown"));
    }

    #[test]
    fn test_every_supported_language_has_a_context() {
        for id in SUPPORTED_LANGUAGES {
            assert!(syntax_for_language(id).is_some());
        }
    }
}
