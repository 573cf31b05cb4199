//! Title term splitting.

use crate::patterns::TITLE_DELIMITERS;

/// Split title texts into lower-cased terms.
///
/// Each text is trimmed, every delimiter character becomes a space, and the
/// result is split on whitespace. Terms keep their order of appearance.
///
/// # Examples
///
/// ```
/// use rs_http_features::title::tokenize;
///
/// let terms = tokenize(&["PayPal: Log In【Secure】".to_string()]);
/// assert_eq!(terms, vec!["paypal", "log", "in", "secure"]);
/// ```
#[must_use]
pub fn tokenize(titles: &[String]) -> Vec<String> {
    titles
        .iter()
        .flat_map(|title| {
            title
                .trim()
                .replace(TITLE_DELIMITERS, " ")
                .split_whitespace()
                .map(str::to_lowercase)
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Split title texts on delimiters and whitespace, keeping letter case.
pub(crate) fn raw_terms(titles: &[String]) -> impl Iterator<Item = String> + '_ {
    titles.iter().flat_map(|title| {
        title
            .replace(TITLE_DELIMITERS, " ")
            .split_whitespace()
            .map(str::to_string)
            .collect::<Vec<_>>()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(t: &[&str]) -> Vec<String> {
        t.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_ascii_delimiters() {
        let terms = tokenize(&titles(&["Apple ID - Sign In | Verify (Account) @home"]));
        assert_eq!(terms, vec!["apple", "id", "sign", "in", "verify", "account", "home"]);
    }

    #[test]
    fn test_cjk_delimiters() {
        let terms = tokenize(&titles(&["【公式】楽天市場｜ログイン、会員"]));
        assert_eq!(terms, vec!["公式", "楽天市場", "ログイン", "会員"]);
    }

    #[test]
    fn test_multiple_titles_concatenate() {
        let terms = tokenize(&titles(&["  First.Page ", "second"]));
        assert_eq!(terms, vec!["first", "page", "second"]);
    }

    #[test]
    fn test_only_delimiters_yields_nothing() {
        assert!(tokenize(&titles(&["--- | ---"])).is_empty());
        assert!(tokenize(&[]).is_empty());
    }

    #[test]
    fn test_raw_terms_keep_case() {
        let terms: Vec<_> = raw_terms(&titles(&["Bank|Login"])).collect();
        assert_eq!(terms, vec!["Bank", "Login"]);
    }
}
