use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    // Maximal runs of word characters: letters, digits and underscore.
    static ref RE: Regex = Regex::new(r"\w+").expect("valid regex");
}

/// Tokenize text into its distinct lower-cased terms.
///
/// No stemming and no stop-word removal: `"Launch"` and `"launches"` stay
/// different terms, and `"the"` is indexed like any other word.
pub fn tokenize(text: &str) -> HashSet<String> {
    let lowered = text.to_lowercase();
    RE.find_iter(&lowered).map(|m| m.as_str().to_string()).collect()
}
