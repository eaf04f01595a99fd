// src/util/text.rs
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::borrow::Cow;

/// Characters rewritten before text is placed into the LaTeX document.
///
/// Only the comment introducer is escaped. Question authors rely on writing
/// math (`$x^2$`), macros and `&` verbatim, so the remaining specials pass through.
pub const TEX_ESCAPES: &[(&str, &str)] = &[("%", r"\%")];

lazy_static! {
    static ref TEX_ESCAPE_REGEX: Regex = {
        let mut keys: Vec<&str> = TEX_ESCAPES.iter().map(|(from, _)| *from).collect();
        // longest first so multi-char sequences win over their prefixes
        keys.sort_by_key(|k| std::cmp::Reverse(k.len()));
        let pattern = keys
            .iter()
            .map(|k| regex::escape(k))
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&pattern).expect("Failed to compile TeX escape regex")
    };
}

/// Escape free text for literal inclusion in the generated LaTeX.
///
/// # Examples
///
/// ```
/// use quizdeck::util::text::escape_tex;
///
/// assert_eq!(escape_tex("50% off"), r"50\% off");
/// assert_eq!(escape_tex("no specials"), "no specials");
/// ```
pub fn escape_tex(text: &str) -> Cow<'_, str> {
    TEX_ESCAPE_REGEX.replace_all(text, |caps: &Captures| {
        let matched = &caps[0];
        TEX_ESCAPES
            .iter()
            .find(|(from, _)| *from == matched)
            .map_or(matched, |(_, to)| *to)
            .to_string()
    })
}
