//! Canonical ordering of a class attribute value.

use crate::category::{category_of, Category, RESPONSIVE_RANK_BASE};
use crate::token::ClassToken;
use crate::tokenizer::{has_balanced_brackets, tokenize};
use crate::variant::{breakpoint_rank, split_variants};

/// Priority of one raw class.
///
/// The base category's rank, unless the variant chain holds a breakpoint: then
/// `400 + breakpoint`, using the widest breakpoint in the chain. An empty base
/// sorts as `Other`.
pub fn sort_key(raw: &str) -> u16 {
    let (variants, base) = split_variants(raw);
    if let Some(breakpoint) = variants.iter().filter_map(|v| breakpoint_rank(v)).max() {
        return RESPONSIVE_RANK_BASE + breakpoint;
    }
    if base.is_empty() {
        return Category::Other.rank();
    }
    category_of(base).rank()
}

/// Priority of an already classified token
pub fn token_sort_key(token: &ClassToken) -> u16 {
    token
        .variants
        .iter()
        .filter_map(|v| breakpoint_rank(v))
        .max()
        .map(|breakpoint| RESPONSIVE_RANK_BASE + breakpoint)
        .unwrap_or_else(|| token.category.rank())
}

/// Stable-sort `class_string` by priority and rejoin with single spaces.
///
/// Every token of the input is kept, including ones that can't be classified.
/// If any token has unbalanced brackets the order is left alone and only the
/// whitespace is normalized: moving such a token next to an unrelated `]`
/// would change how the result tokenizes.
pub fn sort(class_string: &str) -> String {
    let raw_tokens = tokenize(class_string);
    if raw_tokens.iter().any(|raw| !has_balanced_brackets(raw.text)) {
        log::debug!("unbalanced brackets, keeping original class order");
        return raw_tokens.iter().map(|raw| raw.text).collect::<Vec<_>>().join(" ");
    }

    let mut keyed: Vec<(u16, &str)> = raw_tokens
        .into_iter()
        .map(|raw| (sort_key(raw.text), raw.text))
        .collect();
    keyed.sort_by_key(|(key, _)| *key);

    log::debug!("sorted {} class(es)", keyed.len());
    keyed.into_iter().map(|(_, raw)| raw).collect::<Vec<_>>().join(" ")
}

/// Stable-sort tokens in place
pub fn sort_tokens(tokens: &mut [ClassToken]) {
    tokens.sort_by_key(token_sort_key);
}

/// Like [`sort`], but keeps the input's leading and trailing whitespace.
///
/// Needed when the attribute text is one piece of a concatenated string
/// literal such as `"flex " + extra`.
pub fn sort_preserving_edges(class_string: &str) -> String {
    let content_start = match class_string.find(|c: char| !c.is_whitespace()) {
        Some(idx) => idx,
        None => return class_string.to_string(),
    };
    let content_end = class_string
        .rfind(|c: char| !c.is_whitespace())
        .map(|idx| idx + class_string[idx..].chars().next().map_or(1, char::len_utf8))
        .unwrap_or(class_string.len());

    let leading = &class_string[..content_start];
    let trailing = &class_string[content_end..];
    format!("{}{}{}", leading, sort(&class_string[content_start..content_end]), trailing)
}
