//! Category classification and CSS declaration lookup for base utilities.

use crate::cache::ClassCache;
use crate::category::{self, normalize_base, Category};
use crate::config::ThemeExtend;
use crate::palette;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Concrete CSS produced by a utility, used for documentation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CssDeclaration {
    /// One or more property names sharing the same value
    pub properties: Vec<String>,
    pub value: String,
}

impl CssDeclaration {
    fn new(properties: &[&str], value: impl Into<String>) -> Self {
        Self {
            properties: properties.iter().map(|p| p.to_string()).collect(),
            value: value.into(),
        }
    }
}

impl fmt::Display for CssDeclaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .properties
            .iter()
            .map(|p| format!("{}: {}", p, self.value))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

/// Category plus the declaration when one is known
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub category: Category,
    pub declaration: Option<CssDeclaration>,
}

impl Classification {
    pub fn other() -> Self {
        Self {
            category: Category::Other,
            declaration: None,
        }
    }
}

static DEFAULT_CLASSIFIER: Lazy<Classifier> = Lazy::new(Classifier::default);

/// Classify with the built-in tables only
pub fn classify(base: &str) -> Classification {
    DEFAULT_CLASSIFIER.classify(base)
}

/// Table-driven classifier; theme extensions resolve before the static tables
#[derive(Debug, Clone, Default)]
pub struct Classifier {
    theme: ThemeExtend,
}

impl Classifier {
    pub fn new(theme: ThemeExtend) -> Self {
        Self { theme }
    }

    /// Classify through `cache`, which must belong to this classifier's scope
    pub fn classify_cached(&self, base: &str, cache: &ClassCache) -> Classification {
        if let Some(hit) = cache.classifications.get(base) {
            return hit;
        }
        let result = self.classify(base);
        cache.classifications.insert(base.to_string(), result.clone());
        result
    }

    pub fn classify(&self, base: &str) -> Classification {
        if base.is_empty() {
            return Classification::other();
        }
        let category = category::category_of(base);
        let declaration = match category {
            Category::Other => None,
            _ => self.declaration(base, category),
        };
        Classification { category, declaration }
    }

    fn declaration(&self, base: &str, category: Category) -> Option<CssDeclaration> {
        let negative = base.trim_start_matches('!').starts_with('-');
        let name = normalize_base(base);

        match category {
            Category::Display => return display_declaration(name),
            Category::Position => {
                if let Some(decl) = position_declaration(name) {
                    return Some(decl);
                }
            }
            _ => {}
        }

        let (prefix, _) = category::match_prefix(name)?;
        let rest = name[prefix.len()..].strip_prefix('-').unwrap_or("");

        match category {
            Category::Spacing(_) => self.spacing_declaration(prefix, rest, negative),
            Category::Sizing => self.sizing_declaration(prefix, rest),
            Category::Background if prefix == "bg" => self.background_declaration(rest),
            Category::Border if prefix == "rounded" => rounded_declaration(rest),
            Category::Border if prefix == "border" => self.border_declaration(rest),
            Category::Typography if prefix == "text" => self.text_declaration(rest),
            Category::Position => self.inset_declaration(prefix, rest, negative),
            _ => None,
        }
    }

    fn spacing_declaration(&self, prefix: &str, rest: &str, negative: bool) -> Option<CssDeclaration> {
        let properties = spacing_properties(prefix)?;
        if rest.is_empty() {
            return None;
        }
        let value = if rest == "auto" && prefix.starts_with('m') {
            "auto".to_string()
        } else {
            negate(self.length(rest), negative)
        };
        Some(CssDeclaration::new(properties, value))
    }

    fn inset_declaration(&self, prefix: &str, rest: &str, negative: bool) -> Option<CssDeclaration> {
        let properties: &[&str] = match prefix {
            "inset" => match rest.split_once('-') {
                Some(("x", _)) => &["left", "right"],
                Some(("y", _)) => &["top", "bottom"],
                _ => &["inset"],
            },
            "top" => &["top"],
            "right" => &["right"],
            "bottom" => &["bottom"],
            "left" => &["left"],
            "start" => &["inset-inline-start"],
            "end" => &["inset-inline-end"],
            _ => return None,
        };
        let token = match (prefix, rest.split_once('-')) {
            ("inset", Some(("x" | "y", token))) => token,
            _ => rest,
        };
        if token.is_empty() {
            return None;
        }
        let value = match token {
            "auto" => "auto".to_string(),
            "full" => "100%".to_string(),
            _ => palette::fraction(token).unwrap_or_else(|| self.length(token)),
        };
        Some(CssDeclaration::new(properties, negate(value, negative)))
    }

    fn sizing_declaration(&self, prefix: &str, rest: &str) -> Option<CssDeclaration> {
        let properties: &[&str] = match prefix {
            "w" => &["width"],
            "h" => &["height"],
            "min-w" => &["min-width"],
            "min-h" => &["min-height"],
            "max-w" => &["max-width"],
            "max-h" => &["max-height"],
            "size" => &["width", "height"],
            _ => return None,
        };
        if rest.is_empty() {
            return None;
        }
        let horizontal = prefix.ends_with('w');
        let value = match rest {
            "full" => "100%".to_string(),
            "auto" => "auto".to_string(),
            "min" => "min-content".to_string(),
            "max" => "max-content".to_string(),
            "fit" => "fit-content".to_string(),
            "screen" if horizontal => "100vw".to_string(),
            "screen" => "100vh".to_string(),
            "svw" | "lvw" | "dvw" | "svh" | "lvh" | "dvh" => format!("100{}", rest),
            _ => {
                if let Some(inner) = arbitrary_inner(rest) {
                    inner
                } else if let Some(frac) = palette::fraction(rest) {
                    frac
                } else if let Some(width) = palette::container_width(rest).filter(|_| prefix == "max-w") {
                    width.to_string()
                } else {
                    self.length(rest)
                }
            }
        };
        Some(CssDeclaration::new(properties, value))
    }

    fn background_declaration(&self, rest: &str) -> Option<CssDeclaration> {
        if rest.is_empty() || is_background_keyword(rest) {
            return None;
        }
        if let Some(inner) = arbitrary_inner(rest) {
            if inner.starts_with("url(") {
                return Some(CssDeclaration::new(&["background-image"], inner));
            }
        }
        Some(CssDeclaration::new(&["background-color"], self.color(rest)))
    }

    fn border_declaration(&self, rest: &str) -> Option<CssDeclaration> {
        match rest {
            "" => Some(CssDeclaration::new(&["border-width"], "1px")),
            "0" | "2" | "4" | "8" => Some(CssDeclaration::new(&["border-width"], format!("{}px", rest))),
            "solid" | "dashed" | "dotted" | "double" | "hidden" | "none" => {
                Some(CssDeclaration::new(&["border-style"], rest))
            }
            _ if arbitrary_inner(rest).is_some() => None,
            _ if self.is_color(rest) => Some(CssDeclaration::new(&["border-color"], self.color(rest))),
            _ => None,
        }
    }

    fn text_declaration(&self, rest: &str) -> Option<CssDeclaration> {
        // `text-sm/6` carries a line-height modifier after the size
        let size_token = rest.split_once('/').map_or(rest, |(size, _)| size);
        if let Some(size) = palette::font_size(size_token) {
            return Some(CssDeclaration::new(&["font-size"], size));
        }
        match rest {
            "" => None,
            "left" | "center" | "right" | "justify" | "start" | "end" => {
                Some(CssDeclaration::new(&["text-align"], rest))
            }
            "ellipsis" | "clip" | "wrap" | "nowrap" | "balance" | "pretty" => None,
            _ => {
                if let Some(inner) = arbitrary_inner(rest) {
                    let property = if looks_like_color(&inner) { "color" } else { "font-size" };
                    return Some(CssDeclaration::new(&[property], inner));
                }
                Some(CssDeclaration::new(&["color"], self.color(rest)))
            }
        }
    }

    /// Spacing-scale length with theme and `var(--token)` fallback
    fn length(&self, token: &str) -> String {
        if let Some(inner) = arbitrary_inner(token) {
            return inner;
        }
        if let Some(custom) = self.theme.spacing.get(token) {
            return custom.clone();
        }
        palette::spacing(token).unwrap_or_else(|| format!("var(--{})", token))
    }

    fn is_color(&self, token: &str) -> bool {
        let name = token.split('/').next().unwrap_or(token);
        self.theme.colors.contains_key(name) || palette::is_color_name(name)
    }

    /// Color for `red-500`, `brand`, `[#123]`, with optional `/alpha`
    fn color(&self, token: &str) -> String {
        let (name, alpha) = split_alpha(token);
        let base = if let Some(inner) = arbitrary_inner(name) {
            inner
        } else if let Some(custom) = self.theme.colors.get(name) {
            custom.clone()
        } else if let Some(hex) = palette::color(name) {
            hex.to_string()
        } else {
            format!("var(--{})", name)
        };

        match alpha {
            Some(alpha) => {
                let percent = match arbitrary_inner(alpha) {
                    Some(inner) => inner,
                    None => format!("{}%", alpha),
                };
                format!("color-mix(in srgb, {} {}, transparent)", base, percent)
            }
            None => base,
        }
    }
}

fn spacing_properties(prefix: &str) -> Option<&'static [&'static str]> {
    let properties: &'static [&'static str] = match prefix {
        "p" => &["padding"],
        "px" => &["padding-left", "padding-right"],
        "py" => &["padding-top", "padding-bottom"],
        "pt" => &["padding-top"],
        "pr" => &["padding-right"],
        "pb" => &["padding-bottom"],
        "pl" => &["padding-left"],
        "ps" => &["padding-inline-start"],
        "pe" => &["padding-inline-end"],
        "m" => &["margin"],
        "mx" => &["margin-left", "margin-right"],
        "my" => &["margin-top", "margin-bottom"],
        "mt" => &["margin-top"],
        "mr" => &["margin-right"],
        "mb" => &["margin-bottom"],
        "ml" => &["margin-left"],
        "ms" => &["margin-inline-start"],
        "me" => &["margin-inline-end"],
        _ => return None,
    };
    Some(properties)
}

fn display_declaration(name: &str) -> Option<CssDeclaration> {
    let value = match name {
        "hidden" => "none",
        "block" | "inline" | "inline-block" | "flex" | "inline-flex" | "grid" | "inline-grid"
        | "table" | "inline-table" | "table-row" | "table-cell" | "contents" | "flow-root"
        | "list-item" => name,
        _ => return None,
    };
    Some(CssDeclaration::new(&["display"], value))
}

fn position_declaration(name: &str) -> Option<CssDeclaration> {
    matches!(name, "static" | "fixed" | "absolute" | "relative" | "sticky")
        .then(|| CssDeclaration::new(&["position"], name))
}

fn rounded_declaration(rest: &str) -> Option<CssDeclaration> {
    const SIDES: &[(&str, &[&str])] = &[
        ("t", &["border-top-left-radius", "border-top-right-radius"]),
        ("r", &["border-top-right-radius", "border-bottom-right-radius"]),
        ("b", &["border-bottom-right-radius", "border-bottom-left-radius"]),
        ("l", &["border-top-left-radius", "border-bottom-left-radius"]),
        ("tl", &["border-top-left-radius"]),
        ("tr", &["border-top-right-radius"]),
        ("br", &["border-bottom-right-radius"]),
        ("bl", &["border-bottom-left-radius"]),
    ];

    let (head, tail) = rest.split_once('-').unwrap_or((rest, ""));
    let (properties, token): (&[&str], &str) = match SIDES.iter().find(|(side, _)| *side == head) {
        Some((_, properties)) => (*properties, tail),
        None => (&["border-radius"], rest),
    };

    let value = match arbitrary_inner(token) {
        Some(inner) => inner,
        None => palette::radius(token)?.to_string(),
    };
    Some(CssDeclaration::new(properties, value))
}

/// Bracket content with `_` read as a space: `[calc(100%_-_1rem)]`
pub(crate) fn arbitrary_inner(token: &str) -> Option<String> {
    let inner = token.strip_prefix('[')?.strip_suffix(']')?;
    if inner.trim().is_empty() {
        return None;
    }
    Some(inner.replace('_', " "))
}

fn split_alpha(token: &str) -> (&str, Option<&str>) {
    // `/` inside brackets belongs to the value
    if token.starts_with('[') {
        if let Some(close) = token.rfind(']') {
            let (name, after) = token.split_at(close + 1);
            return (name, after.strip_prefix('/'));
        }
        return (token, None);
    }
    match token.split_once('/') {
        Some((name, alpha)) if !alpha.is_empty() => (name, Some(alpha)),
        _ => (token, None),
    }
}

fn looks_like_color(value: &str) -> bool {
    value.starts_with('#')
        || ["rgb", "hsl", "oklch", "oklab", "color(", "var(--color"]
            .iter()
            .any(|p| value.starts_with(p))
}

fn is_background_keyword(rest: &str) -> bool {
    const KEYWORDS: &[&str] = &[
        "fixed", "local", "scroll", "auto", "cover", "contain", "center", "top", "bottom", "left",
        "right", "repeat", "no-repeat", "repeat-x", "repeat-y", "repeat-round", "repeat-space",
        "none",
    ];
    const KEYWORD_PREFIXES: &[&str] = &[
        "clip-", "origin-", "gradient-", "linear", "radial", "conic", "left-", "right-", "blend-",
    ];
    KEYWORDS.contains(&rest) || KEYWORD_PREFIXES.iter().any(|p| rest.starts_with(p))
}

fn negate(value: String, negative: bool) -> String {
    if !negative {
        return value;
    }
    if value.starts_with("var(") || value.contains(' ') {
        format!("calc({} * -1)", value)
    } else {
        format!("-{}", value)
    }
}
