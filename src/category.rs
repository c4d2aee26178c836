//! Semantic categories and the prefix tables used to assign them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of the box model a spacing utility targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpacingKind {
    Margin,
    Padding,
}

/// Semantic classification of a base utility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Layout,
    Position,
    Display,
    Spacing(SpacingKind),
    Sizing,
    Flexbox,
    Grid,
    Background,
    Border,
    Typography,
    Effects,
    Transform,
    Transition,
    Animation,
    Interactivity,
    Accessibility,
    Other,
}

/// First rank of the responsive band; `RESPONSIVE_RANK_BASE + breakpoint`.
pub const RESPONSIVE_RANK_BASE: u16 = 400;

impl Category {
    /// Fixed sort rank; every category sorts before the responsive band.
    pub fn rank(self) -> u16 {
        match self {
            Category::Layout => 100,
            Category::Position => 110,
            Category::Display => 120,
            Category::Flexbox => 130,
            Category::Grid => 140,
            Category::Spacing(SpacingKind::Margin) => 150,
            Category::Spacing(SpacingKind::Padding) => 151,
            Category::Sizing => 160,
            Category::Background => 170,
            Category::Border => 180,
            Category::Typography => 190,
            Category::Effects => 200,
            Category::Transform => 210,
            Category::Transition => 220,
            Category::Animation => 230,
            Category::Interactivity => 240,
            Category::Accessibility => 250,
            Category::Other => 300,
        }
    }

    /// Presentation color used by editors when highlighting the category
    pub fn display_color(self) -> &'static str {
        match self {
            Category::Layout => "#6366f1",
            Category::Position => "#8b5cf6",
            Category::Display => "#a855f7",
            Category::Spacing(_) => "#10b981",
            Category::Sizing => "#14b8a6",
            Category::Flexbox => "#3b82f6",
            Category::Grid => "#0ea5e9",
            Category::Background => "#f59e0b",
            Category::Border => "#f97316",
            Category::Typography => "#ef4444",
            Category::Effects => "#ec4899",
            Category::Transform => "#d946ef",
            Category::Transition => "#84cc16",
            Category::Animation => "#22c55e",
            Category::Interactivity => "#06b6d4",
            Category::Accessibility => "#64748b",
            Category::Other => "#9ca3af",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::Layout => "Layout",
            Category::Position => "Position",
            Category::Display => "Display",
            Category::Spacing(SpacingKind::Margin) => "Spacing (margin)",
            Category::Spacing(SpacingKind::Padding) => "Spacing (padding)",
            Category::Sizing => "Sizing",
            Category::Flexbox => "Flexbox",
            Category::Grid => "Grid",
            Category::Background => "Background",
            Category::Border => "Border",
            Category::Typography => "Typography",
            Category::Effects => "Effects",
            Category::Transform => "Transform",
            Category::Transition => "Transition",
            Category::Animation => "Animation",
            Category::Interactivity => "Interactivity",
            Category::Accessibility => "Accessibility",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const MARGIN: Category = Category::Spacing(SpacingKind::Margin);
const PADDING: Category = Category::Spacing(SpacingKind::Padding);

/// Whole-class names; checked before the prefix table.
static EXACT: &[(&str, Category)] = &[
    ("block", Category::Display),
    ("inline", Category::Display),
    ("inline-block", Category::Display),
    ("flex", Category::Display),
    ("inline-flex", Category::Display),
    ("grid", Category::Display),
    ("inline-grid", Category::Display),
    ("table", Category::Display),
    ("inline-table", Category::Display),
    ("table-row", Category::Display),
    ("table-cell", Category::Display),
    ("contents", Category::Display),
    ("flow-root", Category::Display),
    ("list-item", Category::Display),
    ("hidden", Category::Display),
    ("static", Category::Position),
    ("fixed", Category::Position),
    ("absolute", Category::Position),
    ("relative", Category::Position),
    ("sticky", Category::Position),
    ("container", Category::Layout),
    ("isolate", Category::Layout),
    ("visible", Category::Layout),
    ("invisible", Category::Layout),
    ("collapse", Category::Layout),
    ("truncate", Category::Typography),
    ("italic", Category::Typography),
    ("not-italic", Category::Typography),
    ("underline", Category::Typography),
    ("overline", Category::Typography),
    ("line-through", Category::Typography),
    ("no-underline", Category::Typography),
    ("uppercase", Category::Typography),
    ("lowercase", Category::Typography),
    ("capitalize", Category::Typography),
    ("normal-case", Category::Typography),
    ("antialiased", Category::Typography),
    ("subpixel-antialiased", Category::Typography),
    ("sr-only", Category::Accessibility),
    ("not-sr-only", Category::Accessibility),
];

/// `(prefix, category)`; a prefix matches `p` itself or anything starting `p-`.
static PREFIXES: &[(&str, Category)] = &[
    // Layout
    ("aspect", Category::Layout),
    ("columns", Category::Layout),
    ("break-after", Category::Layout),
    ("break-before", Category::Layout),
    ("break-inside", Category::Layout),
    ("box-decoration", Category::Layout),
    ("box", Category::Layout),
    ("float", Category::Layout),
    ("clear", Category::Layout),
    ("isolation", Category::Layout),
    ("object", Category::Layout),
    ("overflow", Category::Layout),
    ("overscroll", Category::Layout),
    ("z", Category::Layout),
    ("display", Category::Display),
    // Position
    ("inset", Category::Position),
    ("top", Category::Position),
    ("right", Category::Position),
    ("bottom", Category::Position),
    ("left", Category::Position),
    ("start", Category::Position),
    ("end", Category::Position),
    // Flexbox
    ("flex", Category::Flexbox),
    ("basis", Category::Flexbox),
    ("grow", Category::Flexbox),
    ("shrink", Category::Flexbox),
    ("order", Category::Flexbox),
    ("justify", Category::Flexbox),
    ("items", Category::Flexbox),
    ("self", Category::Flexbox),
    ("content", Category::Flexbox),
    ("place", Category::Flexbox),
    // Grid
    ("grid-cols", Category::Grid),
    ("grid-rows", Category::Grid),
    ("grid-flow", Category::Grid),
    ("col", Category::Grid),
    ("row", Category::Grid),
    ("auto-cols", Category::Grid),
    ("auto-rows", Category::Grid),
    ("gap", Category::Grid),
    // Spacing
    ("m", MARGIN),
    ("mx", MARGIN),
    ("my", MARGIN),
    ("mt", MARGIN),
    ("mr", MARGIN),
    ("mb", MARGIN),
    ("ml", MARGIN),
    ("ms", MARGIN),
    ("me", MARGIN),
    ("space-x", MARGIN),
    ("space-y", MARGIN),
    ("p", PADDING),
    ("px", PADDING),
    ("py", PADDING),
    ("pt", PADDING),
    ("pr", PADDING),
    ("pb", PADDING),
    ("pl", PADDING),
    ("ps", PADDING),
    ("pe", PADDING),
    // Sizing
    ("w", Category::Sizing),
    ("h", Category::Sizing),
    ("min-w", Category::Sizing),
    ("min-h", Category::Sizing),
    ("max-w", Category::Sizing),
    ("max-h", Category::Sizing),
    ("size", Category::Sizing),
    // Background
    ("bg", Category::Background),
    ("from", Category::Background),
    ("via", Category::Background),
    ("to", Category::Background),
    // Border
    ("border", Category::Border),
    ("rounded", Category::Border),
    ("divide", Category::Border),
    ("outline", Category::Border),
    ("ring", Category::Border),
    // Typography
    ("text", Category::Typography),
    ("font", Category::Typography),
    ("leading", Category::Typography),
    ("tracking", Category::Typography),
    ("line-clamp", Category::Typography),
    ("list", Category::Typography),
    ("decoration", Category::Typography),
    ("underline-offset", Category::Typography),
    ("indent", Category::Typography),
    ("align", Category::Typography),
    ("whitespace", Category::Typography),
    ("break", Category::Typography),
    ("hyphens", Category::Typography),
    ("placeholder", Category::Typography),
    // Effects
    ("shadow", Category::Effects),
    ("opacity", Category::Effects),
    ("mix-blend", Category::Effects),
    ("bg-blend", Category::Effects),
    ("blur", Category::Effects),
    ("brightness", Category::Effects),
    ("contrast", Category::Effects),
    ("drop-shadow", Category::Effects),
    ("grayscale", Category::Effects),
    ("hue-rotate", Category::Effects),
    ("invert", Category::Effects),
    ("saturate", Category::Effects),
    ("sepia", Category::Effects),
    ("backdrop", Category::Effects),
    // Transform
    ("transform", Category::Transform),
    ("scale", Category::Transform),
    ("rotate", Category::Transform),
    ("translate", Category::Transform),
    ("skew", Category::Transform),
    ("origin", Category::Transform),
    // Transition
    ("transition", Category::Transition),
    ("duration", Category::Transition),
    ("ease", Category::Transition),
    ("delay", Category::Transition),
    // Animation
    ("animate", Category::Animation),
    // Interactivity
    ("cursor", Category::Interactivity),
    ("select", Category::Interactivity),
    ("resize", Category::Interactivity),
    ("scroll", Category::Interactivity),
    ("snap", Category::Interactivity),
    ("touch", Category::Interactivity),
    ("pointer-events", Category::Interactivity),
    ("appearance", Category::Interactivity),
    ("caret", Category::Interactivity),
    ("accent", Category::Interactivity),
    ("will-change", Category::Interactivity),
    // Accessibility
    ("forced-color-adjust", Category::Accessibility),
];

/// Strip the markers that don't change what a utility styles:
/// `!` importance on either end and a leading `-` for negative values.
pub fn normalize_base(base: &str) -> &str {
    let base = base.strip_prefix('!').unwrap_or(base);
    let base = base.strip_suffix('!').unwrap_or(base);
    base.strip_prefix('-').unwrap_or(base)
}

/// Longest prefix from the table matching `base`, together with its category.
pub fn match_prefix(base: &str) -> Option<(&'static str, Category)> {
    PREFIXES
        .iter()
        .filter(|(prefix, _)| prefix_matches(base, prefix))
        .max_by_key(|(prefix, _)| prefix.len())
        .map(|(prefix, category)| (*prefix, *category))
}

fn prefix_matches(base: &str, prefix: &str) -> bool {
    match base.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('-'),
        None => false,
    }
}

/// Category of a base utility; `Other` when nothing matches.
pub fn category_of(base: &str) -> Category {
    let base = normalize_base(base);
    if let Some((_, category)) = EXACT.iter().find(|(name, _)| *name == base) {
        return *category;
    }
    match_prefix(base)
        .map(|(_, category)| category)
        .unwrap_or(Category::Other)
}
