//! Computed display resolution
//!
//! The engine only needs to know whether an element establishes a block
//! formatting boundary, so display resolution is a tag-default table with
//! an inline `style` override, not a CSS cascade.

/// Resolved display type of an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Display {
    /// Block-level container
    Block,
    /// Inline content
    Inline,
    /// Flex container
    Flex,
    /// Grid container
    Grid,
    /// List item
    ListItem,
    /// Not rendered; subtree text is not meaningful
    None,
}

impl Display {
    /// True for the display types that establish a direction boundary.
    pub fn is_boundary(self) -> bool {
        matches!(self, Display::Block | Display::Flex | Display::Grid)
    }

    /// Default display for a lower-cased tag name.
    pub fn for_tag(tag: &str) -> Self {
        match tag {
            "html" | "body" | "div" | "p" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6"
            | "blockquote" | "pre" | "ul" | "ol" | "dl" | "dt" | "dd" | "section" | "article"
            | "header" | "footer" | "main" | "aside" | "nav" | "form" | "table" | "figure"
            | "figcaption" | "hr" | "address" | "fieldset" => Display::Block,
            "li" => Display::ListItem,
            "head" | "title" | "meta" | "link" | "script" | "style" | "template" | "base"
            | "noscript" => Display::None,
            _ => Display::Inline,
        }
    }

    /// Parse a `display` declaration value from an inline style.
    ///
    /// Unknown values fall back to the tag default, returned as `None`
    /// here so the caller can tell "no override" apart from
    /// `display: none`.
    pub fn from_css_value(value: &str) -> Option<Self> {
        match value.trim() {
            "block" | "inline-block" | "flow-root" => Some(Display::Block),
            "flex" | "inline-flex" => Some(Display::Flex),
            "grid" | "inline-grid" => Some(Display::Grid),
            "list-item" => Some(Display::ListItem),
            "inline" => Some(Display::Inline),
            "none" => Some(Display::None),
            _ => None,
        }
    }
}

/// Scan an inline `style` attribute for a `display` declaration.
///
/// Forgiving `name: value` splitting on `;`, last declaration wins, the
/// way a user agent treats repeated properties. Malformed declarations
/// are skipped.
pub(crate) fn display_override(style: &str) -> Option<Display> {
    let mut resolved = None;
    for declaration in style.split(';') {
        let Some((name, value)) = declaration.split_once(':') else {
            continue;
        };
        if name.trim().eq_ignore_ascii_case("display") {
            if let Some(display) = Display::from_css_value(value) {
                resolved = Some(display);
            }
        }
    }
    resolved
}
