//! Script classification for characters and tokens

/// Script class of a character or token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Script {
    /// Arabic-script character (any Arabic Unicode block)
    Arabic,
    /// ASCII Latin letter
    Latin,
    /// Anything else: digits, punctuation, other scripts
    Other,
}

impl Script {
    /// Classify a single character.
    ///
    /// Arabic covers the Arabic, Arabic Supplement, Arabic Extended-A and
    /// both Presentation Forms blocks. Latin is deliberately just ASCII
    /// letters; accented Latin counts as `Other`, which matches how the
    /// word statistics treat neutral tokens.
    pub fn of(ch: char) -> Self {
        match ch {
            '\u{0600}'..='\u{06FF}'
            | '\u{0750}'..='\u{077F}'
            | '\u{08A0}'..='\u{08FF}'
            | '\u{FB50}'..='\u{FDFF}'
            | '\u{FE70}'..='\u{FEFF}' => Script::Arabic,
            'a'..='z' | 'A'..='Z' => Script::Latin,
            _ => Script::Other,
        }
    }

    /// Classify a whitespace-delimited token by its first character.
    ///
    /// Mixed-script tokens follow their leading character; an empty token
    /// is `Other`.
    pub fn of_token(token: &str) -> Self {
        match token.chars().next() {
            Some(ch) => Script::of(ch),
            None => Script::Other,
        }
    }
}
