//! Word statistics over whitespace-delimited tokens

use crate::script::Script;

/// Accumulated token counts and script runs for one block of text.
///
/// A run is a maximal sequence of consecutive tokens of the same script;
/// a token of any other class resets it. The longest run of each script
/// is kept because a single interleaved token is enough to break up a
/// passage, and the decision policies care about unbroken stretches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WordStats {
    /// Total non-empty tokens seen, regardless of script
    pub total: usize,
    /// Tokens whose leading character is Arabic
    pub arabic: usize,
    /// Tokens whose leading character is an ASCII letter
    pub latin: usize,
    /// Longest unbroken sequence of Arabic tokens
    pub max_arabic_run: usize,
    /// Longest unbroken sequence of Latin tokens
    pub max_latin_run: usize,
    arabic_run: usize,
    latin_run: usize,
}

impl WordStats {
    /// Accumulate statistics over a piece of text, splitting on Unicode
    /// whitespace.
    pub fn from_text(text: &str) -> Self {
        let mut stats = WordStats::default();
        for token in text.split_whitespace() {
            stats.push_token(token);
        }
        stats
    }

    /// Feed one token into the accumulator.
    ///
    /// Empty tokens are ignored; `split_whitespace` never produces them,
    /// but callers aggregating across node boundaries may.
    pub fn push_token(&mut self, token: &str) {
        if token.is_empty() {
            return;
        }
        self.total += 1;
        match Script::of_token(token) {
            Script::Arabic => {
                self.arabic += 1;
                self.arabic_run += 1;
                self.latin_run = 0;
                self.max_arabic_run = self.max_arabic_run.max(self.arabic_run);
            }
            Script::Latin => {
                self.latin += 1;
                self.latin_run += 1;
                self.arabic_run = 0;
                self.max_latin_run = self.max_latin_run.max(self.latin_run);
            }
            Script::Other => {
                self.arabic_run = 0;
                self.latin_run = 0;
            }
        }
    }

    /// Accumulate a further piece of text, as if it followed the
    /// previous one separated by whitespace. Runs continue across calls,
    /// so text split over several nodes behaves like the concatenation.
    pub fn absorb_text(&mut self, text: &str) {
        for token in text.split_whitespace() {
            self.push_token(token);
        }
    }

    /// True when no non-whitespace token was seen; the empty sentinel.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Fraction of tokens classified Arabic, 0.0 for empty input.
    pub fn arabic_ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.arabic as f64 / self.total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_whitespace_only() {
        assert!(WordStats::from_text("").is_empty());
        assert!(WordStats::from_text("  \t\n ").is_empty());
        assert_eq!(WordStats::from_text("").arabic_ratio(), 0.0);
    }

    #[test]
    fn counts_and_ratio() {
        let stats = WordStats::from_text("مرحبا بالعالم hello");
        assert_eq!(stats.total, 3);
        assert_eq!(stats.arabic, 2);
        assert_eq!(stats.latin, 1);
        assert!((stats.arabic_ratio() - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn runs_reset_on_other_script() {
        // Arabic run of 2, broken by Latin, then a single Arabic token
        let stats = WordStats::from_text("مرحبا بالعالم hello مرحبا");
        assert_eq!(stats.max_arabic_run, 2);
        assert_eq!(stats.max_latin_run, 1);

        // A neutral token breaks both runs
        let stats = WordStats::from_text("hello world 123 hello");
        assert_eq!(stats.max_latin_run, 2);
        assert_eq!(stats.total, 4);
    }

    #[test]
    fn long_latin_run_tracked() {
        let stats = WordStats::from_text("one two three four مرحبا");
        assert_eq!(stats.max_latin_run, 4);
        assert_eq!(stats.max_arabic_run, 1);
    }

    #[test]
    fn push_token_continues_runs_across_calls() {
        let mut stats = WordStats::default();
        stats.push_token("مرحبا");
        stats.push_token("بالعالم");
        assert_eq!(stats.max_arabic_run, 2);
    }
}
