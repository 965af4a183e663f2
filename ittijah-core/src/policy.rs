//! Direction decision policies
//!
//! Three deliberately distinct rules share the `Verdict` type: a
//! ratio-and-run rule for prose blocks, a presence rule for headings, and
//! a first-hit primitive for list containers. They stay separate because
//! each granularity matches its element class; see `decide_prose` for the
//! guard rails that make the prose rule conservative.

use crate::script::Script;
use crate::stats::WordStats;

/// Direction verdict for one block of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Verdict {
    /// Mark the block right-to-left
    Rtl,
    /// No explicit direction; the block inherits
    None,
}

impl Verdict {
    /// True for `Verdict::Rtl`.
    pub fn is_rtl(self) -> bool {
        matches!(self, Verdict::Rtl)
    }
}

/// Thresholds for the prose decision rule.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PolicyConfig {
    /// A Latin run longer than this forces `None` regardless of Arabic
    /// content
    pub latin_run_limit: usize,
    /// Minimum unbroken Arabic run required for an Rtl verdict
    pub arabic_run_min: usize,
    /// Minimum Arabic token fraction required for an Rtl verdict
    pub arabic_ratio_min: f64,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            latin_run_limit: 3,
            arabic_run_min: 2,
            arabic_ratio_min: 0.3,
        }
    }
}

impl PolicyConfig {
    /// Ratio-and-run rule for prose blocks.
    ///
    /// Empty statistics yield `None`. A Latin run longer than
    /// `latin_run_limit` yields `None` even when the Arabic signal would
    /// otherwise pass; long unbroken Latin passages are usually code,
    /// identifiers, or quoted material that must stay left-to-right.
    /// Otherwise Rtl requires both the run and the ratio threshold.
    pub fn decide_prose(&self, stats: &WordStats) -> Verdict {
        if stats.is_empty() {
            return Verdict::None;
        }
        if stats.max_latin_run > self.latin_run_limit {
            return Verdict::None;
        }
        if stats.max_arabic_run >= self.arabic_run_min
            && stats.arabic_ratio() >= self.arabic_ratio_min
        {
            Verdict::Rtl
        } else {
            Verdict::None
        }
    }

    /// Presence rule for headings: any Arabic token is decisive.
    ///
    /// Headings are short, so ratio and run requirements would reject
    /// legitimate mixed headings like an Arabic title with a Latin brand
    /// name.
    pub fn decide_heading(&self, stats: &WordStats) -> Verdict {
        if stats.arabic > 0 {
            Verdict::Rtl
        } else {
            Verdict::None
        }
    }
}

/// First-hit primitive for list containers: does this token lead with an
/// Arabic character? The engine walks list items in traversal order and
/// stops at the first `true`.
pub fn arabic_leading(token: &str) -> bool {
    Script::of_token(token) == Script::Arabic
}
