use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Decorative bracket spans removed from stems before comparison.
pub const DEFAULT_BRACKETS_PATTERN: &str = r"(\[.+?\]|【.+?】|「.+?」)";

/// Broadcast-schedule prefixes stripped from the start of a stem.
pub const DEFAULT_PREFIXES_PATTERN: &str = r"^(アニメ\s|アニメA・|アニメギルド|アニメ26)";

/// Episode markers and trailing fragments stripped from the end of a stem.
pub const DEFAULT_SUFFIXES_PATTERN: &str = r"(第\d*|#\d*|\(\d+\)|ほか|[\(「])\s*$";

// Normalized names become directory names, so anything a filesystem would
// reject has to go.
static UNSAFE_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[<>:"/\\|?*]"#).expect("unsafe-chars pattern compiles"));

/// Stripping rules turning a raw filename stem into a comparable name.
///
/// The three patterns are configuration; the defaults match Japanese TV
/// recording conventions (bracketed station tags, schedule prefixes,
/// episode-number suffixes).
#[derive(Debug, Clone)]
pub struct NormalizeRules {
    brackets: Regex,
    prefixes: Regex,
    suffixes: Regex,
}

impl NormalizeRules {
    pub fn new(brackets: &str, prefixes: &str, suffixes: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            brackets: Regex::new(brackets)?,
            prefixes: Regex::new(prefixes)?,
            suffixes: Regex::new(suffixes)?,
        })
    }

    /// Canonical comparable name for a raw filename stem.
    ///
    /// Steps run in a fixed order; each operates on the previous output:
    /// NFKC fold, bracket-span removal, filesystem-unsafe character
    /// removal, anchored prefix strip, anchored suffix strip, trim.
    pub fn normalize(&self, raw_stem: &str) -> String {
        let folded: String = raw_stem.nfkc().collect();
        let stripped = self.brackets.replace_all(&folded, "");
        let safe = UNSAFE_CHARS.replace_all(&stripped, "");
        self.strip_affixes(&safe)
    }

    /// Anchored prefix/suffix strip plus trim. Also applied to derived
    /// cluster names, which inherit affixes from their member names.
    pub fn strip_affixes(&self, text: &str) -> String {
        let without_prefix = self.prefixes.replace(text, "");
        let without_suffix = self.suffixes.replace(&without_prefix, "");
        without_suffix.trim().to_string()
    }
}

impl Default for NormalizeRules {
    fn default() -> Self {
        Self::new(
            DEFAULT_BRACKETS_PATTERN,
            DEFAULT_PREFIXES_PATTERN,
            DEFAULT_SUFFIXES_PATTERN,
        )
        .expect("default patterns compile")
    }
}

#[cfg(test)]
mod tests {
    use super::NormalizeRules;
    use pretty_assertions::assert_eq;

    #[test]
    fn nfkc_folds_fullwidth_alphanumerics() {
        let rules = NormalizeRules::default();
        assert_eq!(rules.normalize("ＳＨＯＷ　１２３"), "SHOW 123");
    }

    #[test]
    fn removes_all_bracket_spans() {
        let rules = NormalizeRules::default();
        assert_eq!(rules.normalize("[新]タイトル[字][再]"), "タイトル");
        assert_eq!(rules.normalize("【アニメ】タイトル「注釈」続き"), "タイトル続き");
    }

    #[test]
    fn removes_filesystem_unsafe_characters() {
        let rules = NormalizeRules::default();
        assert_eq!(rules.normalize(r#"a<b>c:d"e/f\g|h?i*j"#), "abcdefghij");
    }

    #[test]
    fn strips_schedule_prefix_once() {
        let rules = NormalizeRules::default();
        assert_eq!(rules.normalize("アニメ タイトル"), "タイトル");
        assert_eq!(rules.normalize("アニメギルドタイトル"), "タイトル");
    }

    #[test]
    fn strips_episode_suffixes() {
        let rules = NormalizeRules::default();
        assert_eq!(rules.normalize("タイトル 第12"), "タイトル");
        assert_eq!(rules.normalize("タイトル #3 "), "タイトル");
        assert_eq!(rules.normalize("タイトル(2)"), "タイトル");
        assert_eq!(rules.normalize("タイトルほか"), "タイトル");
        assert_eq!(rules.normalize("タイトル「"), "タイトル");
    }

    #[test]
    fn suffix_strip_runs_after_bracket_removal() {
        // The trailing bracketed span goes first, exposing the episode
        // marker for the suffix pass.
        let rules = NormalizeRules::default();
        assert_eq!(rules.normalize("タイトル 第5[字]"), "タイトル");
    }

    #[test]
    fn decorations_only_stem_normalizes_to_empty() {
        let rules = NormalizeRules::default();
        assert_eq!(rules.normalize("[映]【HD】"), "");
        assert_eq!(rules.normalize("   "), "");
    }

    #[test]
    fn custom_patterns_override_defaults() {
        let rules = NormalizeRules::new(r"\{.+?\}", r"^REC_", r"_S\d+E\d+$").unwrap();
        assert_eq!(rules.normalize("REC_Show{tag}_S01E02"), "Show");
    }
}
