use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::RwLock;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, AsRefStr, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum Keyword {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
    Today,
    Yesterday,
    Tomorrow,
    #[strum(to_string = "last month")]
    LastMonth,
    #[strum(to_string = "this month")]
    ThisMonth,
    #[strum(to_string = "next month")]
    NextMonth,
}

pub struct Keywords;

impl Keywords {
    /// Returns the **global keyword registry** (input → canonical).
    ///
    /// The registry is initialized once on first access, seeded with every
    /// canonical keyword mapped to itself, and guarded by an [`RwLock`] so
    /// config loading can add synonyms. All keys are stored lowercased.
    fn registry() -> &'static RwLock<HashMap<String, Keyword>> {
        static REGISTRY: Lazy<RwLock<HashMap<String, Keyword>>> = Lazy::new(|| {
            let m = Keyword::iter()
                .map(|keyword| (keyword.as_ref().to_string(), keyword))
                .collect();
            RwLock::new(m)
        });
        &REGISTRY
    }

    /// Extends the global registry with user-defined **synonyms**.
    ///
    /// Each pair is `(alias, target)`. The `target` must already be known to
    /// the registry (a canonical keyword or an earlier synonym); unknown
    /// targets are ignored. Both sides are compared lowercased.
    ///
    /// ```toml
    /// # config.toml
    /// [synonyms]
    /// ayer = "yesterday"
    /// hoy  = "today"
    /// ```
    pub fn extend(synonyms: &[(String, String)]) {
        let mut reg = match Self::registry().write() {
            Ok(reg) => reg,
            Err(poisoned) => poisoned.into_inner(),
        };
        for (alias, target) in synonyms {
            if let Some(&canonical) = reg.get(&target.to_ascii_lowercase()) {
                reg.insert(alias.to_ascii_lowercase(), canonical);
            }
        }
    }

    /// Returns `true` if `word` is a canonical word (eg "today").
    pub fn is_canonical(word: &str) -> bool {
        let word = word.to_ascii_lowercase();
        Keyword::iter().any(|key| key.as_ref() == word)
    }

    /// Returns `true` if `input` equals (case-insensitively) the given
    /// canonical keyword or any of its registered synonyms.
    pub fn matches(keyword: Keyword, input: &str) -> bool {
        Self::lookup(input) == Some(keyword)
    }

    /// The canonical keyword `input` stands for, if any.
    pub fn lookup(input: &str) -> Option<Keyword> {
        let reg = match Self::registry().read() {
            Ok(reg) => reg,
            Err(poisoned) => poisoned.into_inner(),
        };
        reg.get(&input.trim().to_ascii_lowercase()).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_constants() {
        assert!(Keywords::matches(Keyword::Today, "today"));
        assert!(Keywords::matches(Keyword::Yesterday, "Yesterday"));
        assert!(Keywords::matches(Keyword::LastMonth, "last month"));
        assert!(Keywords::matches(Keyword::Friday, " FRIDAY "));
    }

    #[test]
    fn synonyms_extend() {
        Keywords::extend(&[
            ("ayer".into(), "yesterday".into()),
            ("hoy".into(), "today".into()),
            ("MES PASADO".into(), "last month".into()),
        ]);
        assert!(Keywords::matches(Keyword::Yesterday, "ayer"));
        assert!(Keywords::matches(Keyword::Today, "HOY"));
        assert!(Keywords::matches(Keyword::LastMonth, "mes pasado"));
    }

    #[test]
    fn synonyms_with_unknown_target_are_ignored() {
        Keywords::extend(&[("someday".into(), "eventually".into())]);
        assert_eq!(Keywords::lookup("someday"), None);
    }

    #[test]
    fn canonical_words_use_spaces() {
        assert!(Keywords::is_canonical("this month"));
        assert!(Keywords::is_canonical("Today"));
        assert!(!Keywords::is_canonical("this-month"));
        assert!(!Keywords::is_canonical("ytd"));
    }
}
