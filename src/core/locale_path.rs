//! Locate an installed compiled catalog for a text domain and locale.
//!
//! Path rules are templates with `%{lang}` and `%{name}` placeholders. The
//! rule list is an ordinary value: callers that want extra locations build
//! their own [`LocaleRules`] and prepend to it.

use std::path::{Path, PathBuf};

const LANG_PLACEHOLDER: &str = "%{lang}";
const NAME_PLACEHOLDER: &str = "%{name}";

/// System-wide search locations, most preferred first.
pub const DEFAULT_RULES: &[&str] = &[
    "/usr/share/locale/%{lang}/LC_MESSAGES/%{name}.mo",
    "/usr/local/share/locale/%{lang}/LC_MESSAGES/%{name}.mo",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleRules {
    rules: Vec<String>,
}

impl Default for LocaleRules {
    fn default() -> Self {
        Self {
            rules: DEFAULT_RULES.iter().map(|r| r.to_string()).collect(),
        }
    }
}

impl LocaleRules {
    /// Put `rule` ahead of every existing rule.
    pub fn prepend(&mut self, rule: impl Into<String>) {
        self.rules.insert(0, rule.into());
    }

    pub fn rules(&self) -> &[String] {
        &self.rules
    }
}

/// A parsed POSIX-ish locale name such as `ja_JP.UTF-8@mod` or BCP 47
/// style `ja-JP`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleTag {
    pub language: String,
    pub region: Option<String>,
    pub charset: Option<String>,
    pub modifier: Option<String>,
}

impl LocaleTag {
    pub fn parse(tag: &str) -> Option<Self> {
        let (rest, modifier) = match tag.split_once('@') {
            Some((rest, modifier)) => (rest, Some(modifier.to_string())),
            None => (tag, None),
        };
        let (rest, charset) = match rest.split_once('.') {
            Some((rest, charset)) => (rest, Some(charset.to_string())),
            None => (rest, None),
        };
        let mut parts = rest.split(['_', '-']);
        let language = parts.next().filter(|l| !l.is_empty())?.to_ascii_lowercase();
        let region = parts.next().map(str::to_ascii_uppercase);
        Some(Self {
            language,
            region,
            charset,
            modifier,
        })
    }

    /// Directory names to try, most specific first.
    pub fn candidates(&self) -> Vec<String> {
        let mut candidates = Vec::new();
        let base = match &self.region {
            Some(region) => format!("{}_{}", self.language, region),
            None => self.language.clone(),
        };
        if let Some(charset) = &self.charset {
            if let Some(modifier) = &self.modifier {
                candidates.push(format!("{}.{}@{}", base, charset, modifier));
            }
            candidates.push(format!("{}.{}", base, charset));
        }
        if let Some(modifier) = &self.modifier {
            candidates.push(format!("{}@{}", base, modifier));
        }
        candidates.push(base);
        if self.region.is_some() {
            candidates.push(self.language.clone());
        }
        candidates.dedup();
        candidates
    }
}

/// Ordered path templates for one text domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalePath {
    name: String,
    locale_paths: Vec<String>,
}

impl LocalePath {
    /// Paths under `topdir` when given, otherwise the default rules.
    pub fn new(name: &str, topdir: Option<&Path>) -> Self {
        Self::with_rules(name, topdir, &LocaleRules::default())
    }

    pub fn with_rules(name: &str, topdir: Option<&Path>, rules: &LocaleRules) -> Self {
        let locale_paths = match topdir {
            Some(topdir) => {
                let topdir = topdir.to_string_lossy();
                let topdir = topdir.trim_end_matches('/');
                vec![
                    format!("{}/{}/LC_MESSAGES/{}.mo", topdir, LANG_PLACEHOLDER, name),
                    format!("{}/{}/{}.mo", topdir, LANG_PLACEHOLDER, name),
                ]
            }
            None => rules
                .rules()
                .iter()
                .map(|rule| rule.replace(NAME_PLACEHOLDER, name))
                .collect(),
        };
        Self {
            name: name.to_string(),
            locale_paths,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn locale_paths(&self) -> &[String] {
        &self.locale_paths
    }

    /// First existing file for `tag`, trying every language candidate
    /// against each template in order.
    pub fn current_path(&self, tag: &LocaleTag) -> Option<PathBuf> {
        tag.candidates().iter().find_map(|lang| {
            self.locale_paths
                .iter()
                .map(|template| PathBuf::from(template.replace(LANG_PLACEHOLDER, lang)))
                .find(|path| path.is_file())
        })
    }
}
