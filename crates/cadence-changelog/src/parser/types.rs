//! Parser configuration types

use cadence_core::config::ChangelogConfig;

/// Configuration for the commit parser
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Scopes that mark a commit as a dependency update
    pub dependency_scopes: Vec<String>,
    /// Words that turn a `chore` into a dependency update
    pub dependency_verbs: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self::from_changelog(&ChangelogConfig::default())
    }
}

impl ParserConfig {
    /// Take the dependency vocabulary from the changelog configuration
    pub fn from_changelog(config: &ChangelogConfig) -> Self {
        Self {
            dependency_scopes: lowercase_all(&config.dependency_scopes),
            dependency_verbs: lowercase_all(&config.dependency_verbs),
        }
    }
}

fn lowercase_all(words: &[String]) -> Vec<String> {
    words.iter().map(|w| w.to_lowercase()).collect()
}

/// Lowercased alphanumeric words of a text
pub(crate) fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
}

/// Whether any word of `text` starts with one of `keywords`
pub(crate) fn mentions_any(text: &str, keywords: &[String]) -> bool {
    words(text).any(|w| keywords.iter().any(|k| w.starts_with(k.as_str())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_follow_changelog_config() {
        let config = ParserConfig::default();
        assert!(config.dependency_scopes.contains(&"dependabot".to_string()));
        assert!(config.dependency_verbs.contains(&"upgrade".to_string()));
    }

    #[test]
    fn test_mentions_any_matches_word_prefixes() {
        let keywords = vec!["update".to_string(), "ci".to_string()];
        assert!(mentions_any("Updated lockfile", &keywords));
        assert!(mentions_any("fix the CI pipeline", &keywords));
        assert!(!mentions_any("decide later", &keywords));
    }
}
