//! Rejecting configs that would filter entries unexpectedly

use super::patterns::PatternMatcher;
use super::types::Config;
use crate::error::Result;

/// Configuration validator
pub struct ConfigValidator;

impl ConfigValidator {
    /// Check every pattern, then compile them together
    ///
    /// # Errors
    ///
    /// Returns an error for a blank pattern, an include pattern that is
    /// already negated, or a pattern that does not compile.
    pub fn validate(config: &Config) -> Result<()> {
        let lists = [("Ignore", &config.ignore), ("Include", &config.include)];

        for (kind, patterns) in lists {
            for (index, pattern) in patterns.iter().enumerate() {
                if pattern.trim().is_empty() {
                    anyhow::bail!("{kind} pattern #{} cannot be empty", index + 1);
                }
            }
        }

        // Include entries are negated when compiled
        if let Some(pattern) = config.include.iter().find(|p| p.starts_with('!')) {
            anyhow::bail!("Include pattern '{pattern}' must not start with '!'");
        }

        PatternMatcher::with_patterns(&config.ignore, &config.include)?;

        Ok(())
    }
}
