use crate::error::{ReleaseError, Result};
use std::fmt;

/// A resolved release version in both of its spellings.
///
/// The changelog tool reports the *tagged* form (e.g. "v1.2.3"), which names
/// the git tag. Files inside the project carry the *plain* form ("1.2.3").
/// The two differ by exactly one leading marker character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseVersion {
    tagged: String,
    plain: String,
}

impl ReleaseVersion {
    /// Parses a tagged version string as reported by the changelog tool.
    ///
    /// Strips exactly one leading `marker` character and validates that the
    /// remainder is a well-formed semantic version.
    ///
    /// # Arguments
    /// * `tagged` - Tagged version string (e.g. "v1.2.3")
    /// * `marker` - The expected leading marker character (e.g. 'v')
    ///
    /// # Returns
    /// * `Ok(ReleaseVersion)` - Successfully parsed version pair
    /// * `Err` - If the marker is absent or the remainder is not semver
    ///
    /// # Example
    /// ```ignore
    /// let v = ReleaseVersion::from_tagged("v1.2.3", 'v').unwrap();
    /// assert_eq!(v.plain(), "1.2.3");
    /// assert_eq!(v.tagged(), "v1.2.3");
    /// ```
    pub fn from_tagged(tagged: &str, marker: char) -> Result<Self> {
        let tagged = tagged.trim();

        let plain = match tagged.strip_prefix(marker) {
            Some(rest) => rest,
            None => {
                return Err(ReleaseError::version(format!(
                    "Tagged version '{}' does not start with marker '{}'",
                    tagged, marker
                )));
            }
        };

        semver::Version::parse(plain).map_err(|e| {
            ReleaseError::version(format!("Invalid version '{}' in tag '{}': {}", plain, tagged, e))
        })?;

        Ok(ReleaseVersion {
            tagged: tagged.to_string(),
            plain: plain.to_string(),
        })
    }

    /// The tagged form, used for the git tag name (e.g. "v1.2.3").
    pub fn tagged(&self) -> &str {
        &self.tagged
    }

    /// The plain form, used inside manifest/module/test files (e.g. "1.2.3").
    pub fn plain(&self) -> &str {
        &self.plain
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tagged)
    }
}
