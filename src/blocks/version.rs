use crate::error::BlockError;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// A `MAJOR.MINOR[.PATCH]` release number.
///
/// The numeric parts are available for comparison, but the text used in
/// file names and URLs is always the string as written, so `3.01.0` stays
/// `3.01.0` and its series is `3.01`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: Option<u32>,
    text: String,
    series: String,
}

impl Version {
    /// Parses `version` exactly; surrounding whitespace is not accepted.
    pub fn parse(version: &str) -> Result<Self, BlockError> {
        static VERSION_REGEX: OnceLock<Regex> = OnceLock::new();
        let re = VERSION_REGEX.get_or_init(|| {
            Regex::new(r"^(\d+)\.(\d+)(?:\.(\d+))?$").expect("Invalid version regex")
        });

        let invalid = || BlockError::InvalidVersion {
            version: version.to_string(),
        };

        let caps = re.captures(version).ok_or_else(invalid)?;
        let number = |i: usize| -> Result<Option<u32>, BlockError> {
            caps.get(i)
                .map(|m| m.as_str().parse::<u32>().map_err(|_| invalid()))
                .transpose()
        };
        let major = number(1)?.ok_or_else(invalid)?;
        let minor = number(2)?.ok_or_else(invalid)?;
        let patch = number(3)?;

        Ok(Version {
            major,
            minor,
            patch,
            text: version.to_string(),
            series: format!("{}.{}", &caps[1], &caps[2]),
        })
    }

    /// `MAJOR.MINOR` as written, the release series a version belongs to.
    pub fn series(&self) -> &str {
        &self.series
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yare::parameterized;

    #[test]
    fn test_parse_full_version() {
        let v = Version::parse("3.0.0").unwrap();
        assert_eq!((v.major, v.minor, v.patch), (3, 0, Some(0)));
        assert_eq!(v.series(), "3.0");
        assert_eq!(v.to_string(), "3.0.0");
    }

    #[test]
    fn test_parse_without_patch() {
        let v = Version::parse("4.1").unwrap();
        assert_eq!(v.patch, None);
        assert_eq!(v.series(), "4.1");
        assert_eq!(v.to_string(), "4.1");
    }

    #[test]
    fn test_leading_zeros_are_kept_as_written() {
        let v = Version::parse("3.01.0").unwrap();
        assert_eq!(v.minor, 1);
        assert_eq!(v.series(), "3.01");
        assert_eq!(v.as_str(), "3.01.0");
    }

    #[parameterized(
        empty = { "" },
        word = { "latest" },
        major_only = { "3" },
        trailing_dot = { "3.0." },
        release_candidate = { "3.0.0rc1" },
        four_parts = { "1.2.3.4" },
        leading_v = { "v3.0.0" },
        overflow = { "99999999999.0" },
        leading_space = { " 3.0.0" },
        trailing_newline = { "3.0.0\n" },
    )]
    fn test_rejects_malformed(input: &str) {
        assert_eq!(
            Version::parse(input),
            Err(BlockError::InvalidVersion {
                version: input.to_string()
            })
        );
    }
}
