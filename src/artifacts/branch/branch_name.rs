use crate::artifacts::branch::INVALID_BRANCH_NAME_REGEX;
use crate::errors::{Error, Result};

/// Validated branch name
///
/// Names may be `/`-nested (`feature/parser`) but must satisfy git's ref
/// naming rules: no leading dots or slashes, no `..`, no control characters,
/// no `.lock` suffix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct BranchName(String);

impl BranchName {
    pub fn try_parse(name: String) -> Result<Self> {
        if name.is_empty() {
            return Err(Error::InvalidBranchName(name));
        }

        let re = regex::Regex::new(INVALID_BRANCH_NAME_REGEX)?;
        if re.is_match(&name) {
            return Err(Error::InvalidBranchName(name));
        }

        Ok(Self(name))
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::proptest;

    proptest! {
        #[test]
        fn accepts_alphanumeric_names(name in "[a-zA-Z0-9_-]+") {
            assert!(BranchName::try_parse(name).is_ok());
        }

        #[test]
        fn accepts_nested_names(
            prefix in "[a-zA-Z0-9_-]+",
            suffix in "[a-zA-Z0-9_-]+"
        ) {
            let name = format!("{}/{}", prefix, suffix);
            assert!(BranchName::try_parse(name).is_ok());
        }

        #[test]
        fn rejects_leading_dot(suffix in "[a-zA-Z0-9_-]+") {
            let name = format!(".{}", suffix);
            assert!(BranchName::try_parse(name).is_err());
        }

        #[test]
        fn rejects_lock_suffix(prefix in "[a-zA-Z0-9_-]+") {
            let name = format!("{}.lock", prefix);
            assert!(BranchName::try_parse(name).is_err());
        }

        #[test]
        fn rejects_consecutive_dots(
            prefix in "[a-zA-Z0-9_-]+",
            suffix in "[a-zA-Z0-9_-]+"
        ) {
            let name = format!("{}..{}", prefix, suffix);
            assert!(BranchName::try_parse(name).is_err());
        }

        #[test]
        fn rejects_leading_slash(suffix in "[a-zA-Z0-9_-]+") {
            let name = format!("/{}", suffix);
            assert!(BranchName::try_parse(name).is_err());
        }

        #[test]
        fn rejects_trailing_slash(prefix in "[a-zA-Z0-9_-]+") {
            let name = format!("{}/", prefix);
            assert!(BranchName::try_parse(name).is_err());
        }

        #[test]
        fn rejects_special_characters(
            prefix in "[a-zA-Z0-9_-]+",
            suffix in "[a-zA-Z0-9_-]+",
            special in r"[\*:\?\[\\^~]"
        ) {
            let name = format!("{}{}{}", prefix, special, suffix);
            assert!(BranchName::try_parse(name).is_err());
        }
    }

    #[test]
    fn rejects_empty_name() {
        assert!(BranchName::try_parse("".to_string()).is_err());
    }

    #[test]
    fn accepts_common_names() {
        assert!(BranchName::try_parse("main".to_string()).is_ok());
        assert!(BranchName::try_parse("feature-123".to_string()).is_ok());
        assert!(BranchName::try_parse("bugfix/issue-123".to_string()).is_ok());
    }
}
