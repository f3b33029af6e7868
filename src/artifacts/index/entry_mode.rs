use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};

/// Permission mode of a staged or committed file
///
/// Serialized everywhere (index records, tree entries) as the octal string
/// git uses: `100644` for regular files, `100755` for executables.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum EntryMode {
    #[default]
    Regular,
    Executable,
}

impl EntryMode {
    pub fn as_str(&self) -> &str {
        match self {
            EntryMode::Regular => "100644",
            EntryMode::Executable => "100755",
        }
    }

    pub fn from_executable(executable: bool) -> Self {
        if executable {
            EntryMode::Executable
        } else {
            EntryMode::Regular
        }
    }
}

impl TryFrom<&str> for EntryMode {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        match value {
            "100644" => Ok(EntryMode::Regular),
            "100755" => Ok(EntryMode::Executable),
            _ => Err(Error::corrupt(format!("invalid entry mode: {value}"))),
        }
    }
}

impl TryFrom<String> for EntryMode {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        EntryMode::try_from(value.as_str())
    }
}

impl From<EntryMode> for String {
    fn from(mode: EntryMode) -> Self {
        mode.as_str().to_string()
    }
}

impl std::fmt::Display for EntryMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
