pub mod branch_name;

/// Rule set for names a branch may not carry (same rules git enforces)
pub const INVALID_BRANCH_NAME_REGEX: &str =
    r"^\.|\/\.|\.\.|^\/|\/$|\.lock$|@\{|[\x00-\x20\*:\?\[\\~\^\x7f]";

/// Prefix of the symbolic HEAD content: `ref: refs/heads/<branch>`
pub const SYMREF_PREFIX: &str = "ref: ";

/// Directory prefix of branch pointer files
pub const HEADS_PREFIX: &str = "refs/heads/";
