//! Commit object
//!
//! Commits are snapshot metadata: the tree fingerprint, an optional parent
//! fingerprint (absent for the root commit), author/committer lines with a
//! UTC timestamp, and the commit message.
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0
//! tree <tree-fingerprint>
//! parent <parent-fingerprint>
//! author <name> <email> <timestamp> +0000
//! committer <name> <email> <timestamp> +0000
//!
//! <commit message>
//! ```

use crate::artifacts::objects::object::{Decodable, Encodable, Object};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_kind::ObjectKind;
use crate::errors::{Error, Result};
use bytes::Bytes;
use std::io::{BufRead, Write};

const DEFAULT_AUTHOR_NAME: &str = "keg";
const DEFAULT_AUTHOR_EMAIL: &str = "keg@localhost";

/// Author or committer identity with a UTC timestamp
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Author {
    name: String,
    email: String,
    timestamp: chrono::DateTime<chrono::Utc>,
}

impl Author {
    pub fn new(name: String, email: String) -> Self {
        Author {
            name,
            email,
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn new_with_timestamp(
        name: String,
        email: String,
        timestamp: chrono::DateTime<chrono::Utc>,
    ) -> Self {
        Author {
            name,
            email,
            timestamp,
        }
    }

    /// Load the author identity from the environment.
    ///
    /// Reads `KEG_AUTHOR_NAME` and `KEG_AUTHOR_EMAIL`, falling back to
    /// built-in defaults when unset, and `KEG_AUTHOR_DATE` (RFC 3339) for
    /// reproducible timestamps.
    pub fn load_from_env() -> Self {
        let name =
            std::env::var("KEG_AUTHOR_NAME").unwrap_or_else(|_| DEFAULT_AUTHOR_NAME.to_string());
        let email =
            std::env::var("KEG_AUTHOR_EMAIL").unwrap_or_else(|_| DEFAULT_AUTHOR_EMAIL.to_string());
        let timestamp = std::env::var("KEG_AUTHOR_DATE")
            .ok()
            .and_then(|date| chrono::DateTime::parse_from_rfc3339(&date).ok())
            .map(|date| date.to_utc());

        match timestamp {
            Some(ts) => Author::new_with_timestamp(name, email, ts),
            None => Author::new(name, email),
        }
    }

    /// Format as the canonical commit line: `name <email> <unix-ts> +0000`
    pub fn display(&self) -> String {
        format!(
            "{} <{}> {} +0000",
            self.name,
            self.email,
            self.timestamp.timestamp()
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn timestamp(&self) -> chrono::DateTime<chrono::Utc> {
        self.timestamp
    }
}

impl TryFrom<&str> for Author {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        // Format: "name <email> timestamp timezone"; split from the right so
        // names may contain spaces.
        let parts: Vec<&str> = value.rsplitn(3, ' ').collect();
        if parts.len() < 3 {
            return Err(Error::corrupt(format!("invalid author line: {value}")));
        }

        let timestamp = parts[1]
            .parse::<i64>()
            .map_err(|_| Error::corrupt(format!("invalid author timestamp: {}", parts[1])))?;
        let name_email = parts[2];

        let email_start = name_email
            .find('<')
            .ok_or_else(|| Error::corrupt("author line missing '<'"))?;
        let email_end = name_email
            .find('>')
            .ok_or_else(|| Error::corrupt("author line missing '>'"))?;

        let name = name_email[..email_start].trim().to_string();
        let email = name_email[email_start + 1..email_end].to_string();

        let timestamp = chrono::DateTime::from_timestamp(timestamp, 0)
            .ok_or_else(|| Error::corrupt("author timestamp out of range"))?;

        Ok(Author {
            name,
            email,
            timestamp,
        })
    }
}

/// Commit snapshot metadata
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    /// Parent commit fingerprint (None for the root commit)
    parent: Option<ObjectId>,
    /// Tree fingerprint capturing the committed paths
    tree_fingerprint: ObjectId,
    author: Author,
    committer: Author,
    message: String,
}

impl Commit {
    pub fn new(
        parent: Option<ObjectId>,
        tree_fingerprint: ObjectId,
        author: Author,
        message: String,
    ) -> Self {
        Commit {
            parent,
            tree_fingerprint,
            author: author.clone(),
            committer: author,
            message,
        }
    }

    /// First line of the message, for short-form display
    pub fn short_message(&self) -> String {
        self.message.lines().next().unwrap_or("").to_string()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn tree_fingerprint(&self) -> &ObjectId {
        &self.tree_fingerprint
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn author(&self) -> &Author {
        &self.author
    }

    pub fn timestamp(&self) -> chrono::DateTime<chrono::Utc> {
        self.author.timestamp()
    }

    fn canonical_text(&self) -> String {
        let mut lines = vec![format!("tree {}", self.tree_fingerprint.as_ref())];
        if let Some(parent) = &self.parent {
            lines.push(format!("parent {}", parent.as_ref()));
        }
        lines.push(format!("author {}", self.author.display()));
        lines.push(format!("committer {}", self.committer.display()));
        lines.push(String::new());
        lines.push(self.message.to_string());

        lines.join("\n")
    }
}

impl Encodable for Commit {
    fn encode(&self) -> Result<Bytes> {
        let content_bytes = self.canonical_text().into_bytes();

        let mut commit_bytes = Vec::new();
        let header = format!("{} {}\0", self.kind().as_str(), content_bytes.len());
        commit_bytes.write_all(header.as_bytes())?;
        commit_bytes.write_all(&content_bytes)?;

        Ok(Bytes::from(commit_bytes))
    }
}

impl Decodable for Commit {
    fn decode(reader: impl BufRead) -> Result<Self> {
        let content = reader
            .bytes()
            .collect::<std::result::Result<Vec<u8>, std::io::Error>>()?;
        let content = String::from_utf8(content)
            .map_err(|_| Error::corrupt("commit text is not valid utf-8"))?;

        // the first blank line separates the headers from the message, which
        // is carried verbatim (trailing newlines included)
        let (headers, message) = content
            .split_once("\n\n")
            .ok_or_else(|| Error::corrupt("commit is missing its message separator"))?;
        let mut lines = headers.lines();

        let tree_line = lines
            .next()
            .ok_or_else(|| Error::corrupt("commit is missing its tree line"))?;
        let tree_fingerprint = tree_line
            .strip_prefix("tree ")
            .ok_or_else(|| Error::corrupt("commit has an invalid tree line"))?;
        let tree_fingerprint = ObjectId::try_parse(tree_fingerprint.to_string())?;

        let mut next_line = lines
            .next()
            .ok_or_else(|| Error::corrupt("commit is missing its author line"))?;

        let mut parent = None;
        if let Some(parent_fingerprint) = next_line.strip_prefix("parent ") {
            parent = Some(ObjectId::try_parse(parent_fingerprint.to_string())?);
            next_line = lines
                .next()
                .ok_or_else(|| Error::corrupt("commit is missing its author line"))?;
        }

        let author = next_line
            .strip_prefix("author ")
            .ok_or_else(|| Error::corrupt("commit has an invalid author line"))?;
        let author = Author::try_from(author)?;

        let committer_line = lines
            .next()
            .ok_or_else(|| Error::corrupt("commit is missing its committer line"))?;
        committer_line
            .strip_prefix("committer ")
            .ok_or_else(|| Error::corrupt("commit has an invalid committer line"))?;

        Ok(Self::new(
            parent,
            tree_fingerprint,
            author,
            message.to_string(),
        ))
    }
}

impl Object for Commit {
    fn kind(&self) -> ObjectKind {
        ObjectKind::Commit
    }

    fn display(&self) -> String {
        self.canonical_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn oid(seed: u8) -> ObjectId {
        ObjectId::try_parse(format!("{:040x}", seed as u128)).unwrap()
    }

    fn author() -> Author {
        Author::new_with_timestamp(
            "Ada".to_string(),
            "ada@example.com".to_string(),
            chrono::DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        )
    }

    #[test]
    fn root_commit_has_no_parent_line() {
        let commit = Commit::new(None, oid(1), author(), "initial".to_string());
        let text = commit.display();
        assert!(!text.contains("parent "));
        assert!(text.starts_with(&format!("tree {}", oid(1))));
    }

    #[test]
    fn encode_decode_round_trip_with_parent() {
        let commit = Commit::new(
            Some(oid(2)),
            oid(1),
            author(),
            "subject\n\nbody line".to_string(),
        );

        let encoded = commit.encode().unwrap();
        let nul = encoded.iter().position(|&b| b == 0).unwrap();
        let decoded = Commit::decode(Cursor::new(encoded.slice(nul + 1..))).unwrap();

        assert_eq!(decoded, commit);
    }

    #[test]
    fn message_trailing_newline_survives_decode() {
        let commit = Commit::new(None, oid(1), author(), "subject line\n".to_string());

        let encoded = commit.encode().unwrap();
        let nul = encoded.iter().position(|&b| b == 0).unwrap();
        let decoded = Commit::decode(Cursor::new(encoded.slice(nul + 1..))).unwrap();

        assert_eq!(decoded.message(), "subject line\n");
        assert_eq!(decoded, commit);
    }

    #[test]
    fn author_line_round_trip() {
        let line = author().display();
        let parsed = Author::try_from(line.as_str()).unwrap();
        assert_eq!(parsed, author());
    }

    #[test]
    fn author_names_may_contain_spaces() {
        let parsed = Author::try_from("Ada Lovelace <ada@example.com> 1700000000 +0000").unwrap();
        assert_eq!(parsed.name(), "Ada Lovelace");
        assert_eq!(parsed.email(), "ada@example.com");
    }
}
