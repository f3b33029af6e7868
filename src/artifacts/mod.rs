//! Value types and algorithms of the storage engine
//!
//! - `branch`: branch name validation and HEAD symref handling
//! - `index`: staging entry records and file modes
//! - `log`: commit history traversal
//! - `objects`: object types (blob, tree, commit) and content addressing

pub mod branch;
pub mod index;
pub mod log;
pub mod objects;
