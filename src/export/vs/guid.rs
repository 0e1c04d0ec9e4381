//! Project identifiers in the `{XXXXXXXX-XXXX-XXXX-XXXX-XXXXXXXXXXXX}` form
//! Visual Studio uses to cross-reference projects between files.

use std::collections::HashMap;
use std::fmt;

use uuid::Uuid;

use crate::util::hash::Fingerprint;

/// A 128-bit identifier, displayed uppercase and wrapped in braces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Guid([u8; 16]);

impl Guid {
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Guid(bytes)
    }

    /// A fresh random identifier.
    pub fn random() -> Self {
        Guid(*Uuid::new_v4().as_bytes())
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = &self.0;
        write!(
            f,
            "{{{}-{}-{}-{}-{}}}",
            hex::encode_upper(&b[0..4]),
            hex::encode_upper(&b[4..6]),
            hex::encode_upper(&b[6..8]),
            hex::encode_upper(&b[8..10]),
            hex::encode_upper(&b[10..16]),
        )
    }
}

/// How identifiers are produced for one export run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GuidStrategy {
    /// New random identifiers on every export. Re-exporting the same
    /// workspace changes every identifier in every file.
    #[default]
    Random,
    /// Identifiers hashed from the workspace and project names, identical
    /// across runs.
    Stable,
}

/// Hands out identifiers for one export run.
///
/// In stable mode, projects sharing a name are told apart by how many times
/// the name has been seen so far, so every project still gets its own id.
#[derive(Debug)]
pub struct GuidAllocator {
    strategy: GuidStrategy,
    workspace: String,
    seen: HashMap<String, usize>,
}

impl GuidAllocator {
    pub fn new(strategy: GuidStrategy, workspace: &str) -> Self {
        GuidAllocator {
            strategy,
            workspace: workspace.to_string(),
            seen: HashMap::new(),
        }
    }

    /// Identifier for the next project named `name`.
    pub fn project(&mut self, name: &str) -> Guid {
        let occurrence = self.next_occurrence(name);
        self.derive(&["project", name, &occurrence.to_string()])
    }

    /// Identifier for a filter (item grouping) inside a project.
    pub fn filter(&mut self, project: &str, filter: &str) -> Guid {
        let key = format!("{}\0{}", project, filter);
        let occurrence = self.next_occurrence(&key);
        self.derive(&["filter", project, filter, &occurrence.to_string()])
    }

    fn next_occurrence(&mut self, key: &str) -> usize {
        let count = self.seen.entry(key.to_string()).or_insert(0);
        let current = *count;
        *count += 1;
        current
    }

    fn derive(&self, parts: &[&str]) -> Guid {
        match self.strategy {
            GuidStrategy::Random => Guid::random(),
            GuidStrategy::Stable => {
                let mut fp = Fingerprint::new();
                fp.update_str(&self.workspace);
                for part in parts {
                    fp.update_str(part);
                }
                Guid::from_bytes(fp.finish_128())
            }
        }
    }
}
