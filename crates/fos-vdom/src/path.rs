//! Simple property paths
//!
//! Dotted paths such as `user.profile.name` used by the reactivity layer
//! to read a watched value off a component.

use std::str::FromStr;

/// Path parse error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    #[error("Invalid character {ch:?} at position {position} in path")]
    InvalidCharacter { ch: char, position: usize },
}

/// Check if a name starts with `$` or `_` (reserved for runtime internals)
pub fn is_reserved(name: &str) -> bool {
    matches!(name.as_bytes().first(), Some(b'$' | b'_'))
}

/// A value whose fields can be looked up by name
pub trait PathTarget {
    fn field(&self, name: &str) -> Option<&Self>;

    /// Falsy values stop resolution before their fields are read
    fn is_truthy(&self) -> bool {
        true
    }
}

/// Parsed dotted path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimplePath {
    segments: Vec<Box<str>>,
}

impl SimplePath {
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(|s| &**s)
    }

    /// Walk the path from `root`
    pub fn resolve<'a, T: PathTarget + ?Sized>(&self, root: &'a T) -> Option<&'a T> {
        let mut current = root;
        for segment in &self.segments {
            if !current.is_truthy() {
                return None;
            }
            current = current.field(segment)?;
        }
        Some(current)
    }
}

impl FromStr for SimplePath {
    type Err = PathError;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        if let Some((position, ch)) = path
            .char_indices()
            .find(|&(_, c)| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '$')))
        {
            return Err(PathError::InvalidCharacter { ch, position });
        }

        Ok(Self {
            segments: path.split('.').map(Into::into).collect(),
        })
    }
}

/// Parse a dotted path, or `None` if it contains anything but word
/// characters, `.` and `$`
pub fn parse_path(path: &str) -> Option<SimplePath> {
    path.parse().ok()
}
