// src/resolve/path.rs
// =============================================================================
// Splits a reference like "./img/logo.png" or "/assets/app.js" into segments.
//
// Rules:
//   - a single leading "./" is stripped
//   - a leading "/" marks the path as repository-root-relative
//   - empty segments ("a//b") and "." segments are dropped
//   - ".." is kept; the resolver decides what it means
// =============================================================================

/// A parsed location reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationRef {
    pub absolute: bool,
    pub segments: Vec<String>,
}

impl LocationRef {
    pub fn parse(reference: &str) -> Self {
        let trimmed = reference.trim();
        let trimmed = trimmed.strip_prefix("./").unwrap_or(trimmed);

        let segments = trimmed
            .split('/')
            .filter(|s| !s.is_empty() && *s != ".")
            .map(str::to_string)
            .collect();

        Self {
            absolute: trimmed.starts_with('/'),
            segments,
        }
    }

    pub fn climbs(&self) -> bool {
        self.segments.iter().any(|s| s == "..")
    }
}

/// Applies ".." segments to a base folder path
///
/// Returns None when the path climbs above the repository root.
pub fn normalize(base: &[String], segments: &[String]) -> Option<Vec<String>> {
    let mut path = base.to_vec();
    for segment in segments {
        if segment == ".." {
            path.pop()?;
        } else {
            path.push(segment.clone());
        }
    }
    Some(path)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does `path.pop()?` do inside normalize()?
//    - Vec::pop returns Option<T>: None when the vec is empty
//    - In a function returning Option, `?` returns None early on None
//    - So ".." past the root makes the whole normalize() return None
// -----------------------------------------------------------------------------
