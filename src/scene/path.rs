use std::fmt;

use inlinable_string::InlinableString;

/// A parsed node path.
///
/// Segments are separated by `/`. A leading `/` makes the path absolute,
/// starting from the tree root. `.` stays on the current node and `..` moves
/// to its parent; every other segment names a child. Empty segments are
/// ignored, so `a//b/` equals `a/b`.
#[derive(Debug, Clone, PartialEq)]
pub struct NodePath {
    absolute: bool,
    segments: Vec<InlinableString>,
}

impl NodePath {
    pub fn parse(path: &str) -> Self {
        NodePath {
            absolute: path.starts_with('/'),
            segments: path
                .split('/')
                .filter(|s| !s.is_empty() && *s != ".")
                .map(InlinableString::from)
                .collect(),
        }
    }

    #[inline]
    pub fn is_absolute(&self) -> bool {
        self.absolute
    }

    /// Returns true if the path names its starting node.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(|s| &**s)
    }
}

impl<'a> From<&'a str> for NodePath {
    fn from(path: &'a str) -> Self {
        NodePath::parse(path)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.absolute {
            write!(f, "/")?;
        } else if self.segments.is_empty() {
            return write!(f, ".");
        }

        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, "/")?;
            }

            write!(f, "{}", segment)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse() {
        let path = NodePath::parse("/level//player/./sprite/");
        assert!(path.is_absolute());
        assert_eq!(
            path.segments().collect::<Vec<_>>(),
            vec!["level", "player", "sprite"]
        );
        assert_eq!(path.to_string(), "/level/player/sprite");

        let path = NodePath::parse("../hud");
        assert!(!path.is_absolute());
        assert_eq!(path.segments().collect::<Vec<_>>(), vec!["..", "hud"]);

        assert_eq!(NodePath::parse(".").to_string(), ".");
        assert_eq!(NodePath::parse("/").to_string(), "/");
    }
}
