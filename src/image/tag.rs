use crate::errors::{ImageError, ReferenceError};
use regex::Regex;

/// Named version of an image, such as `latest` or `3.19-alpine`
///
/// The first character is a letter, digit, or underscore. Any further
/// characters may also be dots or dashes, for at most [Tag::MAX_LEN] in all.
#[derive(Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Tag {
    serialized: String,
}

impl Tag {
    /// Tag assumed when a reference names neither a tag nor a digest
    pub const LATEST: &'static str = "latest";

    /// Longest tag accepted by the reference grammar
    pub const MAX_LEN: usize = 128;

    pub fn as_str(&self) -> &str {
        &self.serialized
    }

    /// Parse a [prim@str] as a [Tag]
    ///
    /// ```
    /// # use imageref::Tag;
    /// assert!(Tag::parse("3.19-alpine").is_ok());
    /// assert!(Tag::parse(".hidden").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, ImageError> {
        lazy_static! {
            static ref TAG: Regex = Regex::new(&format!("^{}$", Tag::regex_str())).unwrap();
        }
        if TAG.is_match(s) {
            Ok(Tag {
                serialized: s.to_owned(),
            })
        } else {
            Err(ImageError::invalid(s, ReferenceError::TagInvalidFormat))
        }
    }

    pub fn latest() -> Self {
        Tag {
            serialized: Tag::LATEST.to_owned(),
        }
    }

    pub fn is_latest(&self) -> bool {
        self.serialized == Tag::LATEST
    }

    pub(crate) fn regex_str() -> &'static str {
        // one leading character plus up to MAX_LEN - 1 more
        "(?P<tag>[a-zA-Z0-9_][a-zA-Z0-9_.-]{0,127})"
    }
}

impl_string_traits!(Tag);
