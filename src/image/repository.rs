use crate::errors::{ImageError, ReferenceError};
use regex::Regex;

/// Path of a Docker-style image repository under its registry
///
/// Repository paths are groupings of lowercase alphanumeric segments
/// separated by slashes. Each grouping may also contain internal separator
/// characters: single periods, single underscores, double underscores, or any
/// number of dashes.
#[derive(Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Repository {
    serialized: String,
}

/// Borrowing iterator over the slash-separated components of a [Repository]
pub struct RepositoryIter<'a> {
    remaining: Option<&'a str>,
}

impl<'a> Iterator for RepositoryIter<'a> {
    type Item = &'a str;
    fn next(&mut self) -> Option<Self::Item> {
        self.remaining.map(|remaining| match remaining.find('/') {
            Some(pos) => {
                self.remaining = Some(&remaining[pos + 1..]);
                &remaining[..pos]
            }
            None => {
                self.remaining = None;
                remaining
            }
        })
    }
}

impl Repository {
    pub fn as_str(&self) -> &str {
        &self.serialized
    }

    /// Parse a [prim@str] as a [Repository]
    ///
    /// ```
    /// # use imageref::Repository;
    /// let repo = Repository::parse("library/nginx").unwrap();
    /// let parts: Vec<&str> = repo.iter().collect();
    /// assert_eq!(parts, vec!["library", "nginx"])
    /// ```
    pub fn parse(s: &str) -> Result<Self, ImageError> {
        lazy_static! {
            static ref REPOSITORY: Regex =
                Regex::new(&format!("^{}$", Repository::regex_str())).unwrap();
        }
        if REPOSITORY.is_match(s) {
            Ok(Repository {
                serialized: s.to_owned(),
            })
        } else if s.is_empty() {
            Err(ImageError::invalid(s, ReferenceError::NameEmpty))
        } else if s.chars().any(|c| c.is_ascii_uppercase()) {
            Err(ImageError::invalid(s, ReferenceError::NameContainsUppercase))
        } else {
            Err(ImageError::invalid(s, ReferenceError::InvalidFormat))
        }
    }

    /// Iterate over path components, outermost first
    pub fn iter(&self) -> RepositoryIter<'_> {
        RepositoryIter {
            remaining: Some(&self.serialized),
        }
    }

    /// Does this path have more than one component?
    pub fn has_namespace(&self) -> bool {
        self.serialized.contains('/')
    }

    /// Nest `other` under this path, as when adding the `library` prefix
    pub fn join(&self, other: &Self) -> Self {
        Repository {
            serialized: format!("{}/{}", self.serialized, other.serialized),
        }
    }

    pub(crate) fn regex_str() -> &'static str {
        concat!(
            "(?P<repo>",
            "[a-z0-9]+(?:(?:[._]|__|-+)[a-z0-9]+)*", // first component
            "(?:/[a-z0-9]+(?:(?:[._]|__|-+)[a-z0-9]+)*)*", // further components
            ")",
        )
    }
}

impl_string_traits!(Repository);
