use crate::errors::{ImageError, ReferenceError};
use regex::Regex;
use std::ops::Range;

/// Registry server part of a reference, as `host[:port]`
///
/// The host is made of dot-separated labels of letters, digits and inner
/// dashes. Unlike a [crate::image::Repository], either letter case is
/// accepted.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Registry {
    serialized: String,
    domain_pos: Range<usize>,
    port_pos: Option<Range<usize>>,
}

impl Registry {
    pub fn as_str(&self) -> &str {
        &self.serialized
    }

    /// Parse a [prim@str] as a [Registry]
    ///
    /// ```
    /// # use imageref::Registry;
    /// let registry = Registry::parse("myregistry.io:5000").unwrap();
    /// assert_eq!(registry.domain_str(), "myregistry.io");
    /// assert_eq!(registry.port(), Some(5000));
    /// ```
    pub fn parse(s: &str) -> Result<Self, ImageError> {
        lazy_static! {
            static ref REGISTRY: Regex =
                Regex::new(&format!("^{}$", Registry::regex_str())).unwrap();
        }
        match REGISTRY.captures(s) {
            None => Err(ImageError::invalid(s, ReferenceError::InvalidFormat)),
            Some(captures) => Ok(Registry {
                serialized: s.to_owned(),
                domain_pos: captures.name("reg_d").unwrap().range(),
                port_pos: captures.name("reg_p").map(|m| m.range()),
            }),
        }
    }

    /// Host name without the port
    pub fn domain_str(&self) -> &str {
        &self.serialized[self.domain_pos.clone()]
    }

    /// Returns a reference to the port digits, if present
    pub fn port_str(&self) -> Option<&str> {
        self.port_pos
            .as_ref()
            .map(|pos| &self.serialized[pos.clone()])
    }

    /// Returns the port, if present and representable as a TCP port number
    ///
    /// The reference grammar accepts any run of digits here.
    pub fn port(&self) -> Option<u16> {
        self.port_str().and_then(|p| p.parse().ok())
    }

    pub(crate) fn regex_str() -> &'static str {
        concat!(
            "(?P<reg>",
            "(?P<reg_d>",
            "[a-zA-Z0-9](?:[a-zA-Z0-9-]*[a-zA-Z0-9])?", // first label
            r"(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]*[a-zA-Z0-9])?)*", // dotted labels
            ")",
            "(?::(?P<reg_p>[0-9]+))?", // port
            ")",
        )
    }
}

impl_string_traits!(Registry);
impl_string_ord!(Registry);
