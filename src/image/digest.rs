use crate::errors::{ImageError, ReferenceError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256, Sha384, Sha512};
use std::{convert::TryFrom, fmt, ops::Range};

/// Hash algorithms recognized in a [ContentDigest]
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Algorithm {
    Sha256,
    Sha384,
    Sha512,
}

impl Algorithm {
    /// The algorithm used when none is requested explicitly
    pub const CANONICAL: Algorithm = Algorithm::Sha256;

    /// Look up an algorithm by the name used in digest strings
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "sha256" => Some(Algorithm::Sha256),
            "sha384" => Some(Algorithm::Sha384),
            "sha512" => Some(Algorithm::Sha512),
            _ => None,
        }
    }

    /// The name of this algorithm as it appears before the colon
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Sha256 => "sha256",
            Algorithm::Sha384 => "sha384",
            Algorithm::Sha512 => "sha512",
        }
    }

    /// Number of hex digits in an encoded hash of this type
    pub fn hex_len(&self) -> usize {
        match self {
            Algorithm::Sha256 => 64,
            Algorithm::Sha384 => 96,
            Algorithm::Sha512 => 128,
        }
    }

    /// Hash some content, producing a digest with this algorithm
    ///
    /// ```
    /// # use imageref::{Algorithm, ContentDigest};
    /// let digest = Algorithm::Sha512.digest(b"cat");
    /// assert_eq!(digest.algorithm(), Algorithm::Sha512);
    /// assert_eq!(digest.hex_str().len(), 128);
    /// ```
    pub fn digest(&self, content: &[u8]) -> ContentDigest {
        let hex = match self {
            Algorithm::Sha256 => format!("{:x}", Sha256::digest(content)),
            Algorithm::Sha384 => format!("{:x}", Sha384::digest(content)),
            Algorithm::Sha512 => format!("{:x}", Sha512::digest(content)),
        };
        let name = self.as_str();
        ContentDigest {
            serialized: format!("{}:{}", name, hex),
            algorithm: *self,
            hex_pos: name.len() + 1..name.len() + 1 + hex.len(),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Content-addressed image version, as `algorithm:hex`
///
/// Parsing checks the general digest grammar first, then requires a known [Algorithm] and a lowercase hex
/// string of exactly the length that algorithm produces.
#[derive(Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContentDigest {
    serialized: String,
    algorithm: Algorithm,
    hex_pos: Range<usize>,
}

impl ContentDigest {
    pub fn as_str(&self) -> &str {
        &self.serialized
    }

    /// Build a digest from an algorithm name and any hash value that formats
    /// as lowercase hex, such as the output of a [sha2::Digest]
    pub fn from_parts<T: fmt::LowerHex>(
        format_part: &str,
        hex_part: &T,
    ) -> Result<Self, ImageError> {
        ContentDigest::parse(&format!("{}:{:x}", format_part, hex_part))
    }

    /// Hash content with [Algorithm::CANONICAL]
    ///
    /// ```
    /// # use imageref::ContentDigest;
    /// let digest = ContentDigest::from_content(b"cat");
    /// assert_eq!(digest.as_str(), "sha256:77af778b51abd4a3c51c5ddd97204a9c3ae614ebccb75a606c3b6865aed6744e");
    /// ```
    pub fn from_content(content_bytes: &[u8]) -> Self {
        Algorithm::CANONICAL.digest(content_bytes)
    }

    /// Parse a [prim@str] as a [ContentDigest]
    ///
    /// ```
    /// # use imageref::{Algorithm, ContentDigest};
    /// let hex = "77af778b51abd4a3c51c5ddd97204a9c3ae614ebccb75a606c3b6865aed6744e";
    /// let digest = ContentDigest::parse(&format!("sha256:{}", hex)).unwrap();
    /// assert_eq!(digest.algorithm(), Algorithm::Sha256);
    /// assert_eq!(digest.hex_str(), hex);
    /// assert!(ContentDigest::parse("sha256:xyz").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, ImageError> {
        ContentDigest::validate(s).map_err(|reason| ImageError::invalid(s, reason))
    }

    pub(crate) fn validate(s: &str) -> Result<Self, ReferenceError> {
        lazy_static! {
            static ref DIGEST: Regex =
                Regex::new(&format!("^{}$", ContentDigest::regex_str())).unwrap();
        }
        let separator = match s.find(':') {
            Some(pos) if pos > 0 && pos + 1 < s.len() => pos,
            _ => return Err(ReferenceError::DigestInvalidFormat),
        };
        let format = &s[..separator];
        let algorithm = match Algorithm::from_name(format) {
            Some(algorithm) => algorithm,
            None if DIGEST.is_match(s) => {
                return Err(ReferenceError::DigestUnsupported(format.to_owned()))
            }
            None => return Err(ReferenceError::DigestInvalidFormat),
        };
        let hex = &s[separator + 1..];
        if hex.len() != algorithm.hex_len() {
            return Err(ReferenceError::DigestInvalidLength);
        }
        if !hex.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
            return Err(ReferenceError::DigestInvalidFormat);
        }
        Ok(ContentDigest {
            serialized: s.to_owned(),
            algorithm,
            hex_pos: separator + 1..s.len(),
        })
    }

    /// The hash algorithm named by this digest
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Algorithm name, the part before the colon
    pub fn format_str(&self) -> &str {
        self.algorithm.as_str()
    }

    /// Encoded hash, the part after the colon
    pub fn hex_str(&self) -> &str {
        &self.serialized[self.hex_pos.clone()]
    }

    /// Does this content hash to the same digest?
    pub fn verify(&self, content_bytes: &[u8]) -> bool {
        self.algorithm.digest(content_bytes) == *self
    }

    pub(crate) fn regex_str() -> &'static str {
        concat!(
            "(?P<dig>",
            "(?P<dig_f>[a-zA-Z][a-zA-Z0-9]*(?:[-_+.][a-zA-Z][a-zA-Z0-9]*)*)", // algorithm
            ":",
            "(?P<dig_h>[a-fA-F0-9]{32,})", // encoded hash
            ")",
        )
    }
}

impl TryFrom<String> for ContentDigest {
    type Error = ImageError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        ContentDigest::parse(&s)
    }
}

impl From<ContentDigest> for String {
    fn from(digest: ContentDigest) -> Self {
        digest.serialized
    }
}

impl_string_traits!(ContentDigest);
impl_string_ord!(ContentDigest);
