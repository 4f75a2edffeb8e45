use crate::{
    errors::{ImageError, ReferenceError},
    image::{ContentDigest, ImageName, ImageVersion, Registry, Repository, Tag},
    registry::DefaultRegistry,
};
use serde::{Deserialize, Serialize};
use std::{convert::TryFrom, fmt, str::FromStr};

/// Longest allowed normalized name, counting the domain, slash, and path
pub const NAME_TOTAL_LENGTH_MAX: usize = 255;

/// Fully resolved container image identity
///
/// This is a normalized image reference: the registry domain is always
/// explicit, paths on the default registry always have a namespace, and a
/// reference parsed without any tag or digest gets the tag `latest`.
///
/// The string forms are computed from the four components on demand:
/// [ImageReference::name] has only the domain and path, while the [Display]
/// form adds `:tag` and `@digest` when present. A reference may carry both a
/// tag and a digest. In that case the digest is the version that counts, as
/// reported by [ImageReference::reference].
///
/// [Display]: fmt::Display
#[derive(Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ImageReference {
    domain: Registry,
    path: Repository,
    tag: Option<Tag>,
    digest: Option<ContentDigest>,
}

impl ImageReference {
    /// Parse and normalize a reference using the built-in default registry
    ///
    /// ```
    /// # use imageref::ImageReference;
    /// let image = ImageReference::parse("ubuntu").unwrap();
    /// assert_eq!(image.domain().as_str(), "docker.io");
    /// assert_eq!(image.path().as_str(), "library/ubuntu");
    /// assert_eq!(image.reference(), "latest");
    /// assert_eq!(image.to_string(), "docker.io/library/ubuntu:latest");
    /// ```
    pub fn parse(s: &str) -> Result<Self, ImageError> {
        lazy_static! {
            static ref DEFAULTS: DefaultRegistry = DefaultRegistry::new();
        }
        ImageReference::parse_with(s, &DEFAULTS)
    }

    /// Parse and normalize a reference against custom default registry
    /// settings
    pub fn parse_with(s: &str, defaults: &DefaultRegistry) -> Result<Self, ImageError> {
        let name = ImageName::parse(s)?;
        let (domain, path) = defaults.resolve_image_name(&name);
        check_name_length(&domain, &path).map_err(|reason| ImageError::invalid(s, reason))?;

        let tag = match name.tag() {
            Some(tag) => Some(tag.clone()),
            None if name.is_name_only() => Some(Tag::latest()),
            None => None,
        };
        let reference = ImageReference {
            domain,
            path,
            tag,
            digest: name.content_digest().cloned(),
        };
        log::debug!("parsed image {:?} as {}", s, reference);
        Ok(reference)
    }

    /// Assemble a reference directly from its components
    ///
    /// Unlike parsing, this applies no defaults. A reference with neither tag
    /// nor digest is allowed here, and its [ImageReference::reference] is
    /// empty.
    pub fn from_parts(
        domain: Registry,
        path: Repository,
        tag: Option<Tag>,
        digest: Option<ContentDigest>,
    ) -> Result<Self, ImageError> {
        check_name_length(&domain, &path)
            .map_err(|reason| ImageError::invalid(&format!("{}/{}", domain, path), reason))?;
        Ok(ImageReference {
            domain,
            path,
            tag,
            digest,
        })
    }

    /// The registry server, including any port
    pub fn domain(&self) -> &Registry {
        &self.domain
    }

    /// The repository path on the registry server
    pub fn path(&self) -> &Repository {
        &self.path
    }

    pub fn tag(&self) -> Option<&Tag> {
        self.tag.as_ref()
    }

    pub fn digest(&self) -> Option<&ContentDigest> {
        self.digest.as_ref()
    }

    /// Domain and path, without any tag or digest
    pub fn name(&self) -> String {
        format!("{}/{}", self.domain, self.path)
    }

    /// The digest if there is one, otherwise the tag
    ///
    /// Returns an empty string for a reference with neither, which only
    /// [ImageReference::from_parts] can produce.
    pub fn reference(&self) -> &str {
        match (&self.digest, &self.tag) {
            (Some(digest), _) => digest.as_str(),
            (None, Some(tag)) => tag.as_str(),
            (None, None) => "",
        }
    }

    /// The most specific version available, if any
    pub fn version(&self) -> Option<ImageVersion> {
        match (&self.digest, &self.tag) {
            (Some(digest), _) => Some(ImageVersion::ContentDigest(digest.clone())),
            (None, Some(tag)) => Some(ImageVersion::Tag(tag.clone())),
            (None, None) => None,
        }
    }

    /// Attach a content digest, making this a canonical reference
    ///
    /// Any existing digest is replaced. The tag is kept, so a tagged reference
    /// renders as `domain/path:tag@digest`. The composed reference must parse
    /// back into the same components; if it would not, nothing changes and
    /// [ImageError::InvalidDigestComposition] is returned.
    ///
    /// ```
    /// # use imageref::{ContentDigest, ImageReference};
    /// let mut image = ImageReference::parse("alpine:3.19").unwrap();
    /// let digest = ContentDigest::from_content(b"alpine");
    /// image.with_digest(digest.clone()).unwrap();
    /// assert_eq!(image.reference(), digest.as_str());
    /// assert_eq!(image.to_string(), format!("docker.io/library/alpine:3.19@{}", digest));
    /// ```
    pub fn with_digest(&mut self, digest: ContentDigest) -> Result<(), ImageError> {
        ImageName::from_parts(
            Some(self.domain.as_str()),
            self.path.as_str(),
            self.tag.as_ref().map(Tag::as_str),
            Some(digest.as_str()),
        )
        .map_err(|err| ImageError::InvalidDigestComposition {
            name: self.name(),
            digest: digest.to_string(),
            reason: err.reason().clone(),
        })?;
        log::debug!("attaching digest {} to {}", digest, self.name());
        self.digest = Some(digest);
        Ok(())
    }
}

fn check_name_length(domain: &Registry, path: &Repository) -> Result<(), ReferenceError> {
    let length = domain.as_str().len() + 1 + path.as_str().len();
    if length > NAME_TOTAL_LENGTH_MAX {
        Err(ReferenceError::NameTooLong {
            max: NAME_TOTAL_LENGTH_MAX,
        })
    } else {
        Ok(())
    }
}

impl FromStr for ImageReference {
    type Err = ImageError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ImageReference::parse(s)
    }
}

impl TryFrom<String> for ImageReference {
    type Error = ImageError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        ImageReference::parse(&s)
    }
}

impl From<ImageReference> for String {
    fn from(reference: ImageReference) -> Self {
        reference.to_string()
    }
}

impl fmt::Display for ImageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.domain, self.path)?;
        if let Some(tag) = &self.tag {
            write!(f, ":{}", tag)?;
        }
        if let Some(digest) = &self.digest {
            write!(f, "@{}", digest)?;
        }
        Ok(())
    }
}

impl fmt::Debug for ImageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
