use crate::{
    errors::{ImageError, ReferenceError},
    image::{ContentDigest, ImageVersion, Registry, Repository, Tag},
};
use regex::Regex;

/// Docker-style image reference, exactly as written
///
/// This is the grammar-level form of a reference: a [Registry], [Repository],
/// [Tag], and [ContentDigest] in that order, with only the [Repository]
/// mandatory. No defaults are applied here; see [crate::ImageReference] for
/// the normalized form.
///
/// A [Tag] follows a `:` and a [ContentDigest] follows an `@`. Whether the
/// first path section is a [Registry] is decided by a heuristic: it is one if
/// it contains a dot or colon, is exactly `localhost`, or has uppercase
/// letters, which a repository never may.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct ImageName {
    serialized: String,
    registry: Option<Registry>,
    repository: Repository,
    tag: Option<Tag>,
    digest: Option<ContentDigest>,
}

impl ImageName {
    /// The reference exactly as it was parsed
    pub fn as_str(&self) -> &str {
        &self.serialized
    }

    /// Assemble a reference string from components and parse it back
    ///
    /// Besides invalid components, this rejects any combination that reads
    /// back differently, such as a registry `mirror` that would be taken as
    /// the first path component. That case fails with
    /// [ReferenceError::Ambiguous].
    pub fn from_parts(
        registry: Option<&str>,
        repository: &str,
        tag: Option<&str>,
        digest: Option<&str>,
    ) -> Result<Self, ImageError> {
        let mut combined = String::new();
        if let Some(registry) = registry {
            combined.push_str(registry);
            combined.push('/');
        }
        combined.push_str(repository);
        if let Some(tag) = tag {
            combined.push(':');
            combined.push_str(tag);
        }
        if let Some(digest) = digest {
            combined.push('@');
            combined.push_str(digest);
        }
        let parsed = ImageName::parse(&combined)?;
        if parsed.as_parts() == (registry, repository, tag, digest) {
            Ok(parsed)
        } else {
            Err(ImageError::invalid(&combined, ReferenceError::Ambiguous))
        }
    }

    /// Registry, repository, tag and digest as string slices
    pub fn as_parts(&self) -> (Option<&str>, &str, Option<&str>, Option<&str>) {
        (
            self.registry_str(),
            self.repository_str(),
            self.tag_str(),
            self.content_digest_str(),
        )
    }

    /// Parse a [prim@str] as an [ImageName]
    ///
    /// ```
    /// # use imageref::ImageName;
    /// let name = ImageName::parse("localhost:5000/team/app:v1").unwrap();
    /// assert_eq!(name.as_parts(), (Some("localhost:5000"), "team/app", Some("v1"), None));
    /// assert!(ImageName::parse("Nginx").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, ImageError> {
        let result = ImageName::parse_parts(s);
        log::trace!("image name {:?} parsed as {:?}", s, result);
        result.map_err(|reason| ImageError::invalid(s, reason))
    }

    fn parse_parts(s: &str) -> Result<Self, ReferenceError> {
        lazy_static! {
            static ref IDENTIFIER: Regex = Regex::new("^[a-f0-9]{64}$").unwrap();
            static ref NO_REGISTRY: Regex = Regex::new(&format!(
                "^{}(?::{})?(?:@{})?$",
                Repository::regex_str(),
                Tag::regex_str(),
                ContentDigest::regex_str()
            ))
            .unwrap();
        }
        if s.is_empty() {
            return Err(ReferenceError::NameEmpty);
        }
        if IDENTIFIER.is_match(s) {
            return Err(ReferenceError::IdentifierAsName);
        }

        let (registry, remainder) = match registry_end(s) {
            Some(end) => (
                Some(Registry::parse(&s[..end]).map_err(|err| err.reason().clone())?),
                &s[end + 1..],
            ),
            None => (None, s),
        };

        let repository_end = remainder
            .find(|c: char| c == ':' || c == '@')
            .unwrap_or_else(|| remainder.len());
        if remainder[..repository_end]
            .chars()
            .any(|c| c.is_ascii_uppercase())
        {
            return Err(ReferenceError::NameContainsUppercase);
        }

        let captures = NO_REGISTRY
            .captures(remainder)
            .ok_or(ReferenceError::InvalidFormat)?;
        let repository = match captures.name("repo") {
            Some(m) => Repository::parse(m.as_str()).map_err(|err| err.reason().clone())?,
            None => return Err(ReferenceError::InvalidFormat),
        };
        let tag = match captures.name("tag") {
            Some(m) => Some(Tag::parse(m.as_str()).map_err(|err| err.reason().clone())?),
            None => None,
        };
        let digest = match captures.name("dig") {
            Some(m) => Some(ContentDigest::validate(m.as_str())?),
            None => None,
        };

        Ok(ImageName {
            serialized: s.to_owned(),
            registry,
            repository,
            tag,
            digest,
        })
    }

    pub fn registry_str(&self) -> Option<&str> {
        self.registry.as_ref().map(Registry::as_str)
    }

    pub fn repository_str(&self) -> &str {
        self.repository.as_str()
    }

    pub fn tag_str(&self) -> Option<&str> {
        self.tag.as_ref().map(Tag::as_str)
    }

    pub fn content_digest_str(&self) -> Option<&str> {
        self.digest.as_ref().map(ContentDigest::as_str)
    }

    pub fn registry(&self) -> Option<&Registry> {
        self.registry.as_ref()
    }

    pub fn repository(&self) -> &Repository {
        &self.repository
    }

    pub fn tag(&self) -> Option<&Tag> {
        self.tag.as_ref()
    }

    pub fn content_digest(&self) -> Option<&ContentDigest> {
        self.digest.as_ref()
    }

    /// Is there neither a tag nor a digest?
    pub fn is_name_only(&self) -> bool {
        self.tag.is_none() && self.digest.is_none()
    }

    /// Digest if present, else tag, else `latest`
    pub fn version(&self) -> ImageVersion {
        match (&self.digest, &self.tag) {
            (Some(digest), _) => ImageVersion::ContentDigest(digest.clone()),
            (None, Some(tag)) => ImageVersion::Tag(tag.clone()),
            (None, None) => ImageVersion::Tag(Tag::latest()),
        }
    }
}

/// Find the slash ending a leading registry, if the first path section is one
fn registry_end(s: &str) -> Option<usize> {
    let end = s.find('/')?;
    let first = &s[..end];
    if first.contains(|c: char| c == '.' || c == ':')
        || first == "localhost"
        || first.chars().any(|c| c.is_ascii_uppercase())
    {
        Some(end)
    } else {
        None
    }
}

impl_string_traits!(ImageName);
impl_string_ord!(ImageName);
