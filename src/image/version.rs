use crate::{
    errors::ImageError,
    image::{ContentDigest, Tag},
};

/// The part of a reference that selects one image out of a repository
///
/// A reference may carry a tag and a digest at once. The digest pins exact
/// content, so when both are present it is the one reported as the version.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum ImageVersion {
    Tag(Tag),
    ContentDigest(ContentDigest),
}

impl ImageVersion {
    pub fn as_str(&self) -> &str {
        match self {
            ImageVersion::Tag(tag) => tag.as_str(),
            ImageVersion::ContentDigest(digest) => digest.as_str(),
        }
    }

    /// Parse either form, telling them apart by the `algorithm:` prefix
    /// that only a digest has
    pub fn parse(s: &str) -> Result<Self, ImageError> {
        Ok(if s.contains(':') {
            ContentDigest::parse(s)?.into()
        } else {
            Tag::parse(s)?.into()
        })
    }

    pub fn is_content_digest(&self) -> bool {
        matches!(self, ImageVersion::ContentDigest(_))
    }

    pub fn is_tag(&self) -> bool {
        matches!(self, ImageVersion::Tag(_))
    }
}

impl From<Tag> for ImageVersion {
    fn from(tag: Tag) -> Self {
        ImageVersion::Tag(tag)
    }
}

impl From<ContentDigest> for ImageVersion {
    fn from(digest: ContentDigest) -> Self {
        ImageVersion::ContentDigest(digest)
    }
}

impl_string_traits!(ImageVersion);
