//! Parsing and normalization of container image references
//!
//! An [ImageReference] is a Docker-style reference like `nginx` or
//! `myregistry.io:5000/team/app:v1`, resolved against a default registry so
//! that its domain, path, and version are always explicit.
//!
//! ```
//! use imageref::ImageReference;
//!
//! let image: ImageReference = "myregistry.io:5000/team/app:v1".parse().unwrap();
//! assert_eq!(image.domain().as_str(), "myregistry.io:5000");
//! assert_eq!(image.path().as_str(), "team/app");
//! assert_eq!(image.reference(), "v1");
//! ```

#[macro_use] extern crate lazy_static;

pub mod errors;
pub mod image;
pub mod registry;

pub use crate::{
    errors::{ImageError, ReferenceError},
    image::{
        Algorithm, ContentDigest, ImageName, ImageReference, ImageVersion, Registry, Repository,
        Tag,
    },
    registry::DefaultRegistry,
};
