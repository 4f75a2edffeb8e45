//! Container image references and their components


#[macro_use] mod macros;

mod digest;
mod name;
mod reference;
mod registry;
mod repository;
mod tag;
mod version;

pub use digest::{Algorithm, ContentDigest};
pub use name::ImageName;
pub use reference::{ImageReference, NAME_TOTAL_LENGTH_MAX};
pub use registry::Registry;
pub use repository::{Repository, RepositoryIter};
pub use tag::Tag;
pub use version::ImageVersion;
