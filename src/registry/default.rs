use crate::image::{ImageName, Registry, Repository};

/// Settings for normalizing references against a default registry server
///
/// References which don't name a registry are assumed to live on the default
/// one. On the default registry, a repository path with only a single
/// component is found under the library prefix.
///
/// A plain [Registry] converts [Into] settings with no aliases and no prefix.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DefaultRegistry {
    /// Canonical name of the default registry
    pub domain: Registry,
    /// This registry is also known under additional names, which normalize to
    /// `domain`
    pub also_known_as: Vec<Registry>,
    /// Parent path for single-component repositories on the default registry
    pub library_prefix: Option<Repository>,
}

static DEFAULT_DOMAIN: &str = "docker.io";
static LEGACY_DEFAULT_DOMAIN: &str = "index.docker.io";
static LIBRARY_PREFIX: &str = "library";

impl From<Registry> for DefaultRegistry {
    fn from(domain: Registry) -> Self {
        DefaultRegistry {
            domain,
            also_known_as: vec![],
            library_prefix: None,
        }
    }
}

impl Default for DefaultRegistry {
    fn default() -> Self {
        DefaultRegistry::new()
    }
}

impl DefaultRegistry {
    /// Return the built-in defaults
    ///
    /// The default registry is `docker.io`, also known by its legacy name
    /// `index.docker.io`, with single-component paths under `library`.
    pub fn new() -> Self {
        DefaultRegistry {
            domain: DEFAULT_DOMAIN.parse().unwrap(),
            also_known_as: vec![LEGACY_DEFAULT_DOMAIN.parse().unwrap()],
            library_prefix: Some(LIBRARY_PREFIX.parse().unwrap()),
        }
    }

    /// Does this registry, or its absence, mean the default one?
    ///
    /// True for `None`, for `domain`, and for any of `also_known_as`.
    pub fn is_default(&self, registry: Option<&Registry>) -> bool {
        match registry {
            None => true,
            Some(registry) => registry == &self.domain || self.also_known_as.contains(registry),
        }
    }

    /// Normalized registry and repository path for a parsed name
    pub fn resolve_image_name(&self, image: &ImageName) -> (Registry, Repository) {
        let image_repo = image.repository();
        match image.registry() {
            Some(registry) if !self.is_default(Some(registry)) => {
                (registry.clone(), image_repo.clone())
            }
            _ => {
                let complete_repo = match &self.library_prefix {
                    Some(prefix) if !image_repo.has_namespace() => prefix.join(image_repo),
                    _ => image_repo.clone(),
                };
                log::debug!(
                    "resolved {} on default registry as {}/{}",
                    image,
                    self.domain,
                    complete_repo
                );
                (self.domain.clone(), complete_repo)
            }
        }
    }
}
