#[macro_use] extern crate clap;

use clap::{App, ArgMatches};
use env_logger::{from_env, Env};
use imageref::{ContentDigest, DefaultRegistry, ImageError, ImageReference, Registry};
use serde_json::json;

fn main() {
    let yaml = load_yaml!("cli.yml");
    let matches = App::from_yaml(yaml).get_matches();

    let log_level = matches.value_of("log_level").unwrap();
    from_env(Env::default().default_filter_or(log_level)).init();

    let defaults = match default_registry(&matches) {
        Ok(defaults) => defaults,
        Err(err) => {
            log::error!("{}", err);
            std::process::exit(1);
        }
    };
    let digest = match matches.value_of("digest").map(ContentDigest::parse) {
        None => None,
        Some(Ok(digest)) => Some(digest),
        Some(Err(err)) => {
            log::error!("{}", err);
            std::process::exit(1);
        }
    };

    let mut failed = false;
    for input in matches.values_of("image_reference").into_iter().flatten() {
        match resolve(input, &defaults, digest.as_ref()) {
            Ok(image) => {
                if matches.is_present("json") {
                    print_json(&image);
                } else {
                    print_text(&image);
                }
            }
            Err(err) => {
                log::error!("{}", err);
                failed = true;
            }
        }
    }
    if failed {
        std::process::exit(1);
    }
}

fn default_registry(matches: &ArgMatches) -> Result<DefaultRegistry, ImageError> {
    match matches.value_of("default_domain") {
        None => Ok(DefaultRegistry::new()),
        Some(domain) => Ok(DefaultRegistry {
            domain: Registry::parse(domain)?,
            also_known_as: vec![],
            ..DefaultRegistry::new()
        }),
    }
}

fn resolve(
    input: &str,
    defaults: &DefaultRegistry,
    digest: Option<&ContentDigest>,
) -> Result<ImageReference, ImageError> {
    let mut image = ImageReference::parse_with(input, defaults)?;
    if let Some(digest) = digest {
        image.with_digest(digest.clone())?;
    }
    Ok(image)
}

fn print_text(image: &ImageReference) {
    println!("name:      {}", image.name());
    println!("domain:    {}", image.domain());
    println!("path:      {}", image.path());
    println!("tag:       {}", image.tag().map(|t| t.as_str()).unwrap_or(""));
    println!("digest:    {}", image.digest().map(|d| d.as_str()).unwrap_or(""));
    println!("reference: {}", image.reference());
    println!("string:    {}", image);
}

fn print_json(image: &ImageReference) {
    let value = json!({
        "name": image.name(),
        "domain": image.domain().as_str(),
        "path": image.path().as_str(),
        "tag": image.tag().map(|t| t.as_str()),
        "digest": image.digest().map(|d| d.as_str()),
        "reference": image.reference(),
        "string": image.to_string(),
    });
    println!("{}", value);
}
