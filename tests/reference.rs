use imageref::{
    Algorithm, ContentDigest, DefaultRegistry, ImageError, ImageReference, ReferenceError,
    Registry,
};

fn sha256_hex() -> String {
    ContentDigest::from_content(b"alpine").hex_str().to_owned()
}

const VALID: &[&str] = &[
    "ubuntu",
    "ubuntu:22.04",
    "library/ubuntu",
    "docker.io/ubuntu",
    "docker.io/library/ubuntu:latest",
    "index.docker.io/library/ubuntu",
    "team/app",
    "team/sub/app:v1.2.3",
    "ghcr.io/org/app",
    "ghcr.io/org/app:v1.0",
    "myregistry.io:5000/team/app:v1",
    "localhost/app",
    "localhost:5000/app:dev",
    "Foo.Example.com/app",
    "a__b/c-d/e.f_g",
];

#[test]
fn documented_examples() {
    let image = ImageReference::parse("ubuntu").unwrap();
    assert_eq!(image.domain().as_str(), "docker.io");
    assert_eq!(image.path().as_str(), "library/ubuntu");
    assert_eq!(image.tag().map(|t| t.as_str()), Some("latest"));
    assert_eq!(image.digest(), None);
    assert_eq!(image.name(), "docker.io/library/ubuntu");
    assert_eq!(image.to_string(), "docker.io/library/ubuntu:latest");

    let image = ImageReference::parse("myregistry.io:5000/team/app:v1").unwrap();
    assert_eq!(image.domain().as_str(), "myregistry.io:5000");
    assert_eq!(image.path().as_str(), "team/app");
    assert_eq!(image.tag().map(|t| t.as_str()), Some("v1"));
    assert_eq!(image.reference(), "v1");

    let digest = format!("sha256:{}", sha256_hex());
    let image = ImageReference::parse(&format!("alpine@{}", digest)).unwrap();
    assert_eq!(image.tag(), None);
    assert_eq!(image.digest().map(|d| d.as_str()), Some(digest.as_str()));
    assert_eq!(image.reference(), digest);
    assert_eq!(
        image.to_string(),
        format!("docker.io/library/alpine@{}", digest)
    );
}

#[test]
fn normalization_defaults() {
    for s in &["nginx", "nginx:1.25", "team/nginx", "library/nginx:stable"] {
        let image = ImageReference::parse(s).unwrap();
        assert_eq!(image.domain().as_str(), "docker.io", "{}", s);
    }
    for s in &["nginx", "nginx:1.25", "docker.io/nginx", "index.docker.io/nginx"] {
        let image = ImageReference::parse(s).unwrap();
        assert!(image.path().as_str().starts_with("library/"), "{}", s);
    }
    for s in &["nginx", "ghcr.io/org/app", "localhost:5000/app"] {
        let image = ImageReference::parse(s).unwrap();
        assert!(image.tag().unwrap().is_latest(), "{}", s);
    }

    let image = ImageReference::parse("ghcr.io/app").unwrap();
    assert_eq!(image.path().as_str(), "app");
    let image = ImageReference::parse("team/app").unwrap();
    assert_eq!(image.path().as_str(), "team/app");
}

#[test]
fn round_trip_is_stable() {
    let digest = format!("sha256:{}", sha256_hex());
    let mut inputs: Vec<String> = VALID.iter().map(|s| s.to_string()).collect();
    inputs.push(format!("alpine@{}", digest));
    inputs.push(format!("ghcr.io/org/app:v2@{}", digest));

    for s in &inputs {
        let first = ImageReference::parse(s).unwrap();
        let second = ImageReference::parse(&first.to_string()).unwrap();
        assert_eq!(first, second, "{}", s);
        assert_eq!(first.domain(), second.domain());
        assert_eq!(first.path(), second.path());
        assert_eq!(first.tag(), second.tag());
        assert_eq!(first.digest(), second.digest());
        assert_eq!(first.to_string(), second.to_string());
    }
}

#[test]
fn reference_prefers_digest() {
    let digest = format!("sha256:{}", sha256_hex());
    let image = ImageReference::parse(&format!("ghcr.io/org/app:v2@{}", digest)).unwrap();
    assert_eq!(image.tag().map(|t| t.as_str()), Some("v2"));
    assert_eq!(image.reference(), digest);
    assert!(image.version().unwrap().is_content_digest());

    let image = ImageReference::parse("ghcr.io/org/app:v2").unwrap();
    assert_eq!(image.reference(), "v2");
    assert!(image.version().unwrap().is_tag());
}

#[test]
fn with_digest_sets_reference() {
    let mut image = ImageReference::parse("nginx:1.25").unwrap();
    let digest = ContentDigest::from_content(b"nginx");
    image.with_digest(digest.clone()).unwrap();
    assert_eq!(image.reference(), digest.to_string());
    assert_eq!(image.digest(), Some(&digest));
    assert_eq!(image.tag().map(|t| t.as_str()), Some("1.25"));
    assert_eq!(image.name(), "docker.io/library/nginx");
    assert_eq!(
        image.to_string(),
        format!("docker.io/library/nginx:1.25@{}", digest)
    );

    let replacement = Algorithm::Sha512.digest(b"nginx");
    image.with_digest(replacement.clone()).unwrap();
    assert_eq!(image.reference(), replacement.as_str());

    let reparsed = ImageReference::parse(&image.to_string()).unwrap();
    assert_eq!(reparsed, image);
}

#[test]
fn malformed_inputs_fail() {
    let long_name = format!("ghcr.io/{}", "a".repeat(300));
    let bad: Vec<&str> = vec![
        "",
        "Nginx",
        "alpine@sha256:xyz",
        "alpine@md5:0123456789abcdef0123456789abcdef",
        "alpine@sha256:0123456789abcdef0123456789abcdef",
        "nginx:",
        "nginx:.bad",
        "/nginx",
        "nginx/",
        "ghcr.io//nginx",
        "ghcr.io:port/nginx",
        "-nginx",
        " nginx",
        "77af778b51abd4a3c51c5ddd97204a9c3ae614ebccb75a606c3b6865aed6744e",
        long_name.as_str(),
    ];
    for s in bad {
        match ImageReference::parse(s) {
            Err(ImageError::InvalidReference { input, .. }) => assert_eq!(input, s),
            other => panic!("{:?} parsed as {:?}", s, other),
        }
    }
}

#[test]
fn error_messages_name_the_input() {
    let err = ImageReference::parse("Nginx").unwrap_err();
    assert_eq!(err.reason(), &ReferenceError::NameContainsUppercase);
    assert_eq!(
        err.to_string(),
        "parsing image Nginx failed: invalid reference format: repository name must be lowercase"
    );

    let long_name = format!("ghcr.io/{}", "a".repeat(300));
    let err = ImageReference::parse(&long_name).unwrap_err();
    assert_eq!(err.reason(), &ReferenceError::NameTooLong { max: 255 });
}

#[test]
fn name_length_counts_normalized_name() {
    // 238 characters as written, 256 once docker.io/library/ is added
    let path = "a".repeat(238);
    assert_eq!(
        ImageReference::parse(&path).unwrap_err().reason(),
        &ReferenceError::NameTooLong { max: 255 }
    );
    let path = "a".repeat(237);
    assert_eq!(ImageReference::parse(&path).unwrap().name().len(), 255);
}

#[test]
fn custom_default_registry() {
    let defaults = DefaultRegistry {
        domain: "mirror.example.com".parse().unwrap(),
        also_known_as: vec!["docker.io".parse().unwrap()],
        library_prefix: Some("library".parse().unwrap()),
    };
    let image = ImageReference::parse_with("nginx", &defaults).unwrap();
    assert_eq!(image.to_string(), "mirror.example.com/library/nginx:latest");
    let image = ImageReference::parse_with("docker.io/team/app:v1", &defaults).unwrap();
    assert_eq!(image.to_string(), "mirror.example.com/team/app:v1");
    let image = ImageReference::parse_with("ghcr.io/app", &defaults).unwrap();
    assert_eq!(image.to_string(), "ghcr.io/app:latest");

    let plain: DefaultRegistry = Registry::parse("registry.local:5000").unwrap().into();
    let image = ImageReference::parse_with("app", &plain).unwrap();
    assert_eq!(image.to_string(), "registry.local:5000/app:latest");
}

#[test]
fn serde_uses_reference_strings() {
    let image = ImageReference::parse("ghcr.io/org/app:v1").unwrap();
    let json = serde_json::to_string(&image).unwrap();
    assert_eq!(json, "\"ghcr.io/org/app:v1\"");

    let parsed: ImageReference = serde_json::from_str("\"ubuntu\"").unwrap();
    assert_eq!(parsed.to_string(), "docker.io/library/ubuntu:latest");
    assert!(serde_json::from_str::<ImageReference>("\"Ubuntu\"").is_err());

    let digest = ContentDigest::from_content(b"cat");
    let json = serde_json::to_string(&digest).unwrap();
    assert_eq!(json, format!("\"{}\"", digest));
    assert_eq!(serde_json::from_str::<ContentDigest>(&json).unwrap(), digest);
    assert!(serde_json::from_str::<ContentDigest>("\"sha256:abc\"").is_err());
}
