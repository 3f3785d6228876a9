//! Structural checks applied to a freshly parsed manifest.
use std::collections::HashSet;
use std::path::{Component, Path};

use super::manifest::{Dependency, Layout, Manifest};
use crate::error::ConfigError;

/// Validate the manifest, returning the first problem found.
///
/// # Errors
///
/// Returns [`ConfigError::Invalid`] if the layout or any dependency entry is
/// unusable.
pub fn validate(manifest: &Manifest) -> Result<(), ConfigError> {
    validate_layout(&manifest.layout)?;

    if manifest.dependencies.is_empty() {
        return Err(invalid("dependency", "dependency table is empty"));
    }

    let mut names = HashSet::new();
    let mut dests = HashSet::new();
    for dep in &manifest.dependencies {
        validate_dependency(dep)?;
        if !names.insert(dep.name.as_str()) {
            return Err(invalid(&dep.name, "duplicate dependency name"));
        }
        if !dests.insert(dep.include_dest.as_path()) {
            return Err(invalid(
                &dep.name,
                &format!("duplicate destination '{}'", dep.include_dest.display()),
            ));
        }
    }
    Ok(())
}

fn validate_layout(layout: &Layout) -> Result<(), ConfigError> {
    check_relative("layout", "core_source", &layout.core_source)?;
    check_relative("layout", "package_src", &layout.package_src)?;
    check_relative("layout", "core_dest", &layout.core_dest)?;
    check_relative("layout", "third_party", &layout.third_party)?;
    check_relative("layout", "entry_header", &layout.entry_header)?;

    let outputs = [
        ("core_dest", &layout.core_dest),
        ("third_party", &layout.third_party),
        ("entry_header", &layout.entry_header),
    ];
    for (i, (name, path)) in outputs.iter().enumerate() {
        for (other_name, other) in outputs.iter().skip(i + 1) {
            if path.starts_with(other) || other.starts_with(path) {
                return Err(invalid(
                    "layout",
                    &format!("{name} and {other_name} must not overlap"),
                ));
            }
        }
    }
    Ok(())
}

fn validate_dependency(dep: &Dependency) -> Result<(), ConfigError> {
    if dep.name.trim().is_empty() {
        return Err(invalid(&dep.url, "dependency name is empty"));
    }
    if !(dep.url.starts_with("https://") || dep.url.starts_with("http://")) {
        return Err(invalid(
            &dep.name,
            &format!("url must be http(s): {}", dep.url),
        ));
    }
    check_relative(&dep.name, "include_src", &dep.include_src)?;
    check_relative(&dep.name, "include_dest", &dep.include_dest)?;
    if let Some(digest) = &dep.sha256
        && !is_sha256_hex(digest)
    {
        return Err(invalid(
            &dep.name,
            "sha256 must be 64 lowercase hex characters",
        ));
    }
    Ok(())
}

/// Reject empty, absolute, or parent-escaping paths.
fn check_relative(item: &str, field: &str, path: &Path) -> Result<(), ConfigError> {
    if path.as_os_str().is_empty() {
        return Err(invalid(item, &format!("{field} is empty")));
    }
    if path.has_root() || path.is_absolute() {
        return Err(invalid(item, &format!("{field} must be a relative path")));
    }
    if path.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(invalid(item, &format!("{field} must not contain '..'")));
    }
    Ok(())
}

fn is_sha256_hex(s: &str) -> bool {
    s.len() == 64 && s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

fn invalid(item: &str, message: &str) -> ConfigError {
    ConfigError::Invalid {
        item: item.to_string(),
        message: message.to_string(),
    }
}

#[cfg(test)]
#[allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use crate::config::Manifest;
    use crate::error::ConfigError;

    const LAYOUT: &str = r#"
[layout]
core_source = "include/RPL"
package_src = "rpl-arduino/src"
core_dest = "RPL"
third_party = "3rdparty"
entry_header = "RPL.h"
"#;

    fn parse_with(deps: &str) -> Result<Manifest, ConfigError> {
        Manifest::parse(&format!("{LAYOUT}\n{deps}"), "test.toml")
    }

    fn assert_invalid(result: Result<Manifest, ConfigError>, needle: &str) {
        match result {
            Err(ConfigError::Invalid { message, .. }) => assert!(
                message.contains(needle),
                "expected message containing '{needle}', got '{message}'"
            ),
            other => panic!("expected ConfigError::Invalid, got {other:?}"),
        }
    }

    const ONE_DEP: &str = r#"
[[dependency]]
name = "tl"
url = "https://example.com/tl.zip"
format = "zip"
include_src = "tl-1.0/include/tl"
include_dest = "tl"
"#;

    #[test]
    fn accepts_minimal_manifest() {
        let manifest = parse_with(ONE_DEP).unwrap();
        assert_eq!(manifest.dependencies.len(), 1);
    }

    #[test]
    fn rejects_empty_table() {
        assert_invalid(parse_with(""), "empty");
    }

    #[test]
    fn rejects_duplicate_names() {
        let second = ONE_DEP.replace("include_dest = \"tl\"", "include_dest = \"tl2\"");
        assert_invalid(parse_with(&format!("{ONE_DEP}{second}")), "duplicate dependency name");
    }

    #[test]
    fn rejects_duplicate_destinations() {
        let second = ONE_DEP.replace("name = \"tl\"", "name = \"other\"");
        assert_invalid(parse_with(&format!("{ONE_DEP}{second}")), "duplicate destination");
    }

    #[test]
    fn rejects_parent_escape_in_destination() {
        let dep = ONE_DEP.replace("include_dest = \"tl\"", "include_dest = \"../tl\"");
        assert_invalid(parse_with(&dep), "'..'");
    }

    #[test]
    fn rejects_absolute_source() {
        let dep = ONE_DEP.replace(
            "include_src = \"tl-1.0/include/tl\"",
            "include_src = \"/etc/passwd\"",
        );
        assert_invalid(parse_with(&dep), "relative");
    }

    #[test]
    fn rejects_non_http_url() {
        let dep = ONE_DEP.replace("https://example.com/tl.zip", "ftp://example.com/tl.zip");
        assert_invalid(parse_with(&dep), "http");
    }

    #[test]
    fn rejects_malformed_digest() {
        let dep = format!("{ONE_DEP}sha256 = \"ABC\"\n");
        assert_invalid(parse_with(&dep), "sha256");
    }

    #[test]
    fn accepts_well_formed_digest() {
        let digest = "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9";
        let dep = format!("{ONE_DEP}sha256 = \"{digest}\"\n");
        let manifest = parse_with(&dep).unwrap();
        assert_eq!(manifest.dependencies[0].sha256.as_deref(), Some(digest));
    }

    #[test]
    fn rejects_colliding_layout_entries() {
        let layout = LAYOUT.replace("third_party = \"3rdparty\"", "third_party = \"RPL\"");
        let result = Manifest::parse(&format!("{layout}\n{ONE_DEP}"), "test.toml");
        assert_invalid(result, "core_dest and third_party must not overlap");
    }

    #[test]
    fn rejects_nested_layout_entries() {
        let layout = LAYOUT.replace("third_party = \"3rdparty\"", "third_party = \"RPL/3rdparty\"");
        let result = Manifest::parse(&format!("{layout}\n{ONE_DEP}"), "test.toml");
        assert_invalid(result, "core_dest and third_party must not overlap");
    }

    #[test]
    fn rejects_header_inside_third_party() {
        let layout = LAYOUT.replace(
            "entry_header = \"RPL.h\"",
            "entry_header = \"3rdparty/RPL.h\"",
        );
        let result = Manifest::parse(&format!("{layout}\n{ONE_DEP}"), "test.toml");
        assert_invalid(result, "third_party and entry_header must not overlap");
    }

    #[test]
    fn sibling_with_shared_name_prefix_is_not_nested() {
        let layout = LAYOUT.replace("entry_header = \"RPL.h\"", "entry_header = \"RPL_all.h\"");
        Manifest::parse(&format!("{layout}\n{ONE_DEP}"), "test.toml").unwrap();
    }
}
