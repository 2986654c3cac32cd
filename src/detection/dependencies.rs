//! Dependency manifest parsing for framework resolution
//!
//! Each manifest format gets its own parser. Manifests are read under the byte
//! cap without the line budget applied to content rules. A manifest that still
//! fails to parse (cut at the byte cap, malformed XML) has its name-like
//! tokens recovered, so lookups keep matching whole names only.

use super::index::TreeIndex;
use super::sampler::ContentSampler;
use crate::platforms::PathPattern;
use anyhow::{anyhow, Context, Result};
use regex::Regex;
use roxmltree::Document;
use std::collections::HashSet;
use std::sync::OnceLock;
use tracing::debug;

/// A dependency name and the manifest that declared it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    pub name: String,
    pub manifest: String,
}

pub trait ManifestParser {
    fn parse(&self, content: &str) -> Result<Vec<String>>;
}

/// JSON object whose listed sections map dependency names to versions
pub struct JsonManifestParser {
    pub sections: &'static [&'static str],
}

impl ManifestParser for JsonManifestParser {
    fn parse(&self, content: &str) -> Result<Vec<String>> {
        let parsed: serde_json::Value =
            serde_json::from_str(content).context("Failed to parse JSON manifest")?;

        let mut names = Vec::new();
        for section in self.sections {
            if let Some(deps) = parsed.get(section).and_then(|v| v.as_object()) {
                names.extend(deps.keys().cloned());
            }
        }
        Ok(names)
    }
}

/// TOML manifest; `tables` are dotted paths to dependency tables
pub struct TomlManifestParser {
    pub tables: &'static [&'static str],
    /// Dotted paths to arrays of PEP 508 requirement strings
    pub requirement_arrays: &'static [&'static str],
    /// Dotted paths to tables of groups, each holding a `dependencies` table
    pub group_tables: &'static [&'static str],
}

fn toml_lookup<'a>(value: &'a toml::Value, dotted: &str) -> Option<&'a toml::Value> {
    dotted
        .split('.')
        .try_fold(value, |current, key| current.get(key))
}

impl ManifestParser for TomlManifestParser {
    fn parse(&self, content: &str) -> Result<Vec<String>> {
        let parsed: toml::Value = toml::from_str(content).context("Failed to parse TOML manifest")?;

        let mut names = Vec::new();
        for table in self.tables {
            if let Some(deps) = toml_lookup(&parsed, table).and_then(|v| v.as_table()) {
                names.extend(deps.keys().cloned());
            }
        }

        for array in self.requirement_arrays {
            match toml_lookup(&parsed, array) {
                Some(toml::Value::Array(items)) => {
                    names.extend(items.iter().filter_map(|v| v.as_str()).filter_map(requirement_name));
                }
                // project.optional-dependencies is a table of arrays
                Some(toml::Value::Table(groups)) => {
                    for items in groups.values().filter_map(|v| v.as_array()) {
                        names.extend(
                            items.iter().filter_map(|v| v.as_str()).filter_map(requirement_name),
                        );
                    }
                }
                _ => {}
            }
        }

        for groups in self.group_tables {
            if let Some(groups) = toml_lookup(&parsed, groups).and_then(|v| v.as_table()) {
                for group in groups.values() {
                    if let Some(deps) = group.get("dependencies").and_then(|v| v.as_table()) {
                        names.extend(deps.keys().cloned());
                    }
                }
            }
        }

        Ok(names)
    }
}

/// Maven POM: `groupId:artifactId` of dependencies, plugins and the parent
pub struct PomManifestParser;

impl ManifestParser for PomManifestParser {
    fn parse(&self, content: &str) -> Result<Vec<String>> {
        let doc = Document::parse(content).context("Failed to parse pom.xml")?;

        let mut names = Vec::new();
        for node in doc.descendants() {
            let tag = node.tag_name().name();
            if tag != "dependency" && tag != "parent" && tag != "plugin" {
                continue;
            }

            let child_text = |name: &str| {
                node.children()
                    .find(|c| c.tag_name().name() == name)
                    .and_then(|c| c.text())
                    .map(|t| t.trim().to_string())
            };

            if let Some(artifact) = child_text("artifactId") {
                match child_text("groupId") {
                    Some(group) => names.push(format!("{}:{}", group, artifact)),
                    None => names.push(artifact),
                }
            }
        }
        Ok(names)
    }
}

/// MSBuild project: the `Sdk` attribute plus `PackageReference` includes
pub struct MsBuildManifestParser;

impl ManifestParser for MsBuildManifestParser {
    fn parse(&self, content: &str) -> Result<Vec<String>> {
        let doc = Document::parse(content).context("Failed to parse project file")?;

        let mut names = Vec::new();
        let root = doc.root_element();
        if let Some(sdk) = root.attribute("Sdk") {
            names.push(sdk.trim().to_string());
        }

        for node in doc.descendants() {
            match node.tag_name().name() {
                "PackageReference" => {
                    if let Some(include) = node.attribute("Include") {
                        names.push(include.trim().to_string());
                    }
                }
                "Sdk" => {
                    if let Some(name) = node.attribute("Name") {
                        names.push(name.trim().to_string());
                    }
                }
                _ => {}
            }
        }
        Ok(names)
    }
}

/// Line-oriented manifest where capture group 1 of `line_pattern` is a name
pub struct RegexManifestParser {
    pub line_pattern: &'static Regex,
}

impl ManifestParser for RegexManifestParser {
    fn parse(&self, content: &str) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with("//") {
                continue;
            }
            for caps in self.line_pattern.captures_iter(line) {
                if let Some(name) = caps.get(1) {
                    names.push(name.as_str().to_string());
                }
            }
        }
        Ok(names)
    }
}

/// Go module file: single-line and block `require` directives
pub struct GoModManifestParser;

impl ManifestParser for GoModManifestParser {
    fn parse(&self, content: &str) -> Result<Vec<String>> {
        let mut names = Vec::new();
        let mut in_block = false;

        for line in content.lines() {
            let line = line.split("//").next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }

            if in_block {
                if line == ")" {
                    in_block = false;
                } else if let Some(module) = line.split_whitespace().next() {
                    names.push(module.to_string());
                }
                continue;
            }

            if let Some(rest) = line.strip_prefix("require") {
                let rest = rest.trim();
                if rest == "(" {
                    in_block = true;
                } else if let Some(module) = rest.split_whitespace().next() {
                    names.push(module.to_string());
                }
            }
        }
        Ok(names)
    }
}

fn requirement_line_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([A-Za-z0-9][A-Za-z0-9._-]*)").expect("valid regex"))
}

fn gemfile_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"^gem\s+['"]([^'"]+)['"]"#).expect("valid regex"))
}

fn gradle_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // quoted `group:artifact[:version]` coordinates and plugin ids
    RE.get_or_init(|| {
        Regex::new(
            r#"['"]([\w.\-]+:[\w.\-]+)(?::[^'"]*)?['"]|\bid\s*\(?\s*['"]([\w.\-]+)['"]"#,
        )
        .expect("valid regex")
    })
}

fn token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[A-Za-z0-9@][A-Za-z0-9@/._-]*").expect("valid regex"))
}

fn coordinate_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"<groupId>\s*([^<\s]+)\s*</groupId>\s*<artifactId>\s*([^<\s]+)\s*</artifactId>",
        )
        .expect("valid regex")
    })
}

/// Name-like tokens of unparseable manifest text, plus Maven
/// `groupId:artifactId` pairs written next to each other
pub fn recover_names(content: &str) -> Vec<String> {
    let mut names: Vec<String> = token_regex()
        .find_iter(content)
        .map(|m| m.as_str().to_string())
        .collect();
    names.extend(
        coordinate_regex()
            .captures_iter(content)
            .map(|caps| format!("{}:{}", &caps[1], &caps[2])),
    );
    names
}

/// Gradle build script; captures coordinates and plugin ids from either group
pub struct GradleManifestParser;

impl ManifestParser for GradleManifestParser {
    fn parse(&self, content: &str) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for line in content.lines() {
            let line = line.trim();
            if line.starts_with("//") {
                continue;
            }
            for caps in gradle_regex().captures_iter(line) {
                if let Some(name) = caps.get(1).or_else(|| caps.get(2)) {
                    names.push(name.as_str().to_string());
                }
            }
        }
        Ok(names)
    }
}

/// Distribution name of a PEP 508 requirement such as `flask[async]>=2.0`
fn requirement_name(requirement: &str) -> Option<String> {
    requirement_line_regex()
        .captures(requirement.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// requirements.txt: skips options (`-r`, `--index-url`) and comments
pub struct RequirementsManifestParser;

impl ManifestParser for RequirementsManifestParser {
    fn parse(&self, content: &str) -> Result<Vec<String>> {
        Ok(content
            .lines()
            .map(|line| line.split('#').next().unwrap_or("").trim())
            .filter(|line| !line.is_empty() && !line.starts_with('-'))
            .filter_map(requirement_name)
            .collect())
    }
}

/// Select the parser for a manifest path by its file name
pub fn parser_for(path: &str) -> Option<Box<dyn ManifestParser>> {
    let name = path.rsplit('/').next().unwrap_or(path);

    let parser: Box<dyn ManifestParser> = match name {
        "package.json" => Box::new(JsonManifestParser {
            sections: &[
                "dependencies",
                "devDependencies",
                "peerDependencies",
                "optionalDependencies",
            ],
        }),
        "composer.json" => Box::new(JsonManifestParser {
            sections: &["require", "require-dev"],
        }),
        "Cargo.toml" => Box::new(TomlManifestParser {
            tables: &[
                "dependencies",
                "dev-dependencies",
                "build-dependencies",
                "workspace.dependencies",
            ],
            requirement_arrays: &[],
            group_tables: &[],
        }),
        "pyproject.toml" => Box::new(TomlManifestParser {
            tables: &["tool.poetry.dependencies", "tool.poetry.dev-dependencies"],
            requirement_arrays: &["project.dependencies", "project.optional-dependencies"],
            group_tables: &["tool.poetry.group"],
        }),
        "Pipfile" => Box::new(TomlManifestParser {
            tables: &["packages", "dev-packages"],
            requirement_arrays: &[],
            group_tables: &[],
        }),
        "pom.xml" => Box::new(PomManifestParser),
        "go.mod" => Box::new(GoModManifestParser),
        "Gemfile" => Box::new(RegexManifestParser {
            line_pattern: gemfile_regex(),
        }),
        "build.gradle" | "build.gradle.kts" => Box::new(GradleManifestParser),
        _ if name.ends_with(".csproj") || name.ends_with(".fsproj") || name.ends_with(".vbproj") => {
            Box::new(MsBuildManifestParser)
        }
        _ if name.starts_with("requirements") && name.ends_with(".txt") => {
            Box::new(RequirementsManifestParser)
        }
        _ => return None,
    };
    Some(parser)
}

/// Parse one manifest excerpt
pub fn parse_manifest(path: &str, content: &str) -> Result<Vec<String>> {
    let parser = parser_for(path).ok_or_else(|| anyhow!("No parser for manifest {}", path))?;
    parser
        .parse(content)
        .with_context(|| format!("Failed to read dependencies from {}", path))
}

/// Dependencies declared by one platform's manifests in a tree
#[derive(Debug, Default)]
pub struct DependencySet {
    dependencies: Vec<Dependency>,
    /// Tokens recovered from manifests that could not be parsed
    recovered: Vec<Dependency>,
}

impl DependencySet {
    /// Parse every file matching one of `manifests`, in path order
    pub fn collect(index: &TreeIndex, manifests: &[PathPattern], sampler: &ContentSampler) -> Self {
        let mut set = DependencySet::default();
        let mut seen = HashSet::new();

        for pattern in manifests {
            for entry in index.files_matching(pattern) {
                if !seen.insert(entry.path.as_str()) {
                    continue;
                }
                let Some(content) = sampler.document(&entry.path) else {
                    continue;
                };

                let (names, target) = match parse_manifest(&entry.path, &content) {
                    Ok(names) => {
                        debug!(manifest = %entry.path, count = names.len(), "Parsed dependency manifest");
                        (names, &mut set.dependencies)
                    }
                    Err(e) => {
                        debug!(manifest = %entry.path, error = %e, "Recovering names from raw manifest text");
                        (recover_names(&content), &mut set.recovered)
                    }
                };
                target.extend(names.into_iter().map(|name| Dependency {
                    name,
                    manifest: entry.path.clone(),
                }));
            }
        }
        set
    }

    /// Dependencies from manifests that parsed cleanly
    pub fn dependencies(&self) -> &[Dependency] {
        &self.dependencies
    }

    pub fn is_empty(&self) -> bool {
        self.dependencies.is_empty() && self.recovered.is_empty()
    }

    fn all(&self) -> impl Iterator<Item = &Dependency> {
        self.dependencies.iter().chain(self.recovered.iter())
    }

    /// Manifest declaring a dependency named exactly `name`, ignoring case
    pub fn find_exact(&self, name: &str) -> Option<&str> {
        self.all()
            .find(|d| d.name.eq_ignore_ascii_case(name))
            .map(|d| d.manifest.as_str())
    }

    /// Manifest declaring a dependency whose name contains `fragment`
    pub fn find_containing(&self, fragment: &str) -> Option<&str> {
        let needle = fragment.to_ascii_lowercase();
        self.all()
            .find(|d| d.name.to_ascii_lowercase().contains(&needle))
            .map(|d| d.manifest.as_str())
    }
}
