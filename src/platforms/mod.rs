//! Platform rule tables and the registry that holds them
//!
//! Every supported platform is described by a [`PlatformRules`] value: which files
//! and directories count as evidence, which dependency manifests to parse, which
//! frameworks to look for and how build tools and commands are derived. The
//! detection engine iterates the registry uniformly; adding a platform means
//! registering another table, not writing another detector.

mod dotnet;
mod go;
mod java;
mod nodejs;
mod pattern;
mod php;
mod python;
mod registry;
mod ruby;
mod rust;

pub use dotnet::dotnet;
pub use go::go;
pub use java::java;
pub use nodejs::nodejs;
pub use pattern::PathPattern;
pub use php::php;
pub use python::python;
pub use registry::PlatformRegistry;
pub use ruby::ruby;
pub use rust::rust;

use regex::Regex;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuleError {
    #[error("Invalid content pattern '{pattern}' in {platform} rules: {source}")]
    InvalidPattern {
        platform: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Regular expression tested against bounded excerpts of matching files
#[derive(Debug, Clone)]
pub struct ContentRule {
    pub files: PathPattern,
    pub pattern: Regex,
}

impl ContentRule {
    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

/// One piece of evidence a framework rule looks for
#[derive(Debug, Clone)]
pub enum Indicator {
    /// Dependency declared under exactly this name
    Package(String),
    /// Dependency whose coordinate contains this fragment
    PackageContaining(String),
    /// Path convention present in the tree
    Path(PathPattern),
    /// Source pattern (imports, annotations) found in a sampled file
    Source(ContentRule),
}

#[derive(Debug, Clone)]
pub struct FrameworkRule {
    pub name: String,
    pub indicators: Vec<Indicator>,
}

/// Marker file that pins the build tool, checked in declaration order
#[derive(Debug, Clone)]
pub struct BuildToolRule {
    pub marker: PathPattern,
    pub tool: String,
}

/// Build/install commands for a `(framework, build tool)` combination.
///
/// `None` in a key position matches any value.
#[derive(Debug, Clone, Default)]
pub struct CommandRule {
    pub framework: Option<String>,
    pub build_tool: Option<String>,
    pub build_required: bool,
    pub build_command: Option<String>,
    pub install_command: Option<String>,
}

impl CommandRule {
    pub fn platform_default() -> Self {
        Self::default()
    }

    pub fn for_tool(tool: &str) -> Self {
        Self {
            build_tool: Some(tool.to_string()),
            ..Self::default()
        }
    }

    pub fn for_framework(framework: &str) -> Self {
        Self {
            framework: Some(framework.to_string()),
            ..Self::default()
        }
    }

    pub fn with_tool(mut self, tool: &str) -> Self {
        self.build_tool = Some(tool.to_string());
        self
    }

    pub fn build(mut self, command: &str) -> Self {
        self.build_required = true;
        self.build_command = Some(command.to_string());
        self
    }

    pub fn install(mut self, command: &str) -> Self {
        self.install_command = Some(command.to_string());
        self
    }

    fn specificity(&self, framework: Option<&str>, tool: Option<&str>) -> Option<u8> {
        let framework_ok = match (&self.framework, framework) {
            (None, _) => true,
            (Some(want), Some(have)) => want == have,
            (Some(_), None) => false,
        };
        let tool_ok = match (&self.build_tool, tool) {
            (None, _) => true,
            (Some(want), Some(have)) => want == have,
            (Some(_), None) => false,
        };
        if !framework_ok || !tool_ok {
            return None;
        }
        // (framework, tool) > (any, tool) > (framework, any) > (any, any)
        Some(match (self.framework.is_some(), self.build_tool.is_some()) {
            (true, true) => 3,
            (false, true) => 2,
            (true, false) => 1,
            (false, false) => 0,
        })
    }
}

/// Commands derived for a candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildCommands {
    pub build_required: bool,
    pub build_command: Option<String>,
    pub install_command: Option<String>,
}

/// Data-driven description of one platform
#[derive(Debug, Clone)]
pub struct PlatformRules {
    pub id: String,
    pub name: String,
    pub primary_files: Vec<PathPattern>,
    pub secondary_files: Vec<PathPattern>,
    pub structure: Vec<PathPattern>,
    pub config_files: Vec<PathPattern>,
    pub manifests: Vec<PathPattern>,
    pub frameworks: Vec<FrameworkRule>,
    pub content: Vec<ContentRule>,
    pub build_tools: Vec<BuildToolRule>,
    pub default_build_tool: Option<String>,
    pub commands: Vec<CommandRule>,
    pub build_required: bool,
    pub excluded_dirs: Vec<String>,
}

impl PlatformRules {
    pub fn builder(id: &str, name: &str) -> PlatformRulesBuilder {
        PlatformRulesBuilder::new(id, name)
    }

    /// Pick the most specific command rule for a framework/build tool pair.
    ///
    /// Earlier rules win between equally specific ones. Without any matching
    /// rule the commands are left empty rather than guessed.
    pub fn commands_for(&self, framework: Option<&str>, build_tool: Option<&str>) -> BuildCommands {
        let mut best: Option<(u8, &CommandRule)> = None;
        for rule in &self.commands {
            if let Some(rank) = rule.specificity(framework, build_tool) {
                if best.map_or(true, |(best_rank, _)| rank > best_rank) {
                    best = Some((rank, rule));
                }
            }
        }

        match best {
            Some((_, rule)) => BuildCommands {
                build_required: rule.build_required,
                build_command: rule.build_command.clone(),
                install_command: rule.install_command.clone(),
            },
            None => BuildCommands {
                build_required: self.build_required,
                build_command: None,
                install_command: None,
            },
        }
    }
}

#[derive(Debug, Clone)]
struct FrameworkDraft {
    name: String,
    indicators: Vec<IndicatorSpec>,
}

#[derive(Debug, Clone)]
enum IndicatorSpec {
    Package(String),
    PackageContaining(String),
    Path(String),
    Source(String, String),
}

/// Builder for a framework rule inside [`PlatformRulesBuilder::framework`]
#[derive(Debug, Clone)]
pub struct FrameworkBuilder {
    draft: FrameworkDraft,
}

impl FrameworkBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            draft: FrameworkDraft {
                name: name.to_string(),
                indicators: Vec::new(),
            },
        }
    }

    pub fn package(mut self, name: &str) -> Self {
        self.draft
            .indicators
            .push(IndicatorSpec::Package(name.to_string()));
        self
    }

    pub fn package_containing(mut self, fragment: &str) -> Self {
        self.draft
            .indicators
            .push(IndicatorSpec::PackageContaining(fragment.to_string()));
        self
    }

    pub fn path(mut self, pattern: &str) -> Self {
        self.draft
            .indicators
            .push(IndicatorSpec::Path(pattern.to_string()));
        self
    }

    pub fn source(mut self, files: &str, pattern: &str) -> Self {
        self.draft
            .indicators
            .push(IndicatorSpec::Source(files.to_string(), pattern.to_string()));
        self
    }
}

/// Collects a platform table; regexes are compiled in [`build`](Self::build)
#[derive(Debug, Clone)]
pub struct PlatformRulesBuilder {
    id: String,
    name: String,
    primary_files: Vec<String>,
    secondary_files: Vec<String>,
    structure: Vec<String>,
    config_files: Vec<String>,
    manifests: Vec<String>,
    frameworks: Vec<FrameworkDraft>,
    content: Vec<(String, String)>,
    build_tools: Vec<(String, String)>,
    default_build_tool: Option<String>,
    commands: Vec<CommandRule>,
    build_required: bool,
    excluded_dirs: Vec<String>,
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn patterns(items: &[String]) -> Vec<PathPattern> {
    items.iter().map(|s| PathPattern::parse(s)).collect()
}

impl PlatformRulesBuilder {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            primary_files: Vec::new(),
            secondary_files: Vec::new(),
            structure: Vec::new(),
            config_files: Vec::new(),
            manifests: Vec::new(),
            frameworks: Vec::new(),
            content: Vec::new(),
            build_tools: Vec::new(),
            default_build_tool: None,
            commands: Vec::new(),
            build_required: false,
            excluded_dirs: Vec::new(),
        }
    }

    pub fn primary(mut self, files: &[&str]) -> Self {
        self.primary_files.extend(owned(files));
        self
    }

    pub fn secondary(mut self, files: &[&str]) -> Self {
        self.secondary_files.extend(owned(files));
        self
    }

    pub fn structure(mut self, dirs: &[&str]) -> Self {
        self.structure.extend(owned(dirs));
        self
    }

    pub fn config(mut self, files: &[&str]) -> Self {
        self.config_files.extend(owned(files));
        self
    }

    pub fn manifests(mut self, files: &[&str]) -> Self {
        self.manifests.extend(owned(files));
        self
    }

    pub fn framework(mut self, framework: FrameworkBuilder) -> Self {
        self.frameworks.push(framework.draft);
        self
    }

    pub fn content(mut self, files: &str, pattern: &str) -> Self {
        self.content.push((files.to_string(), pattern.to_string()));
        self
    }

    pub fn build_tool(mut self, marker: &str, tool: &str) -> Self {
        self.build_tools.push((marker.to_string(), tool.to_string()));
        self
    }

    pub fn default_build_tool(mut self, tool: &str) -> Self {
        self.default_build_tool = Some(tool.to_string());
        self
    }

    pub fn command(mut self, rule: CommandRule) -> Self {
        self.commands.push(rule);
        self
    }

    pub fn build_required(mut self, required: bool) -> Self {
        self.build_required = required;
        self
    }

    pub fn exclude_dirs(mut self, dirs: &[&str]) -> Self {
        self.excluded_dirs.extend(owned(dirs));
        self
    }

    fn content_rule(&self, files: &str, pattern: &str) -> Result<ContentRule, RuleError> {
        let regex = Regex::new(pattern).map_err(|source| RuleError::InvalidPattern {
            platform: self.id.clone(),
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(ContentRule {
            files: PathPattern::parse(files),
            pattern: regex,
        })
    }

    pub fn build(self) -> Result<PlatformRules, RuleError> {
        let mut frameworks = Vec::with_capacity(self.frameworks.len());
        for draft in &self.frameworks {
            let mut indicators = Vec::with_capacity(draft.indicators.len());
            for indicator in &draft.indicators {
                indicators.push(match indicator {
                    IndicatorSpec::Package(name) => Indicator::Package(name.clone()),
                    IndicatorSpec::PackageContaining(fragment) => {
                        Indicator::PackageContaining(fragment.clone())
                    }
                    IndicatorSpec::Path(pattern) => Indicator::Path(PathPattern::parse(pattern)),
                    IndicatorSpec::Source(files, pattern) => {
                        Indicator::Source(self.content_rule(files, pattern)?)
                    }
                });
            }
            frameworks.push(FrameworkRule {
                name: draft.name.clone(),
                indicators,
            });
        }

        let content = self
            .content
            .iter()
            .map(|(files, pattern)| self.content_rule(files, pattern))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PlatformRules {
            primary_files: patterns(&self.primary_files),
            secondary_files: patterns(&self.secondary_files),
            structure: patterns(&self.structure),
            config_files: patterns(&self.config_files),
            manifests: patterns(&self.manifests),
            frameworks,
            content,
            build_tools: self
                .build_tools
                .iter()
                .map(|(marker, tool)| BuildToolRule {
                    marker: PathPattern::parse(marker),
                    tool: tool.clone(),
                })
                .collect(),
            default_build_tool: self.default_build_tool,
            commands: self.commands,
            build_required: self.build_required,
            excluded_dirs: self.excluded_dirs,
            id: self.id,
            name: self.name,
        })
    }
}
