use std::fmt;

/// Path pattern used by rule tables.
///
/// - `*.csproj` matches any path ending in `.csproj`
/// - `src/main/java` matches that path, at the root or nested below it
/// - `pom.xml` matches any entry named `pom.xml`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathPattern {
    Extension(String),
    Nested(String),
    Name(String),
}

impl PathPattern {
    pub fn parse(pattern: &str) -> Self {
        if let Some(suffix) = pattern.strip_prefix('*') {
            PathPattern::Extension(suffix.to_string())
        } else if pattern.contains('/') {
            PathPattern::Nested(pattern.trim_matches('/').to_string())
        } else {
            PathPattern::Name(pattern.to_string())
        }
    }

    pub fn matches(&self, path: &str) -> bool {
        match self {
            PathPattern::Extension(suffix) => path.ends_with(suffix.as_str()),
            PathPattern::Nested(nested) => {
                path == nested
                    || (path.len() > nested.len()
                        && path.ends_with(nested.as_str())
                        && path.as_bytes()[path.len() - nested.len() - 1] == b'/')
            }
            PathPattern::Name(name) => path.rsplit('/').next() == Some(name.as_str()),
        }
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathPattern::Extension(suffix) => write!(f, "*{}", suffix),
            PathPattern::Nested(path) => write!(f, "{}", path),
            PathPattern::Name(name) => write!(f, "{}", name),
        }
    }
}

impl From<&str> for PathPattern {
    fn from(pattern: &str) -> Self {
        PathPattern::parse(pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(
            PathPattern::parse("*.csproj"),
            PathPattern::Extension(".csproj".to_string())
        );
        assert_eq!(
            PathPattern::parse("src/main/java"),
            PathPattern::Nested("src/main/java".to_string())
        );
        assert_eq!(
            PathPattern::parse("pom.xml"),
            PathPattern::Name("pom.xml".to_string())
        );
    }

    #[test]
    fn test_extension_matches() {
        let pattern = PathPattern::parse("*.csproj");
        assert!(pattern.matches("Api.csproj"));
        assert!(pattern.matches("src/Api/Api.csproj"));
        assert!(!pattern.matches("Api.csproj.user"));
    }

    #[test]
    fn test_nested_matches_on_component_boundary() {
        let pattern = PathPattern::parse("src/main/java");
        assert!(pattern.matches("src/main/java"));
        assert!(pattern.matches("service/src/main/java"));
        assert!(!pattern.matches("xsrc/main/java"));
        assert!(!pattern.matches("src/main/java/com"));
    }

    #[test]
    fn test_name_matches_basename() {
        let pattern = PathPattern::parse("pom.xml");
        assert!(pattern.matches("pom.xml"));
        assert!(pattern.matches("module/pom.xml"));
        assert!(!pattern.matches("pom.xml.bak"));
        assert!(!pattern.matches("mypom.xml"));
    }

    #[test]
    fn test_display_round_trips_source() {
        for source in ["*.py", "config/application.rb", "Gemfile"] {
            assert_eq!(PathPattern::parse(source).to_string(), source);
        }
    }
}
