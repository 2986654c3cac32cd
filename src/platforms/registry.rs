use super::PlatformRules;
use crate::fs::DEFAULT_EXCLUDED_DIRS;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Registry of platform rule tables, iterated in registration order
#[derive(Debug, Clone)]
pub struct PlatformRegistry {
    platforms: Vec<Arc<PlatformRules>>,
}

impl PlatformRegistry {
    pub fn new() -> Self {
        Self {
            platforms: Vec::new(),
        }
    }

    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(super::java());
        registry.register(super::nodejs());
        registry.register(super::python());
        registry.register(super::dotnet());
        registry.register(super::go());
        registry.register(super::rust());
        registry.register(super::php());
        registry.register(super::ruby());
        registry
    }

    /// Add a platform; a table with an already registered id replaces it in place
    pub fn register(&mut self, rules: PlatformRules) {
        let rules = Arc::new(rules);
        match self.platforms.iter_mut().find(|p| p.id == rules.id) {
            Some(existing) => *existing = rules,
            None => self.platforms.push(rules),
        }
    }

    /// Look up a platform by id or display name, ignoring case
    pub fn get(&self, name: &str) -> Option<&Arc<PlatformRules>> {
        self.platforms
            .iter()
            .find(|p| p.id.eq_ignore_ascii_case(name) || p.name.eq_ignore_ascii_case(name))
    }

    pub fn platforms(&self) -> &[Arc<PlatformRules>] {
        &self.platforms
    }

    pub fn platform_names(&self) -> Vec<&str> {
        self.platforms.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.platforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }

    /// Directories pruned from tree walks: the common vendor/build set plus
    /// every platform's own cache directories
    pub fn all_excluded_dirs(&self) -> Vec<String> {
        let mut set: BTreeSet<String> = DEFAULT_EXCLUDED_DIRS.iter().map(|d| d.to_string()).collect();
        for platform in &self.platforms {
            set.extend(platform.excluded_dirs.iter().cloned());
        }
        set.into_iter().collect()
    }
}

impl Default for PlatformRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_creation() {
        let registry = PlatformRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.platform_names().is_empty());
    }

    #[test]
    fn test_registry_with_defaults_order() {
        let registry = PlatformRegistry::with_defaults();
        assert_eq!(
            registry.platform_names(),
            vec!["Java", "Node.js", "Python", ".NET", "Go", "Rust", "PHP", "Ruby"]
        );
    }

    #[test]
    fn test_get_by_id_or_name() {
        let registry = PlatformRegistry::with_defaults();
        assert_eq!(registry.get("nodejs").unwrap().name, "Node.js");
        assert_eq!(registry.get("node.js").unwrap().id, "nodejs");
        assert_eq!(registry.get("DOTNET").unwrap().name, ".NET");
        assert!(registry.get("cobol").is_none());
    }

    #[test]
    fn test_register_replaces_same_id() {
        let mut registry = PlatformRegistry::with_defaults();
        let before = registry.len();

        let custom = PlatformRules::builder("go", "Go")
            .primary(&["go.mod"])
            .build()
            .unwrap();
        registry.register(custom);

        assert_eq!(registry.len(), before);
        assert!(registry.get("go").unwrap().frameworks.is_empty());
        assert_eq!(registry.platform_names()[4], "Go");
    }

    #[test]
    fn test_all_excluded_dirs() {
        let registry = PlatformRegistry::with_defaults();
        let excluded = registry.all_excluded_dirs();

        assert!(excluded.contains(&".git".to_string()));
        assert!(excluded.contains(&"node_modules".to_string()));
        assert!(excluded.contains(&"__pycache__".to_string()));
        assert!(excluded.contains(&".gradle".to_string()));

        assert!(!excluded.contains(&"src".to_string()));
        assert!(!excluded.contains(&"packages".to_string()));
    }
}
