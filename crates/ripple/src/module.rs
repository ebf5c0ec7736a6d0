//! Module loading contract

use indexmap::IndexMap;

use crate::Value;

/// Exported bindings of a module, in export order.
pub type Exports = IndexMap<String, Value>;

/// Resolves an `import` source to the module's exported bindings.
///
/// Resolution, caching, and package management are the loader's business;
/// the evaluator only asks for the bindings.
pub trait ModuleLoader {
    /// Load the module at `path`.
    fn load(&self, path: &str) -> anyhow::Result<Exports>;
}

/// In-memory module registry.
#[derive(Debug, Clone, Default)]
pub struct StaticModuleLoader {
    modules: IndexMap<String, Exports>,
}

impl StaticModuleLoader {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a module under `path`, replacing any previous one.
    pub fn register(&mut self, path: impl Into<String>, exports: Exports) {
        self.modules.insert(path.into(), exports);
    }

    /// Builder form of [`register`](Self::register).
    pub fn with_module(
        mut self,
        path: impl Into<String>,
        exports: impl IntoIterator<Item = (String, Value)>,
    ) -> Self {
        self.register(path, exports.into_iter().collect());
        self
    }
}

impl ModuleLoader for StaticModuleLoader {
    fn load(&self, path: &str) -> anyhow::Result<Exports> {
        tracing::debug!(path, "loading module");
        self.modules
            .get(path)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no module registered at `{}`", path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_loader() {
        let loader = StaticModuleLoader::new()
            .with_module("math", vec![("ratio".to_string(), Value::Number(2.5))]);
        let exports = loader.load("math").unwrap();
        assert_eq!(exports.get("ratio"), Some(&Value::Number(2.5)));
    }

    #[test]
    fn test_missing_module() {
        let loader = StaticModuleLoader::new();
        let err = loader.load("nowhere").unwrap_err();
        assert_eq!(err.to_string(), "no module registered at `nowhere`");
    }
}
