//! End-to-end generation: read → scan → resolve → emit.

use std::path::Path;

use crate::config::Config;
use crate::emit::Emitter;
use crate::error::{FrostError, Result};
use crate::model::Declaration;
use crate::resolve::resolve_type_references;
use crate::scan::Scanner;

/// Compiled scanner and emitter for one configuration
pub struct Generator {
    scanner: Scanner,
    emitter: Emitter,
}

impl Generator {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            scanner: Scanner::new(config)?,
            emitter: Emitter::new(&config.output)?,
        })
    }

    /// Scan `source` and resolve type references across all declarations
    pub fn declarations(&self, source: &str) -> Vec<Declaration> {
        let mut declarations = self.scanner.scan(source);
        resolve_type_references(&mut declarations);
        declarations
    }

    /// Generate the header text for `source`; `name` keys the include guard
    pub fn generate(&self, source: &str, name: &str) -> Result<String> {
        let declarations = self.declarations(source);
        self.emitter.render(&declarations, name)
    }

    /// Read `path` and generate its header.
    ///
    /// Failing to read the input is the only hard failure of the pipeline.
    pub fn generate_file<P: AsRef<Path>>(&self, path: P) -> Result<String> {
        let path = path.as_ref();
        let source = read_source(path)?;
        self.generate(&source, &path.to_string_lossy())
    }
}

/// Read an input header
pub fn read_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| FrostError::Read {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENEMY: &str = r#"
namespace Game {
WCLASS()
class Enemy {
    WCLASS_BODY$Enemy();

    WREFRESH()
    void recompute();

    WPROPERTY()
    int health;
};
}
"#;

    #[test]
    fn test_generate_is_deterministic() {
        let generator = Generator::new(&Config::default()).unwrap();
        let first = generator.generate(ENEMY, "enemy.hpp").unwrap();
        let second = generator.generate(ENEMY, "enemy.hpp").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_declarations_are_resolved() {
        let source = "WCLASS() class A {\nWENUM() enum Mode { eOn };\nWPROPERTY()\nMode mode;\n};";
        let generator = Generator::new(&Config::default()).unwrap();
        let decls = generator.declarations(source);
        assert_eq!(decls[0].properties[0].ty, "A::Mode");
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let generator = Generator::new(&Config::default()).unwrap();
        let err = generator.generate_file("/nonexistent/input.hpp").unwrap_err();
        assert!(matches!(err, FrostError::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/input.hpp"));
    }
}
