//! Ordered set of scanners consulted by the extraction pipeline.

use std::path::Path;
use std::sync::Arc;

use super::scanners::{ErbScanner, JsScanner, RubyScanner, Scanner};

/// Scanners in lookup order: the first whose `target` accepts a path wins.
///
/// A registry is a plain value handed to [`super::Extractor::new`]; the
/// built-in list is produced by [`ScannerRegistry::with_defaults`] at the
/// program entry point rather than living in global state.
#[derive(Clone, Default)]
pub struct ScannerRegistry {
    scanners: Vec<Arc<dyn Scanner>>,
}

impl ScannerRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ruby, ERB and JavaScript/TypeScript scanners.
    pub fn with_defaults() -> Self {
        Self {
            scanners: vec![
                Arc::new(RubyScanner),
                Arc::new(ErbScanner),
                Arc::new(JsScanner),
            ],
        }
    }

    /// Register `scanner` ahead of the existing ones.
    pub fn add(&mut self, scanner: Arc<dyn Scanner>) {
        self.scanners.insert(0, scanner);
    }

    pub fn find(&self, path: &Path) -> Option<&Arc<dyn Scanner>> {
        self.scanners.iter().find(|scanner| scanner.target(path))
    }

    pub fn len(&self) -> usize {
        self.scanners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scanners.is_empty()
    }
}

impl std::fmt::Debug for ScannerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.scanners.iter().map(|s| s.name()))
            .finish()
    }
}
