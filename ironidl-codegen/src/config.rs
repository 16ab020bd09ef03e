//! Generator configuration.

use std::path::PathBuf;

/// Options controlling a generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Fail the unit when any diagnostic is reported.
    pub strict: bool,
    /// Extension of the emitted files, without the dot.
    pub extension: String,
    /// Directory holding template overrides (`<name>.rs.tpl`).
    pub template_dir: Option<PathBuf>,
    /// Emit units in parallel once the registry is built.
    pub parallel: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            strict: false,
            extension: "rs".to_string(),
            template_dir: None,
            parallel: true,
        }
    }
}

impl GeneratorConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets strict mode.
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Sets the output file extension. A leading dot is ignored.
    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    /// Sets the template override directory.
    #[must_use]
    pub fn with_template_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.template_dir = Some(dir.into());
        self
    }

    /// Enables or disables parallel emission.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}
