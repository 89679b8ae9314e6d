//! Run configuration.
//!
//! An explicit [`Config`] value travels into the entry point at call time;
//! there is no process-wide mutable configuration. Defaults can be
//! overridden by a `ccindex.toml` patch file and by the CLI.

use std::fmt::{self, Display, Formatter};
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Declarations longer than this many columns get the wrapped pretty form.
pub const DEFAULT_LINE_WIDTH: usize = 75;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Directory holding the libclang shared library, when it is not on the
    /// loader's default search path.
    pub libclang_dir: Option<PathBuf>,
    /// System root passed to the front end via `-isysroot`.
    pub sysroot: PathBuf,
    /// System include directories, searched before user directories.
    pub system_include_dirs: Vec<PathBuf>,
    /// User include directories; also scope the include-graph output.
    pub include_dirs: Vec<PathBuf>,
    /// Language standard handed to the front end.
    pub std: String,
    /// Wrap threshold for pretty declaration strings.
    pub line_width: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            libclang_dir: None,
            sysroot: PathBuf::from("/"),
            system_include_dirs: Vec::new(),
            include_dirs: Vec::new(),
            std: "c++14".to_string(),
            line_width: DEFAULT_LINE_WIDTH,
        }
    }
}

impl Config {
    /// Load defaults, optionally patched from a TOML file.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(path) = path {
            let text = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
                path: path.to_path_buf(),
                reason: error.to_string(),
            })?;
            let patch: ConfigPatch =
                toml::from_str(&text).map_err(|error| ConfigError::Parse {
                    path: path.to_path_buf(),
                    reason: error.to_string(),
                })?;
            config.apply_patch(patch);
        }
        config.normalize();
        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(v) = patch.libclang_dir {
            self.libclang_dir = Some(v);
        }
        if let Some(v) = patch.sysroot {
            self.sysroot = v;
        }
        if let Some(v) = patch.system_include_dirs {
            self.system_include_dirs = v;
        }
        if let Some(v) = patch.include_dirs {
            self.include_dirs = v;
        }
        if let Some(v) = patch.std {
            self.std = v;
        }
        if let Some(v) = patch.line_width {
            self.line_width = v;
        }
    }

    pub fn normalize(&mut self) {
        self.std = self.std.trim().to_string();
        if self.std.is_empty() {
            self.std = "c++14".to_string();
        }
        self.line_width = self.line_width.max(1);
    }

    /// Verify every include directory exists. All missing paths are
    /// reported together, each marked user-provided or system.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut missing = Vec::new();
        for dir in &self.system_include_dirs {
            if !dir.is_dir() {
                missing.push(MissingIncludeDir { path: dir.clone(), user_provided: false });
            }
        }
        for dir in &self.include_dirs {
            if !dir.is_dir() {
                missing.push(MissingIncludeDir { path: dir.clone(), user_provided: true });
            }
        }
        if missing.is_empty() { Ok(()) } else { Err(ConfigError::IncludeDirsNotFound(missing)) }
    }

    /// Front-end arguments for one parse.
    pub fn clang_args(&self) -> Vec<String> {
        let mut args = vec![
            "-x".to_string(),
            "c++".to_string(),
            format!("--std={}", self.std),
            "-isysroot".to_string(),
            self.sysroot.display().to_string(),
        ];
        for dir in self.system_include_dirs.iter().chain(&self.include_dirs) {
            args.push(format!("-I{}", dir.display()));
        }
        args
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
struct ConfigPatch {
    libclang_dir: Option<PathBuf>,
    sysroot: Option<PathBuf>,
    system_include_dirs: Option<Vec<PathBuf>>,
    include_dirs: Option<Vec<PathBuf>>,
    std: Option<String>,
    line_width: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MissingIncludeDir {
    pub path: PathBuf,
    pub user_provided: bool,
}

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, reason: String },
    Parse { path: PathBuf, reason: String },
    IncludeDirsNotFound(Vec<MissingIncludeDir>),
    /// The front-end shared library is absent or unloadable.
    FrontendLibrary(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, reason } => {
                write!(f, "failed to read config {}: {reason}", path.display())
            }
            Self::Parse { path, reason } => {
                write!(f, "failed to parse config {}: {reason}", path.display())
            }
            Self::IncludeDirsNotFound(missing) => {
                write!(f, "include path{} not found:", if missing.len() > 1 { "s" } else { "" })?;
                for dir in missing {
                    write!(
                        f,
                        "\n\t{} {}",
                        dir.path.display(),
                        if dir.user_provided { "(user provided)" } else { "(system)" }
                    )?;
                }
                Ok(())
            }
            Self::FrontendLibrary(reason) => {
                write!(f, "library path of libclang not usable: {reason}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
#[path = "../tests/src/config_tests.rs"]
mod tests;
