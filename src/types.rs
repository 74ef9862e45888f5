use std::path::PathBuf;

/// Where to search for config files.
///
/// Search paths are listed in priority-ascending order: files found in later
/// entries are applied after, and therefore override, earlier ones.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchPath {
    /// Platform config directory (XDG on Linux, ~/Library/Application Support on macOS).
    Platform,
    /// A subdirectory under the user's home directory, e.g. `Home(".myapp")`.
    Home(&'static str),
    /// Current working directory.
    Cwd,
    /// An explicit directory.
    Path(PathBuf),
}
