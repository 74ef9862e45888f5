use std::marker::PhantomData;
use std::path::PathBuf;

use crate::args::ParsedArgs;
use crate::env::EnvVars;
use crate::error::OnefigError;
use crate::file;
use crate::help::{self, Help, HelpOptions};
use crate::resolve::{self, ResolveInput};
use crate::schema::Settings;
use crate::template;
use crate::types::SearchPath;

/// Entry point for building a onefig configuration.
pub struct Onefig;

impl Onefig {
    pub fn builder<C: Settings>() -> OnefigBuilder<C> {
        OnefigBuilder::new()
    }
}

/// Builder for configuring and loading layered configuration.
///
/// Sources are applied in ascending priority: compiled defaults, config
/// files (discovered along the search paths, then explicit files), the
/// environment, and finally command-line flags.
pub struct OnefigBuilder<C: Settings> {
    app_name: Option<String>,
    file_name: Option<String>,
    files: Vec<PathBuf>,
    search_paths: Option<Vec<SearchPath>>,
    env_prefix: Option<String>,
    env_enabled: bool,
    env_vars: Option<EnvVars>,
    args: Option<Vec<String>>,
    flags_enabled: bool,
    use_names: bool,
    strict: bool,
    _phantom: PhantomData<C>,
}

impl<C: Settings> OnefigBuilder<C> {
    fn new() -> Self {
        Self {
            app_name: None,
            file_name: None,
            files: Vec::new(),
            search_paths: None,
            env_prefix: None,
            env_enabled: true,
            env_vars: None,
            args: None,
            flags_enabled: true,
            use_names: false,
            strict: false,
            _phantom: PhantomData,
        }
    }

    /// Set the application name. This derives sensible defaults:
    /// - `file_name` → `"{app_name}.toml"`
    /// - `search_paths` → `[SearchPath::Platform]`
    /// - `env_prefix` → `"{APP_NAME}_"` (uppercased, `-` mapped to `_`)
    pub fn app_name(mut self, name: &str) -> Self {
        self.app_name = Some(name.to_string());
        self
    }

    /// Override the config file name searched for (default: `"{app_name}.toml"`).
    pub fn file_name(mut self, name: &str) -> Self {
        self.file_name = Some(name.to_string());
        self
    }

    /// Add an explicit config file. Unlike discovered files it must exist.
    ///
    /// Explicit files are applied after discovered ones, in the order added.
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.push(path.into());
        self
    }

    /// Replace the default search paths entirely.
    ///
    /// Paths are listed in **priority-ascending** order: the last entry has the
    /// highest priority. See [`SearchPath`] for the available variants.
    pub fn search_paths(mut self, paths: Vec<SearchPath>) -> Self {
        self.search_paths = Some(paths);
        self
    }

    /// Append a search path without replacing the defaults.
    pub fn add_search_path(mut self, path: SearchPath) -> Self {
        let defaults = self.default_search_paths();
        self.search_paths.get_or_insert(defaults).push(path);
        self
    }

    /// Override the environment variable prefix, used verbatim
    /// (default: derived from `app_name`, or empty).
    pub fn env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Disable environment variable loading entirely.
    pub fn no_env(mut self) -> Self {
        self.env_enabled = false;
        self
    }

    /// Read variables from `vars` instead of the process environment.
    pub fn env_vars<K, V>(mut self, vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.env_vars = Some(EnvVars::from_pairs(vars));
        self
    }

    /// Tokenize `args` (without the program name) instead of the process arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = Some(args.into_iter().map(Into::into).collect());
        self
    }

    /// Disable command-line flag loading entirely.
    pub fn no_flags(mut self) -> Self {
        self.flags_enabled = false;
        self
    }

    /// Derive env var and long option names from field paths when a field
    /// declares none (default: `false`).
    pub fn use_names(mut self, use_names: bool) -> Self {
        self.use_names = use_names;
        self
    }

    /// Enable or disable strict mode (default: `false`).
    /// In strict mode, unknown keys in config files produce errors.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    fn default_search_paths(&self) -> Vec<SearchPath> {
        if self.app_name.is_some() {
            vec![SearchPath::Platform]
        } else {
            Vec::new()
        }
    }

    /// Resolve the effective file name, if any can be searched for.
    fn effective_file_name(&self) -> Option<String> {
        if let Some(name) = &self.file_name {
            return Some(name.clone());
        }
        let app = self.app_name.as_deref()?;
        Some(format!("{app}.toml"))
    }

    /// Resolve the effective search paths.
    fn effective_search_paths(&self) -> Vec<SearchPath> {
        match &self.search_paths {
            Some(paths) => paths.clone(),
            None => self.default_search_paths(),
        }
    }

    /// Resolve the effective env prefix (None if env disabled).
    fn effective_env_prefix(&self) -> Option<String> {
        if !self.env_enabled {
            return None;
        }
        if let Some(prefix) = &self.env_prefix {
            return Some(prefix.clone());
        }
        let prefix = match &self.app_name {
            Some(app) => format!("{}_", app.to_uppercase().replace('-', "_")),
            None => String::new(),
        };
        Some(prefix)
    }

    /// The tokenized command line the flags source would read (None if flags disabled).
    pub fn parsed_args(&self) -> Option<ParsedArgs> {
        if !self.flags_enabled {
            return None;
        }
        Some(match &self.args {
            Some(args) => ParsedArgs::parse(args.iter().cloned()),
            None => ParsedArgs::from_env(),
        })
    }

    /// Build the `ResolveInput` from current builder state.
    fn build_input(&self) -> Result<ResolveInput, OnefigError> {
        let mut files = match self.effective_file_name() {
            Some(file_name) => file::find_config_files(
                &self.effective_search_paths(),
                &file_name,
                self.app_name.as_deref().unwrap_or_default(),
            )?,
            None => Vec::new(),
        };
        for path in &self.files {
            let content = file::read_required(path)?;
            files.push((path.clone(), content));
        }

        let env_prefix = self.effective_env_prefix();
        let env = match (&env_prefix, &self.env_vars) {
            (None, _) => EnvVars::default(),
            (Some(_), Some(vars)) => vars.clone(),
            (Some(_), None) => EnvVars::from_process(),
        };

        Ok(ResolveInput {
            files,
            env,
            env_prefix,
            args: self.parsed_args(),
            use_names: self.use_names,
            strict: self.strict,
        })
    }

    /// Layer every source onto an existing instance.
    pub fn load_into(&self, config: &mut C) -> Result<(), OnefigError> {
        let input = self.build_input()?;
        resolve::resolve_into(config, &input)
    }

    /// Load and resolve the configuration through all layers.
    pub fn load(self) -> Result<C, OnefigError>
    where
        C: Default,
    {
        let input = self.build_input()?;
        resolve::resolve(&input)
    }

    /// Help listing using this builder's env prefix and naming options.
    pub fn help(&self) -> Result<Help, OnefigError>
    where
        C: Default,
    {
        let prefix = self.effective_env_prefix();
        let mut options = HelpOptions::new(prefix.as_deref().unwrap_or_default(), self.use_names);
        options.show_env = prefix.is_some();
        options.show_short = self.flags_enabled;
        options.show_long = self.flags_enabled;
        help::generate_help(&mut C::default(), &options)
    }

    /// Commented TOML template for the schema.
    pub fn template(&self) -> Result<String, OnefigError>
    where
        C: Default,
    {
        template::generate_template(&mut C::default())
    }
}
