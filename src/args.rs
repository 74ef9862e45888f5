//! Minimal command-line tokenizer.
//!
//! Splits an argument vector into short options, long options and
//! positionals, without knowing anything about the schema:
//!
//! - `--` ends option parsing; everything after it is positional.
//! - `--name=value` and `--name value` set a long value; the second form only
//!   when the next token does not start with `-`. Otherwise `--name` is a bare
//!   boolean flag.
//! - `-abc` sets `a` and `b` as flags; the last character `c` takes the next
//!   token as its value under the same rule, or is a flag too.
//! - Anything else, including a lone `-`, is positional.
//!
//! Later occurrences of an option replace earlier ones.

use std::collections::{BTreeMap, BTreeSet};
use std::ffi::OsString;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArgs {
    short_flags: BTreeSet<char>,
    short_values: BTreeMap<char, String>,
    long_flags: BTreeSet<String>,
    long_values: BTreeMap<String, String>,
    positionals: Vec<String>,
}

impl ParsedArgs {
    /// Tokenize the arguments following the program name.
    pub fn parse<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut parsed = Self::default();
        let mut tokens = args.into_iter().map(Into::into).peekable();

        while let Some(token) = tokens.next() {
            if token == "--" {
                parsed.positionals.extend(tokens.by_ref());
                break;
            }

            if let Some(name) = token.strip_prefix("--") {
                if let Some((name, value)) = name.split_once('=') {
                    parsed.set_long_value(name, value.to_string());
                } else if let Some(value) = tokens.next_if(|next| !next.starts_with('-')) {
                    parsed.set_long_value(name, value);
                } else {
                    parsed.set_long_flag(name);
                }
                continue;
            }

            match token.strip_prefix('-') {
                Some(cluster) if !cluster.is_empty() => {
                    let mut chars = cluster.chars().peekable();
                    while let Some(c) = chars.next() {
                        let is_last = chars.peek().is_none();
                        if is_last
                            && let Some(value) = tokens.next_if(|next| !next.starts_with('-'))
                        {
                            parsed.set_short_value(c, value);
                        } else {
                            parsed.set_short_flag(c);
                        }
                    }
                }
                _ => parsed.positionals.push(token),
            }
        }

        parsed
    }

    /// Tokenize the current process arguments, skipping the program name.
    pub fn from_env() -> Self {
        Self::parse_os(std::env::args_os().skip(1))
    }

    /// Tokenize raw OS arguments. Invalid UTF-8 is replaced, not rejected.
    pub fn parse_os<I>(args: I) -> Self
    where
        I: IntoIterator<Item = OsString>,
    {
        Self::parse(
            args.into_iter()
                .map(|arg| arg.to_string_lossy().into_owned()),
        )
    }

    fn set_short_flag(&mut self, c: char) {
        self.short_values.remove(&c);
        self.short_flags.insert(c);
    }

    fn set_short_value(&mut self, c: char, value: String) {
        self.short_flags.remove(&c);
        self.short_values.insert(c, value);
    }

    fn set_long_flag(&mut self, name: &str) {
        self.long_values.remove(name);
        self.long_flags.insert(name.to_string());
    }

    fn set_long_value(&mut self, name: &str, value: String) {
        self.long_flags.remove(name);
        self.long_values.insert(name.to_string(), value);
    }

    /// `-c` given without a value.
    pub fn short_flag(&self, c: char) -> bool {
        self.short_flags.contains(&c)
    }

    pub fn short_value(&self, c: char) -> Option<&str> {
        self.short_values.get(&c).map(String::as_str)
    }

    /// `--name` given without a value.
    pub fn long_flag(&self, name: &str) -> bool {
        self.long_flags.contains(name)
    }

    pub fn long_value(&self, name: &str) -> Option<&str> {
        self.long_values.get(name).map(String::as_str)
    }

    /// Whether `-c` appears at all, with or without a value.
    pub fn has_short(&self, c: char) -> bool {
        self.short_flag(c) || self.short_values.contains_key(&c)
    }

    /// Whether `--name` appears at all, with or without a value.
    pub fn has_long(&self, name: &str) -> bool {
        self.long_flag(name) || self.long_values.contains_key(name)
    }

    pub fn positionals(&self) -> &[String] {
        &self.positionals
    }

    /// True when `-h` or `--help` was given.
    pub fn help_requested(&self) -> bool {
        self.has_short('h') || self.has_long("help")
    }
}
