//! The fully validated configuration of a single run.

use std::{
    fmt,
    path::PathBuf,
    str::FromStr,
    sync::LazyLock,
};

use clap::ValueEnum;
use derive_more::Display;
use regex::Regex;
use thiserror::Error;

/// Used when no `output` is given.
pub const DEFAULT_OUTPUT_FILENAME: &str = "GitCommitInfo.cs";
/// Used when no `class` is given.
pub const DEFAULT_CLASS_NAME: &str = "GitCommitInfo";
pub const DEFAULT_INDENTATION_SIZE: u16 = 4;

static NAMESPACE_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_.]*$").unwrap());
static CLASS_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdentifierErr {
    #[error("'{0}' is not a valid C# namespace name (expected {re})", re = NAMESPACE_NAME_RE.as_str())]
    Namespace(String),
    #[error("'{0}' is not a valid C# class name (expected {re})", re = CLASS_NAME_RE.as_str())]
    Class(String),
}

/// A dotted namespace path such as `Foo.Bar`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceName(String);

impl NamespaceName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for NamespaceName {
    type Err = IdentifierErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if NAMESPACE_NAME_RE.is_match(s) {
            Ok(Self(s.to_owned()))
        } else {
            Err(IdentifierErr::Namespace(s.to_owned()))
        }
    }
}

impl fmt::Display for NamespaceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The name of the generated class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassName(String);

impl ClassName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ClassName {
    fn default() -> Self {
        Self(DEFAULT_CLASS_NAME.to_owned())
    }
}

impl FromStr for ClassName {
    type Err = IdentifierErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if CLASS_NAME_RE.is_match(s) {
            Ok(Self(s.to_owned()))
        } else {
            Err(IdentifierErr::Class(s.to_owned()))
        }
    }
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Visibility of the generated class. Displays as the C# keyword.
#[derive(Display, Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum AccessModifier {
    #[default]
    #[display("public")]
    Public,
    #[display("internal")]
    Internal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Indenting {
    #[default]
    #[value(alias = "space")]
    Spaces,
    #[value(alias = "tab")]
    Tabs,
}

impl Indenting {
    pub fn as_char(self) -> char {
        match self {
            Indenting::Spaces => ' ',
            Indenting::Tabs => '\t',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LineEnding {
    #[value(name = "crlf")]
    CrLf,
    #[default]
    Lf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::CrLf => "\r\n",
            LineEnding::Lf => "\n",
        }
    }
}

/// Which commit hash a consumer prefers.
///
/// Carried for configuration compatibility only. Rendering always emits both the
/// short and the long hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HashType {
    #[default]
    Short,
    Long,
}

/// Everything that shapes the generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Relative paths are anchored at the current working directory.
    pub output_filename: PathBuf,
    pub namespace_name: Option<NamespaceName>,
    pub class_name: ClassName,
    pub access_modifier: AccessModifier,
    pub indenting: Indenting,
    /// Indent characters per nesting level. `0` disables indentation.
    pub indentation_size: u16,
    pub line_ending: LineEnding,
    pub hash_type: HashType,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            output_filename: PathBuf::from(DEFAULT_OUTPUT_FILENAME),
            namespace_name: None,
            class_name: ClassName::default(),
            access_modifier: AccessModifier::default(),
            indenting: Indenting::default(),
            indentation_size: DEFAULT_INDENTATION_SIZE,
            line_ending: LineEnding::default(),
            hash_type: HashType::default(),
        }
    }
}
