use std::{ffi::OsString, path::PathBuf};

use clap::{
    Parser,
    builder::{Styles, styling::AnsiColor},
    error::ErrorKind,
};
use tracing::{debug, error};

use crate::{
    ExitStatus, Git,
    options::{
        AccessModifier, ClassName, DEFAULT_CLASS_NAME, DEFAULT_INDENTATION_SIZE,
        DEFAULT_OUTPUT_FILENAME, HashType, Indenting, LineEnding, NamespaceName,
        Options,
    },
};

/// Keys that never take a value.
const FLAGS: [&str; 4] = ["--help", "-h", "--version", "-V"];

fn clap_v3_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Yellow.on_default())
        .usage(AnsiColor::Green.on_default())
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Green.on_default())
}

/// Generates a C# class exposing the current git commit of the working directory.
///
/// Every option can also be given as `key=value` or `/key value`.
#[derive(Parser, Debug)]
#[command(
    name = "git-commit-info",
    about,
    version,
    args_override_self = true,
    styles = clap_v3_styles(),
)]
pub struct Cli {
    /// Namespace wrapping the generated class.
    #[arg(long = "namespace", visible_alias = "ns", value_name = "NAMESPACE")]
    namespace: Option<NamespaceName>,
    /// Name of the generated class.
    #[arg(long = "class", value_name = "CLASS", default_value = DEFAULT_CLASS_NAME)]
    class: ClassName,
    /// File to generate, relative to the working directory.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_OUTPUT_FILENAME)]
    output: PathBuf,
    /// Visibility of the generated class.
    #[arg(long, value_enum, ignore_case = true, default_value_t = AccessModifier::Public)]
    access_modifier: AccessModifier,
    /// Indent with spaces or tabs.
    #[arg(
        long = "indenting",
        visible_alias = "indent",
        value_enum,
        ignore_case = true,
        default_value_t = Indenting::Spaces,
    )]
    indenting: Indenting,
    /// Indent characters per nesting level (0 to 65535), 0 disables indentation.
    #[arg(
        long = "indenting-size",
        visible_alias = "indent-size",
        value_name = "SIZE",
        default_value_t = DEFAULT_INDENTATION_SIZE,
    )]
    indentation_size: u16,
    /// Line terminator of the generated file.
    #[arg(long, value_enum, ignore_case = true, default_value_t = LineEnding::Lf)]
    line_ending: LineEnding,
}

impl Cli {
    /// Parses `args` (including the program name) after [`normalize_args`].
    pub fn try_parse_flat<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(normalize_args(args))
    }
}

impl From<Cli> for Options {
    fn from(cli: Cli) -> Self {
        Self {
            output_filename: cli.output,
            namespace_name: cli.namespace,
            class_name: cli.class,
            access_modifier: cli.access_modifier,
            indenting: cli.indenting,
            indentation_size: cli.indentation_size,
            line_ending: cli.line_ending,
            hash_type: HashType::default(),
        }
    }
}

/// Rewrites the flat `key=value`, `/key value` and `/key=value` spellings into
/// `--key value` form. The first argument is the program name and is kept as is.
///
/// A token directly following a `--key` without `=` is its value and is never
/// rewritten, so `--output /tmp/x.cs` keeps its absolute path.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut args = args.into_iter().map(Into::into);
    let mut normalized: Vec<OsString> = args.next().into_iter().collect();
    let mut value_follows = false;

    for arg in args {
        if std::mem::take(&mut value_follows) {
            normalized.push(arg);
            continue;
        }
        let Some(s) = arg.to_str() else {
            normalized.push(arg);
            continue;
        };

        let rewritten = if s.starts_with('-') {
            s.to_owned()
        } else if let Some(rest) = s.strip_prefix('/').filter(|r| !r.is_empty()) {
            format!("--{rest}")
        } else if let Some((key, value)) = s.split_once('=') {
            format!("--{key}={value}")
        } else {
            // Stray positional, clap reports it.
            s.to_owned()
        };

        value_follows = rewritten.starts_with("--")
            && !rewritten.contains('=')
            && !FLAGS.contains(&rewritten.as_str());
        normalized.push(rewritten.into());
    }

    normalized
}

/// Runs the whole tool for the given process arguments.
pub fn main_with<I, T>(git: &impl Git, args: I) -> ExitStatus
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    match Cli::try_parse_flat(args) {
        Ok(cli) => run(git, cli),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                err.print().ok();
                ExitStatus::Success
            }
            _ => {
                eprintln!("{}", single_line(&err));
                ExitStatus::ConfigValidation
            }
        },
    }
}

/// Flattens clap's report into one line and drops the usage and `--help` hints.
fn single_line(err: &clap::Error) -> String {
    err.render()
        .to_string()
        .lines()
        .map(str::trim)
        .filter(|line| {
            !line.is_empty()
                && !line.starts_with("Usage:")
                && !line.starts_with("For more information")
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn run(git: &impl Git, cli: Cli) -> ExitStatus {
    let options = Options::from(cli);

    match crate::generate(git, &options) {
        Ok(outcome) => {
            debug!(?outcome, output = ?options.output_filename, "done");
            ExitStatus::Success
        }
        Err(err) => {
            let status = ExitStatus::from(&err);
            error!(code = status.code(), "{err}");
            status
        }
    }
}
