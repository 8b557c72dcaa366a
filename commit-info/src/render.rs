//! Turns [`Options`] and a [`CommitRecord`] into the text of the generated C# file.
//!
//! The output is a pure function of its inputs, which is what lets the writer skip
//! rewriting an unchanged file. The comment text and member order below are part of
//! the generated file's contract, consumers diff against them.

use std::borrow::Cow;

use crate::{options::Options, record::CommitRecord};

const CLASS_SUMMARY: &str =
    "Stores the git information of the current HEAD of your local repository.";
const INSTANCE_SUMMARY: &str = "Gets an instance of the git commit information.";
const BRANCH_NAME_SUMMARY: &str = "Gets the branch name.";
const SHORT_COMMIT_HASH_SUMMARY: &str = "Gets the short commit hash.";
const LONG_COMMIT_HASH_SUMMARY: &str = "Gets the long commit hash.";
const COMMITTER_DATE_SUMMARY: &str = "Gets the committer date.";

/// Renders the complete generated file.
pub fn render(options: &Options, record: &CommitRecord) -> String {
    let mut w = SourceWriter::new(options);
    let class = options.class_name.as_str();

    if let Some(namespace) = &options.namespace_name {
        w.open(&format!("namespace {namespace}"));
    }

    w.doc_summary(CLASS_SUMMARY);
    w.open(&format!("{} class {class}", options.access_modifier));

    w.doc_summary(INSTANCE_SUMMARY);
    w.line(&format!("public static {class} Instance {{ get; }}"));
    w.blank();
    w.open(&format!("static {class}()"));
    w.line(&format!("Instance = new {class}();"));
    w.close();
    w.blank();

    let properties = [
        (BRANCH_NAME_SUMMARY, "BranchName", &record.branch_name),
        (SHORT_COMMIT_HASH_SUMMARY, "ShortCommitHash", &record.short_hash),
        (LONG_COMMIT_HASH_SUMMARY, "LongCommitHash", &record.long_hash),
        (COMMITTER_DATE_SUMMARY, "CommitterDate", &record.committer_date),
    ];
    for (i, (summary, name, value)) in properties.into_iter().enumerate() {
        if i > 0 {
            w.blank();
        }
        w.doc_summary(summary);
        w.open(&format!("public string {name}"));
        w.line(&format!(
            "get {{ return \"{}\"; }}",
            escape_string_literal(value)
        ));
        w.close();
    }

    // class
    w.close();
    if options.namespace_name.is_some() {
        w.close();
    }

    w.finish()
}

/// Escapes `value` for use inside a regular (non-verbatim) C# string literal.
///
/// Borrows when nothing needs escaping, which is the case for every hash, date and
/// sane branch name.
pub fn escape_string_literal(value: &str) -> Cow<'_, str> {
    if !value.chars().any(needs_escape) {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\0' => escaped.push_str("\\0"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            c if needs_escape(c) => {
                escaped.push_str(&format!("\\u{:04x}", u32::from(c)));
            }
            c => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

fn needs_escape(c: char) -> bool {
    // U+2028 and U+2029 terminate lines in C# source.
    matches!(c, '\\' | '"' | '\u{2028}' | '\u{2029}') || c.is_control()
}

/// Appends indented, terminated lines and tracks the nesting depth.
struct SourceWriter<'a> {
    options: &'a Options,
    depth: usize,
    out: String,
}

impl<'a> SourceWriter<'a> {
    fn new(options: &'a Options) -> Self {
        Self {
            options,
            depth: 0,
            out: String::new(),
        }
    }

    fn line(&mut self, text: &str) {
        let width = usize::from(self.options.indentation_size).saturating_mul(self.depth);
        self.out
            .extend(std::iter::repeat_n(self.options.indenting.as_char(), width));
        self.out.push_str(text);
        self.out.push_str(self.options.line_ending.as_str());
    }

    /// Just the line ending, never indented.
    fn blank(&mut self) {
        self.out.push_str(self.options.line_ending.as_str());
    }

    fn doc_summary(&mut self, summary: &str) {
        self.line("/// <summary>");
        self.line(&format!("/// {summary}"));
        self.line("/// </summary>");
    }

    /// Emits `header` and an opening brace, then nests one level deeper.
    fn open(&mut self, header: &str) {
        self.line(header);
        self.line("{");
        self.depth += 1;
    }

    fn close(&mut self) {
        self.depth -= 1;
        self.line("}");
    }

    fn finish(self) -> String {
        debug_assert_eq!(self.depth, 0, "unbalanced blocks");
        self.out
    }
}
