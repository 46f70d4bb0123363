//! Error formatting for signature and contract failures.
//!
//! This module provides:
//! - ANSI color support with TTY auto-detection left to the caller
//! - Levenshtein distance for "did you mean?" suggestions
//! - Signature snippets with a caret under the offending span
//! - First-person messages for every construction and contract error

use crate::ast::{SourceMap, Span};
use crate::check::ContractError;
use crate::parser::SignatureError;
use crate::types::Signature;

/// ANSI color codes for terminal output
#[derive(Debug, Clone)]
pub struct Colors {
    pub enabled: bool,
}

impl Colors {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn red(&self) -> &'static str {
        if self.enabled { "\x1b[31m" } else { "" }
    }

    pub fn cyan(&self) -> &'static str {
        if self.enabled { "\x1b[36m" } else { "" }
    }

    pub fn bold(&self) -> &'static str {
        if self.enabled { "\x1b[1m" } else { "" }
    }

    pub fn reset(&self) -> &'static str {
        if self.enabled { "\x1b[0m" } else { "" }
    }
}

impl Default for Colors {
    fn default() -> Self {
        Self::new(false)
    }
}

/// Configuration for error display
#[derive(Debug, Clone)]
pub struct ErrorConfig {
    pub colors: Colors,
    /// Where the signature came from, e.g. the name of the signed function
    pub label: Option<String>,
}

impl ErrorConfig {
    pub fn new(use_color: bool) -> Self {
        Self {
            colors: Colors::new(use_color),
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl Default for ErrorConfig {
    fn default() -> Self {
        Self::new(false)
    }
}

// ============================================================================
// Levenshtein Distance for "Did you mean?" suggestions
// ============================================================================

/// Compute the Levenshtein edit distance between two strings.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Find similar names from a list of candidates.
///
/// Returns up to 3 suggestions within the given max edit distance,
/// sorted by distance (closest first).
pub fn find_similar<'a>(
    name: &str,
    candidates: impl IntoIterator<Item = &'a str>,
    max_distance: usize,
) -> Vec<String> {
    let mut suggestions: Vec<(String, usize)> = candidates
        .into_iter()
        .filter_map(|c| {
            let dist = levenshtein_distance(name, c);
            if dist > 0 && dist <= max_distance {
                Some((c.to_string(), dist))
            } else {
                None
            }
        })
        .collect();

    suggestions.sort_by(|(a, da), (b, db)| da.cmp(db).then_with(|| a.cmp(b)));
    suggestions.into_iter().map(|(s, _)| s).take(3).collect()
}

// ============================================================================
// Snippet Formatting
// ============================================================================

/// Format a signature line with a caret/underline under `span`.
///
/// ```text
/// 1 | Ord a => [a] -> a
///              ^^^
/// ```
pub fn format_snippet(source_map: &SourceMap, span: &Span, colors: &Colors) -> String {
    let loc = source_map.locate(span);
    let line_text = source_map.line(loc.start.line).unwrap_or("");
    let gutter = format!("{}", loc.start.line);

    let mut out = String::new();
    out.push_str(&format!(
        "{}{} |{} {}\n",
        colors.cyan(),
        gutter,
        colors.reset(),
        line_text
    ));

    let padding = " ".repeat(gutter.len() + 3 + loc.start.column - 1);
    let underline = if loc.start.line == loc.end.line {
        "^".repeat((loc.end.column.saturating_sub(loc.start.column)).max(1))
    } else {
        "^".to_string()
    };

    out.push_str(&format!(
        "{}{}{}{}",
        padding,
        colors.red(),
        underline,
        colors.reset()
    ));
    out
}

/// Format the "did you mean?" hint.
pub fn format_suggestions(suggestions: &[String], colors: &Colors) -> String {
    if suggestions.is_empty() {
        return String::new();
    }

    if suggestions.len() == 1 {
        format!(
            "\n\nDid you mean {}{}{}?",
            colors.bold(),
            suggestions[0],
            colors.reset()
        )
    } else {
        let formatted: Vec<String> = suggestions
            .iter()
            .map(|s| format!("{}{}{}", colors.bold(), s, colors.reset()))
            .collect();
        format!("\n\nDid you mean one of: {}?", formatted.join(", "))
    }
}

/// Format the error header line.
///
/// Example: "-- CONTRACT ERROR ------------------------------------------"
pub fn format_header(error_kind: &str, colors: &Colors) -> String {
    let dashes = "-".repeat(60usize.saturating_sub(error_kind.len() + 4));
    format!(
        "{}-- {} {}{}",
        colors.cyan(),
        error_kind,
        dashes,
        colors.reset()
    )
}

/// Format the location line, e.g. "parse_header:1:10"
pub fn format_location(label: Option<&str>, span: &Span, source_map: &SourceMap, colors: &Colors) -> String {
    let pos = source_map.position(span.start);
    format!(
        "{}{}:{}{}",
        colors.bold(),
        label.unwrap_or("<signature>"),
        pos,
        colors.reset()
    )
}

fn format_report(
    header: &str,
    source_map: &SourceMap,
    span: &Span,
    message: &str,
    hint: &str,
    config: &ErrorConfig,
) -> String {
    let colors = &config.colors;
    let mut out = String::new();
    out.push_str(&format_header(header, colors));
    out.push_str("\n\n");
    out.push_str(&format_location(config.label.as_deref(), span, source_map, colors));
    out.push_str("\n\n");
    out.push_str(&format_snippet(source_map, span, colors));
    out.push_str("\n\n");
    out.push_str(message);
    out.push_str(hint);
    out.push('\n');
    out
}

// ============================================================================
// Signature Errors
// ============================================================================

/// Render a construction-time error against the signature text it came from
pub fn format_signature_error(err: &SignatureError, source: &str, config: &ErrorConfig) -> String {
    let colors = &config.colors;
    let source_map = SourceMap::new(source);

    let (header, message, hint) = match err {
        SignatureError::EmptyTypeList { .. } => (
            "SIGNATURE ERROR",
            "I was expecting a list of types here, but found nothing.".to_string(),
            "\n\nHint: a signature needs at least a parameter and a return type, like `a -> a`, or `() -> t` for no parameters.".to_string(),
        ),
        SignatureError::InvalidCharacter { ch, block, .. } => (
            "SIGNATURE ERROR",
            format!("I found the character {:?} in the {}, where it is not allowed.", ch, block),
            String::new(),
        ),
        SignatureError::MalformedBrackets { .. } => (
            "SIGNATURE ERROR",
            "These brackets do not line up.".to_string(),
            "\n\nHint: array types wrap a single name, like `[[number]]`; arrows cannot appear inside brackets.".to_string(),
        ),
        SignatureError::MalformedArrow { .. } => (
            "SIGNATURE ERROR",
            "I was expecting an arrow `->` here.".to_string(),
            String::new(),
        ),
        SignatureError::MalformedUnit { .. } => (
            "SIGNATURE ERROR",
            "Parentheses are only allowed as `()`.".to_string(),
            String::new(),
        ),
        SignatureError::MisplacedUnit { .. } => (
            "SIGNATURE ERROR",
            "`()` can only stand for the parameters of a zero-argument function.".to_string(),
            "\n\nHint: write `() -> t` for a function that takes no arguments.".to_string(),
        ),
        SignatureError::UnexpectedToken { expected, found, .. } => (
            "SIGNATURE ERROR",
            format!("I was expecting {} but found {} instead.", expected, found),
            String::new(),
        ),
        SignatureError::TooFewTypes { found, .. } => (
            "SIGNATURE ERROR",
            format!("I found {} type(s), but a signature needs at least two separated by `->`.", found),
            String::new(),
        ),
        SignatureError::MalformedConstraint { clause, .. } => (
            "SIGNATURE ERROR",
            format!("I could not read the class constraint `{}`.", clause),
            "\n\nHint: each constraint is a class name and a type variable, like `Ord a`.".to_string(),
        ),
        SignatureError::UnknownClass {
            name, suggestions, ..
        } => (
            "NAME ERROR",
            format!("I cannot find a type class named `{}`.", name),
            format_suggestions(suggestions, colors),
        ),
    };

    format_report(header, &source_map, err.span(), &message, &hint, config)
}

// ============================================================================
// Contract Errors
// ============================================================================

/// Name a position in the type list: parameters, then the return value
fn describe_position(signature: &Signature, position: usize) -> String {
    if position == signature.arity() {
        "the return value".to_string()
    } else {
        format!("argument {}", position + 1)
    }
}

/// Render a call-time error, pointing at the type it concerns
pub fn format_contract_error(err: &ContractError, signature: &Signature, config: &ErrorConfig) -> String {
    let whole = Span::new(0, signature.source().len());
    let span = match err {
        ContractError::UnknownClass { class, .. } => signature.class_span(class),
        _ => err.position().and_then(|p| signature.type_span(p)),
    }
    .cloned()
    .unwrap_or(whole);

    let message = match err {
        ContractError::ArityMismatch { expected, found } => format!(
            "I was expecting {} value(s) for this signature, but got {}.",
            expected, found
        ),
        ContractError::TypeMismatch {
            position,
            expected,
            found,
        } => format!(
            "The type of {} is wrong.\n\n\
             The signature expects:  {}\n\
             But the value is:       {}",
            describe_position(signature, *position),
            expected,
            found
        ),
        ContractError::DepthMismatch {
            var,
            position,
            expected,
            found,
        } => format!(
            "I cannot bind `{}` here: {} should be {} levels of array, but it is `{}`.",
            var,
            describe_position(signature, *position),
            expected.depth,
            found
        ),
        ContractError::InconsistentTypeVariable {
            var,
            first,
            first_position,
            second,
            second_position,
        } => format!(
            "Type variable `{}` must stand for one type.\n\n\
             At {} it is:  {}\n\
             At {} it is:  {}",
            var,
            describe_position(signature, *first_position),
            first,
            describe_position(signature, *second_position),
            second
        ),
        ContractError::UnmetConstraint {
            class,
            var,
            position,
        } => format!(
            "The value bound to `{}` at {} is not an instance of `{}`.",
            var,
            describe_position(signature, *position),
            class
        ),
        ContractError::HeterogeneousArray {
            position,
            index,
            expected,
            found,
        } => format!(
            "The elements of {} do not agree: element {} is `{}`, earlier ones are `{}`.",
            describe_position(signature, *position),
            index,
            found,
            expected
        ),
        ContractError::UnknownClass { class, .. } => {
            format!("I cannot find a type class named `{}`.", class)
        }
    };

    format_report(
        "CONTRACT ERROR",
        signature.source_map(),
        &span,
        &message,
        "",
        config,
    )
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levenshtein_identical() {
        assert_eq!(levenshtein_distance("Ord", "Ord"), 0);
    }

    #[test]
    fn test_levenshtein_one_char_diff() {
        assert_eq!(levenshtein_distance("Show", "Shaw"), 1);
        assert_eq!(levenshtein_distance("Show", "Sho"), 1);
        assert_eq!(levenshtein_distance("Show", "Shoow"), 1);
    }

    #[test]
    fn test_levenshtein_empty() {
        assert_eq!(levenshtein_distance("", "Eq"), 2);
        assert_eq!(levenshtein_distance("Eq", ""), 2);
        assert_eq!(levenshtein_distance("", ""), 0);
    }

    #[test]
    fn test_find_similar_typo() {
        let candidates = vec!["Ord", "Eq", "Show", "Num", "Functor"];
        let suggestions = find_similar("Od", candidates, 2);
        assert_eq!(suggestions[0], "Ord");
    }

    #[test]
    fn test_find_similar_no_match() {
        let suggestions = find_similar("Monoid", vec!["Eq", "Ord"], 2);
        assert!(suggestions.is_empty());
    }

    #[test]
    fn test_find_similar_excludes_identical() {
        let suggestions = find_similar("Eq", vec!["Eq", "Eqq"], 2);
        assert_eq!(suggestions, vec!["Eqq".to_string()]);
    }

    #[test]
    fn test_format_header() {
        let header = format_header("CONTRACT ERROR", &Colors::new(false));
        assert!(header.starts_with("-- CONTRACT ERROR --"));
        assert_eq!(header.len(), 60);
    }

    #[test]
    fn test_format_snippet_underlines_span() {
        let map = SourceMap::new("Ord a => [a] -> a");
        let snippet = format_snippet(&map, &Span::new(9, 12), &Colors::new(false));
        assert_eq!(snippet, "1 | Ord a => [a] -> a\n             ^^^");
    }

    #[test]
    fn test_format_suggestions() {
        let colors = Colors::new(false);
        assert!(format_suggestions(&[], &colors).is_empty());
        assert!(format_suggestions(&["Ord".to_string()], &colors).contains("Did you mean Ord?"));
        let many = format_suggestions(&["Eq".to_string(), "Ord".to_string()], &colors);
        assert!(many.contains("one of: Eq, Ord"));
    }

    #[test]
    fn test_colors_disabled_by_default() {
        let config = ErrorConfig::default();
        assert_eq!(config.colors.red(), "");
        assert!(ErrorConfig::new(true).colors.red().starts_with('\x1b'));
    }
}
