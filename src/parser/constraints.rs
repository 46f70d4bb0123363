//! Constraint block parsing: `Num a, Ord a, Show b`

use crate::ast::{ConstraintClause, Span};

use super::error::{Block, SignatureError, SignatureResult};

fn is_constraint_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c.is_whitespace() || c == ','
}

/// Whitespace-separated words of `text`, with their byte offsets
fn words(text: &str) -> Vec<(usize, &str)> {
    let mut out = Vec::new();
    let mut start = None;
    for (i, c) in text.char_indices() {
        match (c.is_whitespace(), start) {
            (false, None) => start = Some(i),
            (true, Some(s)) => {
                out.push((s, &text[s..i]));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        out.push((s, &text[s..]));
    }
    out
}

/// Parse the text before `=>`. `offset` is where that text starts in the
/// full signature.
pub fn parse_constraints(text: &str, offset: usize) -> SignatureResult<Vec<ConstraintClause>> {
    if let Some((i, ch)) = text.char_indices().find(|&(_, c)| !is_constraint_char(c)) {
        return Err(SignatureError::InvalidCharacter {
            ch,
            block: Block::Constraints,
            span: Span::new(offset + i, offset + i + ch.len_utf8()),
        });
    }

    let mut clauses = Vec::new();
    let mut clause_start = offset;
    for raw in text.split(',') {
        let found = words(raw);
        match found.as_slice() {
            [(class_at, class), (var_at, var)] => clauses.push(ConstraintClause {
                class: class.to_string(),
                var: var.to_string(),
                span: Span::new(
                    clause_start + class_at,
                    clause_start + var_at + var.len(),
                ),
            }),
            _ => {
                let span = match (found.first(), found.last()) {
                    (Some((first, _)), Some((last, word))) => {
                        Span::new(clause_start + first, clause_start + last + word.len())
                    }
                    _ => Span::new(clause_start, clause_start + raw.len()),
                };
                return Err(SignatureError::MalformedConstraint {
                    clause: raw.trim().to_string(),
                    span,
                });
            }
        }
        clause_start += raw.len() + 1;
    }

    Ok(clauses)
}
