//! A formatter that needs no Go toolchain.
//!
//! Generated code is already laid out the way gofmt would lay it out, so this
//! only has to catch broken output and tidy whitespace.

use copygen_codegen::language::{FormatError, SourceFormatter};

/// Checks delimiter balance and normalizes whitespace.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinFormatter;

impl SourceFormatter for BuiltinFormatter {
    fn name(&self) -> &'static str {
        "builtin"
    }

    fn format(&self, source: &[u8]) -> Result<Vec<u8>, FormatError> {
        let text = std::str::from_utf8(source).map_err(|e| FormatError::Syntax {
            line: line_of(source, e.valid_up_to()),
            message: "source is not valid UTF-8".to_string(),
        })?;
        check_delimiters(text)?;
        Ok(normalize(text).into_bytes())
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Lexer {
    Code,
    LineComment,
    BlockComment,
    Str,
    RawStr,
    Rune,
}

/// Ensure every `(`, `[` and `{` outside comments and literals is closed in order.
fn check_delimiters(text: &str) -> Result<(), FormatError> {
    let mut stack: Vec<(char, usize)> = Vec::new();
    let mut state = Lexer::Code;
    let mut line = 1;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\n' {
            if matches!(state, Lexer::Str | Lexer::Rune) {
                return Err(FormatError::Syntax {
                    line,
                    message: "newline in literal".to_string(),
                });
            }
            if state == Lexer::LineComment {
                state = Lexer::Code;
            }
            line += 1;
            continue;
        }

        match state {
            Lexer::Code => match c {
                '/' if chars.peek() == Some(&'/') => {
                    chars.next();
                    state = Lexer::LineComment;
                }
                '/' if chars.peek() == Some(&'*') => {
                    chars.next();
                    state = Lexer::BlockComment;
                }
                '"' => state = Lexer::Str,
                '`' => state = Lexer::RawStr,
                '\'' => state = Lexer::Rune,
                '(' | '[' | '{' => stack.push((c, line)),
                ')' | ']' | '}' => {
                    let expected = match c {
                        ')' => '(',
                        ']' => '[',
                        _ => '{',
                    };
                    match stack.pop() {
                        Some((open, _)) if open == expected => {}
                        Some((open, opened_at)) => {
                            return Err(FormatError::Syntax {
                                line,
                                message: format!(
                                    "'{}' does not close '{}' opened on line {}",
                                    c, open, opened_at
                                ),
                            });
                        }
                        None => {
                            return Err(FormatError::Syntax {
                                line,
                                message: format!("unexpected '{}'", c),
                            });
                        }
                    }
                }
                _ => {}
            },
            Lexer::LineComment => {}
            Lexer::BlockComment => {
                if c == '*' && chars.peek() == Some(&'/') {
                    chars.next();
                    state = Lexer::Code;
                }
            }
            Lexer::Str | Lexer::Rune => {
                let close = if state == Lexer::Str { '"' } else { '\'' };
                if c == '\\' {
                    chars.next();
                } else if c == close {
                    state = Lexer::Code;
                }
            }
            Lexer::RawStr => {
                if c == '`' {
                    state = Lexer::Code;
                }
            }
        }
    }

    if let Some((open, opened_at)) = stack.pop() {
        return Err(FormatError::Syntax {
            line: opened_at,
            message: format!("'{}' is never closed", open),
        });
    }
    match state {
        Lexer::Code | Lexer::LineComment => Ok(()),
        _ => Err(FormatError::Syntax {
            line,
            message: "unterminated comment or literal".to_string(),
        }),
    }
}

/// Trim trailing whitespace, collapse blank lines and end with one newline.
fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_blank = false;

    for line in text.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            pending_blank = !out.is_empty();
            continue;
        }
        if pending_blank {
            out.push('\n');
            pending_blank = false;
        }
        out.push_str(line);
        out.push('\n');
    }

    out
}

fn line_of(source: &[u8], offset: usize) -> usize {
    source[..offset].iter().filter(|b| **b == b'\n').count() + 1
}
