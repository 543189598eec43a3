//! Command scripts.
//!
//! One command per line, `<n> <command> <args...>`. The leading line
//! number is informational and dropped. Blank lines and lines starting
//! with `*` are comments. Double quotes group words into one token:
//!
//! ```text
//! 1 insertaPersona alumno 12345678Z "Ruiz Gil, Ana" 3/4/1999 1/9/2017
//! ```

use std::fs;
use std::path::Path;

use crate::error::ScriptError;

/// One command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLine {
    /// 1-based line number in the file.
    pub number: usize,
    /// Raw line, trimmed.
    pub text: String,
    /// Command name and arguments.
    pub tokens: Vec<String>,
}

/// A parsed command script.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    pub lines: Vec<ScriptLine>,
}

impl Script {
    /// Parses script text.
    pub fn parse(text: &str) -> Self {
        let lines = text
            .lines()
            .enumerate()
            .filter_map(|(n, line)| {
                let trimmed = line.trim();
                if trimmed.is_empty() || trimmed.starts_with('*') {
                    return None;
                }
                let tokens = tokenize(trimmed).into_iter().skip(1).collect();
                Some(ScriptLine {
                    number: n + 1,
                    text: trimmed.to_string(),
                    tokens,
                })
            })
            .collect();
        Self { lines }
    }

    /// Reads and parses a script file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&text))
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Splits a line into tokens. A token opening with `"` runs to the next
/// `"` (or the end of the line); quote characters are removed.
pub fn tokenize(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut chars = line.chars().peekable();
    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }
        let mut token = String::new();
        if c == '"' {
            chars.next();
            for c in chars.by_ref() {
                if c == '"' {
                    break;
                }
                token.push(c);
            }
        } else {
            while let Some(&c) = chars.peek() {
                if c.is_whitespace() {
                    break;
                }
                if c != '"' {
                    token.push(c);
                }
                chars.next();
            }
        }
        tokens.push(token);
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_tokenize_quotes() {
        assert_eq!(
            tokenize(r#"1 insertaPersona alumno 12345678Z "Ruiz Gil, Ana" 3/4/1999"#),
            vec!["1", "insertaPersona", "alumno", "12345678Z", "Ruiz Gil, Ana", "3/4/1999"]
        );
        assert_eq!(tokenize("  a   b\tc "), vec!["a", "b", "c"]);
        assert_eq!(tokenize(r#""unterminated quote"#), vec!["unterminated quote"]);
        assert_eq!(tokenize(r#"x"y"#), vec!["xy"]);
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_parse_skips_comments() {
        let script = Script::parse(
            "* header comment\n\n1 matricula 12345678Z PROG\n   \n\
             *2 matricula x y\n3 ocupacionAula *\n",
        );
        assert_eq!(script.len(), 2);
        assert_eq!(script.lines[0].number, 3);
        assert_eq!(script.lines[0].tokens, vec!["matricula", "12345678Z", "PROG"]);
        assert_eq!(script.lines[1].tokens, vec!["ocupacionAula", "*"]);
        assert_eq!(script.lines[1].text, "3 ocupacionAula *");
    }

    #[test]
    fn test_line_number_only() {
        let script = Script::parse("7\n");
        assert_eq!(script.len(), 1);
        assert!(script.lines[0].tokens.is_empty());
    }

    #[test]
    fn test_load() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "1 expediente 12345678Z out.txt").unwrap();
        let script = Script::load(file.path()).unwrap();
        assert_eq!(script.lines[0].tokens[0], "expediente");

        assert!(matches!(
            Script::load("/nonexistent/ejecucion.txt"),
            Err(ScriptError::Io { .. })
        ));
    }
}
