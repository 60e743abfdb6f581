//! rustyline helper: completes and highlights `:` commands.

use std::borrow::Cow::{self, Borrowed, Owned};

use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};

use crate::commands::COMMAND_NAMES;

#[derive(Clone, Default)]
pub struct CliHelper;

impl CliHelper {
    fn matches(prefix: &str) -> impl Iterator<Item = &'static str> + '_ {
        COMMAND_NAMES
            .iter()
            .copied()
            .filter(move |name| prefix.starts_with(':') && name.starts_with(prefix))
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        if line.contains(char::is_whitespace) {
            return Ok((0, vec![]));
        }
        let candidates = Self::matches(line)
            .map(|name| Pair {
                display: name.to_string(),
                replacement: name.to_string(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with(':') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        if line.contains(char::is_whitespace) {
            return None;
        }
        Self::matches(line)
            .find(|name| name.len() > line.len())
            .map(|name| name[line.len()..].to_string())
    }
}

impl Validator for CliHelper {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_prefix() {
        let found: Vec<_> = CliHelper::matches(":lo").collect();
        assert_eq!(found, vec![":login", ":logout"]);
    }

    #[test]
    fn test_expressions_never_match() {
        assert_eq!(CliHelper::matches("(+ 1").count(), 0);
    }
}
