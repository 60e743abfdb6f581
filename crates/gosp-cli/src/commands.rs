//! REPL command parsing
//!
//! Lines starting with `:` are client commands; everything else is an
//! expression for the server.

/// Parsed REPL command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create an account
    Register { username: String, password: String },

    /// Log in; no arguments means an anonymous session
    Login { username: String, password: String },

    Logout,

    /// Fetch and show server-side history
    History,

    Help,

    /// Exit the REPL
    Quit,

    /// Send an expression to the server
    Eval(String),

    /// Empty input (just pressed enter)
    Empty,

    /// Unknown command, or a command with the wrong arguments
    Unknown(String),
}

/// Every command name, for completion.
pub const COMMAND_NAMES: &[&str] = &[
    ":register", ":login", ":logout", ":history", ":help", ":quit",
];

impl Command {
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();

        if trimmed.is_empty() {
            return Command::Empty;
        }

        let Some(cmd) = trimmed.strip_prefix(':') else {
            return Command::Eval(trimmed.to_string());
        };

        let mut parts = cmd.split_whitespace();
        let name = parts.next().unwrap_or("").to_lowercase();
        let args: Vec<&str> = parts.collect();

        match (name.as_str(), args.as_slice()) {
            ("register" | "r", [user, pass]) => Command::Register {
                username: user.to_string(),
                password: pass.to_string(),
            },
            ("login" | "l", []) => Command::Login {
                username: String::new(),
                password: String::new(),
            },
            ("login" | "l", [user, pass]) => Command::Login {
                username: user.to_string(),
                password: pass.to_string(),
            },
            ("logout", []) => Command::Logout,
            ("history" | "h", []) => Command::History,
            ("help" | "?", _) => Command::Help,
            ("quit" | "exit" | "q", _) => Command::Quit,
            _ => Command::Unknown(name),
        }
    }

    /// `:register` and `:login` lines hold a password and must not be
    /// kept in the input history.
    pub fn carries_password(&self) -> bool {
        matches!(self, Command::Register { .. } | Command::Login { .. })
    }

    pub fn help_text() -> &'static str {
        r#"Available commands:
  :register <user> <pass>  Create an account (alias: :r)
  :login [<user> <pass>]   Log in; no arguments logs in anonymously (alias: :l)
  :logout                  End the session
  :history                 Show server-side history (alias: :h)
  :help                    Show this help message (alias: :?)
  :quit                    Exit (aliases: :exit, :q)

Anything else is sent to the server as an expression."#
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_expression() {
        assert_eq!(
            Command::parse("  (+ 1 2) "),
            Command::Eval("(+ 1 2)".to_string())
        );
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(Command::parse(""), Command::Empty);
        assert_eq!(Command::parse(" \t "), Command::Empty);
    }

    #[test]
    fn test_parse_login() {
        assert_eq!(
            Command::parse(":login alice pw"),
            Command::Login {
                username: "alice".into(),
                password: "pw".into()
            }
        );
    }

    #[test]
    fn test_parse_anonymous_login() {
        assert_eq!(
            Command::parse(":l"),
            Command::Login {
                username: String::new(),
                password: String::new()
            }
        );
    }

    #[test]
    fn test_parse_register_needs_both_args() {
        assert_eq!(
            Command::parse(":register alice"),
            Command::Unknown("register".into())
        );
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(Command::parse(":logout"), Command::Logout);
        assert_eq!(Command::parse(":H"), Command::History);
        assert_eq!(Command::parse(":?"), Command::Help);
        assert_eq!(Command::parse(":exit"), Command::Quit);
    }

    #[test]
    fn test_credential_commands_carry_password() {
        assert!(Command::parse(":login alice pw").carries_password());
        assert!(Command::parse(":register alice pw").carries_password());
        assert!(!Command::parse(":logout").carries_password());
        assert!(!Command::parse("(+ 1 2)").carries_password());
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(Command::parse(":frob"), Command::Unknown("frob".into()));
    }

    #[test]
    fn test_help_lists_every_command() {
        for name in COMMAND_NAMES {
            assert!(Command::help_text().contains(name), "{name} missing");
        }
    }
}
