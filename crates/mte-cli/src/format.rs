// SPDX-License-Identifier: MIT OR Apache-2.0
//! Output formatting for resolved environments.

use mte_core::EnvironmentMap;
use std::fmt;
use std::str::FromStr;

/// Supported renderings of a resolved environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// POSIX shell `export` statements, suitable for `eval`.
    #[default]
    Shell,
    /// Pretty-printed JSON object with sorted keys.
    Json,
    /// `NAME=value` lines.
    Text,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Shell => "shell",
            Self::Json => "json",
            Self::Text => "text",
        };
        f.write_str(s)
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "shell" | "sh" => Ok(Self::Shell),
            "json" => Ok(Self::Json),
            "text" => Ok(Self::Text),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}

/// Render `env` in the given format. Entries come out sorted by name.
#[must_use]
pub fn render(env: &EnvironmentMap, format: OutputFormat) -> String {
    match format {
        OutputFormat::Shell => env
            .iter()
            .map(|(k, v)| format!("export {k}={}\n", shell_quote(v)))
            .collect(),
        OutputFormat::Json => {
            let mut s = serde_json::to_string_pretty(env).unwrap_or_default();
            s.push('\n');
            s
        }
        OutputFormat::Text => env.iter().map(|(k, v)| format!("{k}={v}\n")).collect(),
    }
}

/// Single-quote `value` for a POSIX shell.
#[must_use]
pub fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_str() {
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("sh".parse::<OutputFormat>(), Ok(OutputFormat::Shell));
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn display_roundtrips() {
        for f in [OutputFormat::Shell, OutputFormat::Json, OutputFormat::Text] {
            assert_eq!(f.to_string().parse::<OutputFormat>(), Ok(f));
        }
    }

    #[test]
    fn shell_quote_escapes_single_quotes() {
        assert_eq!(shell_quote("plain"), "'plain'");
        assert_eq!(shell_quote("it's"), r"'it'\''s'");
        assert_eq!(shell_quote(""), "''");
    }

    #[test]
    fn empty_env_renders_nothing() {
        let env = EnvironmentMap::new();
        assert_eq!(render(&env, OutputFormat::Shell), "");
        assert_eq!(render(&env, OutputFormat::Text), "");
        assert_eq!(render(&env, OutputFormat::Json), "{}\n");
    }
}
