//! Secret references in configuration values.
//!
//! A credential value may point somewhere else instead of holding the secret:
//!
//! - `env::GOOGLE_REFRESH_TOKEN` reads the environment variable
//! - `pass::google/incident-bot` takes the first line of `pass show`
//! - anything else is the secret itself

use std::process::Command;

/// Where a configured value comes from.
#[derive(Debug, PartialEq, Eq)]
pub enum SecretRef<'a> {
    Literal(&'a str),
    Env(&'a str),
    Pass(&'a str),
}

impl<'a> SecretRef<'a> {
    pub fn parse(value: &'a str) -> Self {
        if let Some(var) = value.strip_prefix("env::") {
            Self::Env(var)
        } else if let Some(path) = value.strip_prefix("pass::") {
            Self::Pass(path)
        } else {
            Self::Literal(value)
        }
    }

    /// Returns true if resolving the value reads from outside the file.
    pub fn is_reference(&self) -> bool {
        !matches!(self, Self::Literal(_))
    }

    pub fn resolve(&self) -> Result<String, String> {
        match *self {
            Self::Literal(value) => Ok(value.to_string()),
            Self::Env(var) => {
                std::env::var(var).map_err(|_| format!("environment variable `{}` is not set", var))
            }
            Self::Pass(path) => pass_show(path),
        }
    }
}

/// Resolves `value`, following an `env::` or `pass::` prefix if present.
pub fn resolve(value: &str) -> Result<String, String> {
    SecretRef::parse(value).resolve()
}

fn pass_show(path: &str) -> Result<String, String> {
    let output = Command::new("pass")
        .arg("show")
        .arg(path)
        .output()
        .map_err(|e| format!("failed to run `pass show {}`: {}", path, e))?;

    if !output.status.success() {
        return Err(format!(
            "`pass show {}` exited with {}: {}",
            path,
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        ));
    }

    String::from_utf8_lossy(&output.stdout)
        .lines()
        .next()
        .map(str::to_string)
        .ok_or_else(|| format!("`pass show {}` printed nothing", path))
}
