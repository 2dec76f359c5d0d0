//! Mailbox credential acquisition.

use secrecy::SecretString;

use crate::error::CredentialError;

/// A username/password pair for the webmail sign-in form.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    /// Resolve credentials, preferring `MAILSWEEP_USERNAME` /
    /// `MAILSWEEP_PASSWORD` env vars and falling back to an interactive
    /// prompt. The password is never echoed.
    ///
    /// Blocking; call from a blocking context (`spawn_blocking` in async
    /// code).
    pub fn resolve() -> Result<Self, CredentialError> {
        let username = match std::env::var("MAILSWEEP_USERNAME") {
            Ok(name) if !name.is_empty() => name,
            _ => prompt_line("Username: ")?,
        };
        let password = match std::env::var("MAILSWEEP_PASSWORD") {
            Ok(pass) if !pass.is_empty() => pass,
            _ => rpassword::prompt_password("Password: ")?,
        };

        Ok(Self {
            username,
            password: SecretString::from(password),
        })
    }
}

fn prompt_line(label: &str) -> Result<String, CredentialError> {
    use std::io::Write;

    print!("{label}");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line.trim_end().to_string())
}
