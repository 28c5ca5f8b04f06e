/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use super::config::*;
use anyhow::{Context, Result, bail};
use connector::{DEFAULT_BASE_URL, FileStorage, HttpClient, SessionStorage, SessionStore};
use rpassword::read_password;
use std::io::{self, Write};
use std::sync::Arc;

pub fn ask_for_password() -> Result<String> {
    print!("Password: ");
    io::stdout().flush()?;
    let inp = read_password().context("Failed to read password")?;

    if inp.is_empty() {
        bail!("Password cannot be empty.");
    }

    Ok(inp)
}

pub fn ask_for_input(prompt: &str) -> Result<String> {
    let inp = ask_for_optional_input(prompt)?;

    match inp {
        Some(inp) => Ok(inp),
        None => bail!("{} cannot be empty.", prompt),
    }
}

pub fn ask_for_optional_input(prompt: &str) -> Result<Option<String>> {
    print!("{}: ", prompt);
    io::stdout().flush()?;

    let mut inp = String::new();
    io::stdin()
        .read_line(&mut inp)
        .with_context(|| format!("Failed to read {}.", prompt))?;

    let inp = inp.trim().to_string();
    Ok(if inp.is_empty() { None } else { Some(inp) })
}

/// Takes the value given on the command line or prompts for it.
pub fn or_ask(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => ask_for_input(prompt),
    }
}

/// Numeric variant of [`or_ask`].
pub fn or_ask_parsed<T>(value: Option<T>, prompt: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match value {
        Some(value) => Ok(value),
        None => ask_for_input(prompt)?
            .parse()
            .with_context(|| format!("Invalid {}", prompt)),
    }
}

pub fn open_storage() -> Result<Arc<FileStorage>> {
    Ok(Arc::new(
        FileStorage::open_default().context("Could not find configuration directory")?,
    ))
}

/// Base URL from the command line, then the config file, then the build default.
pub fn resolve_server(storage: &dyn SessionStorage, server: Option<String>) -> Result<String> {
    if let Some(server) = server.filter(|s| !s.trim().is_empty()) {
        return Ok(server);
    }

    Ok(get_value(storage, ConfigKey::Server)?.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()))
}

pub fn get_http_client(storage: Arc<FileStorage>, server: Option<String>) -> Result<HttpClient> {
    let base_url = resolve_server(&*storage, server)?;
    let user_mutations = user_mutations(&*storage)?;
    let session = SessionStore::init(storage).context("Failed to restore session")?;

    tracing::debug!(%base_url, %user_mutations, "using backend");

    Ok(HttpClient::new(base_url, Arc::new(session)).with_user_mutations(user_mutations))
}

#[cfg(test)]
mod tests {
    use super::*;
    use connector::MemoryStorage;

    #[test]
    fn test_resolve_server() {
        let storage = MemoryStorage::new();

        assert_eq!(resolve_server(&storage, None).unwrap(), DEFAULT_BASE_URL);

        set_value(&storage, ConfigKey::Server, "https://garage.test/api").unwrap();
        assert_eq!(
            resolve_server(&storage, None).unwrap(),
            "https://garage.test/api"
        );
        assert_eq!(
            resolve_server(&storage, Some("http://localhost:9000/api".to_string())).unwrap(),
            "http://localhost:9000/api"
        );
    }

    #[test]
    fn test_or_ask_uses_given_value() {
        assert_eq!(or_ask(Some("Corolla".to_string()), "Model").unwrap(), "Corolla");
        assert_eq!(or_ask_parsed(Some(2020_i32), "Year").unwrap(), 2020);
    }
}
