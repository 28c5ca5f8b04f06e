/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use super::*;
use crate::config::*;
use crate::input::*;
use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use connector::auth::{self, RegisterRequest};
use connector::{FileStorage, Role, Route};
use std::io;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "GearSync", display_name = "GearSync", bin_name = "gearsync", author = "Wavelens", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Option<MainCommands>,
    #[arg(long, value_enum)]
    generate_completions: Option<Shell>,
    /// Backend base URL, overrides the `server` config key
    #[arg(long, global = true, env = "GEARSYNC_SERVER")]
    server: Option<String>,
    /// Print fetched data as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum MainCommands {
    Config {
        key: String,
        value: Option<String>,
    },
    Status,
    Register {
        #[arg(short, long)]
        first_name: Option<String>,
        #[arg(short, long)]
        last_name: Option<String>,
        #[arg(short, long)]
        email: Option<String>,
        #[arg(short, long)]
        phone_number: Option<String>,
    },
    Login {
        #[arg(short, long)]
        email: Option<String>,
    },
    Logout,
    Whoami,
    Customer {
        #[command(subcommand)]
        cmd: customer::Commands,
    },
    Employee {
        #[command(subcommand)]
        cmd: employee::Commands,
    },
    Admin {
        #[command(subcommand)]
        cmd: admin::Commands,
    },
    /// Public service catalog
    Services,
}

pub async fn run_cli(storage: Arc<FileStorage>) -> Result<()> {
    let cli = Cli::parse();

    if let Some(shell) = cli.generate_completions {
        let mut app = Cli::command();
        let bin_name = app.get_name().to_string();
        generate(shell, &mut app, bin_name, &mut io::stdout());
        return Ok(());
    }

    let Some(cmd) = cli.cmd else {
        Cli::command().print_help()?;
        return Ok(());
    };

    if let MainCommands::Config { key, value } = &cmd {
        return set_get_value_from_string(&*storage, key, value.clone());
    }

    let page = Page::new(get_http_client(storage, cli.server)?, cli.json);

    match cmd {
        MainCommands::Config { .. } => Ok(()),
        MainCommands::Status => status(&page).await,
        MainCommands::Register {
            first_name,
            last_name,
            email,
            phone_number,
        } => {
            let req = RegisterRequest {
                first_name: or_ask(first_name, "First name")?,
                last_name: or_ask(last_name, "Last name")?,
                email: or_ask(email, "Email")?,
                password: ask_for_password()?,
                phone_number,
                role: None,
            };

            notify_failure("Registration", auth::register(&page.client, &req).await)?;
            println!("Registration successful. Please log in.");
            Ok(())
        }

        MainCommands::Login { email } => {
            let email = or_ask(email, "Email")?;
            let password = ask_for_password()?;

            let session = notify_failure(
                "Login",
                auth::sign_in(&page.client, email, password).await,
            )?;

            println!(
                "Logged in as {}. Dashboard: {}",
                session.role,
                landing(Some(session.role)).path()
            );
            Ok(())
        }

        MainCommands::Logout => {
            auth::sign_out(&page.client).context("Failed to clear session")?;
            println!("Logged out.");
            Ok(())
        }

        MainCommands::Whoami => {
            let role = page.client.session().role();

            match role {
                Some(role) => println!("Role: {}", role),
                None => println!("Not logged in."),
            }

            println!("Page: {}", landing(role).path());
            Ok(())
        }

        MainCommands::Customer { cmd } => customer::handle(&page, cmd).await,
        MainCommands::Employee { cmd } => employee::handle(&page, cmd).await,
        MainCommands::Admin { cmd } => admin::handle(&page, cmd).await,
        MainCommands::Services => services::handle(&page).await,
    }
}

async fn status(page: &Page) -> Result<()> {
    println!("Server: {}", page.client.base_url());

    connector::services::list(&page.client)
        .await
        .context("Server unreachable")?;
    println!("Server Online.");

    match page.client.session().role() {
        Some(role) => println!("Logged in as {}.", role),
        None => println!("Not logged in. Use `gearsync login` to log in."),
    }

    Ok(())
}

/// Dashboard route for the active session, if any.
pub fn landing(role: Option<Role>) -> Route {
    role.map(Route::dashboard_for).unwrap_or(Route::Home)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses() {
        Cli::command().debug_assert();

        let cli = Cli::try_parse_from([
            "gearsync",
            "--server",
            "http://localhost:9000/api",
            "customer",
            "vehicles",
            "list",
        ])
        .unwrap();

        assert_eq!(cli.server.as_deref(), Some("http://localhost:9000/api"));
        assert!(matches!(cli.cmd, Some(MainCommands::Customer { .. })));
    }

    #[test]
    fn test_landing() {
        assert_eq!(landing(None), Route::Home);
        assert_eq!(landing(Some(Role::Employee)), Route::EmployeeDashboard);
    }
}
