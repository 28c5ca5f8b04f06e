/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

pub mod admin;
pub mod base;
pub mod customer;
pub mod employee;
pub mod services;

use anyhow::{Result, bail};
use connector::{ConnectorResult, FetchState, GuardDecision, HttpClient, Resource, Route};
use serde::Serialize;
use std::future::Future;

/// State shared by every page command.
pub struct Page {
    pub client: HttpClient,
    pub json: bool,
}

impl Page {
    pub fn new(client: HttpClient, json: bool) -> Self {
        Self { client, json }
    }

    /// Runs the route guard before anything is fetched.
    pub fn enter(&self, route: Route) -> Result<()> {
        let session = self.client.session().current();

        match route.visit(session.as_ref()) {
            GuardDecision::Render => Ok(()),
            GuardDecision::Redirect(_) if session.is_none() => {
                bail!("Not logged in. Use `gearsync login` to log in.")
            }
            GuardDecision::Redirect(_) => bail!(
                "{} requires the {} role.",
                route.path(),
                route
                    .required_role()
                    .map(|r| r.to_string())
                    .unwrap_or_default()
            ),
        }
    }

    /// Resource for a list endpoint, bound to this page's client.
    pub fn list<T, F, Fut>(&self, load: F) -> Resource<Vec<T>>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(HttpClient) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ConnectorResult<Vec<T>>> + Send + 'static,
    {
        let client = self.client.clone();
        Resource::new((), move |_: &()| load(client.clone()))
    }

    /// Mounts the resource, prints what it settled on and unmounts it.
    pub async fn show_list<T>(
        &self,
        resource: &Resource<Vec<T>>,
        empty: &str,
        card: impl Fn(&T) -> String,
    ) -> Result<()>
    where
        T: Serialize + Clone + Send + Sync + 'static,
    {
        resource.mount().await;
        let state = resource.state();
        resource.unmount();

        self.print_list(&state, empty, card)
    }

    /// Runs a mutation while the list is mounted, then refetches and prints
    /// the list. A failed mutation unmounts without refetching.
    pub async fn mutate_then_show<T, R>(
        &self,
        resource: &Resource<Vec<T>>,
        mutation: impl Future<Output = Result<R>>,
        done: &str,
        empty: &str,
        card: impl Fn(&T) -> String,
    ) -> Result<R>
    where
        T: Serialize + Clone + Send + Sync + 'static,
    {
        resource.mount().await;

        let value = match mutation.await {
            Ok(value) => value,
            Err(e) => {
                resource.unmount();
                return Err(e);
            }
        };

        println!("{}", done);
        resource.refetch().await;
        let state = resource.state();
        resource.unmount();

        self.print_list(&state, empty, card)?;
        Ok(value)
    }

    pub fn print_list<T: Serialize>(
        &self,
        state: &FetchState<Vec<T>>,
        empty: &str,
        card: impl Fn(&T) -> String,
    ) -> Result<()> {
        if self.json {
            if let Some(data) = &state.data {
                println!("{}", serde_json::to_string_pretty(data)?);
            }
        } else {
            println!("{}", crate::view::render_list(state, empty, card));
        }

        match &state.error {
            Some(error) => bail!("Failed to load: {}", error),
            None => Ok(()),
        }
    }

    pub fn print_one<T: Serialize>(&self, item: &T, card: impl Fn(&T) -> String) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(item)?);
        } else {
            println!("{}", card(item));
        }

        Ok(())
    }
}

/// Prints the notification for a failed mutation; the command exits non-zero.
pub fn notify_failure<T>(action: &str, res: ConnectorResult<T>) -> Result<T> {
    res.map_err(|e| {
        if e.is_auth_failure() {
            anyhow::anyhow!("{} failed: {}. Your session may have expired, log in again.", action, e)
        } else {
            anyhow::anyhow!("{} failed: {}", action, e)
        }
    })
}

/// Like [`notify_failure`], echoing the submitted input so it can be resent.
pub fn submit<T, B: Serialize>(action: &str, input: &B, res: ConnectorResult<T>) -> Result<T> {
    if res.is_err() {
        if let Ok(input) = serde_json::to_string(input) {
            eprintln!("Input kept: {}", input);
        }
    }

    notify_failure(action, res)
}
