/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Load/render/error cycle for a single asynchronous read.
//!
//! A [`Resource`] owns a loader and the dependency value it is keyed on.
//! Mounting triggers one fetch, changing the dependencies by value triggers
//! one fetch, and [`Resource::refetch`] re-runs it on demand. Failures are
//! kept in the published [`FetchState`] instead of being returned.
//!
//! Every fetch is numbered. Only the most recently started fetch may write
//! its result; a slower, superseded fetch is discarded when it settles, and
//! nothing is written after [`Resource::unmount`].

use crate::error::{ConnectorError, ConnectorResult};
use futures::FutureExt;
use futures::future::BoxFuture;
use std::future::Future;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::watch;

type Loader<T, D> = Box<dyn Fn(&D) -> BoxFuture<'static, ConnectorResult<T>> + Send + Sync>;

#[derive(Debug, Clone)]
pub struct FetchState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<Arc<ConnectorError>>,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            data: None,
            loading: false,
            error: None,
        }
    }
}

pub struct Resource<T, D = ()> {
    loader: Loader<T, D>,
    deps: Mutex<D>,
    state: watch::Sender<FetchState<T>>,
    sequence: AtomicU64,
    mounted: AtomicBool,
}

impl<T, D> Resource<T, D>
where
    T: Clone + Send + Sync + 'static,
    D: PartialEq + Send,
{
    pub fn new<F, Fut>(deps: D, loader: F) -> Self
    where
        F: Fn(&D) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ConnectorResult<T>> + Send + 'static,
    {
        let (state, _) = watch::channel(FetchState::default());

        Self {
            loader: Box::new(move |deps: &D| loader(deps).boxed()),
            deps: Mutex::new(deps),
            state,
            sequence: AtomicU64::new(0),
            mounted: AtomicBool::new(false),
        }
    }

    pub async fn mount(&self) -> Option<T> {
        self.mounted.store(true, Ordering::SeqCst);
        self.fetch().await
    }

    /// Stops all later state writes, including those of fetches still in flight.
    pub fn unmount(&self) {
        self.mounted.store(false, Ordering::SeqCst);
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::SeqCst)
    }

    pub async fn refetch(&self) -> Option<T> {
        self.fetch().await
    }

    /// Fetches again only when `deps` differs from the current dependencies.
    pub async fn set_deps(&self, deps: D) -> Option<T> {
        let changed = {
            let mut current = self.deps.lock().unwrap_or_else(|p| p.into_inner());
            if *current == deps {
                false
            } else {
                *current = deps;
                true
            }
        };

        if changed {
            self.fetch().await
        } else {
            self.data()
        }
    }

    pub fn state(&self) -> FetchState<T> {
        self.state.borrow().clone()
    }

    pub fn data(&self) -> Option<T> {
        self.state.borrow().data.clone()
    }

    pub fn loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn error(&self) -> Option<Arc<ConnectorError>> {
        self.state.borrow().error.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FetchState<T>> {
        self.state.subscribe()
    }

    fn is_current(&self, seq: u64) -> bool {
        self.is_mounted() && self.sequence.load(Ordering::SeqCst) == seq
    }

    async fn fetch(&self) -> Option<T> {
        if !self.is_mounted() {
            tracing::debug!("resource not mounted, skipping fetch");
            return None;
        }

        let seq = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        let future = {
            let deps = self.deps.lock().unwrap_or_else(|p| p.into_inner());
            (self.loader)(&*deps)
        };

        self.state.send_modify(|state| {
            state.loading = true;
            state.error = None;
        });

        let result = future.await;

        if !self.is_current(seq) {
            tracing::debug!(seq, "discarding superseded fetch result");
            return None;
        }

        match result {
            Ok(data) => {
                self.state.send_modify(|state| {
                    state.data = Some(data.clone());
                    state.loading = false;
                });
                Some(data)
            }
            Err(e) => {
                tracing::debug!(seq, error = %e, "fetch failed");
                self.state.send_modify(|state| {
                    state.error = Some(Arc::new(e));
                    state.loading = false;
                });
                None
            }
        }
    }
}
