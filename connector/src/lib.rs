/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

pub mod admin;
pub mod appointments;
pub mod auth;
pub mod client;
pub mod employee;
pub mod error;
pub mod guard;
pub mod projects;
pub mod resource;
pub mod services;
pub mod session;
pub mod storage;
pub mod vehicles;

pub use client::{DEFAULT_BASE_URL, HttpClient, UserMutations};
pub use error::{ConnectorError, ConnectorResult, StorageError};
pub use guard::{GuardDecision, Route, guard};
pub use resource::{FetchState, Resource};
pub use session::{Role, Session, SessionStore};
pub use storage::{FileStorage, MemoryStorage, SessionStorage};

use serde::de::{Deserializer, IgnoredAny};
use serde::{Deserialize, Serialize};

pub type Id = i64;

/// Acknowledgement of a mutation whose reply body carries nothing the client
/// reads (a confirmation string, an echo of the entity or nothing at all).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Ack;

impl<'de> Deserialize<'de> for Ack {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        IgnoredAny::deserialize(deserializer).map(|_| Ack)
    }
}

/// Dashboard figure. The backend answers either with a bare number, a numeric
/// string or a single-field object such as `{"count": 3}`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Metric(pub f64);

impl<'de> Deserialize<'de> for Metric {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error;

        fn number(value: &serde_json::Value) -> Option<f64> {
            match value {
                serde_json::Value::Number(n) => n.as_f64(),
                serde_json::Value::String(s) => s.trim().parse().ok(),
                serde_json::Value::Object(map) => map.values().find_map(number),
                serde_json::Value::Null => Some(0.0),
                _ => None,
            }
        }

        let value = serde_json::Value::deserialize(deserializer)?;
        number(&value)
            .map(Metric)
            .ok_or_else(|| D::Error::custom(format!("expected a number, got {}", value)))
    }
}

/// Accepts a string or a number, as some DTOs send years and ids either way.
pub(crate) fn lenient_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(
        match Option::<serde_json::Value>::deserialize(deserializer)? {
            Some(serde_json::Value::String(s)) => Some(s),
            Some(serde_json::Value::Number(n)) => Some(n.to_string()),
            _ => None,
        },
    )
}
