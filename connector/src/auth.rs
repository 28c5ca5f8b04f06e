/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::admin::User;
use crate::*;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LoginResponse {
    pub token: String,
    pub role: Role,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    /// Server defaults to CUSTOMER
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

pub async fn login(client: &HttpClient, req: &LoginRequest) -> ConnectorResult<LoginResponse> {
    client.post("auth/login", req).await
}

pub async fn register(client: &HttpClient, req: &RegisterRequest) -> ConnectorResult<User> {
    client.post("auth/register", req).await
}

/// Logs in and stores the returned pair in the client's session.
pub async fn sign_in(
    client: &HttpClient,
    email: String,
    password: String,
) -> ConnectorResult<Session> {
    let res = login(client, &LoginRequest { email, password }).await?;
    client.session().login(res.token.clone(), res.role)?;

    Ok(Session {
        token: res.token,
        role: res.role,
    })
}

pub fn sign_out(client: &HttpClient) -> ConnectorResult<()> {
    client.session().logout()?;
    Ok(())
}
