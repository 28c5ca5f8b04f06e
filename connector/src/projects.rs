/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::*;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Id,
    #[serde(alias = "title")]
    pub project_name: String,
    pub status: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub estimated_cost: Option<f64>,
    #[serde(default)]
    pub actual_cost: Option<f64>,
    #[serde(default)]
    pub estimated_duration_hours: Option<i32>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub completion_date: Option<String>,
    #[serde(default)]
    pub expected_completion_date: Option<String>,
    #[serde(default)]
    pub progress_percentage: Option<i32>,
    #[serde(default)]
    pub vehicle_id: Option<Id>,
    #[serde(default)]
    pub vehicle_registration_number: Option<String>,
    #[serde(default)]
    pub vehicle_make: Option<String>,
    #[serde(default)]
    pub vehicle_model: Option<String>,
    #[serde(default, deserialize_with = "crate::lenient_string")]
    pub vehicle_year: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub assigned_employee_id: Option<Id>,
    #[serde(default)]
    pub assigned_employee_name: Option<String>,
    #[serde(default)]
    pub additional_notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRequest {
    pub vehicle_id: Id,
    pub project_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProjectUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<String>,
}

pub async fn list(client: &HttpClient) -> ConnectorResult<Vec<Project>> {
    client.get_list("customer/projects").await
}

pub async fn list_active(client: &HttpClient) -> ConnectorResult<Vec<Project>> {
    client.get_list("customer/projects/active").await
}

pub async fn get(client: &HttpClient, id: Id) -> ConnectorResult<Project> {
    client.get(&format!("customer/projects/{}", id)).await
}

pub async fn create(client: &HttpClient, req: &ProjectRequest) -> ConnectorResult<Project> {
    client.post("customer/projects", req).await
}

pub async fn update(client: &HttpClient, id: Id, req: &ProjectUpdate) -> ConnectorResult<Project> {
    client.put(&format!("customer/projects/{}", id), req).await
}

pub async fn delete(client: &HttpClient, id: Id) -> ConnectorResult<()> {
    client.delete(&format!("customer/projects/{}", id)).await
}
