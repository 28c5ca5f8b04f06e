/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::appointments::Appointment;
use crate::projects::Project;
use crate::*;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress_percentage: Option<i32>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimeLog {
    pub id: Id,
    #[serde(default)]
    pub appointment_id: Option<Id>,
    #[serde(default)]
    pub project_id: Option<Id>,
    #[serde(default, alias = "workDescription")]
    pub description: Option<String>,
    #[serde(default)]
    pub hours: Option<f64>,
    #[serde(default)]
    pub duration_minutes: Option<i32>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub employee_name: Option<String>,
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl TimeLog {
    /// Logged hours, derived from the duration when the backend only reports minutes.
    pub fn worked_hours(&self) -> f64 {
        self.hours
            .or_else(|| self.duration_minutes.map(|m| f64::from(m) / 60.0))
            .unwrap_or_default()
    }
}

/// A time log belongs to an appointment or to a project.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimeLogRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment_id: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<Id>,
    pub description: String,
    pub hours: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TimeLogUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hours: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

pub async fn list_appointments(client: &HttpClient) -> ConnectorResult<Vec<Appointment>> {
    client.get_list("employee/appointments").await
}

pub async fn get_appointment(client: &HttpClient, id: Id) -> ConnectorResult<Appointment> {
    client.get(&format!("employee/appointments/{}", id)).await
}

pub async fn update_appointment_status(
    client: &HttpClient,
    id: Id,
    req: &StatusUpdate,
) -> ConnectorResult<Appointment> {
    client
        .patch(&format!("employee/appointments/{}/status", id), req)
        .await
}

pub async fn appointment_timelogs(client: &HttpClient, id: Id) -> ConnectorResult<Vec<TimeLog>> {
    client
        .get_list(&format!("employee/appointments/{}/timelogs", id))
        .await
}

pub async fn list_projects(client: &HttpClient) -> ConnectorResult<Vec<Project>> {
    client.get_list("employee/projects").await
}

pub async fn get_project(client: &HttpClient, id: Id) -> ConnectorResult<Project> {
    client.get(&format!("employee/projects/{}", id)).await
}

pub async fn update_project_status(
    client: &HttpClient,
    id: Id,
    req: &StatusUpdate,
) -> ConnectorResult<Project> {
    client
        .patch(&format!("employee/projects/{}/status", id), req)
        .await
}

pub async fn project_timelogs(client: &HttpClient, id: Id) -> ConnectorResult<Vec<TimeLog>> {
    client
        .get_list(&format!("employee/projects/{}/timelogs", id))
        .await
}

pub async fn list_timelogs(client: &HttpClient) -> ConnectorResult<Vec<TimeLog>> {
    client.get_list("employee/timelogs").await
}

pub async fn create_timelog(client: &HttpClient, req: &TimeLogRequest) -> ConnectorResult<TimeLog> {
    client.post("employee/timelogs", req).await
}

pub async fn update_timelog(
    client: &HttpClient,
    id: Id,
    req: &TimeLogUpdate,
) -> ConnectorResult<TimeLog> {
    client.put(&format!("employee/timelogs/{}", id), req).await
}

pub async fn delete_timelog(client: &HttpClient, id: Id) -> ConnectorResult<()> {
    client.delete(&format!("employee/timelogs/{}", id)).await
}
