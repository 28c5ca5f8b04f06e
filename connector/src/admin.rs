/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::appointments::Appointment;
use crate::*;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Id,
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    /// Simplified listings only carry a combined name.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl User {
    pub fn display_name(&self) -> String {
        let full = [&self.first_name, &self.last_name]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ");

        if !full.is_empty() {
            full
        } else {
            self.name.clone().unwrap_or_else(|| self.email.clone())
        }
    }
}

/// Admin-initiated account creation. The backend sends the new staff member
/// a temporary password.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StaffRequest {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
struct UserStatusRequest {
    is_active: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssignAppointment {
    pub employee_id: Id,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_cost: Option<f64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ApproveProject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_duration_hours: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_completion_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approval_notes: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RejectProject {
    pub rejection_reason: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssignProject {
    pub employee_id: Id,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_cost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_duration_hours: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_notes: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub users: Metric,
    pub appointments: Metric,
    pub vehicles: Metric,
    pub total_earnings: Metric,
    pub active_services: Metric,
}

pub async fn list_users(client: &HttpClient) -> ConnectorResult<Vec<User>> {
    client.get_list("users").await
}

pub async fn list_employees(client: &HttpClient) -> ConnectorResult<Vec<User>> {
    client.get_list("admin/employees").await
}

pub async fn add_employee(client: &HttpClient, req: &StaffRequest) -> ConnectorResult<Ack> {
    client.post("admin/employees", req).await
}

pub async fn add_admin(client: &HttpClient, req: &StaffRequest) -> ConnectorResult<Ack> {
    client.post("admin/admins", req).await
}

pub async fn update_user(client: &HttpClient, id: Id, req: &UserUpdate) -> ConnectorResult<Ack> {
    client.require_user_mutations("Updating users")?;
    client.put(&format!("admin/users/{}", id), req).await
}

pub async fn delete_user(client: &HttpClient, id: Id) -> ConnectorResult<()> {
    client.require_user_mutations("Deleting users")?;
    client.delete(&format!("admin/users/{}", id)).await
}

pub async fn set_user_status(client: &HttpClient, id: Id, active: bool) -> ConnectorResult<Ack> {
    client.require_user_mutations("Activating or deactivating users")?;
    client
        .put(
            &format!("admin/users/{}/status", id),
            &UserStatusRequest { is_active: active },
        )
        .await
}

pub async fn assign_appointment(
    client: &HttpClient,
    id: Id,
    req: &AssignAppointment,
) -> ConnectorResult<Ack> {
    client
        .put(&format!("admin/appointments/{}/assign", id), req)
        .await
}

pub async fn reassign_appointment(
    client: &HttpClient,
    id: Id,
    req: &AssignAppointment,
) -> ConnectorResult<Ack> {
    client
        .put(&format!("admin/appointments/{}/reassign", id), req)
        .await
}

pub async fn unassign_appointment(client: &HttpClient, id: Id) -> ConnectorResult<()> {
    client
        .delete(&format!("admin/appointments/{}/unassign", id))
        .await
}

pub async fn approve_project(
    client: &HttpClient,
    id: Id,
    req: &ApproveProject,
) -> ConnectorResult<Ack> {
    client
        .put(&format!("admin/projects/{}/approve", id), req)
        .await
}

pub async fn reject_project(
    client: &HttpClient,
    id: Id,
    req: &RejectProject,
) -> ConnectorResult<Ack> {
    client
        .put(&format!("admin/projects/{}/reject", id), req)
        .await
}

pub async fn assign_project(
    client: &HttpClient,
    id: Id,
    req: &AssignProject,
) -> ConnectorResult<Ack> {
    client
        .put(&format!("admin/projects/{}/assign", id), req)
        .await
}

pub async fn unassign_project(client: &HttpClient, id: Id) -> ConnectorResult<()> {
    client
        .delete(&format!("admin/projects/{}/unassign", id))
        .await
}

pub async fn dashboard_stats(client: &HttpClient) -> ConnectorResult<DashboardStats> {
    let (users, appointments, vehicles, total_earnings, active_services) = futures::try_join!(
        client.get::<Metric>("admin/dashboard/user/count"),
        client.get::<Metric>("admin/dashboard/appointment/count"),
        client.get::<Metric>("admin/dashboard/vehicle/count"),
        client.get::<Metric>("admin/dashboard/earnings/total"),
        client.get::<Metric>("admin/dashboard/services/active/count"),
    )?;

    Ok(DashboardStats {
        users,
        appointments,
        vehicles,
        total_earnings,
        active_services,
    })
}

pub async fn confirmed_appointments(client: &HttpClient) -> ConnectorResult<Vec<Appointment>> {
    client.get_list("admin/dashboard/appointments/confirmed").await
}

pub async fn todays_appointments(client: &HttpClient) -> ConnectorResult<Vec<Appointment>> {
    client.get_list("admin/dashboard/appointments/today").await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        let mut user: User = serde_json::from_str(
            r#"{"id": 1, "email": "jane@garage.test", "firstName": "Jane", "lastName": "Doe", "role": "EMPLOYEE"}"#,
        )
        .unwrap();
        assert_eq!(user.display_name(), "Jane Doe");
        assert_eq!(user.role, Some(Role::Employee));

        user.first_name = None;
        user.last_name = None;
        user.name = Some("J. Doe".to_string());
        assert_eq!(user.display_name(), "J. Doe");

        user.name = None;
        assert_eq!(user.display_name(), "jane@garage.test");
    }

    #[test]
    fn test_staff_request_body() {
        let req = StaffRequest {
            email: "new@garage.test".to_string(),
            first_name: Some("New".to_string()),
            last_name: None,
            phone_number: None,
            role: Some(Role::Employee),
        };

        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            serde_json::json!({"email": "new@garage.test", "firstName": "New", "role": "EMPLOYEE"})
        );
    }
}
