/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::*;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSummary {
    pub id: Id,
    #[serde(alias = "name")]
    pub service_name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub base_price: Option<f64>,
    #[serde(default)]
    pub estimated_duration_minutes: Option<i32>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VehicleSummary {
    pub id: Id,
    pub make: String,
    pub model: String,
    #[serde(default, deserialize_with = "crate::lenient_string")]
    pub year: Option<String>,
    #[serde(default, alias = "licensePlate")]
    pub registration_number: Option<String>,
}

/// Status is kept as the backend's string (SCHEDULED, CONFIRMED, IN_PROGRESS,
/// COMPLETED, CANCELLED, ...); transitions are decided server side.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: Id,
    pub scheduled_date_time: String,
    pub status: String,
    #[serde(default)]
    pub customer_notes: Option<String>,
    #[serde(default)]
    pub employee_notes: Option<String>,
    #[serde(default)]
    pub estimated_cost: Option<f64>,
    #[serde(default)]
    pub final_cost: Option<f64>,
    #[serde(default)]
    pub progress_percentage: Option<i32>,
    #[serde(default)]
    pub services: Vec<ServiceSummary>,
    #[serde(default)]
    pub vehicle: Option<VehicleSummary>,
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
    pub customer_email: Option<String>,
    #[serde(default)]
    pub assigned_employee_id: Option<Id>,
    #[serde(default)]
    pub assigned_employee_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Appointment {
    /// Nested vehicle first, then the flattened `vehicle*` fields.
    pub fn vehicle_label(&self) -> Option<String> {
        if let Some(vehicle) = &self.vehicle {
            return Some(format!("{} {}", vehicle.make, vehicle.model));
        }

        match (&self.vehicle_make, &self.vehicle_model) {
            (Some(make), Some(model)) => Some(format!("{} {}", make, model)),
            _ => self.vehicle_registration_number.clone(),
        }
    }

    pub fn total_base_price(&self) -> f64 {
        self.services.iter().filter_map(|s| s.base_price).sum()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentRequest {
    pub vehicle_id: Id,
    pub service_ids: Vec<Id>,
    /// `YYYY-MM-DDTHH:mm:ss`
    pub scheduled_date_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_notes: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_id: Option<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_ids: Option<Vec<Id>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_date_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_notes: Option<String>,
}

pub async fn list(client: &HttpClient) -> ConnectorResult<Vec<Appointment>> {
    client.get_list("customer/appointments").await
}

pub async fn get(client: &HttpClient, id: Id) -> ConnectorResult<Appointment> {
    client.get(&format!("customer/appointments/{}", id)).await
}

pub async fn book(client: &HttpClient, req: &AppointmentRequest) -> ConnectorResult<Appointment> {
    client.post("customer/appointments", req).await
}

pub async fn update(
    client: &HttpClient,
    id: Id,
    req: &AppointmentUpdate,
) -> ConnectorResult<Appointment> {
    client.patch(&format!("customer/appointments/{}", id), req).await
}

pub async fn cancel(client: &HttpClient, id: Id) -> ConnectorResult<Ack> {
    client
        .put_empty(&format!("customer/appointments/{}/cancel", id))
        .await
}

pub async fn delete(client: &HttpClient, id: Id) -> ConnectorResult<()> {
    client.delete(&format!("customer/appointments/{}", id)).await
}
