/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::*;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: Id,
    pub make: String,
    pub model: String,
    pub year: i32,
    #[serde(default, alias = "licensePlate")]
    pub registration_number: Option<String>,
    #[serde(default, alias = "vin")]
    pub vin_number: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub mileage: Option<i64>,
    #[serde(default)]
    pub owner_email: Option<String>,
}

impl std::fmt::Display for Vehicle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} ({})", self.make, self.model, self.year)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VehicleRequest {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub license_plate: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mileage: Option<i64>,
}

/// Partial update, only the set fields are sent.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct VehiclePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub make: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_plate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mileage: Option<i64>,
}

impl VehiclePatch {
    pub fn is_empty(&self) -> bool {
        self == &VehiclePatch::default()
    }
}

pub async fn list(client: &HttpClient) -> ConnectorResult<Vec<Vehicle>> {
    client.get_list("customer/vehicles").await
}

pub async fn get(client: &HttpClient, id: Id) -> ConnectorResult<Vehicle> {
    client.get(&format!("customer/vehicles/{}", id)).await
}

pub async fn create(client: &HttpClient, req: &VehicleRequest) -> ConnectorResult<Vehicle> {
    client.post("customer/vehicles", req).await
}

pub async fn update(client: &HttpClient, id: Id, req: &VehicleRequest) -> ConnectorResult<Vehicle> {
    client.put(&format!("customer/vehicles/{}", id), req).await
}

pub async fn patch(client: &HttpClient, id: Id, req: &VehiclePatch) -> ConnectorResult<Vehicle> {
    client.patch(&format!("customer/vehicles/{}", id), req).await
}

pub async fn delete(client: &HttpClient, id: Id) -> ConnectorResult<()> {
    client.delete(&format!("customer/vehicles/{}", id)).await
}
