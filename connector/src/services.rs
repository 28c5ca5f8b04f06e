/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use crate::*;
use serde::{Deserialize, Serialize};

/// Service catalog entry. Read by everyone, written by admins only.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    #[serde(default)]
    pub id: Option<Id>,
    #[serde(alias = "name")]
    pub service_name: String,
    #[serde(default, alias = "serviceType")]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "price")]
    pub base_price: Option<f64>,
    #[serde(default)]
    pub estimated_duration_minutes: Option<i32>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ServiceRequest {
    pub service_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_duration_minutes: Option<i32>,
}

pub async fn list(client: &HttpClient) -> ConnectorResult<Vec<Service>> {
    client.get_list("service/view/all").await
}

pub async fn create(client: &HttpClient, req: &ServiceRequest) -> ConnectorResult<Ack> {
    client.post("admin/service/add", req).await
}

pub async fn update(client: &HttpClient, id: Id, req: &ServiceRequest) -> ConnectorResult<Ack> {
    client
        .put(&format!("admin/service/{}/update", id), req)
        .await
}

pub async fn delete(client: &HttpClient, id: Id) -> ConnectorResult<()> {
    client
        .delete(&format!("admin/service/{}/delete", id))
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_aliases() {
        let service: Service = serde_json::from_str(
            r#"{"id": 5, "name": "Tyre rotation", "serviceType": "MAINTENANCE", "price": 25}"#,
        )
        .unwrap();

        assert_eq!(service.service_name, "Tyre rotation");
        assert_eq!(service.category.as_deref(), Some("MAINTENANCE"));
        assert_eq!(service.base_price, Some(25.0));
    }

    #[test]
    fn test_canonical_service() {
        let service: Service = serde_json::from_str(
            r#"{"id": 1, "serviceName": "Oil change", "category": "MAINTENANCE", "basePrice": 49.5, "estimatedDurationMinutes": 30}"#,
        )
        .unwrap();

        assert_eq!(service.estimated_duration_minutes, Some(30));
        assert_eq!(service.is_active, None);
    }
}
