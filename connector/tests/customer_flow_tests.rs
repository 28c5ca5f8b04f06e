/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

mod common;

use common::*;
use connector::vehicles::{Vehicle, VehicleRequest};
use connector::*;
use reqwest::Method;
use serde_json::json;
use std::sync::Arc;

#[tokio::test]
async fn test_customer_adds_vehicle() {
    let backend = MockBackend::start().await;
    let corolla = json!({"id": 1, "make": "Toyota", "model": "Corolla", "year": 2020, "registrationNumber": "ABC-123"});
    let civic = json!({"id": 2, "make": "Honda", "model": "Civic", "year": 2022, "licensePlate": "XYZ-123"});

    backend
        .respond(
            Method::POST,
            "/auth/login",
            MockResponse::json(json!({"token": "t1", "role": "CUSTOMER"})),
        )
        .respond(Method::GET, "/customer/vehicles", MockResponse::json(json!([corolla])))
        .respond(
            Method::GET,
            "/customer/vehicles",
            MockResponse::json(json!([corolla, civic])),
        )
        .respond(Method::POST, "/customer/vehicles", MockResponse::json(civic));

    let client = Arc::new(backend.client(Arc::new(SessionStore::in_memory())));

    let session = auth::sign_in(&client, "cus@garage.test".to_string(), "pw".to_string())
        .await
        .unwrap();
    let dashboard = Route::dashboard_for(session.role);
    assert_eq!(dashboard, Route::CustomerDashboard);
    assert!(dashboard.visit(client.session().current().as_ref()).allowed());
    assert!(!Route::AdminDashboard
        .visit(client.session().current().as_ref())
        .allowed());

    let loader_client = Arc::clone(&client);
    let page: Resource<Vec<Vehicle>> = Resource::new((), move |_| {
        let client = Arc::clone(&loader_client);
        async move { vehicles::list(&client).await }
    });

    page.mount().await;
    let cards: Vec<String> = page.data().unwrap().iter().map(|v| v.to_string()).collect();
    assert_eq!(cards, vec!["Toyota Corolla (2020)"]);

    let listed = backend.requests().pop().unwrap();
    assert_eq!(listed.method, Method::GET);
    assert_eq!(listed.path, "/customer/vehicles");
    assert_eq!(listed.authorization.as_deref(), Some("Bearer t1"));

    let added = vehicles::create(
        &client,
        &VehicleRequest {
            make: "Honda".to_string(),
            model: "Civic".to_string(),
            year: 2022,
            license_plate: "XYZ-123".to_string(),
            vin: None,
            color: None,
            mileage: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(added.registration_number.as_deref(), Some("XYZ-123"));

    let created = backend.requests().pop().unwrap();
    assert_eq!(created.method, Method::POST);
    assert_eq!(
        created.body,
        Some(json!({"make": "Honda", "model": "Civic", "year": 2022, "licensePlate": "XYZ-123"}))
    );

    page.refetch().await;
    let state = page.state();
    assert!(!state.loading);
    assert!(state.error.is_none());
    assert_eq!(state.data.unwrap().len(), 2);
}

#[tokio::test]
async fn test_logged_out_customer_is_redirected() {
    let store = SessionStore::in_memory();
    assert_eq!(
        Route::CustomerDashboard.visit(store.current().as_ref()),
        GuardDecision::Redirect(Route::Home)
    );

    store.login("t1", Role::Employee).unwrap();
    assert_eq!(
        Route::CustomerDashboard.visit(store.current().as_ref()),
        GuardDecision::Redirect(Route::Home)
    );
}
