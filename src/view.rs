/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use connector::FetchState;
use connector::admin::{DashboardStats, User};
use connector::appointments::Appointment;
use connector::employee::TimeLog;
use connector::projects::Project;
use connector::services::Service;
use connector::vehicles::Vehicle;

pub const LOADING: &str = "Loading...";

/// Renders a list page: loading, then error, then an empty notice or one
/// card per item.
pub fn render_list<T>(state: &FetchState<Vec<T>>, empty: &str, card: impl Fn(&T) -> String) -> String {
    if state.loading {
        return LOADING.to_string();
    }

    if let Some(error) = &state.error {
        return format!("Error: {}", error);
    }

    match &state.data {
        Some(items) if !items.is_empty() => items.iter().map(card).collect::<Vec<_>>().join("\n"),
        _ => empty.to_string(),
    }
}

fn money(value: f64) -> String {
    format!("${:.2}", value)
}

pub fn vehicle_card(vehicle: &Vehicle) -> String {
    let mut card = format!("#{} {}", vehicle.id, vehicle);

    if let Some(plate) = &vehicle.registration_number {
        card.push_str(&format!(" [{}]", plate));
    }

    if let Some(mileage) = vehicle.mileage {
        card.push_str(&format!(" {} km", mileage));
    }

    card
}

pub fn appointment_card(appointment: &Appointment) -> String {
    let mut card = format!(
        "#{} {} {}",
        appointment.id, appointment.scheduled_date_time, appointment.status
    );

    if let Some(vehicle) = appointment.vehicle_label() {
        card.push_str(&format!(" | {}", vehicle));
    }

    if !appointment.services.is_empty() {
        let services = appointment
            .services
            .iter()
            .map(|s| s.service_name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        card.push_str(&format!(" | {} ({})", services, money(appointment.total_base_price())));
    }

    if let Some(employee) = &appointment.assigned_employee_name {
        card.push_str(&format!(" | assigned to {}", employee));
    }

    card
}

pub fn project_card(project: &Project) -> String {
    let mut card = format!("#{} {} {}", project.id, project.project_name, project.status);

    if let Some(progress) = project.progress_percentage {
        card.push_str(&format!(" {}%", progress));
    }

    if let Some(cost) = project.estimated_cost {
        card.push_str(&format!(" | est. {}", money(cost)));
    }

    if let Some(employee) = &project.assigned_employee_name {
        card.push_str(&format!(" | assigned to {}", employee));
    }

    card
}

pub fn service_card(service: &Service) -> String {
    let id = service.id.map(|id| format!("#{} ", id)).unwrap_or_default();
    let mut card = format!("{}{}", id, service.service_name);

    if let Some(category) = &service.category {
        card.push_str(&format!(" ({})", category));
    }

    if let Some(price) = service.base_price {
        card.push_str(&format!(" {}", money(price)));
    }

    if let Some(minutes) = service.estimated_duration_minutes {
        card.push_str(&format!(" ~{} min", minutes));
    }

    card
}

pub fn user_card(user: &User) -> String {
    let role = user.role.map(|r| r.to_string()).unwrap_or_else(|| "-".to_string());
    let mut card = format!("#{} {} <{}> {}", user.id, user.display_name(), user.email, role);

    if user.is_active == Some(false) {
        card.push_str(" (inactive)");
    }

    card
}

pub fn timelog_card(log: &TimeLog) -> String {
    let target = match (log.appointment_id, log.project_id) {
        (Some(id), _) => format!("appointment #{}", id),
        (None, Some(id)) => format!("project #{}", id),
        (None, None) => "-".to_string(),
    };

    format!(
        "#{} {:.2}h on {}: {}",
        log.id,
        log.worked_hours(),
        target,
        log.description.as_deref().unwrap_or("")
    )
}

pub fn dashboard_card(stats: &DashboardStats) -> String {
    [
        format!("Users: {}", stats.users.0),
        format!("Appointments: {}", stats.appointments.0),
        format!("Vehicles: {}", stats.vehicles.0),
        format!("Total earnings: {}", money(stats.total_earnings.0)),
        format!("Active services: {}", stats.active_services.0),
    ]
    .join("\n")
}
