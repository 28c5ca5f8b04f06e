/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use super::*;
use crate::input::*;
use crate::view::*;
use anyhow::{Result, bail};
use clap::Subcommand;
use connector::appointments::{self, AppointmentRequest, AppointmentUpdate};
use connector::projects::{self, ProjectRequest, ProjectUpdate};
use connector::vehicles::{self, VehiclePatch, VehicleRequest};
use connector::{Id, Route};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Vehicles, appointments and projects at a glance
    Dashboard,
    Vehicles {
        #[command(subcommand)]
        cmd: VehicleCommands,
    },
    Appointments {
        #[command(subcommand)]
        cmd: AppointmentCommands,
    },
    Projects {
        #[command(subcommand)]
        cmd: ProjectCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum VehicleCommands {
    List,
    Show {
        id: Id,
    },
    Add {
        #[arg(long)]
        make: Option<String>,
        #[arg(long)]
        model: Option<String>,
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        license_plate: Option<String>,
        #[arg(long)]
        vin: Option<String>,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        mileage: Option<i64>,
    },
    Edit {
        id: Id,
        #[arg(long)]
        make: Option<String>,
        #[arg(long)]
        model: Option<String>,
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        license_plate: Option<String>,
        #[arg(long)]
        vin: Option<String>,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        mileage: Option<i64>,
    },
    Delete {
        id: Id,
    },
}

#[derive(Subcommand, Debug)]
pub enum AppointmentCommands {
    List,
    Show {
        id: Id,
    },
    Book {
        #[arg(long)]
        vehicle: Option<Id>,
        /// Service ids, comma separated
        #[arg(long, value_delimiter = ',')]
        services: Vec<Id>,
        /// YYYY-MM-DDTHH:mm:ss
        #[arg(long)]
        at: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    Reschedule {
        id: Id,
        #[arg(long)]
        at: Option<String>,
        #[arg(long)]
        vehicle: Option<Id>,
        #[arg(long, value_delimiter = ',')]
        services: Option<Vec<Id>>,
        #[arg(long)]
        notes: Option<String>,
    },
    Cancel {
        id: Id,
    },
    Delete {
        id: Id,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProjectCommands {
    List,
    Active,
    Show {
        id: Id,
    },
    Create {
        #[arg(long)]
        vehicle: Option<Id>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    Edit {
        id: Id,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    Delete {
        id: Id,
    },
}

pub async fn handle(page: &Page, cmd: Commands) -> Result<()> {
    page.enter(Route::CustomerDashboard)?;

    match cmd {
        Commands::Dashboard => dashboard(page).await,
        Commands::Vehicles { cmd } => handle_vehicles(page, cmd).await,
        Commands::Appointments { cmd } => handle_appointments(page, cmd).await,
        Commands::Projects { cmd } => handle_projects(page, cmd).await,
    }
}

async fn dashboard(page: &Page) -> Result<()> {
    let vehicles = page.list(|client| async move { vehicles::list(&client).await });
    let appointments = page.list(|client| async move { appointments::list(&client).await });
    let projects = page.list(|client| async move { projects::list_active(&client).await });

    mount_all(&vehicles, &appointments, &projects).await;

    println!("== Vehicles ==");
    page.print_list(&vehicles.state(), "No vehicles yet.", vehicle_card)?;
    println!("== Appointments ==");
    page.print_list(&appointments.state(), "No appointments.", appointment_card)?;
    println!("== Active projects ==");
    page.print_list(&projects.state(), "No active projects.", project_card)
}

async fn mount_all<A, B, C>(a: &Resource<Vec<A>>, b: &Resource<Vec<B>>, c: &Resource<Vec<C>>)
where
    A: Clone + Send + Sync + 'static,
    B: Clone + Send + Sync + 'static,
    C: Clone + Send + Sync + 'static,
{
    tokio::join!(a.mount(), b.mount(), c.mount());
    a.unmount();
    b.unmount();
    c.unmount();
}

async fn handle_vehicles(page: &Page, cmd: VehicleCommands) -> Result<()> {
    let list = page.list(|client| async move { vehicles::list(&client).await });

    match cmd {
        VehicleCommands::List => page.show_list(&list, "No vehicles yet.", vehicle_card).await,

        VehicleCommands::Show { id } => {
            let vehicle = notify_failure("Loading vehicle", vehicles::get(&page.client, id).await)?;
            page.print_one(&vehicle, vehicle_card)
        }

        VehicleCommands::Add {
            make,
            model,
            year,
            license_plate,
            vin,
            color,
            mileage,
        } => {
            let req = VehicleRequest {
                make: or_ask(make, "Make")?,
                model: or_ask(model, "Model")?,
                year: or_ask_parsed(year, "Year")?,
                license_plate: or_ask(license_plate, "License plate")?,
                vin,
                color,
                mileage,
            };

            page.mutate_then_show(
                &list,
                async { submit("Adding vehicle", &req, vehicles::create(&page.client, &req).await) },
                "Vehicle added.",
                "No vehicles yet.",
                vehicle_card,
            )
            .await?;
            Ok(())
        }

        VehicleCommands::Edit {
            id,
            make,
            model,
            year,
            license_plate,
            vin,
            color,
            mileage,
        } => {
            let patch = VehiclePatch {
                make,
                model,
                year,
                license_plate,
                vin,
                color,
                mileage,
            };

            if patch.is_empty() {
                bail!("Nothing to update.");
            }

            page.mutate_then_show(
                &list,
                async {
                    submit(
                        "Updating vehicle",
                        &patch,
                        vehicles::patch(&page.client, id, &patch).await,
                    )
                },
                "Vehicle updated.",
                "No vehicles yet.",
                vehicle_card,
            )
            .await?;
            Ok(())
        }

        VehicleCommands::Delete { id } => {
            page.mutate_then_show(
                &list,
                async { notify_failure("Deleting vehicle", vehicles::delete(&page.client, id).await) },
                "Vehicle deleted.",
                "No vehicles yet.",
                vehicle_card,
            )
            .await
        }
    }
}

async fn handle_appointments(page: &Page, cmd: AppointmentCommands) -> Result<()> {
    let list = page.list(|client| async move { appointments::list(&client).await });

    match cmd {
        AppointmentCommands::List => {
            page.show_list(&list, "No appointments.", appointment_card)
                .await
        }

        AppointmentCommands::Show { id } => {
            let appointment = notify_failure(
                "Loading appointment",
                appointments::get(&page.client, id).await,
            )?;
            page.print_one(&appointment, appointment_card)
        }

        AppointmentCommands::Book {
            vehicle,
            services,
            at,
            notes,
        } => {
            let service_ids = if services.is_empty() {
                parse_ids(&ask_for_input("Service ids (comma separated)")?)?
            } else {
                services
            };

            let req = AppointmentRequest {
                vehicle_id: or_ask_parsed(vehicle, "Vehicle id")?,
                service_ids,
                scheduled_date_time: or_ask(at, "Date and time (YYYY-MM-DDTHH:mm:ss)")?,
                customer_notes: notes,
            };

            page.mutate_then_show(
                &list,
                async {
                    submit(
                        "Booking appointment",
                        &req,
                        appointments::book(&page.client, &req).await,
                    )
                },
                "Appointment booked.",
                "No appointments.",
                appointment_card,
            )
            .await?;
            Ok(())
        }

        AppointmentCommands::Reschedule {
            id,
            at,
            vehicle,
            services,
            notes,
        } => {
            let update = AppointmentUpdate {
                vehicle_id: vehicle,
                service_ids: services,
                scheduled_date_time: at,
                customer_notes: notes,
            };

            if update == AppointmentUpdate::default() {
                bail!("Nothing to update.");
            }

            page.mutate_then_show(
                &list,
                async {
                    submit(
                        "Updating appointment",
                        &update,
                        appointments::update(&page.client, id, &update).await,
                    )
                },
                "Appointment updated.",
                "No appointments.",
                appointment_card,
            )
            .await?;
            Ok(())
        }

        AppointmentCommands::Cancel { id } => {
            page.mutate_then_show(
                &list,
                async {
                    notify_failure(
                        "Cancelling appointment",
                        appointments::cancel(&page.client, id).await,
                    )
                },
                "Appointment cancelled.",
                "No appointments.",
                appointment_card,
            )
            .await?;
            Ok(())
        }

        AppointmentCommands::Delete { id } => {
            page.mutate_then_show(
                &list,
                async {
                    notify_failure(
                        "Deleting appointment",
                        appointments::delete(&page.client, id).await,
                    )
                },
                "Appointment deleted.",
                "No appointments.",
                appointment_card,
            )
            .await
        }
    }
}

async fn handle_projects(page: &Page, cmd: ProjectCommands) -> Result<()> {
    let list = page.list(|client| async move { projects::list(&client).await });

    match cmd {
        ProjectCommands::List => page.show_list(&list, "No projects.", project_card).await,

        ProjectCommands::Active => {
            let list = page.list(|client| async move { projects::list_active(&client).await });
            page.show_list(&list, "No active projects.", project_card)
                .await
        }

        ProjectCommands::Show { id } => {
            let project = notify_failure("Loading project", projects::get(&page.client, id).await)?;
            page.print_one(&project, project_card)
        }

        ProjectCommands::Create {
            vehicle,
            name,
            description,
            notes,
        } => {
            let req = ProjectRequest {
                vehicle_id: or_ask_parsed(vehicle, "Vehicle id")?,
                project_name: or_ask(name, "Project name")?,
                description,
                additional_notes: notes,
            };

            page.mutate_then_show(
                &list,
                async {
                    submit(
                        "Requesting project",
                        &req,
                        projects::create(&page.client, &req).await,
                    )
                },
                "Project requested.",
                "No projects.",
                project_card,
            )
            .await?;
            Ok(())
        }

        ProjectCommands::Edit {
            id,
            name,
            description,
            notes,
        } => {
            let update = ProjectUpdate {
                project_name: name,
                description,
                additional_notes: notes,
            };

            if update == ProjectUpdate::default() {
                bail!("Nothing to update.");
            }

            page.mutate_then_show(
                &list,
                async {
                    submit(
                        "Updating project",
                        &update,
                        projects::update(&page.client, id, &update).await,
                    )
                },
                "Project updated.",
                "No projects.",
                project_card,
            )
            .await?;
            Ok(())
        }

        ProjectCommands::Delete { id } => {
            page.mutate_then_show(
                &list,
                async { notify_failure("Deleting project", projects::delete(&page.client, id).await) },
                "Project deleted.",
                "No projects.",
                project_card,
            )
            .await
        }
    }
}

pub fn parse_ids(input: &str) -> Result<Vec<Id>> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<Id>().map_err(|_| anyhow::anyhow!("Invalid id: {}", s)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::http::Method;
    use axum::routing::any;
    use connector::{HttpClient, Role, SessionStore};
    use std::sync::{Arc, Mutex};

    async fn appointments_backend(calls: Arc<Mutex<Vec<Method>>>) -> String {
        let app = Router::new().route(
            "/api/customer/appointments",
            any(move |method: Method| {
                let calls = calls.clone();
                async move {
                    calls.lock().unwrap().push(method.clone());

                    let appointment = serde_json::json!({
                        "id": 9, "scheduledDateTime": "2026-03-01T09:00:00", "status": "PENDING"
                    });
                    if method == Method::POST {
                        axum::Json(appointment)
                    } else {
                        axum::Json(serde_json::json!([appointment]))
                    }
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}/api", addr)
    }

    #[tokio::test]
    async fn test_booking_refetches_appointments() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let base_url = appointments_backend(calls.clone()).await;

        let session = Arc::new(SessionStore::in_memory());
        session.login("t1", Role::Customer).unwrap();
        let page = Page::new(HttpClient::new(base_url, session), false);

        handle_appointments(
            &page,
            AppointmentCommands::Book {
                vehicle: Some(1),
                services: vec![1],
                at: Some("2026-03-01T09:00:00".to_string()),
                notes: None,
            },
        )
        .await
        .unwrap();

        assert_eq!(
            *calls.lock().unwrap(),
            vec![Method::GET, Method::POST, Method::GET]
        );
    }

    #[test]
    fn test_parse_ids() {
        assert_eq!(parse_ids("1, 2,3").unwrap(), vec![1, 2, 3]);
        assert_eq!(parse_ids(" ").unwrap(), Vec::<Id>::new());
        assert!(parse_ids("1,x").is_err());
    }
}
