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
use connector::employee::{self, StatusUpdate, TimeLogRequest, TimeLogUpdate};
use connector::{Id, Route};

#[derive(Subcommand, Debug)]
pub enum Commands {
    Appointments {
        #[command(subcommand)]
        cmd: WorkCommands,
    },
    Projects {
        #[command(subcommand)]
        cmd: WorkCommands,
    },
    Timelogs {
        #[command(subcommand)]
        cmd: TimeLogCommands,
    },
}

/// Shared by assigned appointments and assigned projects.
#[derive(Subcommand, Debug)]
pub enum WorkCommands {
    List,
    Show {
        id: Id,
    },
    Status {
        id: Id,
        status: String,
        #[arg(long)]
        notes: Option<String>,
        #[arg(long)]
        progress: Option<i32>,
    },
    Timelogs {
        id: Id,
    },
}

#[derive(Subcommand, Debug)]
pub enum TimeLogCommands {
    List,
    Add {
        #[arg(long, conflicts_with = "project")]
        appointment: Option<Id>,
        #[arg(long)]
        project: Option<Id>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        hours: Option<f64>,
        #[arg(long)]
        notes: Option<String>,
    },
    Edit {
        id: Id,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        hours: Option<f64>,
        #[arg(long)]
        notes: Option<String>,
    },
    Delete {
        id: Id,
    },
}

pub async fn handle(page: &Page, cmd: Commands) -> Result<()> {
    page.enter(Route::EmployeeDashboard)?;

    match cmd {
        Commands::Appointments { cmd } => handle_appointments(page, cmd).await,
        Commands::Projects { cmd } => handle_projects(page, cmd).await,
        Commands::Timelogs { cmd } => handle_timelogs(page, cmd).await,
    }
}

fn status_update(status: String, notes: Option<String>, progress: Option<i32>) -> Result<StatusUpdate> {
    if let Some(progress) = progress {
        if !(0..=100).contains(&progress) {
            bail!("Progress must be between 0 and 100.");
        }
    }

    Ok(StatusUpdate {
        status: status.to_uppercase(),
        notes,
        progress_percentage: progress,
    })
}

async fn handle_appointments(page: &Page, cmd: WorkCommands) -> Result<()> {
    let list = page.list(|client| async move { employee::list_appointments(&client).await });

    match cmd {
        WorkCommands::List => {
            page.show_list(&list, "No assigned appointments.", appointment_card)
                .await
        }

        WorkCommands::Show { id } => {
            let appointment = notify_failure(
                "Loading appointment",
                employee::get_appointment(&page.client, id).await,
            )?;
            page.print_one(&appointment, appointment_card)
        }

        WorkCommands::Status {
            id,
            status,
            notes,
            progress,
        } => {
            let req = status_update(status, notes, progress)?;
            page.mutate_then_show(
                &list,
                async {
                    submit(
                        "Updating appointment status",
                        &req,
                        employee::update_appointment_status(&page.client, id, &req).await,
                    )
                },
                "Appointment status updated.",
                "No assigned appointments.",
                appointment_card,
            )
            .await?;
            Ok(())
        }

        WorkCommands::Timelogs { id } => {
            let list = page.list(move |client| async move {
                employee::appointment_timelogs(&client, id).await
            });
            page.show_list(&list, "No time logged.", timelog_card).await
        }
    }
}

async fn handle_projects(page: &Page, cmd: WorkCommands) -> Result<()> {
    let list = page.list(|client| async move { employee::list_projects(&client).await });

    match cmd {
        WorkCommands::List => {
            page.show_list(&list, "No assigned projects.", project_card)
                .await
        }

        WorkCommands::Show { id } => {
            let project = notify_failure(
                "Loading project",
                employee::get_project(&page.client, id).await,
            )?;
            page.print_one(&project, project_card)
        }

        WorkCommands::Status {
            id,
            status,
            notes,
            progress,
        } => {
            let req = status_update(status, notes, progress)?;
            page.mutate_then_show(
                &list,
                async {
                    submit(
                        "Updating project status",
                        &req,
                        employee::update_project_status(&page.client, id, &req).await,
                    )
                },
                "Project status updated.",
                "No assigned projects.",
                project_card,
            )
            .await?;
            Ok(())
        }

        WorkCommands::Timelogs { id } => {
            let list = page.list(move |client| async move {
                employee::project_timelogs(&client, id).await
            });
            page.show_list(&list, "No time logged.", timelog_card).await
        }
    }
}

async fn handle_timelogs(page: &Page, cmd: TimeLogCommands) -> Result<()> {
    let list = page.list(|client| async move { employee::list_timelogs(&client).await });

    match cmd {
        TimeLogCommands::List => page.show_list(&list, "No time logged.", timelog_card).await,

        TimeLogCommands::Add {
            appointment,
            project,
            description,
            hours,
            notes,
        } => {
            if appointment.is_none() && project.is_none() {
                bail!("Either --appointment or --project is required.");
            }

            let req = TimeLogRequest {
                appointment_id: appointment,
                project_id: project,
                description: or_ask(description, "Work description")?,
                hours: or_ask_parsed(hours, "Hours")?,
                notes,
            };

            if req.hours <= 0.0 {
                bail!("Hours must be positive.");
            }

            page.mutate_then_show(
                &list,
                async {
                    submit(
                        "Logging time",
                        &req,
                        employee::create_timelog(&page.client, &req).await,
                    )
                },
                "Time logged.",
                "No time logged.",
                timelog_card,
            )
            .await?;
            Ok(())
        }

        TimeLogCommands::Edit {
            id,
            description,
            hours,
            notes,
        } => {
            let update = TimeLogUpdate {
                description,
                hours,
                notes,
            };

            if update == TimeLogUpdate::default() {
                bail!("Nothing to update.");
            }

            page.mutate_then_show(
                &list,
                async {
                    submit(
                        "Updating time log",
                        &update,
                        employee::update_timelog(&page.client, id, &update).await,
                    )
                },
                "Time log updated.",
                "No time logged.",
                timelog_card,
            )
            .await?;
            Ok(())
        }

        TimeLogCommands::Delete { id } => {
            page.mutate_then_show(
                &list,
                async {
                    notify_failure(
                        "Deleting time log",
                        employee::delete_timelog(&page.client, id).await,
                    )
                },
                "Time log deleted.",
                "No time logged.",
                timelog_card,
            )
            .await
        }
    }
}
