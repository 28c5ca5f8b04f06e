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
use connector::admin::{
    self, ApproveProject, AssignAppointment, AssignProject, RejectProject, StaffRequest, UserUpdate,
};
use connector::services::{self, ServiceRequest};
use connector::{Id, Role, Route};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Counters plus today's appointments
    Dashboard,
    Users {
        #[command(subcommand)]
        cmd: UserCommands,
    },
    Services {
        #[command(subcommand)]
        cmd: ServiceCommands,
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
pub enum UserCommands {
    List,
    Employees,
    AddEmployee {
        #[command(flatten)]
        staff: StaffArgs,
    },
    AddAdmin {
        #[command(flatten)]
        staff: StaffArgs,
    },
    Edit {
        id: Id,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone_number: Option<String>,
        #[arg(long)]
        role: Option<Role>,
    },
    Delete {
        id: Id,
    },
    Activate {
        id: Id,
    },
    Deactivate {
        id: Id,
    },
}

#[derive(clap::Args, Debug)]
pub struct StaffArgs {
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    first_name: Option<String>,
    #[arg(long)]
    last_name: Option<String>,
    #[arg(long)]
    phone_number: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum ServiceCommands {
    List,
    Add {
        #[command(flatten)]
        service: ServiceArgs,
    },
    Edit {
        id: Id,
        #[command(flatten)]
        service: ServiceArgs,
    },
    Delete {
        id: Id,
    },
}

#[derive(clap::Args, Debug)]
pub struct ServiceArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    price: Option<f64>,
    #[arg(long)]
    minutes: Option<i32>,
}

#[derive(Subcommand, Debug)]
pub enum AppointmentCommands {
    Confirmed,
    Today,
    Assign {
        id: Id,
        #[arg(long)]
        employee: Id,
        #[arg(long)]
        notes: Option<String>,
        #[arg(long)]
        final_cost: Option<f64>,
    },
    Reassign {
        id: Id,
        #[arg(long)]
        employee: Id,
        #[arg(long)]
        notes: Option<String>,
        #[arg(long)]
        final_cost: Option<f64>,
    },
    Unassign {
        id: Id,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProjectCommands {
    Approve {
        id: Id,
        #[arg(long)]
        employee: Option<Id>,
        #[arg(long)]
        estimated_cost: Option<f64>,
        #[arg(long)]
        estimated_hours: Option<i32>,
        /// YYYY-MM-DD
        #[arg(long)]
        expected_completion: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    Reject {
        id: Id,
        #[arg(long)]
        reason: Option<String>,
    },
    Assign {
        id: Id,
        #[arg(long)]
        employee: Id,
        #[arg(long)]
        estimated_cost: Option<f64>,
        #[arg(long)]
        estimated_hours: Option<i32>,
        #[arg(long)]
        notes: Option<String>,
    },
    Unassign {
        id: Id,
    },
}

pub async fn handle(page: &Page, cmd: Commands) -> Result<()> {
    let route = match cmd {
        Commands::Users { .. } => Route::AdminUsers,
        _ => Route::AdminDashboard,
    };
    page.enter(route)?;

    match cmd {
        Commands::Dashboard => dashboard(page).await,
        Commands::Users { cmd } => handle_users(page, cmd).await,
        Commands::Services { cmd } => handle_services(page, cmd).await,
        Commands::Appointments { cmd } => handle_appointments(page, cmd).await,
        Commands::Projects { cmd } => handle_projects(page, cmd).await,
    }
}

async fn dashboard(page: &Page) -> Result<()> {
    let stats = notify_failure(
        "Loading dashboard",
        admin::dashboard_stats(&page.client).await,
    )?;
    page.print_one(&stats, dashboard_card)?;

    let today = page.list(|client| async move { admin::todays_appointments(&client).await });
    println!("== Today ==");
    page.show_list(&today, "No appointments today.", appointment_card)
        .await
}

fn staff_request(staff: StaffArgs, role: Role) -> Result<StaffRequest> {
    Ok(StaffRequest {
        email: or_ask(staff.email, "Email")?,
        first_name: staff.first_name,
        last_name: staff.last_name,
        phone_number: staff.phone_number,
        role: Some(role),
    })
}

async fn handle_users(page: &Page, cmd: UserCommands) -> Result<()> {
    let users = page.list(|client| async move { admin::list_users(&client).await });

    match cmd {
        UserCommands::List => page.show_list(&users, "No users.", user_card).await,

        UserCommands::Employees => {
            let employees = page.list(|client| async move { admin::list_employees(&client).await });
            page.show_list(&employees, "No employees.", user_card).await
        }

        UserCommands::AddEmployee { staff } => {
            let req = staff_request(staff, Role::Employee)?;
            page.mutate_then_show(
                &users,
                async {
                    submit(
                        "Adding employee",
                        &req,
                        admin::add_employee(&page.client, &req).await,
                    )
                },
                &format!("Employee added. A temporary password was sent to {}.", req.email),
                "No users.",
                user_card,
            )
            .await?;
            Ok(())
        }

        UserCommands::AddAdmin { staff } => {
            let req = staff_request(staff, Role::Admin)?;
            page.mutate_then_show(
                &users,
                async {
                    submit(
                        "Adding admin",
                        &req,
                        admin::add_admin(&page.client, &req).await,
                    )
                },
                &format!("Admin added. A temporary password was sent to {}.", req.email),
                "No users.",
                user_card,
            )
            .await?;
            Ok(())
        }

        UserCommands::Edit {
            id,
            first_name,
            last_name,
            email,
            phone_number,
            role,
        } => {
            let update = UserUpdate {
                first_name,
                last_name,
                email,
                phone_number,
                role,
            };

            if update == UserUpdate::default() {
                bail!("Nothing to update.");
            }

            page.mutate_then_show(
                &users,
                async {
                    submit(
                        "Updating user",
                        &update,
                        admin::update_user(&page.client, id, &update).await,
                    )
                },
                "User updated.",
                "No users.",
                user_card,
            )
            .await?;
            Ok(())
        }

        UserCommands::Delete { id } => {
            page.mutate_then_show(
                &users,
                async {
                    notify_failure(
                        "Deleting user",
                        admin::delete_user(&page.client, id).await,
                    )
                },
                "User deleted.",
                "No users.",
                user_card,
            )
            .await
        }

        UserCommands::Activate { id } => {
            page.mutate_then_show(
                &users,
                async {
                    notify_failure(
                        "Activating user",
                        admin::set_user_status(&page.client, id, true).await,
                    )
                },
                "User activated.",
                "No users.",
                user_card,
            )
            .await?;
            Ok(())
        }

        UserCommands::Deactivate { id } => {
            page.mutate_then_show(
                &users,
                async {
                    notify_failure(
                        "Deactivating user",
                        admin::set_user_status(&page.client, id, false).await,
                    )
                },
                "User deactivated.",
                "No users.",
                user_card,
            )
            .await?;
            Ok(())
        }
    }
}

async fn handle_services(page: &Page, cmd: ServiceCommands) -> Result<()> {
    let catalog = page.list(|client| async move { services::list(&client).await });

    match cmd {
        ServiceCommands::List => page.show_list(&catalog, "No services.", service_card).await,

        ServiceCommands::Add { service } => {
            let req = ServiceRequest {
                service_name: or_ask(service.name, "Service name")?,
                category: service.category,
                description: service.description,
                base_price: Some(or_ask_parsed(service.price, "Base price")?),
                estimated_duration_minutes: service.minutes,
            };

            page.mutate_then_show(
                &catalog,
                async {
                    submit(
                        "Adding service",
                        &req,
                        services::create(&page.client, &req).await,
                    )
                },
                "Service added.",
                "No services.",
                service_card,
            )
            .await?;
            Ok(())
        }

        ServiceCommands::Edit { id, service } => {
            let req = ServiceRequest {
                service_name: or_ask(service.name, "Service name")?,
                category: service.category,
                description: service.description,
                base_price: service.price,
                estimated_duration_minutes: service.minutes,
            };

            page.mutate_then_show(
                &catalog,
                async {
                    submit(
                        "Updating service",
                        &req,
                        services::update(&page.client, id, &req).await,
                    )
                },
                "Service updated.",
                "No services.",
                service_card,
            )
            .await?;
            Ok(())
        }

        ServiceCommands::Delete { id } => {
            page.mutate_then_show(
                &catalog,
                async {
                    notify_failure(
                        "Deleting service",
                        services::delete(&page.client, id).await,
                    )
                },
                "Service deleted.",
                "No services.",
                service_card,
            )
            .await
        }
    }
}

async fn handle_appointments(page: &Page, cmd: AppointmentCommands) -> Result<()> {
    let confirmed = page.list(|client| async move { admin::confirmed_appointments(&client).await });

    match cmd {
        AppointmentCommands::Confirmed => {
            page.show_list(&confirmed, "No confirmed appointments.", appointment_card)
                .await
        }

        AppointmentCommands::Today => {
            let list = page.list(|client| async move { admin::todays_appointments(&client).await });
            page.show_list(&list, "No appointments today.", appointment_card)
                .await
        }

        AppointmentCommands::Assign {
            id,
            employee,
            notes,
            final_cost,
        } => {
            let req = AssignAppointment {
                employee_id: employee,
                admin_notes: notes,
                final_cost,
            };
            page.mutate_then_show(
                &confirmed,
                async {
                    submit(
                        "Assigning appointment",
                        &req,
                        admin::assign_appointment(&page.client, id, &req).await,
                    )
                },
                &format!("Appointment #{} assigned to employee #{}.", id, employee),
                "No confirmed appointments.",
                appointment_card,
            )
            .await?;
            Ok(())
        }

        AppointmentCommands::Reassign {
            id,
            employee,
            notes,
            final_cost,
        } => {
            let req = AssignAppointment {
                employee_id: employee,
                admin_notes: notes,
                final_cost,
            };
            page.mutate_then_show(
                &confirmed,
                async {
                    submit(
                        "Reassigning appointment",
                        &req,
                        admin::reassign_appointment(&page.client, id, &req).await,
                    )
                },
                &format!("Appointment #{} reassigned to employee #{}.", id, employee),
                "No confirmed appointments.",
                appointment_card,
            )
            .await?;
            Ok(())
        }

        AppointmentCommands::Unassign { id } => {
            page.mutate_then_show(
                &confirmed,
                async {
                    notify_failure(
                        "Unassigning appointment",
                        admin::unassign_appointment(&page.client, id).await,
                    )
                },
                &format!("Appointment #{} unassigned.", id),
                "No confirmed appointments.",
                appointment_card,
            )
            .await
        }
    }
}

async fn handle_projects(page: &Page, cmd: ProjectCommands) -> Result<()> {
    match cmd {
        ProjectCommands::Approve {
            id,
            employee,
            estimated_cost,
            estimated_hours,
            expected_completion,
            notes,
        } => {
            let req = ApproveProject {
                employee_id: employee,
                estimated_cost,
                estimated_duration_hours: estimated_hours,
                expected_completion_date: expected_completion,
                approval_notes: notes,
            };
            submit(
                "Approving project",
                &req,
                admin::approve_project(&page.client, id, &req).await,
            )?;
            println!("Project #{} approved.", id);
        }

        ProjectCommands::Reject { id, reason } => {
            let req = RejectProject {
                rejection_reason: or_ask(reason, "Rejection reason")?,
            };
            submit(
                "Rejecting project",
                &req,
                admin::reject_project(&page.client, id, &req).await,
            )?;
            println!("Project #{} rejected.", id);
        }

        ProjectCommands::Assign {
            id,
            employee,
            estimated_cost,
            estimated_hours,
            notes,
        } => {
            let req = AssignProject {
                employee_id: employee,
                estimated_cost,
                estimated_duration_hours: estimated_hours,
                admin_notes: notes,
            };
            submit(
                "Assigning project",
                &req,
                admin::assign_project(&page.client, id, &req).await,
            )?;
            println!("Project #{} assigned to employee #{}.", id, employee);
        }

        ProjectCommands::Unassign { id } => {
            notify_failure(
                "Unassigning project",
                admin::unassign_project(&page.client, id).await,
            )?;
            println!("Project #{} unassigned.", id);
        }
    }

    Ok(())
}
