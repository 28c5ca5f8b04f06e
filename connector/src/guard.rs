/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Role-gated navigation. This only decides what to show; the backend
//! re-checks the role on every request.

use crate::session::{Role, Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    AdminDashboard,
    AdminUsers,
    EmployeeDashboard,
    CustomerDashboard,
}

impl Route {
    pub const ALL: [Route; 5] = [
        Route::Home,
        Route::AdminDashboard,
        Route::AdminUsers,
        Route::EmployeeDashboard,
        Route::CustomerDashboard,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::AdminDashboard => "/admin-dashboard",
            Route::AdminUsers => "/admin-dashboard/users",
            Route::EmployeeDashboard => "/employee-dashboard",
            Route::CustomerDashboard => "/customer-dashboard",
        }
    }

    pub fn required_role(&self) -> Option<Role> {
        match self {
            Route::Home => None,
            Route::AdminDashboard | Route::AdminUsers => Some(Role::Admin),
            Route::EmployeeDashboard => Some(Role::Employee),
            Route::CustomerDashboard => Some(Role::Customer),
        }
    }

    /// Unknown paths fall through to the landing page.
    pub fn from_path(path: &str) -> Route {
        let path = match path.trim_end_matches('/') {
            "" => "/",
            path => path,
        };

        Route::ALL
            .into_iter()
            .find(|route| route.path() == path)
            .unwrap_or(Route::Home)
    }

    pub fn dashboard_for(role: Role) -> Route {
        match role {
            Role::Admin => Route::AdminDashboard,
            Role::Employee => Route::EmployeeDashboard,
            Role::Customer => Route::CustomerDashboard,
        }
    }

    /// Guard decision for visiting this route with the given session.
    pub fn visit(&self, session: Option<&Session>) -> GuardDecision {
        match self {
            Route::Home => GuardDecision::Render,
            route => guard(session, route.required_role()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Render,
    Redirect(Route),
}

impl GuardDecision {
    pub fn allowed(&self) -> bool {
        matches!(self, GuardDecision::Render)
    }
}

pub fn guard(session: Option<&Session>, required_role: Option<Role>) -> GuardDecision {
    let session = match session {
        Some(session) if !session.token.is_empty() => session,
        _ => return GuardDecision::Redirect(Route::Home),
    };

    match required_role {
        Some(role) if role != session.role => GuardDecision::Redirect(Route::Home),
        _ => GuardDecision::Render,
    }
}
