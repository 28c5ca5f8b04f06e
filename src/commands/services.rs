/*
 * SPDX-FileCopyrightText: 2026 Wavelens GmbH <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use super::*;
use crate::view::service_card;
use anyhow::Result;
use connector::services;

/// Public catalog, readable without logging in.
pub async fn handle(page: &Page) -> Result<()> {
    page.enter(Route::Home)?;

    let catalog = page.list(|client| async move { services::list(&client).await });
    page.show_list(&catalog, "No services offered yet.", service_card)
        .await
}
