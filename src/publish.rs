//! Pushes the written table and refreshed text to ArcGIS Online.

use std::path::Path;

use reqwest::Client;
use tracing::info;

use crate::{
    cli::create_spinner,
    describe::Descriptions,
    portal::{Credentials, ItemProperties, JobPolling, Portal, PortalError},
};

pub const DEFAULT_DATASET_ITEM: &str = "c0d8a9375cfd47708b598c5441ab9e86";
pub const DEFAULT_DASHBOARD_ITEM: &str = "319b3bd3007543f89aaddd5e38c0d658";

#[derive(Debug, Clone)]
pub struct PublishTarget {
    pub portal_url: String,
    /// Checked only once the table has been written.
    pub credentials: Option<Credentials>,
    pub dataset_item: String,
    pub dashboard_item: String,
    pub polling: JobPolling,
}

/// Overwrites the dataset layer with `csv_path`, then refreshes both item descriptions.
pub async fn publish(
    client: &Client,
    target: &PublishTarget,
    csv_path: &Path,
    descriptions: &Descriptions,
) -> Result<(), PortalError> {
    let credentials = target
        .credentials
        .as_ref()
        .ok_or_else(|| PortalError::Auth("AGOL_USER and AGOL_PASS must be set".to_string()))?;

    let bar = create_spinner("Connecting to ArcGIS Online...".to_string());
    let portal = match Portal::sign_in(client.clone(), &target.portal_url, credentials).await {
        Ok(portal) => portal.with_polling(target.polling),
        Err(e) => {
            bar.abandon_with_message("Sign in failed");
            return Err(e);
        }
    };
    bar.finish_with_message("Connected");

    let dataset = portal.item(&target.dataset_item).await?;

    let bar = create_spinner(format!("Overwriting {} feature layer collection...", dataset.title));
    if let Err(e) = portal.overwrite(&dataset, csv_path).await {
        bar.abandon_with_message("Overwrite failed");
        return Err(e);
    }
    bar.finish_with_message("Overwritten");
    info!(item = %dataset.id, kind = %dataset.item_type, "layer overwritten from {}", csv_path.display());

    let properties = ItemProperties {
        snippet: Some(descriptions.dataset_snippet.clone()),
        description: Some(descriptions.dataset_description.clone()),
    };
    portal.update_item(&dataset, &properties).await?;
    info!(item = %dataset.id, "updated snippet and description");

    let dashboard = portal.item(&target.dashboard_item).await?;
    let properties = ItemProperties {
        snippet: None,
        description: Some(descriptions.dashboard_description.clone()),
    };
    portal.update_item(&dashboard, &properties).await?;
    info!(item = %dashboard.id, "updated dashboard description");

    Ok(())
}
