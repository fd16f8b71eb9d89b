//! Feature layer collection overwrite.
//!
//! A hosted layer published from a CSV keeps a `Service2Data` link to the
//! source CSV item. Overwriting replaces that item's file, then republishes it
//! over the existing service so the layer keeps its item ID and configuration.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

use super::{Item, Portal, PortalError, SuccessResponse};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeResponse {
    publish_parameters: Value,
}

#[derive(Debug, Deserialize)]
struct PublishResponse {
    #[serde(default)]
    services: Vec<PublishedService>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PublishedService {
    #[serde(default)]
    service_item_id: Option<String>,
    #[serde(default)]
    job_id: Option<String>,
    #[serde(default)]
    error: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JobStatus {
    status: String,
    #[serde(default)]
    status_message: Option<String>,
}

impl Portal {
    /// Replaces every record of the hosted layer behind `item` with `file_path`.
    pub async fn overwrite(&self, item: &Item, file_path: &Path) -> Result<(), PortalError> {
        let overwrite_error = |message: String| PortalError::Overwrite {
            item: item.id.clone(),
            message,
        };

        let related = self
            .related_items(item, "Service2Data", "forward")
            .await?;
        let source = related
            .first()
            .ok_or_else(|| overwrite_error("no source data item is linked to the layer".to_string()))?;

        let file_name = file_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        if source.name.as_deref() != Some(file_name.as_str()) {
            return Err(overwrite_error(format!(
                "file name `{}` does not match source item `{}`",
                file_name,
                source.name.as_deref().unwrap_or_default()
            )));
        }

        self.update_item_data(source, file_path).await?;
        info!(source = %source.id, "uploaded {}", file_name);

        let mut parameters = self.analyze(source).await?;
        if let (Some(obj), Some(name)) = (parameters.as_object_mut(), item.service_name()) {
            obj.insert("name".to_string(), Value::String(name));
        }

        let service = self.publish_overwrite(source, &parameters).await?;
        if let Some(error) = service.error {
            return Err(overwrite_error(error.to_string()));
        }

        if let (Some(service_item), Some(job_id)) = (service.service_item_id, service.job_id) {
            self.wait_for_job(source, &service_item, &job_id)
                .await
                .map_err(|e| match e {
                    PortalError::Overwrite { message, .. } => overwrite_error(message),
                    other => other,
                })?;
        }

        Ok(())
    }

    /// Uploads a new file as the item's data.
    pub async fn update_item_data(&self, item: &Item, file_path: &Path) -> Result<(), PortalError> {
        let bytes = std::fs::read(file_path).map_err(|source| PortalError::Io {
            path: file_path.display().to_string(),
            source,
        })?;
        let file_name = file_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let part = Part::bytes(bytes).file_name(file_name).mime_str("text/csv")?;
        let form = Form::new().part("file", part);

        let path = format!("{}/items/{}/update", item.user_content_path(), item.id);
        let response: SuccessResponse = self.post_multipart(&path, form).await?;

        if !response.success {
            return Err(PortalError::Overwrite {
                item: item.id.clone(),
                message: "data upload was not accepted".to_string(),
            });
        }

        Ok(())
    }

    async fn analyze(&self, source: &Item) -> Result<Value, PortalError> {
        let response: AnalyzeResponse = self
            .post(
                "content/features/analyze",
                &[("itemid", source.id.as_str()), ("filetype", "csv")],
            )
            .await?;

        Ok(response.publish_parameters)
    }

    async fn publish_overwrite(
        &self,
        source: &Item,
        parameters: &Value,
    ) -> Result<PublishedService, PortalError> {
        let parameters = parameters.to_string();
        let path = format!("content/users/{}/publish", source.owner);
        let response: PublishResponse = self
            .post(
                &path,
                &[
                    ("itemID", source.id.as_str()),
                    ("filetype", "csv"),
                    ("overwrite", "true"),
                    ("publishParameters", parameters.as_str()),
                ],
            )
            .await?;

        response
            .services
            .into_iter()
            .next()
            .ok_or_else(|| PortalError::Decode("publish returned no services".to_string()))
    }

    async fn wait_for_job(
        &self,
        source: &Item,
        service_item: &str,
        job_id: &str,
    ) -> Result<(), PortalError> {
        let path = format!("content/users/{}/items/{}/status", source.owner, service_item);

        for attempt in 1..=self.polling.max_attempts {
            let status: JobStatus = self
                .get(&path, &[("jobId", job_id), ("jobType", "publish")])
                .await?;
            debug!(attempt, status = %status.status, "publish job");

            match status.status.as_str() {
                "completed" => return Ok(()),
                "failed" => {
                    return Err(PortalError::Overwrite {
                        item: service_item.to_string(),
                        message: status
                            .status_message
                            .unwrap_or_else(|| "publish job failed".to_string()),
                    })
                }
                _ => tokio::time::sleep(self.polling.interval).await,
            }
        }

        Err(PortalError::Overwrite {
            item: service_item.to_string(),
            message: format!(
                "publish job {} still running after {} checks",
                job_id, self.polling.max_attempts
            ),
        })
    }
}

// -- Tests -------------------------------------------------------------------
