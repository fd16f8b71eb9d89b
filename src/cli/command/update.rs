//! Fetch, merge, validate, write and publish.

use std::{path::PathBuf, time::Duration};

use chrono::{Local, NaiveDate};
use reqwest::Client;
use tracing::{info, warn};

use crate::{
    cli::{create_progress_bar, UpdateArgs},
    context::RunContext,
    describe::{DescriptionSettings, Descriptions},
    download::{download_series, SeriesSource},
    error::PipelineError,
    output::{save_csv, save_parquet},
    portal::{Credentials, JobPolling},
    publish::{publish, PublishTarget},
    reading::ClimateVariable,
    table::merge,
};

use super::{default_output_path, make_parquet_file_name};

/// Everything a run needs, resolved before any stage starts.
#[derive(Debug, Clone)]
pub struct UpdatePlan {
    pub ctx: RunContext,
    pub source: SeriesSource,
    pub text: DescriptionSettings,
    pub parquet_path: Option<PathBuf>,
    /// `None` stops after the CSV is written.
    pub target: Option<PublishTarget>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateOutcome {
    pub rows: usize,
    pub columns: Vec<ClimateVariable>,
    pub csv_path: PathBuf,
    pub parquet_path: Option<PathBuf>,
    pub published: bool,
}

impl UpdatePlan {
    pub fn from_args(args: &UpdateArgs, today: NaiveDate) -> Self {
        let run_date = args.source.as_of.unwrap_or(today);
        let output = args.output.clone().unwrap_or_else(default_output_path);
        let ctx = RunContext::new(run_date, output);

        let parquet_path = args
            .parquet
            .as_ref()
            .map(|p| p.clone().unwrap_or_else(|| make_parquet_file_name(run_date)));

        let credentials = match (args.user.clone(), args.password.clone()) {
            (Some(username), Some(password)) => Some(Credentials { username, password }),
            _ => None,
        };
        let target = if args.dry_run {
            None
        } else {
            Some(PublishTarget {
                portal_url: args.portal_url.clone(),
                credentials,
                dataset_item: args.text.dataset_item.clone(),
                dashboard_item: args.dashboard_item.clone(),
                polling: JobPolling {
                    interval: Duration::from_secs(args.poll_seconds),
                    ..JobPolling::default()
                },
            })
        };

        UpdatePlan {
            ctx,
            source: SeriesSource::from(&args.source),
            text: DescriptionSettings::from(&args.text),
            parquet_path,
            target,
        }
    }
}

pub async fn update(args: &UpdateArgs) -> Result<UpdateOutcome, PipelineError> {
    let plan = UpdatePlan::from_args(args, Local::now().date_naive());
    run(&Client::new(), &plan).await
}

pub async fn run(client: &Client, plan: &UpdatePlan) -> Result<UpdateOutcome, PipelineError> {
    let ctx = &plan.ctx;
    info!(
        run_date = %ctx.run_date,
        latest = %ctx.latest_label(),
        "updating {} to {}",
        plan.source.county,
        ctx.output_path.display()
    );

    let pb = create_progress_bar(
        ClimateVariable::ALL.len() as u64,
        "Downloading series...".to_string(),
    );
    let mut series = Vec::with_capacity(ClimateVariable::ALL.len());
    for variable in ClimateVariable::ALL {
        pb.set_message(format!("Getting {} data...", variable));
        series.push(download_series(client, &plan.source, variable, ctx).await?);
        pb.inc(1);
    }
    pb.finish_with_message("Series downloaded");

    let table = merge(&series)?;
    table.validate()?;

    save_csv(&table, &ctx.output_path).map_err(|e| PipelineError::Write {
        path: ctx.output_path.clone(),
        message: e.to_string(),
    })?;
    info!(rows = table.len(), "CSV saved to {}", ctx.output_path.display());

    if let Some(path) = &plan.parquet_path {
        save_parquet(&table, path).map_err(|e| PipelineError::Write {
            path: path.clone(),
            message: e.to_string(),
        })?;
        info!("Parquet snapshot saved to {}", path.display());
    }

    let columns: Vec<ClimateVariable> = table.columns.iter().map(|c| c.variable).collect();
    if columns.len() < ClimateVariable::ALL.len() {
        warn!(
            present = columns.len(),
            "publishing table with missing climate columns"
        );
    }

    let published = match &plan.target {
        Some(target) => {
            let descriptions = Descriptions::build(ctx, &plan.source, &plan.text);
            publish(client, target, &ctx.output_path, &descriptions).await?;
            true
        }
        None => {
            info!("dry run, skipping publish");
            false
        }
    };

    Ok(UpdateOutcome {
        rows: table.len(),
        columns,
        csv_path: ctx.output_path.clone(),
        parquet_path: plan.parquet_path.clone(),
        published,
    })
}

// -- Tests -------------------------------------------------------------------
