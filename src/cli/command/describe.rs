use chrono::Local;

use crate::{
    cli::DescribeArgs,
    context::RunContext,
    describe::{DescriptionSettings, Descriptions},
    download::SeriesSource,
};

use super::default_output_path;

pub fn describe(args: &DescribeArgs) -> Descriptions {
    let run_date = args.source.as_of.unwrap_or_else(|| Local::now().date_naive());
    let ctx = RunContext::new(run_date, default_output_path());

    Descriptions::build(
        &ctx,
        &SeriesSource::from(&args.source),
        &DescriptionSettings::from(&args.text),
    )
}
