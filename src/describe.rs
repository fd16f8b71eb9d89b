//! Snippet and description text pushed to the published items.

use crate::{
    context::RunContext,
    download::SeriesSource,
    reading::ClimateVariable,
};

pub const DEFAULT_ORG_URL: &str = "http://wake.maps.arcgis.com";
pub const DEFAULT_DATASET_START: &str = "January, 1969";
pub const DEFAULT_DASHBOARD_START: &str = "January, 1999";

const FONT_STACK_QUOTED: &str = "&quot;Avenir Next W01&quot;, &quot;Avenir Next W00&quot;, &quot;Avenir Next&quot;, Avenir, &quot;Helvetica Neue&quot;, sans-serif;";
const FONT_STACK: &str = "Avenir Next W01, Avenir Next W00, Avenir Next, Avenir, Helvetica Neue, sans-serif";
const CLIMATE_DIVISIONS_URL: &str =
    "https://www.ncdc.noaa.gov/monitoring-references/maps/us-climate-divisions.php";

/// Fixed wording around the date-dependent parts of the text.
#[derive(Debug, Clone)]
pub struct DescriptionSettings {
    pub org_url: String,
    pub dataset_item_id: String,
    pub dataset_start: String,
    pub dashboard_start: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Descriptions {
    pub dataset_snippet: String,
    pub dataset_description: String,
    pub dashboard_description: String,
}

impl Descriptions {
    pub fn build(ctx: &RunContext, source: &SeriesSource, settings: &DescriptionSettings) -> Self {
        Descriptions {
            dataset_snippet: dataset_snippet(ctx, settings),
            dataset_description: dataset_description(ctx, source),
            dashboard_description: dashboard_description(ctx, source, settings),
        }
    }
}

fn dataset_snippet(ctx: &RunContext, settings: &DescriptionSettings) -> String {
    format!(
        "Monthly precipitation, max temp, min temp, and average temp in Wake County from {} to {}.",
        settings.dataset_start,
        ctx.latest_label()
    )
}

fn dataset_description(ctx: &RunContext, source: &SeriesSource) -> String {
    let base = source.base_url.trim_end_matches('/');
    let url = |variable: ClimateVariable| source.series_url(variable, ctx);
    let spacer = r#"<div><font size="3"><br /></font></div>"#;
    let temperature = |label: &str, variable: ClimateVariable| {
        let href = url(variable);
        format!(
            r#"<font size="3"><font face="{FONT_STACK}">{label} dataset downloaded from </font><a href="{href}">{href}</a>."#
        )
    };

    let mut html = String::new();
    html.push_str(&format!(
        r#"<div><font size="3">Last updated to include data up to <b>{}</b>.<br /></font></div>"#,
        ctx.latest_label()
    ));
    html.push_str(spacer);
    html.push_str(&format!(
        r#"<div><font size="3"><span style="font-family: {FONT_STACK_QUOTED}">Data from </span><a href="{base}">{base}</a>, which references the <a href="{CLIMATE_DIVISIONS_URL}" target="_blank">US Climate Divisional Dataset</a>. </font></div>"#
    ));
    html.push_str(spacer);

    // Only the precipitation link opens in a new tab.
    let pcp = url(ClimateVariable::Precipitation);
    html.push_str(&format!(
        r#"<font size="3"><span style="font-family: {FONT_STACK_QUOTED}">Precipitation dataset downloaded from: </span><a href="{pcp}" target="_blank">{pcp}</a><font face="{FONT_STACK}">.</font></font>"#
    ));
    html.push_str(&format!(
        r#"<div><font face="{FONT_STACK}" size="3"><br /></font></div>"#
    ));

    for (label, variable) in [
        ("Average Temperature", ClimateVariable::AverageTemperature),
        ("Minimum Temperature", ClimateVariable::MinTemperature),
    ] {
        html.push_str(&format!("<div>{}</font></div>", temperature(label, variable)));
        html.push_str(spacer);
    }

    // The closing paragraphs sit inside the maximum temperature block.
    html.push_str(&format!(
        "<div>{}<br /></font>",
        temperature("Maximum Temperature", ClimateVariable::MaxTemperature)
    ));
    html.push_str(&format!(
        r#"<div style="font-family: {FONT_STACK_QUOTED}"><font size="3"><br /></font></div>"#
    ));
    html.push_str(&format!(
        r#"<div style="font-family: {FONT_STACK_QUOTED}"><font size="3">Datasets brought together into one table and date column split into year and month before uploading to ArcGIS Online to make dashboarding easier.</font></div>"#
    ));
    html.push_str("</div>");

    html
}

fn dashboard_description(
    ctx: &RunContext,
    source: &SeriesSource,
    settings: &DescriptionSettings,
) -> String {
    let base = source.base_url.trim_end_matches('/');
    let item_url = format!(
        "{}/home/item.html?id={}",
        settings.org_url.trim_end_matches('/'),
        settings.dataset_item_id
    );

    format!(
        concat!(
            "This interactive dashboard allows the user to explore monthly precipitation",
            " and temperature data for the past five decades.<div><br /></div>",
            "<div>The data in this dashboard are part of the US Climate Divisional Dataset and were sourced ",
            r#"from <a href="{base}" target="_blank">{base}</a>. </div><div><br /></div>"#,
            r#"<div>Includes data from {start} to {latest}. See the <a href="{item_url}" target="_blank">Wake_Monthly_Weather</a> "#,
            "data details for more information on source data.</div>"
        ),
        base = base,
        start = settings.dashboard_start,
        latest = ctx.latest_label(),
        item_url = item_url,
    )
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use chrono::NaiveDate;

    use super::*;

    fn settings() -> DescriptionSettings {
        DescriptionSettings {
            org_url: DEFAULT_ORG_URL.to_string(),
            dataset_item_id: "c0d8a9375cfd47708b598c5441ab9e86".to_string(),
            dataset_start: DEFAULT_DATASET_START.to_string(),
            dashboard_start: DEFAULT_DASHBOARD_START.to_string(),
        }
    }

    fn build(y: i32, m: u32, d: u32) -> Descriptions {
        let ctx = RunContext::new(
            NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            PathBuf::from("Wake_Monthly_Weather.csv"),
        );
        Descriptions::build(&ctx, &SeriesSource::default(), &settings())
    }

    #[test]
    fn should_embed_latest_month() {
        let d = build(2024, 3, 5);

        assert_eq!(
            d.dataset_snippet,
            "Monthly precipitation, max temp, min temp, and average temp in Wake County from January, 1969 to February, 2024."
        );
        assert!(d
            .dataset_description
            .contains("Last updated to include data up to <b>February, 2024</b>."));
        assert!(d
            .dashboard_description
            .contains("Includes data from January, 1999 to February, 2024."));
    }

    #[test]
    fn should_link_each_series() {
        let d = build(2024, 3, 5);

        for code in ["pcp", "tavg", "tmin", "tmax"] {
            let url = format!(
                "https://www.ncdc.noaa.gov/cag/county/time-series/NC-183-{}-all-2-1974-2024.csv",
                code
            );
            assert!(d.dataset_description.contains(&url), "missing {url}");
        }
    }

    #[test]
    fn should_link_dashboard_to_dataset_item() {
        let d = build(2024, 3, 5);
        assert!(d.dashboard_description.contains(
            r#"<a href="http://wake.maps.arcgis.com/home/item.html?id=c0d8a9375cfd47708b598c5441ab9e86" target="_blank">Wake_Monthly_Weather</a>"#
        ));
    }

    #[test]
    fn should_keep_published_markup() {
        let d = build(2024, 3, 5);
        let html = &d.dataset_description;

        assert_eq!(html.matches(r#"target="_blank""#).count(), 2);
        assert!(html.contains(
            r#"<a href="https://www.ncdc.noaa.gov/cag/county/time-series/NC-183-pcp-all-2-1974-2024.csv" target="_blank">"#
        ));
        assert!(html.contains(
            r#"<a href="https://www.ncdc.noaa.gov/cag/county/time-series/NC-183-tavg-all-2-1974-2024.csv">"#
        ));
        assert!(html.contains(&format!(
            r#"</font></font><div><font face="{FONT_STACK}" size="3"><br /></font></div><div><font size="3">"#
        )));
        assert!(html.contains(&format!(
            r#"NC-183-tmax-all-2-1974-2024.csv</a>.<br /></font><div style="font-family: {FONT_STACK_QUOTED}">"#
        )));
        assert!(html.ends_with("to make dashboarding easier.</font></div></div>"));
        assert_eq!(html.matches("<div").count(), html.matches("</div>").count());
        assert_eq!(html.len(), 2971);
    }

    #[test]
    fn should_use_december_in_january() {
        let d = build(2025, 1, 20);
        assert!(d.dataset_snippet.ends_with("to December, 2024."));
        assert!(d.dataset_description.contains("NC-183-pcp-all-12-1974-2024.csv"));
    }

    #[test]
    fn should_be_identical_within_a_month() {
        assert_eq!(build(2024, 6, 1), build(2024, 6, 30));
    }
}
