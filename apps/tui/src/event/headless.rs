use color_eyre::Result;
use senate_trades_core::chart::ChartSpec;
use senate_trades_core::table::{TransactionTable, TABLE_HEADERS};
use serde::Serialize;
use std::fmt::Write as _;

use crate::api::ApiClient;
use crate::app::actions::run_to_completion;
use crate::app::App;
use crate::cli::PageKind;

/// Run the application in headless mode (no UI): load the page once and print it.
pub async fn run_headless(app: &mut App, client: &ApiClient, query: &str, json: bool) -> Result<()> {
    let requests = app.start(query);
    run_to_completion(app, client, requests).await;

    let report = HeadlessReport::from_app(app);
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.to_text());
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct HeadlessReport {
    pub generated_at: String,
    pub page: &'static str,
    pub query: String,
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_info: Option<String>,
    pub transactions: Vec<HeadlessRow>,
    pub chart: Option<HeadlessChart>,
}

#[derive(Debug, Serialize)]
pub struct HeadlessRow {
    pub senator: String,
    pub ticker: String,
    pub side: String,
    pub date: String,
    pub estimate: String,
}

#[derive(Debug, Serialize)]
pub struct HeadlessChart {
    pub title: String,
    pub labels: Vec<String>,
    pub series: Vec<HeadlessSeries>,
}

#[derive(Debug, Serialize)]
pub struct HeadlessSeries {
    pub label: String,
    pub values: Vec<u64>,
}

impl HeadlessReport {
    pub fn from_app(app: &App) -> Self {
        let (table, chart, page_info) = match app.page {
            PageKind::Index => {
                let page = &app.pages.index;
                (page.table(), page.activity().chart(), Some(page.page_info()))
            }
            PageKind::Timeseries => {
                let page = &app.pages.timeseries;
                (page.table(), page.chart(), None)
            }
        };

        Self {
            generated_at: chrono::Local::now().to_rfc3339(),
            page: app.page.title(),
            query: app.share_query().to_string(),
            status: app.current().status().map(str::to_string),
            page_info,
            transactions: rows(table),
            chart: chart.map(HeadlessChart::from),
        }
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let title = format!("Senate Trades: {}", self.page);
        let _ = writeln!(out, "\n{title}\n{}", "=".repeat(title.len()));
        let _ = writeln!(out, "Query: {}", self.query);
        if let Some(info) = &self.page_info {
            let _ = writeln!(out, "{info}");
        }
        if let Some(status) = &self.status {
            let _ = writeln!(out, "Status: {status}");
        }

        if let Some(chart) = &self.chart {
            let _ = writeln!(out, "\n{}:", chart.title);
            for (index, label) in chart.labels.iter().enumerate() {
                let values = chart
                    .series
                    .iter()
                    .map(|series| {
                        format!(
                            "{} {}",
                            series.label,
                            series.values.get(index).copied().unwrap_or(0)
                        )
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                let _ = writeln!(out, "- {label}: {values}");
            }
        }

        let _ = writeln!(out, "\n{}", TABLE_HEADERS.join(" | "));
        for row in &self.transactions {
            let _ = writeln!(
                out,
                "- {} | {} | {} | {} | {}",
                row.senator, row.ticker, row.side, row.date, row.estimate
            );
        }
        out
    }
}

fn rows(table: &TransactionTable) -> Vec<HeadlessRow> {
    table
        .rows()
        .iter()
        .map(|row| HeadlessRow {
            senator: row.full_name.clone(),
            ticker: row.ticker.text.clone(),
            side: row.side.text.clone(),
            date: row.tx_date.clone(),
            estimate: row.estimate.clone(),
        })
        .collect()
}

impl From<&ChartSpec> for HeadlessChart {
    fn from(spec: &ChartSpec) -> Self {
        Self {
            title: spec.title.clone(),
            labels: spec.labels.clone(),
            series: spec
                .datasets
                .iter()
                .map(|dataset| HeadlessSeries {
                    label: dataset.label.clone(),
                    values: dataset.values.clone(),
                })
                .collect(),
        }
    }
}
