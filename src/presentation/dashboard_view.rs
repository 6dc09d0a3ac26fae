// Dashboard view models built from the latest summary
use crate::domain::summary::SummaryData;

/// Bar colors, assigned by category position.
pub const PALETTE: [&str; 4] = ["#1abc9c", "#3498db", "#9b59b6", "#f1c40f"];

pub const AVERAGE_PRECISION: usize = 2;
pub const MISSING_VALUE: &str = "N/A";

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub title: String,
    pub labels: Vec<String>,
    pub values: Vec<u64>,
    pub colors: Vec<&'static str>,
}

impl ChartSeries {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryCard {
    pub label: String,
    pub value: String,
    pub unit: Option<String>,
}

impl SummaryCard {
    pub fn new(label: &str, value: String, unit: Option<&str>) -> Self {
        Self {
            label: label.to_string(),
            value,
            unit: unit.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DistributionRow {
    pub equipment_type: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub total: SummaryCard,
    pub averages: Vec<SummaryCard>,
    pub chart: ChartSeries,
    pub table: Vec<DistributionRow>,
}

impl DashboardView {
    /// `None` until a summary exists.
    pub fn build(summary: Option<&SummaryData>) -> Option<Self> {
        let summary = summary?;
        Some(Self {
            total: total_card(summary),
            averages: to_average_cards(Some(summary)),
            chart: to_chart_series(Some(summary))?,
            table: to_distribution_table(Some(summary)),
        })
    }
}

pub fn color_for(position: usize) -> &'static str {
    PALETTE[position % PALETTE.len()]
}

/// Two decimals for display only; the summary keeps full precision.
pub fn format_average(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.*}", AVERAGE_PRECISION, v),
        _ => MISSING_VALUE.to_string(),
    }
}

pub fn to_chart_series(summary: Option<&SummaryData>) -> Option<ChartSeries> {
    let summary = summary?;
    let distribution = &summary.type_distribution;

    Some(ChartSeries {
        title: "Equipment Type Distribution".to_string(),
        labels: distribution.iter().map(|e| e.name.clone()).collect(),
        values: distribution.iter().map(|e| e.count).collect(),
        colors: (0..distribution.len()).map(color_for).collect(),
    })
}

pub fn to_average_cards(summary: Option<&SummaryData>) -> Vec<SummaryCard> {
    let Some(summary) = summary else {
        return Vec::new();
    };
    let averages = &summary.averages;

    vec![
        SummaryCard::new("Avg Flowrate", format_average(averages.flowrate), Some("units")),
        SummaryCard::new("Avg Pressure", format_average(averages.pressure), Some("bar")),
        SummaryCard::new("Avg Temp", format_average(averages.temperature), Some("°C")),
    ]
}

pub fn total_card(summary: &SummaryData) -> SummaryCard {
    SummaryCard::new("Total Equipment", summary.total_count.to_string(), None)
}

pub fn to_distribution_table(summary: Option<&SummaryData>) -> Vec<DistributionRow> {
    summary
        .map(|s| {
            s.type_distribution
                .iter()
                .map(|e| DistributionRow {
                    equipment_type: e.name.clone(),
                    count: e.count,
                })
                .collect()
        })
        .unwrap_or_default()
}
