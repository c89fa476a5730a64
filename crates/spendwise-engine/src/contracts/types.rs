use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct WindowRange {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DataRangeHint {
    pub earliest: Option<String>,
    pub latest: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategorizedRow {
    pub date: Option<String>,
    pub amount: Option<f64>,
    pub description: Option<String>,
    pub cumulative_balance: Option<f64>,
    pub category: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DescriptionTotalRow {
    pub description: String,
    pub total: f64,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategorizeData {
    pub categorization_version: String,
    pub rows: Vec<CategorizedRow>,
    pub transfer_breakdown: Vec<DescriptionTotalRow>,
    pub other_breakdown: Vec<DescriptionTotalRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryTotalRow {
    pub category: String,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SpendingData {
    pub categorization_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window: Option<WindowRange>,
    pub exclude_transfers: bool,
    pub rows: Vec<CategoryTotalRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecurringRow {
    pub merchant: String,
    pub cadence: String,
    pub median_amount: f64,
    pub last_seen: String,
    pub occurrences: i64,
    pub confidence: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecurringData {
    pub policy_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window: Option<WindowRange>,
    pub rows: Vec<RecurringRow>,
    pub data_range_hint: DataRangeHint,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryDeltaRow {
    pub category: String,
    pub current: f64,
    pub previous: f64,
    pub delta: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryRow {
    pub income: f64,
    pub expenses: f64,
    pub net: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthlyTotalRow {
    pub month: String,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct InsightsData {
    pub categorization_version: String,
    pub policy_version: String,
    pub window: WindowRange,
    pub previous_window: WindowRange,
    pub exclude_transfers: bool,
    pub summary: SummaryRow,
    pub previous_summary: SummaryRow,
    pub summary_change: Option<SummaryRow>,
    pub monthly_net: Vec<MonthlyTotalRow>,
    pub spending: Vec<CategoryTotalRow>,
    pub deltas: Vec<CategoryDeltaRow>,
    pub top_increases: Vec<CategoryDeltaRow>,
    pub top_decreases: Vec<CategoryDeltaRow>,
    pub recurring: Vec<RecurringRow>,
    pub data_range_hint: DataRangeHint,
}
