use serde::Serialize;

use super::schedule::Category;

/// One accommodation line in the budget: a stay name, how many nights the
/// day rows book it for, and the matched item cost in minor units.
#[derive(Debug, Clone, Serialize)]
pub struct StayLine {
    pub name: String,
    pub nights: i64,
    /// Total of accommodation items titled like the stay; 0 when no item
    /// matches.
    pub cost: i64,
    /// True when no accommodation item carries this stay name.
    pub unmatched: bool,
}

/// Per-category spending rollup.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub items: i64,
    pub total: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BudgetReport {
    pub stays: Vec<StayLine>,
    pub categories: Vec<CategoryTotal>,
    pub grand_total: i64,
}
