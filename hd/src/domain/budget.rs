//! Budget evaluation
//!
//! Cost estimation at a fixed regional rate and the single comparison routine
//! every budget-aware stage goes through.

/// Construction cost per square foot (Montreal residential pricing)
pub const COST_PER_SQFT: f64 = 350.0;

/// Estimated construction cost for a total floor area
pub fn estimate_cost(total_area: f64) -> f64 {
    total_area * COST_PER_SQFT
}

/// Result of comparing an estimated cost against a budget
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetComparison {
    /// `cost <= budget`
    pub within: bool,
    /// `|cost - budget|`
    pub amount: f64,
    budget: f64,
}

impl BudgetComparison {
    /// Difference as a percentage of the budget (0 when the budget is 0)
    pub fn percent_of_budget(&self) -> f64 {
        if self.budget == 0.0 {
            0.0
        } else {
            self.amount / self.budget * 100.0
        }
    }
}

/// Compare an estimated cost against a budget
pub fn compare(cost: f64, budget: f64) -> BudgetComparison {
    BudgetComparison {
        within: cost <= budget,
        amount: (cost - budget).abs(),
        budget,
    }
}

/// A budget only counts as set when it is present and positive
pub fn active_budget(budget: Option<f64>) -> Option<f64> {
    budget.filter(|b| *b > 0.0)
}

/// True when a budget is set and the cost exceeds it
pub fn exceeds_budget(cost: Option<f64>, budget: Option<f64>) -> bool {
    match active_budget(budget) {
        Some(budget) => !compare(cost.unwrap_or(0.0), budget).within,
        None => false,
    }
}

/// Format a dollar amount as `$1,234,567.89`
pub fn format_currency(amount: f64) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let cents = (amount.abs() * 100.0).round() as u128;
    format!("${}{}.{:02}", sign, group_thousands(cents / 100), cents % 100)
}

/// Format an area rounded to whole square feet with grouping, e.g. `2,000`
pub fn format_area(area: f64) -> String {
    let sign = if area < 0.0 { "-" } else { "" };
    format!("{}{}", sign, group_thousands(area.abs().round() as u128))
}

fn group_thousands(value: u128) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
