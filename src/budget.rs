//! Budget analysis - the deterministic core behind the `get-budget` tool.
//!
//! `analyze` is a pure function over (income, expenses). It performs no I/O,
//! holds no state, and raises no errors; input validation (positive income,
//! positive expense amounts) happens at the tool schema boundary before this
//! function is reached.

use serde::{Deserialize, Serialize};

/// Expense name tokens counted as "needs" (50% bucket).
const NEEDS_CATEGORIES: [&str; 3] = ["rent", "transport", "bills"];

/// Expense name tokens counted as "wants" (30% bucket).
const WANTS_CATEGORIES: [&str; 3] = ["food", "data", "entertainment"];

/// A single itemized monthly expense.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    /// Free-form name; category matching is a case-insensitive substring test
    pub name: String,

    /// Amount spent (expected > 0, enforced upstream)
    pub amount: f64,
}

/// Result of a budget analysis, serialized with the tool's output field names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetReport {
    /// Sum of all expense amounts
    pub total_spent: f64,

    /// Income minus total spent (negative when overspent)
    pub savings: f64,

    /// Savings as a percentage of income (0 when income is 0)
    pub save_rate: f64,

    /// Total spent on needs categories
    pub needs: f64,

    /// Total spent on wants categories
    pub wants: f64,

    /// Advisory strings, in fixed order: needs, wants, savings shortfall
    pub suggestions: Vec<String>,
}

/// Sum the amounts of expenses whose name contains any of the given tokens.
///
/// An expense can match more than one bucket; classification is deliberately
/// non-exclusive (e.g. "Food Data" counts fully in wants via both tokens,
/// and "Transport Food" counts in needs and wants).
fn category_total(expenses: &[Expense], categories: &[&str]) -> f64 {
    expenses
        .iter()
        .filter(|e| {
            let name = e.name.to_lowercase();
            categories.iter().any(|cat| name.contains(cat))
        })
        .map(|e| e.amount)
        .sum()
}

/// Analyze a monthly budget against the 50/30/20 heuristic.
pub fn analyze(income: f64, expenses: &[Expense]) -> BudgetReport {
    let total_spent: f64 = expenses.iter().map(|e| e.amount).sum();
    let savings = income - total_spent;
    let save_rate = if income > 0.0 {
        (savings / income) * 100.0
    } else {
        0.0
    };

    let needs = category_total(expenses, &NEEDS_CATEGORIES);
    let wants = category_total(expenses, &WANTS_CATEGORIES);

    let mut suggestions = Vec::new();
    if needs > income * 0.5 {
        suggestions.push("Needs > 50%. Cut rent or transport".to_string());
    }
    if wants > income * 0.3 {
        suggestions.push("Wants > 30%. Reduce food or data".to_string());
    }
    if save_rate < 20.0 {
        // Half-values round away from zero, not to even
        let shortfall = (income * 0.2 - savings).round();
        suggestions.push(format!("Save ₦{:.0} more for 20% goal", shortfall));
    }

    BudgetReport {
        total_spent,
        savings,
        save_rate,
        needs,
        wants,
        suggestions,
    }
}
