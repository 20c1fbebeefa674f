//! The `get-budget` tool: schema-validated entry point to the budget analyzer.
//!
//! The analyzer itself (`crate::budget::analyze`) accepts whatever it is
//! given; this layer is the schema boundary that rejects non-positive income
//! and non-positive expense amounts before the analyzer runs.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use super::Tool;
use crate::budget::{analyze, Expense};

/// Analyze a monthly budget and suggest savings.
pub struct AnalyzeBudget;

#[derive(Debug, Deserialize)]
struct BudgetArgs {
    income: f64,
    #[serde(default)]
    expenses: Vec<Expense>,
}

#[async_trait]
impl Tool for AnalyzeBudget {
    fn name(&self) -> &str {
        "get-budget"
    }

    fn description(&self) -> &str {
        "Analyze monthly budget and suggest savings"
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "required": ["income"],
            "properties": {
                "income": {
                    "type": "number",
                    "exclusiveMinimum": 0,
                    "description": "Monthly income. Must be positive."
                },
                "expenses": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "required": ["name", "amount"],
                        "properties": {
                            "name": { "type": "string", "minLength": 1 },
                            "amount": { "type": "number", "exclusiveMinimum": 0 }
                        },
                        "additionalProperties": false
                    }
                }
            },
            "additionalProperties": false
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<Value> {
        let args: BudgetArgs = serde_json::from_value(args)
            .map_err(|e| anyhow::anyhow!("Invalid budget arguments: {}", e))?;

        if !(args.income > 0.0) {
            anyhow::bail!("Income required: income must be a positive number");
        }
        for expense in &args.expenses {
            if expense.name.trim().is_empty() {
                anyhow::bail!("Expense name must not be empty");
            }
            if !(expense.amount > 0.0) {
                anyhow::bail!(
                    "Expense '{}' must have a positive amount",
                    expense.name
                );
            }
        }

        let report = analyze(args.income, &args.expenses);
        Ok(serde_json::to_value(report)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_execute_returns_report() {
        let result = AnalyzeBudget
            .execute(json!({
                "income": 100000,
                "expenses": [{ "name": "rent", "amount": 60000 }]
            }))
            .await
            .unwrap();

        assert_eq!(result["totalSpent"], 60000.0);
        assert_eq!(result["savings"], 40000.0);
        assert_eq!(result["saveRate"], 40.0);
        assert_eq!(result["needs"], 60000.0);
        assert_eq!(
            result["suggestions"][0],
            "Needs > 50%. Cut rent or transport"
        );
    }

    #[tokio::test]
    async fn test_expenses_default_to_empty() {
        let result = AnalyzeBudget
            .execute(json!({ "income": 100000 }))
            .await
            .unwrap();

        assert_eq!(result["totalSpent"], 0.0);
        assert_eq!(result["saveRate"], 100.0);
        assert_eq!(result["suggestions"], json!([]));
    }

    #[tokio::test]
    async fn test_rejects_non_positive_income() {
        assert!(AnalyzeBudget.execute(json!({ "income": 0 })).await.is_err());
        assert!(AnalyzeBudget.execute(json!({ "income": -5 })).await.is_err());
    }

    #[tokio::test]
    async fn test_rejects_non_positive_expense_amount() {
        let result = AnalyzeBudget
            .execute(json!({
                "income": 1000,
                "expenses": [{ "name": "rent", "amount": 0 }]
            }))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_rejects_empty_expense_name() {
        let result = AnalyzeBudget
            .execute(json!({
                "income": 1000,
                "expenses": [{ "name": "  ", "amount": 10 }]
            }))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_rejects_missing_income() {
        assert!(AnalyzeBudget.execute(json!({})).await.is_err());
    }
}
