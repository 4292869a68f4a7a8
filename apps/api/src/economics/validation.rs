use serde::{Deserialize, Serialize};

use crate::economics::models::UnitEconomicsInput;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationIssue {
    pub field: String,
    pub message: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationReport {
    pub passed: bool,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }
}

/// Combined discount above which the listing is almost certainly mistyped.
const DISCOUNT_WARNING_PERCENT: f64 = 90.0;

fn issue(field: &str, message: String, severity: Severity) -> ValidationIssue {
    ValidationIssue {
        field: field.to_string(),
        message,
        severity,
    }
}

/// Checks calculator input before it reaches the calculator.
///
/// Errors block the calculation:
/// - negative money amounts
/// - percentages outside 0-100
/// - non-positive selling or purchase price
/// - tax rate above the regime's ceiling
///
/// Warnings are reported but do not fail the report:
/// - combined discount of 90% or more
/// - commission plus advertising eating all revenue
pub fn validate_input(input: &UnitEconomicsInput) -> ValidationReport {
    let mut issues = Vec::new();

    for (field, value) in input.money_fields() {
        if value < 0.0 {
            issues.push(issue(
                field,
                format!("must not be negative (got {value})"),
                Severity::Error,
            ));
        }
    }

    for (field, value) in input.percent_fields() {
        if !(0.0..=100.0).contains(&value) {
            issues.push(issue(
                field,
                format!("must be between 0 and 100 (got {value})"),
                Severity::Error,
            ));
        }
    }

    if input.selling_price <= 0.0 {
        issues.push(issue(
            "selling_price",
            "must be greater than zero".to_string(),
            Severity::Error,
        ));
    }

    if input.purchase_price <= 0.0 && !issues.iter().any(|i| i.field == "purchase_price") {
        issues.push(issue(
            "purchase_price",
            "must be greater than zero".to_string(),
            Severity::Error,
        ));
    }

    let max_rate = input.tax_regime.max_rate_percent();
    if input.tax_rate_percent > max_rate && input.tax_rate_percent <= 100.0 {
        issues.push(issue(
            "tax_rate_percent",
            format!(
                "{} allows at most {max_rate}% (got {}%)",
                input.tax_regime.as_str(),
                input.tax_rate_percent
            ),
            Severity::Error,
        ));
    }

    let kept = (1.0 - input.discount_percent / 100.0) * (1.0 - input.seller_discount_percent / 100.0);
    if (1.0 - kept) * 100.0 >= DISCOUNT_WARNING_PERCENT {
        issues.push(issue(
            "discount_percent",
            format!(
                "combined discount is {:.0}% of the listing price",
                (1.0 - kept) * 100.0
            ),
            Severity::Warning,
        ));
    }

    if input.commission_percent + input.advertising_percent >= 100.0 {
        issues.push(issue(
            "commission_percent",
            "commission and advertising together take all revenue".to_string(),
            Severity::Warning,
        ));
    }

    ValidationReport {
        passed: !issues.iter().any(|i| i.severity == Severity::Error),
        issues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::economics::models::TaxRegime;

    fn valid() -> UnitEconomicsInput {
        UnitEconomicsInput {
            purchase_price: 300.0,
            commission_percent: 15.0,
            logistics_cost: 50.0,
            tax_rate_percent: 6.0,
            selling_price: 1000.0,
            ..UnitEconomicsInput::default()
        }
    }

    fn fields_with(report: &ValidationReport, severity: Severity) -> Vec<&str> {
        report
            .issues
            .iter()
            .filter(|i| i.severity == severity)
            .map(|i| i.field.as_str())
            .collect()
    }

    #[test]
    fn test_valid_input_passes() {
        let r = validate_input(&valid());
        assert!(r.passed, "{:?}", r.issues);
        assert!(r.issues.is_empty());
    }

    #[test]
    fn test_default_input_fails_on_prices() {
        let r = validate_input(&UnitEconomicsInput::default());
        assert!(!r.passed);
        assert_eq!(
            fields_with(&r, Severity::Error),
            vec!["selling_price", "purchase_price"]
        );
    }

    #[test]
    fn test_negative_money_is_error() {
        let r = validate_input(&UnitEconomicsInput {
            storage_cost: -5.0,
            ..valid()
        });
        assert!(!r.passed);
        assert_eq!(fields_with(&r, Severity::Error), vec!["storage_cost"]);
    }

    #[test]
    fn test_negative_purchase_price_reported_once() {
        let r = validate_input(&UnitEconomicsInput {
            purchase_price: -1.0,
            ..valid()
        });
        assert_eq!(r.errors().count(), 1);
    }

    #[test]
    fn test_percent_out_of_range() {
        let r = validate_input(&UnitEconomicsInput {
            return_rate_percent: 120.0,
            discount_percent: -3.0,
            ..valid()
        });
        assert_eq!(
            fields_with(&r, Severity::Error),
            vec!["return_rate_percent", "discount_percent"]
        );
    }

    #[test]
    fn test_tax_rate_above_regime_ceiling() {
        let r = validate_input(&UnitEconomicsInput {
            tax_regime: TaxRegime::SelfEmployed,
            tax_rate_percent: 15.0,
            ..valid()
        });
        assert!(!r.passed);
        assert!(r.issues[0].message.contains("self_employed"));

        let r = validate_input(&UnitEconomicsInput {
            tax_regime: TaxRegime::UsnIncomeExpenses,
            tax_rate_percent: 15.0,
            ..valid()
        });
        assert!(r.passed);
    }

    #[test]
    fn test_heavy_discount_is_warning_only() {
        let r = validate_input(&UnitEconomicsInput {
            discount_percent: 80.0,
            seller_discount_percent: 60.0,
            ..valid()
        });
        assert!(r.passed);
        assert_eq!(fields_with(&r, Severity::Warning), vec!["discount_percent"]);
    }

    #[test]
    fn test_fees_consuming_revenue_is_warning() {
        let r = validate_input(&UnitEconomicsInput {
            commission_percent: 70.0,
            advertising_percent: 30.0,
            ..valid()
        });
        assert!(r.passed);
        assert_eq!(
            fields_with(&r, Severity::Warning),
            vec!["commission_percent"]
        );
    }
}
