use serde::{Deserialize, Serialize};

use crate::form::input::InputRecord;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaxRegime {
    /// Simplified system, tax on gross revenue.
    #[default]
    UsnIncome,
    /// Simplified system, tax on revenue minus expenses.
    UsnIncomeExpenses,
    /// Professional income tax for the self-employed, on revenue.
    SelfEmployed,
    /// General system, profit tax.
    General,
}

impl TaxRegime {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaxRegime::UsnIncome => "usn_income",
            TaxRegime::UsnIncomeExpenses => "usn_income_expenses",
            TaxRegime::SelfEmployed => "self_employed",
            TaxRegime::General => "general",
        }
    }

    /// Whether the rate applies to revenue rather than to profit.
    pub fn taxes_revenue(&self) -> bool {
        matches!(self, TaxRegime::UsnIncome | TaxRegime::SelfEmployed)
    }

    /// Highest rate the regime allows, in percent.
    pub fn max_rate_percent(&self) -> f64 {
        match self {
            TaxRegime::UsnIncome => 8.0,
            TaxRegime::UsnIncomeExpenses => 20.0,
            TaxRegime::SelfEmployed => 6.0,
            TaxRegime::General => 25.0,
        }
    }
}

/// Everything the seller enters in the calculator, per unit sold.
/// Money is in the marketplace currency, percentages are 0-100.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct UnitEconomicsInput {
    // Cost of goods
    pub purchase_price: f64,
    pub delivery_to_warehouse: f64,
    pub packaging_cost: f64,
    pub marking_cost: f64,

    // Marketplace fees
    pub commission_percent: f64,
    pub logistics_cost: f64,
    pub storage_cost: f64,
    pub acceptance_cost: f64,
    pub return_rate_percent: f64,

    // Additional costs
    pub advertising_percent: f64,
    pub fulfillment_cost: f64,
    pub other_costs: f64,

    // Tax
    pub tax_regime: TaxRegime,
    pub tax_rate_percent: f64,

    // Pricing
    pub selling_price: f64,
    pub discount_percent: f64,
    pub seller_discount_percent: f64,
    pub target_margin_percent: f64,
}

impl UnitEconomicsInput {
    /// Money fields, by form field name.
    pub fn money_fields(&self) -> [(&'static str, f64); 9] {
        [
            ("purchase_price", self.purchase_price),
            ("delivery_to_warehouse", self.delivery_to_warehouse),
            ("packaging_cost", self.packaging_cost),
            ("marking_cost", self.marking_cost),
            ("logistics_cost", self.logistics_cost),
            ("storage_cost", self.storage_cost),
            ("acceptance_cost", self.acceptance_cost),
            ("fulfillment_cost", self.fulfillment_cost),
            ("other_costs", self.other_costs),
        ]
    }

    /// Percentage fields, by form field name.
    pub fn percent_fields(&self) -> [(&'static str, f64); 7] {
        [
            ("commission_percent", self.commission_percent),
            ("return_rate_percent", self.return_rate_percent),
            ("advertising_percent", self.advertising_percent),
            ("tax_rate_percent", self.tax_rate_percent),
            ("discount_percent", self.discount_percent),
            ("seller_discount_percent", self.seller_discount_percent),
            ("target_margin_percent", self.target_margin_percent),
        ]
    }

    /// Flattens the typed input into the record the completion scorer reads.
    pub fn to_record(&self) -> InputRecord {
        let mut record = InputRecord::new();
        for (field, value) in self.money_fields().into_iter().chain(self.percent_fields()) {
            record.insert(field, value);
        }
        record
            .with("selling_price", self.selling_price)
            .with("tax_regime", self.tax_regime.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CostBreakdown {
    pub cost_of_goods: f64,
    pub commission: f64,
    pub logistics: f64,
    pub storage: f64,
    pub acceptance: f64,
    pub return_logistics: f64,
    pub marketplace_fees: f64,
    pub advertising: f64,
    pub fulfillment: f64,
    pub other: f64,
    pub additional_costs: f64,
    pub tax: f64,
    pub total_costs: f64,
}

/// Per-unit result. Money rounded to cents, ratios to two decimals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UnitEconomicsResult {
    pub revenue: f64,
    pub buyer_price: f64,
    pub costs: CostBreakdown,
    pub profit_before_tax: f64,
    pub net_profit: f64,
    pub margin_percent: Option<f64>,
    pub roi_percent: Option<f64>,
    pub break_even_price: Option<f64>,
    pub target_price: Option<f64>,
    pub tax_regime: TaxRegime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_input_deserializes_from_empty_object() {
        let input: UnitEconomicsInput = serde_json::from_str("{}").unwrap();
        assert_eq!(input, UnitEconomicsInput::default());
        assert_eq!(input.tax_regime, TaxRegime::UsnIncome);
    }

    #[test]
    fn test_tax_regime_snake_case() {
        let regime: TaxRegime = serde_json::from_str(r#""usn_income_expenses""#).unwrap();
        assert_eq!(regime, TaxRegime::UsnIncomeExpenses);
        assert_eq!(
            serde_json::to_string(&TaxRegime::SelfEmployed).unwrap(),
            r#""self_employed""#
        );
    }

    #[test]
    fn test_to_record_covers_every_field() {
        let record = UnitEconomicsInput::default().to_record();
        assert_eq!(record.field_names().count(), 18);
        let schema = crate::form::schema::FieldSchema::marketplace();
        for field in record.field_names() {
            assert!(
                schema.sections.iter().any(|s| s.fields.iter().any(|f| f == field)),
                "{field} not in schema"
            );
        }
        assert!(record.is_filled("tax_regime"));
        assert!(!record.is_filled("selling_price"));
    }

    #[test]
    fn test_revenue_based_regimes() {
        assert!(TaxRegime::UsnIncome.taxes_revenue());
        assert!(TaxRegime::SelfEmployed.taxes_revenue());
        assert!(!TaxRegime::UsnIncomeExpenses.taxes_revenue());
        assert!(!TaxRegime::General.taxes_revenue());
    }
}
