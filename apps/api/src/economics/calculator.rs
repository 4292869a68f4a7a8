//! Per-unit profitability for a marketplace listing.
//!
//! Costs split into two kinds: those proportional to revenue (commission,
//! advertising, and revenue-based tax) and fixed per-unit amounts (everything
//! else). Break-even and target prices solve for the selling price that makes
//! net profit zero, or the requested share of revenue.

use crate::economics::models::{CostBreakdown, UnitEconomicsInput, UnitEconomicsResult};

fn fraction(percent: f64) -> f64 {
    percent / 100.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn compute_unit_economics(input: &UnitEconomicsInput) -> UnitEconomicsResult {
    let discount = fraction(input.discount_percent);
    let revenue = input.selling_price * (1.0 - discount);
    let buyer_price = revenue * (1.0 - fraction(input.seller_discount_percent));

    let cost_of_goods =
        input.purchase_price + input.delivery_to_warehouse + input.packaging_cost + input.marking_cost;

    let commission = revenue * fraction(input.commission_percent);
    let return_logistics = input.logistics_cost * fraction(input.return_rate_percent);
    let marketplace_fees = commission
        + input.logistics_cost
        + input.storage_cost
        + input.acceptance_cost
        + return_logistics;

    let advertising = revenue * fraction(input.advertising_percent);
    let additional_costs = advertising + input.fulfillment_cost + input.other_costs;

    let profit_before_tax = revenue - cost_of_goods - marketplace_fees - additional_costs;

    let tax_rate = fraction(input.tax_rate_percent);
    let tax = if input.tax_regime.taxes_revenue() {
        revenue * tax_rate
    } else {
        profit_before_tax.max(0.0) * tax_rate
    };
    let net_profit = profit_before_tax - tax;

    let margin_percent = (revenue > 0.0).then(|| round2(net_profit / revenue * 100.0));
    let roi_percent = (cost_of_goods > 0.0).then(|| round2(net_profit / cost_of_goods * 100.0));

    let pricing = PriceSolver::new(input, cost_of_goods, return_logistics);
    let break_even_price = pricing.price_for_margin(0.0).map(round2);
    let target_price = (input.target_margin_percent != 0.0)
        .then(|| pricing.price_for_margin(fraction(input.target_margin_percent)))
        .flatten()
        .map(round2);

    UnitEconomicsResult {
        revenue: round2(revenue),
        buyer_price: round2(buyer_price),
        costs: CostBreakdown {
            cost_of_goods: round2(cost_of_goods),
            commission: round2(commission),
            logistics: round2(input.logistics_cost),
            storage: round2(input.storage_cost),
            acceptance: round2(input.acceptance_cost),
            return_logistics: round2(return_logistics),
            marketplace_fees: round2(marketplace_fees),
            advertising: round2(advertising),
            fulfillment: round2(input.fulfillment_cost),
            other: round2(input.other_costs),
            additional_costs: round2(additional_costs),
            tax: round2(tax),
            total_costs: round2(cost_of_goods + marketplace_fees + additional_costs + tax),
        },
        profit_before_tax: round2(profit_before_tax),
        net_profit: round2(net_profit),
        margin_percent,
        roi_percent,
        break_even_price,
        target_price,
        tax_regime: input.tax_regime,
    }
}

/// Solves net profit = margin * revenue for the listing price.
struct PriceSolver {
    fixed_costs: f64,
    proportional: f64,
    tax_rate: f64,
    taxes_revenue: bool,
    discount: f64,
}

impl PriceSolver {
    fn new(input: &UnitEconomicsInput, cost_of_goods: f64, return_logistics: f64) -> Self {
        Self {
            fixed_costs: cost_of_goods
                + input.logistics_cost
                + input.storage_cost
                + input.acceptance_cost
                + return_logistics
                + input.fulfillment_cost
                + input.other_costs,
            proportional: fraction(input.commission_percent) + fraction(input.advertising_percent),
            tax_rate: fraction(input.tax_rate_percent),
            taxes_revenue: input.tax_regime.taxes_revenue(),
            discount: fraction(input.discount_percent),
        }
    }

    /// Listing price whose net profit is `margin` of revenue, or `None` when
    /// proportional costs leave no room for it.
    fn price_for_margin(&self, margin: f64) -> Option<f64> {
        let (numerator, denominator) = if self.taxes_revenue {
            // R(1 - q - t) - F = mR
            (self.fixed_costs, 1.0 - self.proportional - self.tax_rate - margin)
        } else {
            // (R(1 - q) - F)(1 - t) = mR
            let keep = 1.0 - self.tax_rate;
            (
                self.fixed_costs * keep,
                (1.0 - self.proportional) * keep - margin,
            )
        };

        if denominator <= 0.0 || self.discount >= 1.0 {
            return None;
        }
        let revenue = numerator / denominator;
        Some(revenue / (1.0 - self.discount))
    }
}
