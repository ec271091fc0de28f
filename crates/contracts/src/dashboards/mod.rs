pub mod d100_monthly_costs;
pub mod d101_machinery_profitability;
pub mod d102_supplier_payments;
