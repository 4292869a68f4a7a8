// Unit economics: typed calculator input, validation rules, and the
// per-unit profit calculation.

pub mod calculator;
pub mod handlers;
pub mod models;
pub mod validation;
