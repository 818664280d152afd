pub mod conditions;
pub mod dashboard;
pub mod errors;
pub mod forecast;
pub mod manager_owm;
pub mod models;
