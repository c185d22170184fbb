pub mod company_products;
pub mod config;
pub mod dashboard;
pub mod due;
pub mod lab;
pub mod lab_fields;
pub mod log;
pub mod priority;
pub mod samples;
pub mod trip;
pub mod validation;
