pub mod auth;
pub mod catalog;
pub mod inquiry;
pub mod quotation;
pub mod tenancy;
