pub mod auth_service;
pub mod catalog_service;
pub mod inquiry_service;
pub mod notification_service;
pub mod quotation_service;
pub mod tenancy_service;
