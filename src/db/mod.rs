pub mod catalog_repo;
pub use catalog_repo::CatalogRepository;
pub mod inquiry_repo;
pub use inquiry_repo::InquiryRepository;
pub mod tenancy_repo;
pub use tenancy_repo::TenancyRepository;
