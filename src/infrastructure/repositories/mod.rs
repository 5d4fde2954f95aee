//! Repository implementations using SeaORM

pub mod class_repository;
pub mod client_repository;
pub mod company_repository;
pub mod consult_repository;
pub mod partner_repository;
pub mod service_repository;

pub use class_repository::SeaOrmClassRepository;
pub use client_repository::SeaOrmClientRepository;
pub use company_repository::SeaOrmCompanyRepository;
pub use consult_repository::SeaOrmConsultRepository;
pub use partner_repository::SeaOrmPartnerRepository;
pub use service_repository::SeaOrmServiceRepository;
