//! Application state containing repositories and shared resources

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::domain::{
    ClassRepository, ClientRepository, CompanyRepository, ConsultRepository, PartnerRepository,
    ServiceRepository,
};
use crate::infrastructure::{
    SeaOrmClassRepository, SeaOrmClientRepository, SeaOrmCompanyRepository,
    SeaOrmConsultRepository, SeaOrmPartnerRepository, SeaOrmServiceRepository,
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub partner_repo: Arc<dyn PartnerRepository>,
    pub company_repo: Arc<dyn CompanyRepository>,
    pub client_repo: Arc<dyn ClientRepository>,
    pub service_repo: Arc<dyn ServiceRepository>,
    pub consult_repo: Arc<dyn ConsultRepository>,
    pub class_repo: Arc<dyn ClassRepository>,
}

impl AppState {
    /// Create a new AppState with all repositories initialized
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            partner_repo: Arc::new(SeaOrmPartnerRepository::new(db.clone())),
            company_repo: Arc::new(SeaOrmCompanyRepository::new(db.clone())),
            client_repo: Arc::new(SeaOrmClientRepository::new(db.clone())),
            service_repo: Arc::new(SeaOrmServiceRepository::new(db.clone())),
            consult_repo: Arc::new(SeaOrmConsultRepository::new(db.clone())),
            class_repo: Arc::new(SeaOrmClassRepository::new(db)),
        }
    }
}
