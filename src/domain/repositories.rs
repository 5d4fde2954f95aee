//! Repository trait definitions
//!
//! These traits define the contract for data access.
//! Implementations live in the infrastructure layer.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::DomainError;

// ---------------------------------------------------------------------------
// Partners
// ---------------------------------------------------------------------------

/// Account owning companies and services
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Partner {
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePartnerInput {
    pub name: String,
    pub email: String,
}

#[async_trait]
pub trait PartnerRepository: Send + Sync {
    async fn create(&self, input: CreatePartnerInput) -> Result<Partner, DomainError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Partner>, DomainError>;
}

// ---------------------------------------------------------------------------
// Companies
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: String,
    pub name: String,
    pub banner_image: Option<String>,
    pub logo_image: Option<String>,
    pub partner_id: String,
    pub address: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCompanyInput {
    pub name: String,
    pub banner_image: Option<String>,
    pub logo_image: Option<String>,
    pub partner_id: String,
    pub address: Option<String>,
}

/// Repository trait for Company entity
#[async_trait]
pub trait CompanyRepository: Send + Sync {
    /// Create a new company owned by a partner
    async fn create(&self, input: CreateCompanyInput) -> Result<Company, DomainError>;

    /// Find all companies
    async fn find_all(&self) -> Result<Vec<Company>, DomainError>;

    /// Find the companies of a partner
    async fn find_by_partner_id(&self, partner_id: &str) -> Result<Vec<Company>, DomainError>;

    /// Find a company by ID
    async fn find_one_by_id(&self, id: &str) -> Result<Option<Company>, DomainError>;
}

// ---------------------------------------------------------------------------
// Clients
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: String,
    pub identification: String,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientInput {
    pub identification: String,
    pub name: String,
}

#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// Create a client; a duplicate identification is a conflict
    async fn create(&self, input: CreateClientInput) -> Result<Client, DomainError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Client>, DomainError>;

    async fn find_by_identification(
        &self,
        identification: &str,
    ) -> Result<Option<Client>, DomainError>;
}

// ---------------------------------------------------------------------------
// Services (offerings booked through consults)
// ---------------------------------------------------------------------------

/// An offering a partner provides
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: String,
    pub partner_id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub duration_minutes: Option<i32>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceInput {
    pub partner_id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub duration_minutes: Option<i32>,
}

/// Fields set on update; absent fields are left untouched
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateServiceInput {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub price: Option<Option<f64>>,
    pub duration_minutes: Option<Option<i32>>,
}

/// Filter criteria for service queries
#[derive(Debug, Default, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ServiceFilter {
    pub partner_id: Option<String>,
    /// Substring match on the service name
    pub name: Option<String>,
}

#[async_trait]
pub trait ServiceRepository: Send + Sync {
    async fn create(&self, input: CreateServiceInput) -> Result<Service, DomainError>;

    async fn find_all(&self, filter: ServiceFilter) -> Result<Vec<Service>, DomainError>;

    async fn find_by_partner_id(&self, partner_id: &str) -> Result<Vec<Service>, DomainError>;

    /// Update a service; unknown id is `NotFound`
    async fn update(&self, id: &str, input: UpdateServiceInput) -> Result<Service, DomainError>;
}

// ---------------------------------------------------------------------------
// Consults
// ---------------------------------------------------------------------------

/// A booked instance of a service for a client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Consult {
    pub id: String,
    pub client_id: String,
    pub service_id: String,
    pub date: String,
    pub created_at: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateConsultInput {
    pub client_id: String,
    pub service_id: String,
    pub date: String,
}

#[async_trait]
pub trait ConsultRepository: Send + Sync {
    /// Book a service for a client; missing client or service is `NotFound`
    async fn create(&self, input: CreateConsultInput) -> Result<Consult, DomainError>;

    async fn find_by_client(
        &self,
        client_id: &str,
        date: Option<&str>,
    ) -> Result<Vec<Consult>, DomainError>;

    /// Services behind the client's consults, in consult order
    async fn find_services_by_client(
        &self,
        client_id: &str,
        date: Option<&str>,
    ) -> Result<Vec<Service>, DomainError>;
}

// ---------------------------------------------------------------------------
// Classes
// ---------------------------------------------------------------------------

/// A scheduled group session with finite capacity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    pub id: String,
    pub company_id: String,
    pub name: String,
    /// Calendar day, `YYYY-MM-DD`
    pub date: String,
    /// Integer timestamp carried as a string
    pub date_timestamp: String,
    /// Remaining capacity
    pub lots: i32,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ClassWithClients {
    #[serde(flatten)]
    pub class: Class,
    pub clients: Vec<Client>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ClassWithCompany {
    #[serde(flatten)]
    pub class: Class,
    pub company: Option<Company>,
}

/// One entry of a client's combined schedule
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ScheduledItem {
    Service(Service),
    Class(ClassWithCompany),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClassInput {
    pub company_id: String,
    pub name: String,
    pub date: String,
    pub date_timestamp: String,
    pub lots: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClassInput {
    pub name: Option<String>,
    pub date: Option<String>,
    pub date_timestamp: Option<String>,
    pub lots: Option<i32>,
}

/// Filter criteria for class queries
#[derive(Debug, Default, Clone)]
pub struct ClassFilter {
    pub company_id: Option<String>,
    pub date: Option<String>,
    /// Only classes booked by the client with this identification
    pub client_identification: Option<String>,
}

/// Repository trait for Class entity
///
/// Booking and cancellation are atomic: the capacity check, the `lots`
/// mutation and the client relation change commit together or not at all.
#[async_trait]
pub trait ClassRepository: Send + Sync {
    async fn create(&self, input: CreateClassInput) -> Result<Class, DomainError>;

    /// Update a class; unknown id is `NotFound`
    async fn update(&self, id: &str, input: UpdateClassInput) -> Result<Class, DomainError>;

    /// Delete a class together with its bookings
    async fn delete(&self, id: &str) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Class>, DomainError>;

    /// Classes matching the filter, each with its booked clients
    async fn find_all(&self, filter: ClassFilter) -> Result<Vec<ClassWithClients>, DomainError>;

    /// Classes of a company with `start <= date <= end`
    async fn find_by_date_range(
        &self,
        company_id: &str,
        start: &str,
        end: &str,
    ) -> Result<Vec<ClassWithClients>, DomainError>;

    /// Connect a client to a class and take one lot
    ///
    /// Fails with `Conflict` when the pair is already booked or no lot is left.
    async fn book(&self, class_id: &str, client_id: &str) -> Result<Class, DomainError>;

    /// Disconnect a client from a class and give the lot back
    ///
    /// Fails with `NotFound` when the client was not booked on the class.
    async fn cancel(&self, class_id: &str, client_id: &str) -> Result<Class, DomainError>;

    /// Clients booked on a class; unknown class is `NotFound`
    async fn find_clients(&self, class_id: &str) -> Result<Vec<Client>, DomainError>;

    /// Classes booked by a client, ordered by `(date, id)`; unknown client is `NotFound`
    async fn find_by_client(
        &self,
        client_id: &str,
        date: Option<&str>,
    ) -> Result<Vec<ClassWithCompany>, DomainError>;
}
