use crate::api;
use crate::domain::{CreateServiceInput, Service, ServiceFilter};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::services::create,
        api::services::find_all,
        api::services::find_by_partner_id,
        api::services::update,
    ),
    components(
        schemas(
            Service,
            CreateServiceInput,
            ServiceFilter,
            api::services::FindByPartnerIdDto,
            api::services::UpdateServiceDto,
        )
    ),
    tags(
        (name = "wellness_booking", description = "Wellness booking API")
    )
)]
pub struct ApiDoc;
