//! # OpenAPI Specification Assembly
//!
//! Assembles all utoipa-documented routes into a single OpenAPI spec,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the entire API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "OSCAL Workbench API",
        version = "0.1.0",
        description = "Read and edit OSCAL control catalogs (SDM privacy, privacy risk, resilience baseline) and the SDM to security mapping.",
    ),
    paths(
        // SDM controls
        crate::routes::sdm::list_controls,
        crate::routes::sdm::get_control,
        crate::routes::sdm::update_control,
        // SDM catalog (TOM view)
        crate::routes::sdm_catalog::list_controls,
        crate::routes::sdm_catalog::get_control,
        crate::routes::sdm_catalog::update_control,
        // Resilience
        crate::routes::resilience::list_controls,
        crate::routes::resilience::get_control,
        crate::routes::resilience::update_control,
        // Privacy
        crate::routes::privacy::list_controls,
        crate::routes::privacy::get_control,
        crate::routes::privacy::update_control,
        crate::routes::privacy::list_groups,
        crate::routes::privacy::create_group,
        crate::routes::privacy::update_group,
        crate::routes::privacy::delete_group,
        // Mapping
        crate::routes::mapping::list_mappings,
        crate::routes::mapping::get_mapping,
        crate::routes::mapping::upsert_mapping,
        crate::routes::mapping::delete_mapping,
        // Files
        crate::routes::files::list_files,
        crate::routes::files::get_file,
        crate::routes::files::save_file,
    ),
    components(schemas(
        // Diff
        ogw_core::DiffResult,
        ogw_core::DiffSummary,
        ogw_core::DiffChange,
        ogw_core::ChangeKind,
        // SDM
        ogw_catalog::sdm::RelatedMapping,
        ogw_catalog::sdm::SdmSummaryProps,
        ogw_catalog::sdm::SdmControlSummary,
        ogw_catalog::sdm::SdmDetailProps,
        ogw_catalog::sdm::SdmControlDetail,
        ogw_catalog::sdm::SdmControlUpdate,
        ogw_catalog::sdm::SdmPropsUpdate,
        // SDM catalog
        ogw_catalog::SdmTomControlSummary,
        ogw_catalog::SdmTomControlDetail,
        ogw_catalog::SdmTomControlUpdate,
        // Resilience
        ogw_catalog::SecurityControl,
        ogw_catalog::SecurityControlUpdate,
        // Privacy
        ogw_catalog::PrivacyControlSummary,
        ogw_catalog::PrivacyControlDetail,
        ogw_catalog::PrivacyControlUpdate,
        ogw_catalog::GroupDetail,
        ogw_catalog::GroupCreate,
        ogw_catalog::GroupUpdate,
        ogw_catalog::GroupDelete,
        ogw_catalog::GroupDeletionOutcome,
        // Mapping
        ogw_catalog::SecurityControlRef,
        ogw_catalog::MappingStandards,
        ogw_catalog::SdmSecurityMapping,
        ogw_catalog::MappingUpdate,
        ogw_catalog::MappingDeletionOutcome,
        // Envelopes
        ogw_catalog::outcome::SdmControlList,
        ogw_catalog::outcome::SdmTomControlList,
        ogw_catalog::outcome::SecurityControlList,
        ogw_catalog::outcome::PrivacyControlList,
        ogw_catalog::outcome::GroupList,
        ogw_catalog::outcome::MappingList,
        ogw_catalog::outcome::SdmUpdateOutcome,
        ogw_catalog::outcome::SdmTomUpdateOutcome,
        ogw_catalog::outcome::SecurityUpdateOutcome,
        ogw_catalog::outcome::PrivacyUpdateOutcome,
        ogw_catalog::outcome::GroupUpdateOutcome,
        ogw_catalog::outcome::MappingUpdateOutcome,
        // Files
        crate::routes::files::FileEntry,
        crate::routes::files::FileList,
        crate::routes::files::FileContent,
        crate::routes::files::SaveRequest,
        crate::routes::files::SaveMode,
        crate::routes::files::SaveResponse,
        // Error types
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
    )),
    tags(
        (name = "sdm", description = "SDM controls and related mappings"),
        (name = "sdm-catalog", description = "SDM technical and organisational measures"),
        (name = "resilience", description = "Resilience baseline controls"),
        (name = "privacy", description = "Privacy controls and groups"),
        (name = "mapping", description = "SDM to security mappings"),
        (name = "files", description = "Raw catalog files"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json: Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
