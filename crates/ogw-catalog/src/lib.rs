//! # ogw-catalog: Catalog Projection Services
//!
//! Typed views over the raw catalog documents held by `ogw-store`, and
//! the partial updates that write those views back.
//!
//! ## Variants
//!
//! | Variant | Catalog | Sort key |
//! |---|---|---|
//! | [`SdmControls`] | `sdm_privacy_catalog` | id |
//! | [`SdmTomControls`] | `sdm_privacy_catalog` | (sdm module, id) |
//! | [`ResilienceControls`] | `resilience_baseline_catalog` | id |
//! | [`PrivacyControls`] | `open_privacy_catalog_risk` | (TOM id, id) |
//!
//! Each is a [`CatalogVariant`] served through [`CatalogService`]. The
//! privacy service additionally manages groups ([`groups`]). Mappings
//! between SDM and security controls live in a separate document and have
//! their own [`MappingService`].
//!
//! ## Update Contract
//!
//! Updates run inside a store transaction: the control is located (first
//! match by id), the patch is applied to the raw node, the whole document
//! is re-serialized and written, and the refreshed detail is returned with
//! the structural diff. An unknown id fails before anything is written.
//! Keys the patch does not name are preserved exactly.

pub mod error;
pub mod groups;
pub mod mapping;
pub mod outcome;
pub mod patch;
pub mod privacy;
pub mod resilience;
pub mod sdm;
pub mod sdm_tom;
pub mod variant;

pub use error::ServiceError;
pub use groups::{GroupCreate, GroupDelete, GroupDeletion, GroupDetail, GroupUpdate};
pub use mapping::{
    MappingService, MappingStandards, MappingUpdate, SdmSecurityMapping, SecurityControlRef,
};
pub use outcome::{GroupDeletionOutcome, ItemList, MappingDeletionOutcome, UpdateOutcome};
pub use privacy::{PrivacyControlDetail, PrivacyControlSummary, PrivacyControlUpdate, PrivacyControls};
pub use resilience::{ResilienceControls, SecurityControl, SecurityControlUpdate};
pub use sdm::{RelatedMapping, SdmControlDetail, SdmControlSummary, SdmControlUpdate, SdmControls};
pub use sdm_tom::{SdmTomControlDetail, SdmTomControlSummary, SdmTomControlUpdate, SdmTomControls};
pub use variant::{CatalogService, CatalogVariant, Loaded};

pub type SdmService = CatalogService<SdmControls>;
pub type SdmTomService = CatalogService<SdmTomControls>;
pub type ResilienceService = CatalogService<ResilienceControls>;
pub type PrivacyService = CatalogService<PrivacyControls>;
