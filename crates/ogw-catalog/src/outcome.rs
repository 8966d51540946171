//! Response envelopes shared by every catalog endpoint.
//!
//! Lists are wrapped as `{"items": [...]}`; mutations return the refreshed
//! record together with the structural diff of the write.

use ogw_core::DiffResult;
use ogw_store::Committed;
use serde::Serialize;
use utoipa::ToSchema;

use crate::groups::{GroupDeletion, GroupDetail};
use crate::mapping::SdmSecurityMapping;
use crate::privacy::{PrivacyControlDetail, PrivacyControlSummary};
use crate::resilience::SecurityControl;
use crate::sdm::{SdmControlDetail, SdmControlSummary};
use crate::sdm_tom::{SdmTomControlDetail, SdmTomControlSummary};

/// `{"items": [...]}` list envelope.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[aliases(
    SdmControlList = ItemList<SdmControlSummary>,
    SecurityControlList = ItemList<SecurityControl>,
    PrivacyControlList = ItemList<PrivacyControlSummary>,
    SdmTomControlList = ItemList<SdmTomControlSummary>,
    GroupList = ItemList<GroupDetail>,
    MappingList = ItemList<SdmSecurityMapping>
)]
pub struct ItemList<T> {
    pub items: Vec<T>,
}

impl<T> From<Vec<T>> for ItemList<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

/// Refreshed record plus the diff of the write that produced it.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[aliases(
    SdmUpdateOutcome = UpdateOutcome<SdmControlDetail>,
    SecurityUpdateOutcome = UpdateOutcome<SecurityControl>,
    PrivacyUpdateOutcome = UpdateOutcome<PrivacyControlDetail>,
    SdmTomUpdateOutcome = UpdateOutcome<SdmTomControlDetail>,
    GroupUpdateOutcome = UpdateOutcome<GroupDetail>,
    MappingUpdateOutcome = UpdateOutcome<SdmSecurityMapping>
)]
pub struct UpdateOutcome<D> {
    pub updated: D,
    pub diff: DiffResult,
}

impl<D> From<Committed<D>> for UpdateOutcome<D> {
    fn from(committed: Committed<D>) -> Self {
        Self {
            updated: committed.value,
            diff: committed.diff,
        }
    }
}

/// Group deletion report plus diff.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GroupDeletionOutcome {
    pub deleted: String,
    pub reassigned_to: Option<String>,
    pub removed_control_count: usize,
    pub diff: DiffResult,
}

impl From<Committed<GroupDeletion>> for GroupDeletionOutcome {
    fn from(committed: Committed<GroupDeletion>) -> Self {
        let report = committed.value;
        Self {
            deleted: report.deleted,
            reassigned_to: report.reassigned_to,
            removed_control_count: report.removed_control_count,
            diff: committed.diff,
        }
    }
}

/// Mapping deletion acknowledgement.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MappingDeletionOutcome {
    /// Always `"ok"`.
    pub status: String,
    pub removed: usize,
    pub diff: DiffResult,
}

impl From<Committed<usize>> for MappingDeletionOutcome {
    fn from(committed: Committed<usize>) -> Self {
        Self {
            status: "ok".to_string(),
            removed: committed.value,
            diff: committed.diff,
        }
    }
}
