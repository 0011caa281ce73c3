//! Vote entity <-> model mapper

use kudos_core::entities::Vote;
use kudos_core::error::DomainError;
use kudos_core::value_objects::{EntityKind, Snowflake, TargetRef};

use crate::models::VoteModel;

/// Decode the (target_kind, target_id) column pair into a TargetRef
///
/// Unknown kind discriminants indicate a schema/data mismatch and surface as
/// an internal error rather than a panic.
pub fn target_from_columns(kind: i16, id: i64) -> Result<TargetRef, DomainError> {
    let kind = EntityKind::from_i16(kind)
        .ok_or_else(|| DomainError::InternalError(format!("unknown entity kind: {kind}")))?;
    Ok(TargetRef::new(kind, Snowflake::new(id)))
}

impl TryFrom<VoteModel> for Vote {
    type Error = DomainError;

    fn try_from(model: VoteModel) -> Result<Self, Self::Error> {
        Ok(Vote {
            user_id: Snowflake::new(model.user_id),
            target: target_from_columns(model.target_kind, model.target_id)?,
            scope: model.scope.map(Snowflake::new),
            value: model.value,
            created_at: model.created_at,
        })
    }
}
