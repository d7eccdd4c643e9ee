use sqlx::{Postgres, Transaction};
use uuid::Uuid;

use crate::{
    model::wedding::{InvitationStatus, MemberRole, Wedding, WeddingMember},
    repository::wedding::{get_wedding_by_id, get_wedding_member},
    schema::common::{BadRequestResponse, InternalServerErrorResponse, NotFoundResponse},
};

/// What the caller is about to do with a wedding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WeddingAccess {
    Read,
    Edit,
    ManageMembers,
    Owner,
}

impl WeddingAccess {
    pub fn allows(&self, role: MemberRole) -> bool {
        match self {
            WeddingAccess::Read => true,
            WeddingAccess::Edit => role.can_edit(),
            WeddingAccess::ManageMembers => role.can_manage_members(),
            WeddingAccess::Owner => role == MemberRole::Owner,
        }
    }
}

pub enum WeddingGuardError {
    BadRequest(BadRequestResponse),
    NotFound(NotFoundResponse),
    Forbidden,
    InternalServerError(InternalServerErrorResponse),
}

pub fn parse_id(raw: Option<&str>, label: &str) -> Result<Uuid, BadRequestResponse> {
    let raw = match raw.map(str::trim) {
        Some(val) if !val.is_empty() => val,
        _ => return Err(BadRequestResponse::new(&format!("{} ID is required", label))),
    };
    Uuid::parse_str(raw).map_err(|_| {
        BadRequestResponse::new(&format!("Invalid {} id", label.to_lowercase()))
    })
}

/// Resolve the wedding and the caller's accepted membership on it.
/// Non-members get the same not-found answer as a missing wedding.
pub async fn authorize_wedding(
    tx: &mut Transaction<'_, Postgres>,
    profile_id: &Uuid,
    wedding_id: Option<&str>,
    access: WeddingAccess,
    module: &str,
    function: &str,
) -> Result<(Wedding, WeddingMember), WeddingGuardError> {
    let wedding_id = parse_id(wedding_id, "Wedding").map_err(WeddingGuardError::BadRequest)?;
    let not_found = || {
        WeddingGuardError::NotFound(NotFoundResponse::new(
            "wedding",
            "id",
            &wedding_id.to_string(),
        ))
    };
    let wedding = get_wedding_by_id(tx, &wedding_id)
        .await
        .map_err(|err| {
            WeddingGuardError::InternalServerError(InternalServerErrorResponse::new(
                module,
                function,
                "get wedding by id",
                &err.to_string(),
            ))
        })?
        .ok_or_else(not_found)?;
    let member = get_wedding_member(tx, &wedding_id, profile_id)
        .await
        .map_err(|err| {
            WeddingGuardError::InternalServerError(InternalServerErrorResponse::new(
                module,
                function,
                "get wedding member",
                &err.to_string(),
            ))
        })?
        .filter(|x| x.invitation_status == InvitationStatus::Accepted.as_str())
        .ok_or_else(not_found)?;
    if !access.allows(member.role()) {
        tracing::warn!(
            "{}.{}: member {} with role {} denied on wedding {}",
            module,
            function,
            profile_id,
            member.role,
            wedding_id
        );
        return Err(WeddingGuardError::Forbidden);
    }
    Ok((wedding, member))
}
