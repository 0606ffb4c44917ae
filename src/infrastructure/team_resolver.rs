//! Team identity resolution for team events. Callers must hold the event row
//! lock (see `capacity_ledger::lock_events`) so that the uniqueness and
//! membership checks below cannot interleave with another writer's insert.

use chrono::{DateTime, Utc};
use entity::{registration_events, slot_reservations};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QuerySelect,
    sea_query::{Expr, Func},
};

use crate::domain::{
    error::DomainError,
    models::{
        event::Event,
        reservation::{Role, SlotRequest},
        team::{TeamAssignment, TeamCode, TeamName},
    },
};
use crate::infrastructure::capacity_ledger::live_holds;

const TEAM_CODE_ATTEMPTS: usize = 8;

/// Which rows make up a team.
#[derive(Debug, Clone, Copy)]
pub enum TeamSource {
    /// Confirmed registrations only. Used for lookups against committed
    /// teams; finalize copies held team fields and does not resolve again.
    Confirmed,
    /// Confirmed registrations plus holds still live at `now`
    ConfirmedAndHeld { now: DateTime<Utc> },
}

impl TeamSource {
    fn held_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Confirmed => None,
            Self::ConfirmedAndHeld { now } => Some(*now),
        }
    }
}

pub async fn resolve<C: ConnectionTrait>(
    db: &C,
    event: &Event,
    request: &SlotRequest,
    source: TeamSource,
) -> Result<TeamAssignment, DomainError> {
    if !event.is_team() {
        return Ok(TeamAssignment::individual());
    }

    match request.role {
        None => Err(DomainError::RoleRequired(event.name().to_string())),
        Some(Role::Lead) => {
            resolve_lead(db, event, request.team_name.as_deref().unwrap_or_default(), source).await
        }
        Some(Role::Member) => {
            let code = request
                .team_code
                .as_deref()
                .and_then(TeamCode::parse)
                .ok_or_else(|| DomainError::TeamCodeRequired(event.name().to_string()))?;
            resolve_member(db, event, &code, source).await
        }
    }
}

async fn resolve_lead<C: ConnectionTrait>(
    db: &C,
    event: &Event,
    raw_name: &str,
    source: TeamSource,
) -> Result<TeamAssignment, DomainError> {
    let name = TeamName::parse(raw_name)?;
    if team_name_taken(db, event, &name, source).await? {
        return Err(DomainError::TeamNameTaken(name.as_str().to_string()));
    }

    let code = allocate_team_code(db, event, source).await?;
    Ok(TeamAssignment::lead(&name, &code))
}

async fn resolve_member<C: ConnectionTrait>(
    db: &C,
    event: &Event,
    code: &TeamCode,
    source: TeamSource,
) -> Result<TeamAssignment, DomainError> {
    // the lead's row is the canonical team name; whatever the member typed is ignored
    let team_name = lead_team_name(db, event, code, source)
        .await?
        .ok_or_else(|| DomainError::InvalidTeamCode(event.name().to_string()))?;

    let members = team_member_count(db, event, code, source).await?;
    if members >= event.team_size() {
        return Err(DomainError::TeamFull(event.name().to_string()));
    }

    Ok(TeamAssignment::member(team_name, code))
}

pub async fn team_name_taken<C: ConnectionTrait>(
    db: &C,
    event: &Event,
    name: &TeamName,
    source: TeamSource,
) -> Result<bool, DbErr> {
    let confirmed = registration_events::Entity::find()
        .filter(registration_events::Column::EventId.eq(event.id()))
        .filter(
            Expr::expr(Func::lower(Expr::col(registration_events::Column::TeamName)))
                .eq(name.key()),
        )
        .count(db)
        .await?;
    if confirmed > 0 {
        return Ok(true);
    }

    let Some(now) = source.held_at() else {
        return Ok(false);
    };
    let held = live_holds(event.id(), now)
        .filter(
            Expr::expr(Func::lower(Expr::col(slot_reservations::Column::TeamName)))
                .eq(name.key()),
        )
        .count(db)
        .await?;
    Ok(held > 0)
}

async fn lead_team_name<C: ConnectionTrait>(
    db: &C,
    event: &Event,
    code: &TeamCode,
    source: TeamSource,
) -> Result<Option<String>, DbErr> {
    let confirmed: Option<Option<String>> = registration_events::Entity::find()
        .select_only()
        .column(registration_events::Column::TeamName)
        .filter(registration_events::Column::EventId.eq(event.id()))
        .filter(registration_events::Column::TeamCode.eq(code.as_str()))
        .filter(registration_events::Column::Role.eq(Role::Lead.as_str()))
        .into_tuple()
        .one(db)
        .await?;
    if let Some(name) = confirmed.flatten() {
        return Ok(Some(name));
    }

    let Some(now) = source.held_at() else {
        return Ok(None);
    };
    let held: Option<Option<String>> = live_holds(event.id(), now)
        .select_only()
        .column(slot_reservations::Column::TeamName)
        .filter(slot_reservations::Column::TeamCode.eq(code.as_str()))
        .filter(slot_reservations::Column::Role.eq(Role::Lead.as_str()))
        .into_tuple()
        .one(db)
        .await?;
    Ok(held.flatten())
}

/// Rows sharing the team code, lead included.
pub async fn team_member_count<C: ConnectionTrait>(
    db: &C,
    event: &Event,
    code: &TeamCode,
    source: TeamSource,
) -> Result<u64, DbErr> {
    let confirmed = registration_events::Entity::find()
        .filter(registration_events::Column::EventId.eq(event.id()))
        .filter(registration_events::Column::TeamCode.eq(code.as_str()))
        .count(db)
        .await?;

    let held = match source.held_at() {
        Some(now) => {
            live_holds(event.id(), now)
                .filter(slot_reservations::Column::TeamCode.eq(code.as_str()))
                .count(db)
                .await?
        }
        None => 0,
    };
    Ok(confirmed + held)
}

async fn code_in_use<C: ConnectionTrait>(
    db: &C,
    event: &Event,
    code: &TeamCode,
    source: TeamSource,
) -> Result<bool, DbErr> {
    Ok(team_member_count(db, event, code, source).await? > 0)
}

/// Draw random codes until one is unused for this event.
async fn allocate_team_code<C: ConnectionTrait>(
    db: &C,
    event: &Event,
    source: TeamSource,
) -> Result<TeamCode, DomainError> {
    for _ in 0..TEAM_CODE_ATTEMPTS {
        let code = TeamCode::generate()?;
        if !code_in_use(db, event, &code, source).await? {
            return Ok(code);
        }
        tracing::debug!(event = event.name(), "team code collision, drawing again");
    }
    Err(DomainError::TeamCodeExhausted)
}
