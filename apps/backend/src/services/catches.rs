//! Catch and place/rename transactions.

use std::sync::Arc;

use sea_orm::DatabaseTransaction;
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::config::game::GameSettings;
use crate::domain::naming::validate_name;
use crate::domain::validity;
use crate::domain::{assign, matches_current, Fish, PlacementQuery, PlacementRequest};
use crate::errors::domain::{DomainError, ValidationKind};
use crate::policy::{Ability, Actor, Gate, Permission, Subject};
use crate::repos::{fishes, rankings, rounds};
use crate::services::placement::PlacementEngine;

/// Attributes of a place/rename request. Absent attributes are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaceAttributes {
    pub placement: Option<PlacementRequest>,
    pub name: Option<String>,
}

#[derive(Clone)]
pub struct CatchService {
    gate: Arc<dyn Gate>,
    engine: Arc<PlacementEngine>,
    settings: GameSettings,
}

impl CatchService {
    pub fn new(gate: Arc<dyn Gate>, engine: Arc<PlacementEngine>, settings: GameSettings) -> Self {
        Self {
            gate,
            engine,
            settings,
        }
    }

    fn require(
        &self,
        actor: &Actor,
        ability: Ability,
        fish: &Fish,
        now: OffsetDateTime,
    ) -> Result<(), DomainError> {
        if self
            .gate
            .can_perform(actor, ability, Subject::Fish(fish), now)
        {
            Ok(())
        } else {
            Err(DomainError::permission_denied(
                ability,
                format!("user {} may not {ability:?} fish {}", actor.id, fish.id),
            ))
        }
    }

    /// Catch the fish at `requested`, relocate it at random and count the
    /// catch for the actor in the fish's round.
    ///
    /// The fish is re-read inside `txn` and saved conditionally on its
    /// version, so a concurrent catch surfaces as `Conflict(OptimisticLock)`.
    /// Fish save and ranking upsert share `txn`.
    pub async fn catch_fish(
        &self,
        txn: &DatabaseTransaction,
        actor: &Actor,
        fish_id: i64,
        requested: &PlacementQuery,
        now: OffsetDateTime,
    ) -> Result<Fish, DomainError> {
        debug!(fish_id, user_id = actor.id, "catching fish");

        let fish = fishes::require_fish(txn, fish_id).await?;
        self.catch_loaded(txn, actor, fish, requested, now).await
    }

    /// The part of [`catch_fish`](Self::catch_fish) after the read: `fish`
    /// is the version the caller saw, and the save fails with
    /// `Conflict(OptimisticLock)` if the row moved on since.
    pub async fn catch_loaded(
        &self,
        txn: &DatabaseTransaction,
        actor: &Actor,
        mut fish: Fish,
        requested: &PlacementQuery,
        now: OffsetDateTime,
    ) -> Result<Fish, DomainError> {
        let fish_id = fish.id;
        self.require(actor, Ability::Catch, &fish, now)?;

        if !matches_current(&fish, requested) {
            return Err(DomainError::validation(
                ValidationKind::WrongCatchPlacement,
                format!("fish {fish_id} is not at the requested placement"),
            ));
        }

        let round = rounds::require_round(txn, fish.round_id).await?;
        if !round.is_running(now) {
            return Err(DomainError::validation(
                ValidationKind::RoundClosed,
                format!("round {} is not running", round.id),
            ));
        }

        fish.user_id_last_placement = None;
        fish.last_caught_at = Some(now);
        fish.user_id_last_catch = Some(actor.id);

        let target = self.engine.random_placement(txn, now).await?;
        assign(target, &mut fish);

        let policy = validity::after_catch(
            actor.has(Permission::ChoosePlace),
            actor.has(Permission::ChooseName),
            self.settings.auto_placed_after,
        );
        if let Some(valid_since) = policy.valid_since(now) {
            fish.placement_valid_since = valid_since;
        }

        let saved = fishes::save_fish(txn, &fish, now).await?;
        let ranking = rankings::increment_catch(txn, saved.round_id, actor.id, now).await?;

        info!(
            fish_id,
            user_id = actor.id,
            round_id = saved.round_id,
            catch_count = ranking.catch_count,
            placement = ?saved.placement,
            "fish caught"
        );
        Ok(saved)
    }

    /// Re-place and/or rename a fish. Every permission decision is taken on
    /// the fish as it was before this request. Nothing is written when no
    /// field changed.
    pub async fn place_fish(
        &self,
        txn: &DatabaseTransaction,
        actor: &Actor,
        fish_id: i64,
        attributes: &PlaceAttributes,
        now: OffsetDateTime,
    ) -> Result<Fish, DomainError> {
        debug!(fish_id, user_id = actor.id, "placing fish");

        let mut fish = fishes::require_fish(txn, fish_id).await?;
        let snapshot = fish.clone();

        if let Some(request) = &attributes.placement {
            self.require(actor, Ability::Place, &snapshot, now)?;

            // "random" keeps the current placement and only releases it.
            if let PlacementRequest::Explicit(explicit) = request {
                let target = self.engine.assert_valid(txn, explicit, now).await?;
                assign(target, &mut fish);
                fish.user_id_last_placement = Some(actor.id);
            }

            if let Some(valid_since) = validity::after_place().valid_since(now) {
                fish.placement_valid_since = valid_since;
            }
        }

        if let Some(raw_name) = &attributes.name {
            self.require(actor, Ability::Name, &snapshot, now)?;

            fish.name = Some(validate_name(raw_name)?);
            fish.user_id_last_naming = Some(actor.id);

            let can_place = self.gate.can_perform(
                actor,
                Ability::Place,
                Subject::Fish(&snapshot),
                now,
            );
            if let Some(valid_since) = validity::after_rename(can_place).valid_since(now) {
                fish.placement_valid_since = valid_since;
            }
        }

        if fish == snapshot {
            debug!(fish_id, "place request changed nothing");
            return Ok(fish);
        }

        let saved = fishes::save_fish(txn, &fish, now).await?;
        info!(
            fish_id,
            user_id = actor.id,
            placement = ?saved.placement,
            valid_since = %saved.placement_valid_since,
            "fish placed"
        );
        Ok(saved)
    }
}
