//! Entity Suspender: freezes non-local actors on pause and restores exactly
//! those actors on resume.
//!
//! The suspender owns the per-cycle snapshot of deactivated actors. Resume
//! walks that snapshot, never the live directory, so an actor that was
//! already inactive before the pause (or joined while paused) is never
//! touched, and an actor removed mid-pause is skipped.

use std::collections::BTreeSet;

use hiatus_types::EntityId;
use tracing::debug;

use crate::host::{EntityDirectory, SimEntity};

/// Counts from one suspend or restore pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SuspendReport {
    /// Actors whose state this pass changed.
    pub affected: usize,
    /// Actors skipped (already inactive, destroyed, or gone).
    pub skipped: usize,
}

/// Deactivates and reactivates non-local actors.
#[derive(Debug, Default)]
pub struct EntitySuspender {
    /// Actors deactivated by the most recent pause.
    suspended: BTreeSet<EntityId>,
}

impl EntitySuspender {
    /// Create a suspender with an empty snapshot.
    pub const fn new() -> Self {
        Self {
            suspended: BTreeSet::new(),
        }
    }

    /// Freeze every alive actor except the local one.
    ///
    /// Any stale snapshot from an unmatched earlier pause is replaced.
    pub fn deactivate_all(&mut self, directory: &mut dyn EntityDirectory) -> SuspendReport {
        self.suspended.clear();
        let local = directory.local_actor();
        let mut report = SuspendReport::default();

        for id in directory.alive_entities() {
            if Some(id) == local {
                continue;
            }
            let mut deactivated = false;
            let found = directory.with_entity(id, &mut |entity| {
                deactivated = deactivate(entity);
            });
            if found && deactivated {
                debug!(entity_id = %id, "Deactivated entity");
                self.suspended.insert(id);
                report.affected = report.affected.saturating_add(1);
            } else {
                report.skipped = report.skipped.saturating_add(1);
            }
        }

        report
    }

    /// Restore exactly the actors recorded by the last
    /// [`deactivate_all`](Self::deactivate_all), then clear the snapshot.
    pub fn reactivate_all(&mut self, directory: &mut dyn EntityDirectory) -> SuspendReport {
        let mut report = SuspendReport::default();

        for id in std::mem::take(&mut self.suspended) {
            let mut restored = false;
            let found = directory.with_entity(id, &mut |entity| {
                restored = reactivate(entity);
            });
            if found && restored {
                debug!(entity_id = %id, "Reactivated entity");
                report.affected = report.affected.saturating_add(1);
            } else {
                debug!(entity_id = %id, "Suspended entity gone, skipping");
                report.skipped = report.skipped.saturating_add(1);
            }
        }

        report
    }

    /// Actors currently held in the snapshot.
    pub fn suspended(&self) -> &BTreeSet<EntityId> {
        &self.suspended
    }

    /// Drop the snapshot without touching any actor.
    pub fn clear(&mut self) {
        self.suspended.clear();
    }
}

/// Returns `true` if this call took the actor out of simulation.
fn deactivate(entity: &mut dyn SimEntity) -> bool {
    if entity.is_destroyed() || !entity.is_active() {
        return false;
    }
    entity.for_each_body(&mut |body| {
        body.zero_motion();
        body.sleep();
    });
    entity.clear_decisions();
    entity.set_active(false);
    true
}

/// Returns `true` if the actor was brought back into simulation.
fn reactivate(entity: &mut dyn SimEntity) -> bool {
    if entity.is_destroyed() {
        return false;
    }
    entity.set_active(true);
    entity.for_each_body(&mut |body| {
        body.zero_motion();
        body.wake_up();
    });
    entity.recompute_goal();
    true
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::host::{LocalActor, RigidBody};

    #[derive(Debug, Default, Clone)]
    pub(crate) struct FakeBody {
        pub moving: bool,
        pub asleep: bool,
    }

    impl RigidBody for FakeBody {
        fn zero_motion(&mut self) {
            self.moving = false;
        }
        fn sleep(&mut self) {
            self.asleep = true;
        }
        fn wake_up(&mut self) {
            self.asleep = false;
        }
    }

    #[derive(Debug, Default, Clone)]
    pub(crate) struct FakeEntity {
        pub active: bool,
        pub destroyed: bool,
        pub bodies: Vec<FakeBody>,
        pub decisions: usize,
        pub goal_recomputes: u32,
    }

    impl SimEntity for FakeEntity {
        fn is_active(&self) -> bool {
            self.active
        }
        fn is_destroyed(&self) -> bool {
            self.destroyed
        }
        fn set_active(&mut self, active: bool) {
            self.active = active;
        }
        fn for_each_body(&mut self, visit: &mut dyn FnMut(&mut dyn RigidBody)) {
            for body in &mut self.bodies {
                visit(body);
            }
        }
        fn clear_decisions(&mut self) {
            self.decisions = 0;
        }
        fn recompute_goal(&mut self) {
            self.goal_recomputes += 1;
        }
    }

    #[derive(Debug, Default)]
    pub(crate) struct FakeLocal {
        pub enabled: bool,
        pub effects_paused: bool,
    }

    impl LocalActor for FakeLocal {
        fn set_enabled(&mut self, enabled: bool) {
            self.enabled = enabled;
        }
        fn pause_effects(&mut self) {
            self.effects_paused = true;
        }
        fn resume_effects(&mut self) {
            self.effects_paused = false;
        }
    }

    #[derive(Debug, Default)]
    pub(crate) struct FakeDirectory {
        pub local: Option<EntityId>,
        pub local_actor: FakeLocal,
        pub entities: BTreeMap<EntityId, FakeEntity>,
    }

    impl FakeDirectory {
        pub(crate) fn spawn(&mut self, active: bool) -> EntityId {
            let id = EntityId::new();
            self.entities.insert(
                id,
                FakeEntity {
                    active,
                    bodies: vec![
                        FakeBody {
                            moving: true,
                            asleep: false,
                        };
                        3
                    ],
                    decisions: 4,
                    ..FakeEntity::default()
                },
            );
            id
        }
    }

    impl EntityDirectory for FakeDirectory {
        fn local_actor(&self) -> Option<EntityId> {
            self.local
        }
        fn alive_entities(&self) -> Vec<EntityId> {
            self.entities.keys().copied().collect()
        }
        fn with_entity(
            &mut self,
            id: EntityId,
            visit: &mut dyn FnMut(&mut dyn SimEntity),
        ) -> bool {
            let Some(entity) = self.entities.get_mut(&id) else {
                return false;
            };
            visit(entity);
            true
        }
        fn with_local_actor(&mut self, visit: &mut dyn FnMut(&mut dyn LocalActor)) -> bool {
            if self.local.is_none() {
                return false;
            }
            visit(&mut self.local_actor);
            true
        }
    }

    #[test]
    fn deactivate_freezes_bodies_and_decisions() {
        let mut dir = FakeDirectory::default();
        let id = dir.spawn(true);
        let mut suspender = EntitySuspender::new();

        let report = suspender.deactivate_all(&mut dir);

        assert_eq!(report.affected, 1);
        let entity = dir.entities.get(&id).unwrap();
        assert!(!entity.active);
        assert_eq!(entity.decisions, 0);
        assert!(entity.bodies.iter().all(|b| !b.moving && b.asleep));
        assert!(suspender.suspended().contains(&id));
    }

    #[test]
    fn local_actor_is_never_suspended() {
        let mut dir = FakeDirectory::default();
        let local = dir.spawn(true);
        dir.local = Some(local);
        let mut suspender = EntitySuspender::new();

        let report = suspender.deactivate_all(&mut dir);

        assert_eq!(report.affected, 0);
        assert!(dir.entities.get(&local).unwrap().active);
    }

    #[test]
    fn reactivate_restores_and_recomputes_goal() {
        let mut dir = FakeDirectory::default();
        let id = dir.spawn(true);
        let mut suspender = EntitySuspender::new();
        suspender.deactivate_all(&mut dir);

        let report = suspender.reactivate_all(&mut dir);

        assert_eq!(report.affected, 1);
        let entity = dir.entities.get(&id).unwrap();
        assert!(entity.active);
        assert_eq!(entity.goal_recomputes, 1);
        assert!(entity.bodies.iter().all(|b| !b.asleep));
        assert!(suspender.suspended().is_empty());
    }

    #[test]
    fn already_inactive_entity_is_not_ours() {
        let mut dir = FakeDirectory::default();
        let dormant = dir.spawn(false);
        let mut suspender = EntitySuspender::new();

        suspender.deactivate_all(&mut dir);
        suspender.reactivate_all(&mut dir);

        let entity = dir.entities.get(&dormant).unwrap();
        assert!(!entity.active);
        assert_eq!(entity.goal_recomputes, 0);
    }

    #[test]
    fn removed_entity_is_skipped_on_resume() {
        let mut dir = FakeDirectory::default();
        let doomed = dir.spawn(true);
        let survivor = dir.spawn(true);
        let mut suspender = EntitySuspender::new();
        suspender.deactivate_all(&mut dir);

        dir.entities.remove(&doomed);
        let report = suspender.reactivate_all(&mut dir);

        assert_eq!(report, SuspendReport { affected: 1, skipped: 1 });
        assert!(dir.entities.get(&survivor).unwrap().active);
    }

    #[test]
    fn destroyed_entity_is_skipped_silently() {
        let mut dir = FakeDirectory::default();
        let id = dir.spawn(true);
        dir.entities.get_mut(&id).unwrap().destroyed = true;
        let mut suspender = EntitySuspender::new();

        let report = suspender.deactivate_all(&mut dir);

        assert_eq!(report, SuspendReport { affected: 0, skipped: 1 });
        assert!(suspender.suspended().is_empty());
    }

    #[test]
    fn entity_spawned_while_paused_is_untouched() {
        let mut dir = FakeDirectory::default();
        dir.spawn(true);
        let mut suspender = EntitySuspender::new();
        suspender.deactivate_all(&mut dir);

        let late = dir.spawn(true);
        dir.entities.get_mut(&late).unwrap().decisions = 9;
        suspender.reactivate_all(&mut dir);

        let entity = dir.entities.get(&late).unwrap();
        assert_eq!(entity.goal_recomputes, 0);
        assert_eq!(entity.decisions, 9);
    }
}
