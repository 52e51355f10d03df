//! Time to live for particles and popups.
//!
//! [`ttl_system`] counts every [`Ttl`] down by the race delta and despawns
//! the entity when it runs out.

use bevy_ecs::prelude::*;

use crate::components::ttl::Ttl;
use crate::resources::worldtime::WorldTime;

pub fn ttl_system(
    world_time: Res<WorldTime>,
    mut query: Query<(Entity, &mut Ttl)>,
    mut commands: Commands,
) {
    let dt = world_time.delta;
    for (entity, mut ttl) in query.iter_mut() {
        ttl.remaining -= dt;
        if ttl.remaining <= 0.0 {
            commands.entity(entity).try_despawn();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expired_entities_are_despawned() {
        let mut world = World::new();
        world.insert_resource(WorldTime {
            delta: 0.5,
            ..WorldTime::default()
        });
        let short = world.spawn(Ttl::new(0.4)).id();
        let long = world.spawn(Ttl::new(2.0)).id();

        let mut schedule = Schedule::default();
        schedule.add_systems(ttl_system);
        schedule.run(&mut world);

        assert!(world.get_entity(short).is_err());
        let ttl = world.get::<Ttl>(long).unwrap();
        assert_eq!(ttl.remaining, 1.5);
    }
}
