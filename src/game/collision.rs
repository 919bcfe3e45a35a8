//! # Collision
//!
//! Projectile hits, wall blocking, world bounds and pickup overlap queries.

use crate::game::{Circle, EntityId, Obstacle, Pickupable, Position, Projectile, Rect};

/// One projectile striking one obstacle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub projectile: EntityId,
    pub obstacle: EntityId,
    pub damage: f32,
}

/// Outcome of one projectile sweep.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionReport {
    pub hits: Vec<Hit>,
    /// Obstacles removed because their health reached zero
    pub destroyed: Vec<EntityId>,
}

impl CollisionReport {
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}

/// Resolves projectile-versus-obstacle contacts for one tick.
///
/// Projectiles are processed in list order and each strikes at most the first
/// obstacle it overlaps, in obstacle list order. A projectile that hits anything
/// is removed. Obstacles whose health reaches zero are removed immediately, so
/// later projectiles in the same sweep cannot hit them.
pub fn resolve_projectile_hits(
    projectiles: &mut Vec<Projectile>,
    obstacles: &mut Vec<Obstacle>,
) -> CollisionReport {
    let mut report = CollisionReport::default();

    projectiles.retain(|projectile| {
        let hitbox = projectile.hitbox();
        let Some(index) = obstacles
            .iter()
            .position(|obstacle| hitbox.intersects_rect(&obstacle.hitbox()))
        else {
            return true;
        };

        let obstacle = &mut obstacles[index];
        let destroyed = obstacle.take_damage(projectile.damage);
        report.hits.push(Hit {
            projectile: projectile.id,
            obstacle: obstacle.id,
            damage: projectile.damage,
        });
        log::debug!(
            "{} hit obstacle {} for {}, {} left",
            projectile.name,
            obstacle.id,
            projectile.damage,
            obstacle.health.current()
        );

        if destroyed {
            let removed = obstacles.remove(index);
            log::debug!("Obstacle {} destroyed", removed.id);
            report.destroyed.push(removed.id);
        }
        false
    });

    report
}

/// Removes projectiles whose centre has left `bounds`. Returns how many expired.
pub fn expire_out_of_bounds(projectiles: &mut Vec<Projectile>, bounds: &Rect) -> usize {
    let before = projectiles.len();
    projectiles.retain(|projectile| bounds.contains(projectile.position));
    before - projectiles.len()
}

/// Moves a `width` x `height` box centred on `position` by `velocity`, one axis
/// at a time. A step along an axis that would overlap any wall is undone, so the
/// box slides along walls instead of sticking to them.
pub fn move_with_walls(
    position: Position,
    velocity: Position,
    width: f32,
    height: f32,
    walls: &[Rect],
) -> Position {
    let blocked = |center: Position| {
        let hitbox = Rect::new(center, width, height);
        walls.iter().any(|wall| hitbox.intersects(wall))
    };

    let mut moved = position;
    if velocity.x != 0.0 {
        moved.x += velocity.x;
        if blocked(moved) {
            moved.x = position.x;
        }
    }
    if velocity.y != 0.0 {
        moved.y += velocity.y;
        if blocked(moved) {
            moved.y = position.y;
        }
    }
    moved
}

/// Clamps a box so it stays inside `bounds`.
///
/// A box larger than the bounds along an axis is centred on that axis.
pub fn clamp_to_bounds(hitbox: &Rect, bounds: &Rect) -> Position {
    let clamp_axis = |value: f32, half: f32, low: f32, high: f32| {
        if high - low < half * 2.0 {
            (low + high) / 2.0
        } else {
            value.clamp(low + half, high - half)
        }
    };

    Position::new(
        clamp_axis(
            hitbox.center.x,
            hitbox.width / 2.0,
            bounds.left(),
            bounds.right(),
        ),
        clamp_axis(
            hitbox.center.y,
            hitbox.height / 2.0,
            bounds.bottom(),
            bounds.top(),
        ),
    )
}

/// Indices of every pickup overlapping `hitbox`, in list order.
pub fn overlapping_pickups(hitbox: &Circle, pickups: &[Pickupable]) -> Vec<usize> {
    pickups
        .iter()
        .enumerate()
        .filter(|(_, pickup)| hitbox.intersects_circle(&pickup.hitbox()))
        .map(|(index, _)| index)
        .collect()
}

/// Index of the overlapping pickup closest to the hitbox centre.
///
/// Ties go to the pickup that comes first in list order.
pub fn closest_overlapping(hitbox: &Circle, pickups: &[Pickupable]) -> Option<usize> {
    overlapping_pickups(hitbox, pickups)
        .into_iter()
        .min_by(|&a, &b| {
            let distance_a = hitbox.center.distance(pickups[a].position);
            let distance_b = hitbox.center.distance(pickups[b].position);
            distance_a.total_cmp(&distance_b)
        })
}
