use std::collections::BTreeMap;

use rooftop_core::collision::{BodyCategory, CollisionEvent, ContactSide};
use rooftop_core::platform::{Platform, PlatformId};
use rooftop_core::world::World;

use crate::config::PhysicsConfig;
use crate::player::Player;

/// Current contact between the player and one platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Contact {
    side: ContactSide,
    other: BodyCategory,
}

/// Minimal arcade physics host: gravity, integration, and AABB contacts
/// between the player and the registered platforms.
///
/// Contacts are diffed every substep and reported as start/end events, ends
/// before starts, in platform id order.
#[derive(Debug)]
pub struct ArcadeWorld {
    gravity: f32,
    substeps: u32,
    platforms: Vec<Platform>,
    contacts: BTreeMap<PlatformId, Contact>,
}

impl ArcadeWorld {
    pub fn new(config: &PhysicsConfig) -> Self {
        Self {
            gravity: config.gravity,
            substeps: config.substeps.max(1),
            platforms: Vec::new(),
            contacts: BTreeMap::new(),
        }
    }

    pub fn platforms(&self) -> &[Platform] {
        &self.platforms
    }

    /// Integrate the player over `dt` seconds and return contact changes.
    pub fn step(&mut self, player: &mut Player, dt: f32) -> Vec<CollisionEvent> {
        let mut events = Vec::new();
        if !dt.is_finite() || dt <= 0.0 {
            return events;
        }

        let sub_dt = dt / self.substeps as f32;
        for _ in 0..self.substeps {
            player.vy += self.gravity * sub_dt;
            player.x += player.vx * sub_dt;
            player.y += player.vy * sub_dt;

            let touching = self.resolve(player);
            self.diff_contacts(touching, &mut events);
        }
        events
    }

    fn resolve(&self, player: &mut Player) -> BTreeMap<PlatformId, Contact> {
        let half_w = player.half_width();
        let half_h = player.half_height();
        let mut touching = BTreeMap::new();

        for plat in &self.platforms {
            let p_left = player.x - half_w;
            let p_right = player.x + half_w;
            let p_top = player.y - half_h;
            let p_bottom = player.y + half_h;

            if p_right <= plat.left_edge
                || p_left >= plat.right_edge()
                || p_bottom <= plat.top
                || p_top >= plat.bottom()
            {
                continue;
            }

            // Resolve along the axis of least penetration
            let push_up = p_bottom - plat.top;
            let push_down = plat.bottom() - p_top;
            let push_left = p_right - plat.left_edge;
            let push_right = plat.right_edge() - p_left;

            let min_overlap = push_up.min(push_down).min(push_left).min(push_right);

            let side = if min_overlap == push_up {
                player.y -= push_up;
                if player.vy > 0.0 {
                    player.vy = 0.0;
                }
                ContactSide::Bottom
            } else if min_overlap == push_down {
                player.y += push_down;
                if player.vy < 0.0 {
                    player.vy = 0.0;
                }
                ContactSide::Top
            } else if min_overlap == push_left {
                player.x -= push_left;
                if player.vx > 0.0 {
                    player.vx = 0.0;
                }
                ContactSide::Right
            } else {
                player.x += push_right;
                if player.vx < 0.0 {
                    player.vx = 0.0;
                }
                ContactSide::Left
            };

            touching.insert(
                plat.id,
                Contact {
                    side,
                    other: plat.kind.category(),
                },
            );
        }
        touching
    }

    fn diff_contacts(
        &mut self,
        touching: BTreeMap<PlatformId, Contact>,
        events: &mut Vec<CollisionEvent>,
    ) {
        for (id, prev) in &self.contacts {
            if touching.get(id) != Some(prev) {
                events.push(CollisionEvent::End {
                    side: prev.side,
                    other: prev.other,
                });
            }
        }
        for (id, now) in &touching {
            if self.contacts.get(id) != Some(now) {
                events.push(CollisionEvent::Start {
                    side: now.side,
                    other: now.other,
                });
            }
        }
        self.contacts = touching;
    }
}

impl World for ArcadeWorld {
    fn add_platform(&mut self, platform: &Platform) {
        self.platforms.push(*platform);
    }

    fn remove_platform(&mut self, id: PlatformId) {
        self.platforms.retain(|p| p.id != id);
        self.contacts.remove(&id);
    }
}
