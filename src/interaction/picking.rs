//! Pointer hover and click handling for bodies

use bevy::prelude::*;

use crate::orbital::BodyPath;
use crate::visualization::{BodySpin, Hovered};

/// Two clicks on the same body within this many seconds form a double-click
pub const DOUBLE_CLICK_SECS: f64 = 0.35;

/// A click that landed on a body
#[derive(Message, Clone, Debug)]
pub struct BodyClicked {
    pub name: String,
    pub path: BodyPath,
    pub double: bool,
}

/// Currently selected body
#[derive(Resource, Default, Debug)]
pub struct Selection {
    pub name: Option<String>,
    pub path: Option<BodyPath>,
}

/// Detects double-clicks from a stream of click timestamps
#[derive(Resource, Debug)]
pub struct DoubleClickTracker {
    window_secs: f64,
    last: Option<(String, f64)>,
}

impl Default for DoubleClickTracker {
    fn default() -> Self {
        Self::new(DOUBLE_CLICK_SECS)
    }
}

impl DoubleClickTracker {
    pub fn new(window_secs: f64) -> Self {
        Self {
            window_secs,
            last: None,
        }
    }

    /// Record a click; returns true if it completes a double-click.
    pub fn register(&mut self, name: &str, now: f64) -> bool {
        let is_double = matches!(
            &self.last,
            Some((last_name, at)) if last_name == name && (now - at) >= 0.0 && (now - at) <= self.window_secs
        );
        // a completed double-click does not start the next one
        self.last = if is_double {
            None
        } else {
            Some((name.to_string(), now))
        };
        is_double
    }
}

/// Walk up from the picked entity until a body mesh is found
fn find_body_spin<'a>(
    entity: Entity,
    spins: &'a Query<&BodySpin>,
    parents: &Query<&ChildOf>,
) -> Option<(Entity, &'a BodySpin)> {
    let mut entity = entity;
    loop {
        if let Ok(spin) = spins.get(entity) {
            return Some((entity, spin));
        }
        entity = parents.get(entity).ok()?.parent();
    }
}

pub fn handle_body_clicks(
    time: Res<Time>,
    mut click_events: MessageReader<Pointer<Click>>,
    spins: Query<&BodySpin>,
    parents: Query<&ChildOf>,
    mut tracker: ResMut<DoubleClickTracker>,
    mut selection: ResMut<Selection>,
    mut clicked: MessageWriter<BodyClicked>,
) {
    for ev in click_events.read() {
        if ev.button != PointerButton::Primary {
            continue;
        }
        let Some((_, spin)) = find_body_spin(ev.entity, &spins, &parents) else {
            continue;
        };

        let double = tracker.register(&spin.name, time.elapsed_secs_f64());
        info!("Clicked body: {}{}", spin.name, if double { " (double)" } else { "" });

        selection.name = Some(spin.name.clone());
        selection.path = Some(spin.path.clone());
        clicked.write(BodyClicked {
            name: spin.name.clone(),
            path: spin.path.clone(),
            double,
        });
    }
}

pub fn handle_body_hover(
    mut commands: Commands,
    mut over_events: MessageReader<Pointer<Over>>,
    mut out_events: MessageReader<Pointer<Out>>,
    spins: Query<&BodySpin>,
    parents: Query<&ChildOf>,
) {
    for ev in out_events.read() {
        if let Some((entity, _)) = find_body_spin(ev.entity, &spins, &parents) {
            commands.entity(entity).remove::<Hovered>();
        }
    }
    for ev in over_events.read() {
        if let Some((entity, _)) = find_body_spin(ev.entity, &spins, &parents) {
            commands.entity(entity).insert(Hovered);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_click_same_body() {
        let mut tracker = DoubleClickTracker::new(0.35);
        assert!(!tracker.register("Earth", 1.0));
        assert!(tracker.register("Earth", 1.2));
    }

    #[test]
    fn test_slow_clicks_are_single() {
        let mut tracker = DoubleClickTracker::new(0.35);
        assert!(!tracker.register("Earth", 1.0));
        assert!(!tracker.register("Earth", 1.5));
        // the slow second click opens a new window
        assert!(tracker.register("Earth", 1.7));
    }

    #[test]
    fn test_other_body_resets() {
        let mut tracker = DoubleClickTracker::new(0.35);
        assert!(!tracker.register("Earth", 1.0));
        assert!(!tracker.register("Mars", 1.1));
        assert!(!tracker.register("Earth", 1.2));
    }

    #[test]
    fn test_triple_click_is_one_double() {
        let mut tracker = DoubleClickTracker::new(0.35);
        assert!(!tracker.register("Io", 2.0));
        assert!(tracker.register("Io", 2.1));
        assert!(!tracker.register("Io", 2.2));
    }

    #[test]
    fn test_spin_lookup_walks_parents() {
        let mut world = World::new();
        let spin = world
            .spawn(BodySpin {
                name: "Jupiter".into(),
                path: BodyPath::root(5),
            })
            .id();
        let rings = world.spawn(ChildOf(spin)).id();
        let stray = world.spawn_empty().id();

        let mut system_state: bevy::ecs::system::SystemState<(Query<&BodySpin>, Query<&ChildOf>)> =
            bevy::ecs::system::SystemState::new(&mut world);
        let (spins, parents) = system_state.get(&world);

        let found = find_body_spin(rings, &spins, &parents).map(|(e, s)| (e, s.name.clone()));
        assert_eq!(found, Some((spin, "Jupiter".to_string())));
        assert!(find_body_spin(stray, &spins, &parents).is_none());
    }
}
