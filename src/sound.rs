//! Ambient loop and click feedback

use bevy::audio::Volume;
use bevy::prelude::*;

use crate::interaction::BodyClicked;

const AMBIENT_TRACK: &str = "sounds/space_ambient.ogg";
const CLICK_SOUND: &str = "sounds/click.ogg";
const AMBIENT_VOLUME: f32 = 0.2;
const CLICK_VOLUME: f32 = 0.5;

#[derive(Resource)]
pub struct ClickSound(pub Handle<AudioSource>);

#[derive(Component)]
pub struct AmbientTrack;

pub struct SoundPlugin;

impl Plugin for SoundPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, start_ambient_track)
            .add_systems(Update, play_click_sound);
    }
}

fn start_ambient_track(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.insert_resource(ClickSound(asset_server.load(CLICK_SOUND)));
    commands.spawn((
        AudioPlayer::new(asset_server.load(AMBIENT_TRACK)),
        PlaybackSettings::LOOP.with_volume(Volume::Linear(AMBIENT_VOLUME)),
        AmbientTrack,
        Name::new("Ambient track"),
    ));
    info!("Ambient track started");
}

fn play_click_sound(
    mut commands: Commands,
    mut clicks: MessageReader<BodyClicked>,
    click_sound: Option<Res<ClickSound>>,
) {
    let Some(click_sound) = click_sound else {
        clicks.clear();
        return;
    };
    for _ in clicks.read() {
        commands.spawn((
            AudioPlayer::new(click_sound.0.clone()),
            PlaybackSettings::DESPAWN.with_volume(Volume::Linear(CLICK_VOLUME)),
        ));
    }
}
