//! Lifecycle scenarios driven against an offline engine/mixer pair.
//!
//! The mixer is rendered manually, so fade timings are exact multiples of
//! the block size rather than wall-clock sleeps.

use drift_audio::{
    dsp::noise::NoiseKind,
    engine::{AudioEngine, ChannelPhase, ChannelState, EngineConfig, Mixer},
    ATTACK_SECS, RELEASE_SECS,
};

const SR: u32 = 8_000;
const BLOCK: usize = 80; // 10 ms

fn offline() -> (AudioEngine, Mixer) {
    AudioEngine::offline(EngineConfig {
        sample_rate: SR,
        volume: 1.0,
    })
}

/// Render `secs` of audio and return the peak absolute sample seen.
fn render_secs(mixer: &mut Mixer, secs: f32) -> f32 {
    let mut out = [0.0f32; BLOCK];
    let blocks = (secs * SR as f32 / BLOCK as f32).round() as usize;
    let mut peak = 0.0f32;
    for _ in 0..blocks {
        mixer.render_block(&mut out);
        peak = out.iter().fold(peak, |acc, &s| acc.max(s.abs()));
    }
    peak
}

#[test]
fn double_play_registers_one_channel() {
    let (mut engine, mut mixer) = offline();

    engine.play("rain", NoiseKind::Pink).unwrap();
    engine.play("rain", NoiseKind::Pink).unwrap();
    render_secs(&mut mixer, 0.1);

    assert_eq!(mixer.channel_count(), 1);
    assert_eq!(engine.active_len(), 1);

    // Still one channel when the second play arrives after rendering began.
    engine.play("rain", NoiseKind::Pink).unwrap();
    render_secs(&mut mixer, 0.1);
    assert_eq!(mixer.channel_count(), 1);
}

#[test]
fn stop_without_channel_is_a_no_op() {
    let (mut engine, mut mixer) = offline();

    engine.stop("ghost");
    engine.stop_all();
    render_secs(&mut mixer, 0.1);

    assert_eq!(engine.active_len(), 0);
    assert_eq!(mixer.channel_count(), 0);
}

#[test]
fn full_lifecycle_play_then_stop() {
    let (mut engine, mut mixer) = offline();

    engine.play("rain", NoiseKind::Pink).unwrap();
    assert_eq!(engine.phase("rain"), Some(ChannelPhase::Starting));

    render_secs(&mut mixer, ATTACK_SECS + 0.1);
    engine.poll();
    assert_eq!(engine.phase("rain"), Some(ChannelPhase::Playing));
    assert!(mixer
        .channels()
        .all(|c| c.state() == ChannelState::Playing));

    engine.stop("rain");
    assert_eq!(engine.phase("rain"), Some(ChannelPhase::Stopping));

    render_secs(&mut mixer, RELEASE_SECS + 0.1);
    engine.poll();
    assert_eq!(engine.phase("rain"), None);
    assert_eq!(engine.active_len(), 0);
    assert_eq!(mixer.channel_count(), 0);
}

#[test]
fn stop_during_attack_releases_from_partial_gain() {
    let (mut engine, mut mixer) = offline();

    engine.play("fan", NoiseKind::White).unwrap();
    render_secs(&mut mixer, 0.3 * ATTACK_SECS);

    engine.stop("fan");
    assert_eq!(engine.phase("fan"), Some(ChannelPhase::Stopping));

    // White noise peaks near 1.0, the fade reached ~0.3 of full level, and
    // the master bus sits at 1.0: the release must start from the partial
    // gain rather than jumping to full first.
    let release_peak = render_secs(&mut mixer, RELEASE_SECS + 0.1);
    assert!(
        release_peak <= 0.32,
        "release overshot the partial gain: {release_peak}"
    );

    engine.poll();
    assert_eq!(engine.phase("fan"), None);
    assert_eq!(mixer.channel_count(), 0);
}

#[test]
fn stop_all_empties_the_active_set() {
    // N = 0: nothing to do, nothing to break.
    let (mut engine, mut mixer) = offline();
    engine.stop_all();
    render_secs(&mut mixer, 0.1);
    assert_eq!(engine.active_len(), 0);

    // N = 1.
    engine.play("rain", NoiseKind::Pink).unwrap();
    render_secs(&mut mixer, 0.2);
    engine.stop_all();
    render_secs(&mut mixer, RELEASE_SECS + 0.1);
    engine.poll();
    assert_eq!(engine.active_len(), 0);
    assert_eq!(mixer.channel_count(), 0);

    // N = 5, mixed kinds.
    let ids = ["rain", "fan", "road", "crickets", "heartbeat"];
    let kinds = [
        NoiseKind::Pink,
        NoiseKind::White,
        NoiseKind::Brown,
        NoiseKind::Unspecified,
        NoiseKind::Brown,
    ];
    for (id, kind) in ids.iter().zip(kinds) {
        engine.play(id, kind).unwrap();
    }
    render_secs(&mut mixer, ATTACK_SECS + 0.1);
    engine.poll();
    assert_eq!(engine.active_len(), 5);
    assert_eq!(mixer.channel_count(), 5);

    engine.stop_all();
    for id in ids {
        assert_eq!(engine.phase(id), Some(ChannelPhase::Stopping));
    }
    render_secs(&mut mixer, RELEASE_SECS + 0.1);
    engine.poll();
    assert_eq!(engine.active_len(), 0);
    assert_eq!(mixer.channel_count(), 0);
}

#[test]
fn set_volume_saturates_out_of_range_values() {
    let (mut engine, _mixer) = offline();

    engine.set_volume(-0.5);
    assert_eq!(engine.volume(), 0.0);

    engine.set_volume(1.7);
    assert_eq!(engine.volume(), 1.0);

    engine.set_volume(0.25);
    assert_eq!(engine.volume(), 0.25);
}

#[test]
fn volume_zero_silences_the_mix() {
    let (mut engine, mut mixer) = offline();

    engine.play("fan", NoiseKind::White).unwrap();
    render_secs(&mut mixer, ATTACK_SECS + 0.1);

    engine.set_volume(0.0);
    // Let the smoother settle (many time constants), then listen.
    render_secs(&mut mixer, 1.0);
    let peak = render_secs(&mut mixer, 0.2);
    assert!(peak < 1e-3, "expected silence at volume 0, got peak {peak}");
}

#[test]
fn unspecified_kind_plays_as_pink() {
    let (mut engine, mut mixer) = offline();

    engine.play("crickets", NoiseKind::Unspecified).unwrap();
    render_secs(&mut mixer, 0.1);

    assert_eq!(mixer.channel_count(), 1);
    let channel = mixer.channels().next().unwrap();
    assert_eq!(channel.kind(), NoiseKind::Pink);
}

#[test]
fn restart_while_stopping_waits_for_teardown() {
    let (mut engine, mut mixer) = offline();

    engine.play("rain", NoiseKind::Pink).unwrap();
    render_secs(&mut mixer, ATTACK_SECS + 0.1);
    engine.poll();
    engine.stop("rain");

    // Replay while the old channel fades out: queued, not started.
    engine.play("rain", NoiseKind::Brown).unwrap();
    assert_eq!(engine.phase("rain"), Some(ChannelPhase::Stopping));
    render_secs(&mut mixer, 0.5 * RELEASE_SECS);
    assert_eq!(mixer.channel_count(), 1, "old and new must never coexist");

    // Old channel finishes; the queued play is issued on the next poll.
    render_secs(&mut mixer, 0.6 * RELEASE_SECS);
    engine.poll();
    assert_eq!(engine.phase("rain"), Some(ChannelPhase::Starting));

    render_secs(&mut mixer, 0.1);
    assert_eq!(mixer.channel_count(), 1);
    let channel = mixer.channels().next().unwrap();
    assert_eq!(channel.kind(), NoiseKind::Brown, "restart uses the new kind");
}

#[test]
fn stop_during_stopping_cancels_a_queued_restart() {
    let (mut engine, mut mixer) = offline();

    engine.play("rain", NoiseKind::Pink).unwrap();
    render_secs(&mut mixer, 0.2);
    engine.stop("rain");
    engine.play("rain", NoiseKind::Pink).unwrap();
    engine.stop("rain");

    render_secs(&mut mixer, RELEASE_SECS + 0.3);
    engine.poll();
    render_secs(&mut mixer, 0.1);

    assert_eq!(engine.phase("rain"), None, "cancelled restart must not run");
    assert_eq!(mixer.channel_count(), 0);
}

#[test]
fn external_clips_occupy_slots_without_mixing() {
    let (mut engine, mut mixer) = offline();

    assert!(engine.attach_clip("recording"));
    assert!(!engine.attach_clip("recording"));
    assert_eq!(engine.phase("recording"), Some(ChannelPhase::External));
    assert_eq!(engine.active_len(), 1);

    // The slot blocks a synthesized channel under the same id...
    engine.play("recording", NoiseKind::Pink).unwrap();
    render_secs(&mut mixer, 0.1);
    assert_eq!(mixer.channel_count(), 0);

    // ...and clears immediately on stop, no fade involved.
    engine.stop("recording");
    assert_eq!(engine.active_len(), 0);

    // stop_all clears external slots too.
    engine.attach_clip("recording");
    engine.play("rain", NoiseKind::Pink).unwrap();
    engine.stop_all();
    render_secs(&mut mixer, RELEASE_SECS + 0.1);
    engine.poll();
    assert_eq!(engine.active_len(), 0);
}
