use crate::{graph::node::RenderCtx, MIN_TIME};

/*
Fade Gate
=========

A two-ramp gain envelope for ambient channels. Unlike a musical ADSR there is
no decay or sustain shaping: a channel fades in to full level, loops there
indefinitely, and fades out when stopped.

  Level
    1.0 ┐      ╭────────────────╮
        │     ╱                  ╲
        │    ╱                    ╲
    0.0 └───╱──────────────────────╲──→ Time
          Attack       Full      Release

Both ramps are linear. The attack increment is recomputed each sample from
the configured time; release snapshots the starting level and total sample
count at fade_out so the ramp lands exactly on zero.

Key behavior: fade_out starts from the CURRENT level, whatever the stage.
Stopping a channel mid-attack releases from the partial level reached so far,
never jumping to full first.
*/

/// Stage of the fade state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeStage {
    Idle,    // Inactive, level = 0
    Attack,  // Ramping up to full level
    Full,    // Holding at 1.0 while the channel loops
    Release, // Ramping down to 0
}

pub struct Fade {
    attack_time: f32,  // seconds to ramp 0 -> 1
    release_time: f32, // seconds to ramp current -> 0

    stage: FadeStage,
    level: f32,

    // Release bookkeeping (pre-calculated at fade_out for precision)
    release_start_level: f32,
    release_total_samples: u32,
    release_elapsed_samples: u32,
}

impl Fade {
    pub fn new(attack_time: f32, release_time: f32) -> Self {
        Self {
            attack_time: attack_time.max(MIN_TIME),
            release_time: release_time.max(MIN_TIME),

            stage: FadeStage::Idle,
            level: 0.0,
            release_start_level: 0.0,
            release_total_samples: 1,
            release_elapsed_samples: 0,
        }
    }

    /// Begin the attack ramp from zero.
    pub fn fade_in(&mut self) {
        self.level = 0.0;
        self.stage = FadeStage::Attack;
        self.release_elapsed_samples = 0;
    }

    /// Begin the release ramp from the current level.
    ///
    /// Cancels an in-flight attack at its current value. No-op when idle or
    /// already releasing.
    pub fn fade_out(&mut self, ctx: &RenderCtx) {
        if matches!(self.stage, FadeStage::Idle | FadeStage::Release) {
            return;
        }

        self.release_start_level = self.level;
        self.release_total_samples = (self.release_time * ctx.sample_rate).round().max(1.0) as u32;
        self.release_elapsed_samples = 0;
        self.stage = FadeStage::Release;
    }

    /// Advance the fade by one sample.
    pub fn next_sample(&mut self, ctx: &RenderCtx) {
        match self.stage {
            FadeStage::Idle => {
                self.level = 0.0;
            }

            FadeStage::Attack => {
                let increment = 1.0 / (self.attack_time * ctx.sample_rate);
                self.level += increment;

                if self.level >= 1.0 {
                    self.level = 1.0;
                    self.stage = FadeStage::Full;
                }
            }

            FadeStage::Full => {
                self.level = 1.0;
            }

            FadeStage::Release => {
                // Linear interpolation from release_start_level to 0
                let progress =
                    self.release_elapsed_samples as f32 / self.release_total_samples as f32;
                self.level = (self.release_start_level * (1.0 - progress)).max(0.0);

                self.release_elapsed_samples = self.release_elapsed_samples.saturating_add(1);

                if self.release_elapsed_samples >= self.release_total_samples {
                    self.level = 0.0;
                    self.stage = FadeStage::Idle;
                }
            }
        }

        debug_assert!((0.0..=1.0).contains(&self.level));
    }

    /// Render a block of fade levels into the buffer.
    pub fn render(&mut self, buffer: &mut [f32], ctx: &RenderCtx) {
        for sample in buffer.iter_mut() {
            self.next_sample(ctx);
            *sample = self.level;
        }
    }

    /// True while the fade is producing gain (not idle).
    pub fn is_active(&self) -> bool {
        self.stage != FadeStage::Idle
    }

    /// True once the attack ramp has completed.
    pub fn is_full(&self) -> bool {
        self.stage == FadeStage::Full
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn stage(&self) -> FadeStage {
        self.stage
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 1_000.0;

    fn render_samples(fade: &mut Fade, samples: usize) {
        let ctx = RenderCtx::new(SAMPLE_RATE);
        for _ in 0..samples {
            fade.next_sample(&ctx);
        }
    }

    #[test]
    fn attack_reaches_full_level() {
        let mut fade = Fade::new(0.1, 0.05);

        fade.fade_in();
        render_samples(&mut fade, (0.1 * SAMPLE_RATE) as usize + 1);

        assert!(fade.is_full(), "expected attack to land in Full");
        assert!((fade.level() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn release_falls_back_to_idle() {
        let release = 0.05;
        let mut fade = Fade::new(0.01, release);
        let ctx = RenderCtx::new(SAMPLE_RATE);

        fade.fade_in();
        render_samples(&mut fade, (0.02 * SAMPLE_RATE) as usize);
        assert!(fade.is_full());

        fade.fade_out(&ctx);
        render_samples(&mut fade, (release * SAMPLE_RATE) as usize + 2);

        assert_eq!(fade.stage(), FadeStage::Idle);
        assert_eq!(fade.level(), 0.0);
    }

    #[test]
    fn fade_out_mid_attack_releases_from_partial_level() {
        let mut fade = Fade::new(1.0, 0.5);
        let ctx = RenderCtx::new(SAMPLE_RATE);

        fade.fade_in();
        // 30% into the attack
        render_samples(&mut fade, (0.3 * SAMPLE_RATE) as usize);
        let partial = fade.level();
        assert!((partial - 0.3).abs() < 0.01, "partial level was {partial}");

        fade.fade_out(&ctx);
        assert_eq!(fade.stage(), FadeStage::Release);

        // The release must never climb above the level it started from.
        let mut peak = 0.0f32;
        for _ in 0..(0.5 * SAMPLE_RATE) as usize + 2 {
            fade.next_sample(&ctx);
            peak = peak.max(fade.level());
        }
        assert!(peak <= partial + 1e-6, "release overshot: {peak} > {partial}");
        assert_eq!(fade.stage(), FadeStage::Idle);
    }

    #[test]
    fn fade_out_when_idle_is_a_no_op() {
        let mut fade = Fade::new(0.1, 0.1);
        let ctx = RenderCtx::new(SAMPLE_RATE);

        fade.fade_out(&ctx);
        assert_eq!(fade.stage(), FadeStage::Idle);
        assert!(!fade.is_active());
    }

    #[test]
    fn second_fade_out_does_not_restart_release() {
        let mut fade = Fade::new(0.01, 0.1);
        let ctx = RenderCtx::new(SAMPLE_RATE);

        fade.fade_in();
        render_samples(&mut fade, 20);
        fade.fade_out(&ctx);
        render_samples(&mut fade, 50);
        let midway = fade.level();

        // Releasing again mid-release must not snap back to the start level.
        fade.fade_out(&ctx);
        fade.next_sample(&ctx);
        assert!(fade.level() <= midway + 1e-6);
    }
}
