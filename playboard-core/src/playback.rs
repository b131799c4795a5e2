//! Playback of recorded paths.
//!
//! Every token with a playable path moves along it at the same frame rate.
//! Long paths are sub-sampled so a run lasts at most about
//! `frame_budget` ticks; shorter paths freeze on their last sample while
//! longer ones continue. When the run ends every token returns to where it
//! stood before playback started.

use crate::{CoreError, CoreResult, Point, Scene, Token, TokenId};

/// Whether a playback run is still going after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackStatus {
    /// More frames remain.
    Running,
    /// The run ended and positions were restored.
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Snapshot {
    id: TokenId,
    origin: Point,
}

/// One playback run.
///
/// Holds only ids and pre-playback positions; paths are read from the
/// scene on every tick.
#[derive(Debug, Clone)]
pub struct Playback {
    snapshots: Vec<Snapshot>,
    frame: usize,
    step: usize,
    max_len: usize,
}

impl Playback {
    /// Start a run: remember positions and move tokens to their first sample.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NothingToPlay`] if no token has a playable path.
    pub fn start(scene: &mut Scene, frame_budget: usize) -> CoreResult<Self> {
        let mut snapshots = Vec::new();
        let mut max_len = 0;
        for token in scene.tokens_mut().filter(|t| t.has_playable_path()) {
            snapshots.push(Snapshot {
                id: token.id,
                origin: token.position,
            });
            max_len = max_len.max(token.path.len());
            token.position = token.path[0];
        }
        if snapshots.is_empty() {
            return Err(CoreError::NothingToPlay);
        }

        let step = (max_len / frame_budget.max(1)).max(1);
        tracing::debug!(
            "Playback start: {} tokens, longest path {max_len}, step {step}",
            snapshots.len()
        );
        Ok(Self {
            snapshots,
            frame: 0,
            step,
            max_len,
        })
    }

    /// Advance one animation tick.
    ///
    /// Tokens that were deleted, or whose paths were cleared, since the run
    /// started are skipped.
    pub fn tick(&mut self, scene: &mut Scene) -> PlaybackStatus {
        if self.frame >= self.max_len {
            self.restore(scene);
            tracing::debug!("Playback finished");
            return PlaybackStatus::Finished;
        }
        for snapshot in &self.snapshots {
            if let Some(token) = scene.token_mut(snapshot.id) {
                if let Some(p) = sample(token, self.frame) {
                    token.position = p;
                }
            }
        }
        self.frame += self.step;
        PlaybackStatus::Running
    }

    /// Put every participating token back at its pre-playback position.
    pub fn restore(&self, scene: &mut Scene) {
        for snapshot in &self.snapshots {
            if let Some(token) = scene.token_mut(snapshot.id) {
                token.position = snapshot.origin;
            }
        }
    }

    /// Path samples advanced per tick.
    #[must_use]
    pub const fn step(&self) -> usize {
        self.step
    }

    /// Next path index to display.
    #[must_use]
    pub const fn frame(&self) -> usize {
        self.frame
    }

    /// Length of the longest participating path.
    #[must_use]
    pub const fn max_len(&self) -> usize {
        self.max_len
    }

    /// Ids of the participating tokens.
    pub fn token_ids(&self) -> impl Iterator<Item = TokenId> + '_ {
        self.snapshots.iter().map(|s| s.id)
    }
}

fn sample(token: &Token, frame: usize) -> Option<Point> {
    let last = token.path.len().checked_sub(1)?;
    token.path.get(frame.min(last)).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Team;

    #[allow(clippy::cast_precision_loss)]
    fn line(len: usize) -> Vec<Point> {
        (0..len).map(|i| Point::new(i as f32, 0.0)).collect()
    }

    fn scene_with_path(len: usize) -> (Scene, TokenId) {
        let mut scene = Scene::new();
        let id = scene.add_player(Point::new(500.0, 500.0), "1".into(), Team::One, "#fff".into());
        scene.token_mut(id).expect("token").path = line(len);
        (scene, id)
    }

    fn run_to_end(playback: &mut Playback, scene: &mut Scene) -> usize {
        let mut ticks = 0;
        while playback.tick(scene) == PlaybackStatus::Running {
            ticks += 1;
            assert!(ticks < 10_000, "playback never finished");
        }
        ticks
    }

    #[test]
    fn test_nothing_to_play() {
        let (mut scene, _) = scene_with_path(1);
        assert!(matches!(
            Playback::start(&mut scene, 150),
            Err(CoreError::NothingToPlay)
        ));
    }

    #[test]
    fn test_start_moves_to_first_sample() {
        let (mut scene, id) = scene_with_path(5);
        let playback = Playback::start(&mut scene, 150).expect("start");
        assert_eq!(scene.token(id).expect("token").position, Point::new(0.0, 0.0));
        assert_eq!(playback.step(), 1);
        assert_eq!(playback.max_len(), 5);
    }

    #[test]
    fn test_step_subsamples_long_paths() {
        let (mut scene, _) = scene_with_path(10_000);
        let mut playback = Playback::start(&mut scene, 150).expect("start");
        assert_eq!(playback.step(), 66);
        let ticks = run_to_end(&mut playback, &mut scene);
        assert_eq!(ticks, 10_000usize.div_ceil(66));
    }

    #[test]
    fn test_restores_positions_for_various_lengths() {
        for len in [2, 150, 10_000] {
            let (mut scene, id) = scene_with_path(len);
            let mut playback = Playback::start(&mut scene, 150).expect("start");
            run_to_end(&mut playback, &mut scene);
            assert_eq!(
                scene.token(id).expect("token").position,
                Point::new(500.0, 500.0),
                "len {len}"
            );
        }
    }

    #[test]
    fn test_short_path_freezes_on_last_sample() {
        let (mut scene, long) = scene_with_path(10);
        let short = scene.add_ball(Point::new(0.0, 0.0), "#f9a825".into());
        scene.token_mut(short).expect("ball").path = vec![Point::new(1.0, 1.0), Point::new(2.0, 2.0)];

        let mut playback = Playback::start(&mut scene, 150).expect("start");
        for _ in 0..5 {
            assert_eq!(playback.tick(&mut scene), PlaybackStatus::Running);
        }
        assert_eq!(scene.token(short).expect("ball").position, Point::new(2.0, 2.0));
        assert_eq!(scene.token(long).expect("player").position, Point::new(4.0, 0.0));
    }

    #[test]
    fn test_removed_token_is_skipped() {
        let (mut scene, id) = scene_with_path(4);
        let mut playback = Playback::start(&mut scene, 150).expect("start");
        scene.remove(id).expect("remove");
        assert_eq!(run_to_end(&mut playback, &mut scene), 4);
    }

    #[test]
    fn test_cleared_path_is_skipped() {
        let (mut scene, id) = scene_with_path(4);
        let mut playback = Playback::start(&mut scene, 150).expect("start");
        playback.tick(&mut scene);
        scene.clear_all_paths();
        run_to_end(&mut playback, &mut scene);
        assert_eq!(scene.token(id).expect("token").position, Point::new(500.0, 500.0));
    }
}
