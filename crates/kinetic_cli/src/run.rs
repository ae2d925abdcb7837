//! Headless playback of a built scene
//!
//! Polls the scene's tree once per frame and writes one row of property
//! values per poll. Frames are either simulated (a [`ManualClock`] advanced
//! by `frame_ms`) or paced against the wall clock.

use anyhow::Result;
use indexmap::IndexMap;
use kinetic_animation::{ManualClock, Player, SystemClock, Time, TimeSource};
use std::io::Write;
use std::thread;
use std::time::Duration;

use crate::scene::{PropertyCell, Scene, SceneError};

/// Playback settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    pub frame_ms: Time,
    pub realtime: bool,
    pub max_frames: Option<u64>,
}

impl RunOptions {
    /// Settings taken from the scene header
    pub fn for_scene(scene: &Scene) -> Self {
        Self {
            frame_ms: scene.frame_ms,
            realtime: false,
            max_frames: scene.max_frames,
        }
    }
}

/// Outcome of a playback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of polls issued
    pub frames: u64,
    /// Time of the last poll, relative to the start
    pub end_time: Time,
    /// `false` if the frame limit cut playback short
    pub finished: bool,
}

pub fn play(scene: Scene, options: &RunOptions, out: &mut dyn Write) -> Result<RunSummary> {
    if options.frame_ms <= 0 {
        return Err(SceneError::InvalidFrame(options.frame_ms).into());
    }

    let Scene {
        name,
        properties,
        root,
        ..
    } = scene;
    tracing::info!(
        scene = %name,
        frame_ms = options.frame_ms,
        realtime = options.realtime,
        "playing scene"
    );

    write_header(out, &properties)?;

    let summary = if options.realtime {
        let frame = Duration::from_millis(u64::try_from(options.frame_ms)?);
        let player = Player::new(root, SystemClock::new());
        drive(player, &properties, options.max_frames, out, || {
            thread::sleep(frame)
        })?
    } else {
        let clock = ManualClock::new(0);
        let player = Player::new(root, &clock);
        drive(player, &properties, options.max_frames, out, || {
            clock.advance(options.frame_ms);
        })?
    };

    tracing::info!(
        frames = summary.frames,
        end_time = summary.end_time,
        finished = summary.finished,
        "playback done"
    );
    Ok(summary)
}

fn drive<C: TimeSource>(
    mut player: Player<'_, C>,
    properties: &IndexMap<String, PropertyCell>,
    max_frames: Option<u64>,
    out: &mut dyn Write,
    mut next_frame: impl FnMut(),
) -> Result<RunSummary> {
    player.start();
    let origin = player.clock().now();

    loop {
        let active = player.poll();
        let now = player.clock().now() - origin;
        write_row(out, now, properties)?;

        if !active {
            return Ok(RunSummary {
                frames: player.frames(),
                end_time: now,
                finished: true,
            });
        }

        if max_frames.is_some_and(|max| player.frames() >= max) {
            tracing::warn!(frames = player.frames(), "frame limit reached, stopping");
            player.stop();
            write_row(out, now, properties)?;
            return Ok(RunSummary {
                frames: player.frames(),
                end_time: now,
                finished: false,
            });
        }

        next_frame();
    }
}

fn write_header(out: &mut dyn Write, properties: &IndexMap<String, PropertyCell>) -> Result<()> {
    write!(out, "{:>8}", "time_ms")?;
    for name in properties.keys() {
        write!(out, " {name:>10}")?;
    }
    writeln!(out)?;
    Ok(())
}

fn write_row(
    out: &mut dyn Write,
    now: Time,
    properties: &IndexMap<String, PropertyCell>,
) -> Result<()> {
    write!(out, "{now:>8}")?;
    for cell in properties.values() {
        write!(out, " {:>10.4}", cell.get())?;
    }
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SceneConfig;
    use pretty_assertions::assert_eq;

    fn play_to_string(scene: Scene, options: &RunOptions) -> (RunSummary, String) {
        let mut out = Vec::new();
        let summary = play(scene, options, &mut out).unwrap();
        (summary, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_bounce_scene_output() {
        let config = SceneConfig::from_toml(include_str!("../scenes/bounce.toml")).unwrap();
        let scene = Scene::build(&config).unwrap();
        let options = RunOptions::for_scene(&scene);
        let (summary, output) = play_to_string(scene, &options);

        // 400ms drop, then a 600ms parallel stage, polled every 50ms
        assert_eq!(
            summary,
            RunSummary {
                frames: 21,
                end_time: 1000,
                finished: true,
            }
        );

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 22);
        assert_eq!(lines[0], " time_ms          x          y");
        assert_eq!(lines[1], "       0     0.0000    10.0000");
        assert_eq!(lines[21], "    1000     5.0000     2.0000");
    }

    #[test]
    fn test_frame_limit_stops_early() {
        let scene = Scene::build(&SceneConfig::demo()).unwrap();
        let options = RunOptions {
            frame_ms: 100,
            realtime: false,
            max_frames: Some(3),
        };
        let (summary, output) = play_to_string(scene, &options);
        assert_eq!(
            summary,
            RunSummary {
                frames: 3,
                end_time: 200,
                finished: false,
            }
        );
        // Stopping forces every bar to its top position
        let last = output.lines().last().unwrap();
        assert_eq!(last.split_whitespace().skip(1).collect::<Vec<_>>(), vec!["0.8000"; 6]);
    }

    #[test]
    fn test_demo_scene_finishes() {
        let scene = Scene::build(&SceneConfig::demo()).unwrap();
        let options = RunOptions::for_scene(&scene);
        let (summary, _) = play_to_string(scene, &options);
        assert!(summary.finished);
        assert_eq!(summary.end_time, 14_000);
        assert_eq!(summary.frames, 141);
    }

    #[test]
    fn test_non_positive_frame_is_rejected() {
        for frame_ms in [0, -5] {
            let scene = Scene::build(&SceneConfig::demo()).unwrap();
            let options = RunOptions {
                frame_ms,
                realtime: false,
                max_frames: None,
            };
            let mut out = Vec::new();
            let err = play(scene, &options, &mut out).unwrap_err();
            assert_eq!(
                err.downcast_ref::<SceneError>(),
                Some(&SceneError::InvalidFrame(frame_ms))
            );
            assert!(out.is_empty());
        }
    }
}
