//! Frame-loop engine shared by every program.
//!
//! One render: resolve fps and background, prepare the program, then for each frame clone the
//! background template, resolve the phase cursor, compute the state, draw, and push the frame to
//! the sinks. Sinks are released on every exit path.

use std::path::{Path, PathBuf};

use image::RgbImage;

use crate::encode::cinematic::{CinematicSink, cinematic_path};
use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts};
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Canvas, Fps, FrameIndex};
use crate::foundation::error::{ReelError, ReelResult};
use crate::programs::cartoon::Cartoon;
use crate::programs::collage_spin::CollageSpin;
use crate::programs::reveal_slide::RevealSlide;
use crate::programs::swing::Swing;
use crate::programs::ultra_zoom_blur::UltraZoomBlur;
use crate::programs::zoom_effect::ZoomEffect;
use crate::programs::zoom_roll::ZoomRoll;
use crate::programs::{AnimationKind, Program, Setup};
use crate::raster::background::BackgroundSpec;

/// Knobs for a single render.
#[derive(Clone, Debug)]
pub struct RenderOptions {
    /// Frame rate; the program's default when `None`.
    pub fps: Option<Fps>,
    /// Output size. Must be non-zero and even.
    pub canvas: Canvas,
    /// Background; the program's default when `None`.
    pub background: Option<BackgroundSpec>,
    /// Seed for the particle RNG. `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Write the faded secondary copy for the programs that have one.
    pub cinematic: bool,
    /// Report the duration `ffprobe` reads back instead of `frames / fps`.
    pub probe_duration: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            fps: None,
            canvas: Canvas::default(),
            background: None,
            seed: None,
            cinematic: true,
            probe_duration: false,
        }
    }
}

impl RenderOptions {
    /// Effective frame rate for `kind`.
    pub fn fps_for(&self, kind: AnimationKind) -> ReelResult<Fps> {
        match self.fps {
            Some(fps) => Fps::new(fps.num, fps.den),
            None => Fps::whole(kind.default_fps()),
        }
    }

    /// Effective background for `kind`.
    pub fn background_for(&self, kind: AnimationKind) -> BackgroundSpec {
        self.background
            .clone()
            .unwrap_or_else(|| kind.default_background())
    }
}

/// What a finished render produced.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderOutcome {
    /// Program that ran.
    pub kind: AnimationKind,
    /// Frame size.
    pub canvas: Canvas,
    /// Frame rate.
    pub fps: Fps,
    /// Frames pushed to the primary sink.
    pub frame_count: u64,
    /// `frame_count / fps`, or the probed duration when requested.
    pub duration_secs: f64,
    /// Cinematic copy, when one was written.
    pub cinematic_path: Option<PathBuf>,
    /// Non-fatal step failures, in the order they happened.
    pub step_failures: Vec<String>,
}

/// Render `kind` from `source` into an MP4 at `out_path`.
///
/// Programs with a cinematic copy also write `<stem>_cinematic.mp4` next to it when
/// [`RenderOptions::cinematic`] is set. Failures of that copy and of the optional duration probe
/// are recorded in [`RenderOutcome::step_failures`] and do not fail the render.
#[tracing::instrument(skip(source, out_path, opts), fields(out = %out_path.display()))]
pub fn render(
    kind: AnimationKind,
    source: &RgbImage,
    out_path: &Path,
    opts: &RenderOptions,
) -> ReelResult<RenderOutcome> {
    let mut primary = FfmpegSink::new(FfmpegSinkOpts::new(out_path));
    let mut cinematic = kind
        .cinematic()
        .filter(|_| opts.cinematic)
        .map(|fade| CinematicSink::new(cinematic_path(out_path), fade));

    let (mut outcome, cinematic_ok) = drive(
        kind,
        source,
        opts,
        &mut primary,
        cinematic.as_mut().map(|s| s as &mut dyn FrameSink),
    )?;

    if cinematic_ok {
        outcome.cinematic_path = cinematic.map(|s| s.out_path().to_path_buf());
    }

    if opts.probe_duration {
        match crate::media::probe::probe_duration(out_path) {
            Ok(secs) => outcome.duration_secs = secs,
            Err(e) => {
                tracing::warn!(error = %e, "duration probe failed, keeping frames / fps");
                outcome.step_failures.push(format!("probe: {e}"));
            }
        }
    }
    Ok(outcome)
}

/// Render `kind` into caller-provided sinks.
///
/// `secondary` receives the same frames as `primary`. Its failures are logged, recorded in
/// [`RenderOutcome::step_failures`] and detach it; the primary render continues.
pub fn render_to_sink(
    kind: AnimationKind,
    source: &RgbImage,
    opts: &RenderOptions,
    primary: &mut dyn FrameSink,
    secondary: Option<&mut dyn FrameSink>,
) -> ReelResult<RenderOutcome> {
    drive(kind, source, opts, primary, secondary).map(|(outcome, _)| outcome)
}

/// Render only frame `frame` of `kind`.
///
/// Frames before it are still simulated so that carried state (particles) matches a full render.
pub fn render_frame(
    kind: AnimationKind,
    source: &RgbImage,
    opts: &RenderOptions,
    frame: FrameIndex,
) -> ReelResult<RgbImage> {
    let fps = opts.fps_for(kind)?;
    let background = resolve_background(kind, opts)?;
    dispatch(
        kind,
        SingleFrame {
            source,
            opts,
            fps,
            background: &background,
            frame,
        },
    )
}

#[tracing::instrument(skip(kind, source, opts, primary, secondary), fields(kind = %kind))]
fn drive(
    kind: AnimationKind,
    source: &RgbImage,
    opts: &RenderOptions,
    primary: &mut dyn FrameSink,
    secondary: Option<&mut dyn FrameSink>,
) -> ReelResult<(RenderOutcome, bool)> {
    let fps = opts.fps_for(kind)?;
    let background = resolve_background(kind, opts)?;
    tracing::info!(
        fps = fps.as_f64(),
        width = opts.canvas.width,
        height = opts.canvas.height,
        "render started"
    );

    let mut secondary = Secondary {
        sink: secondary,
        failure: None,
    };
    let frame_count = dispatch(
        kind,
        SinkRun {
            source,
            opts,
            fps,
            background: &background,
            primary,
            secondary: &mut secondary,
        },
    )?;

    let secondary_ok = secondary.failure.is_none();
    let step_failures = secondary.failure.into_iter().map(|e| e.to_string()).collect();
    let duration_secs = fps.frames_to_secs(frame_count);
    tracing::info!(frames = frame_count, duration_secs, "render finished");
    Ok((
        RenderOutcome {
            kind,
            canvas: opts.canvas,
            fps,
            frame_count,
            duration_secs,
            cinematic_path: None,
            step_failures,
        },
        secondary_ok,
    ))
}

fn resolve_background(kind: AnimationKind, opts: &RenderOptions) -> ReelResult<RgbImage> {
    opts.canvas.validate()?;
    opts.background_for(kind).render(opts.canvas)
}

/// Something run with the concrete program type selected by an [`AnimationKind`].
trait WithProgram {
    type Output;

    fn run<P: Program>(self) -> ReelResult<Self::Output>;
}

fn dispatch<W: WithProgram>(kind: AnimationKind, with: W) -> ReelResult<W::Output> {
    match kind {
        AnimationKind::CollageSpin => with.run::<CollageSpin>(),
        AnimationKind::ZoomRoll => with.run::<ZoomRoll>(),
        AnimationKind::RevealSlide => with.run::<RevealSlide>(),
        AnimationKind::Swing => with.run::<Swing>(),
        AnimationKind::Cartoon => with.run::<Cartoon>(),
        AnimationKind::ZoomEffect => with.run::<ZoomEffect>(),
        AnimationKind::UltraZoomBlur => with.run::<UltraZoomBlur>(),
    }
}

fn prepare<P: Program>(
    source: &RgbImage,
    opts: &RenderOptions,
    fps: Fps,
    background: &RgbImage,
) -> ReelResult<(P, u64)> {
    let setup = Setup {
        canvas: opts.canvas,
        fps,
        background,
        seed: opts.seed,
    };
    let program = P::prepare(source, &setup)?;
    let total = program.frame_count(fps);
    if total == 0 {
        return Err(ReelError::validation(format!(
            "{} produces no frames at {} fps",
            P::KIND,
            fps.as_f64()
        )));
    }
    Ok((program, total))
}

/// Produce frames `0..end` of a `total`-frame render, handing each to `emit`.
fn produce<P: Program>(
    program: &mut P,
    background: &RgbImage,
    fps: Fps,
    total: u64,
    end: u64,
    mut emit: impl FnMut(FrameIndex, &RgbImage) -> ReelResult<()>,
) -> ReelResult<()> {
    let mut current_phase = None;
    for f in 0..end {
        let idx = FrameIndex(f);
        let cursor = program.timeline().cursor(idx, fps, total);
        if current_phase != Some(cursor.phase.index) {
            current_phase = Some(cursor.phase.index);
            tracing::debug!(frame = f, phase = ?cursor.kind(), t = cursor.time_secs, "phase entered");
        }
        let state = program.state(&cursor);
        let mut frame = background.clone();
        program.draw(&cursor, &state, &mut frame)?;
        emit(idx, &frame)?;
    }
    Ok(())
}

/// Optional parallel sink whose failures detach it instead of failing the render.
struct Secondary<'a> {
    sink: Option<&'a mut dyn FrameSink>,
    failure: Option<ReelError>,
}

impl Secondary<'_> {
    fn begin(&mut self, cfg: SinkConfig) {
        let res = match self.sink.as_deref_mut() {
            Some(sink) => sink.begin(cfg),
            None => return,
        };
        self.settle(res);
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &RgbImage) {
        let res = match self.sink.as_deref_mut() {
            Some(sink) => sink.push_frame(idx, frame),
            None => return,
        };
        self.settle(res);
    }

    fn end(&mut self) {
        let res = match self.sink.as_deref_mut() {
            Some(sink) => sink.end(),
            None => return,
        };
        self.settle(res);
    }

    fn abort(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.abort();
        }
    }

    fn settle(&mut self, res: ReelResult<()>) {
        if let Err(e) = res {
            tracing::warn!(error = %e, "secondary output failed, continuing without it");
            self.abort();
            self.failure = Some(e);
        }
    }
}

struct SinkRun<'a, 'b> {
    source: &'a RgbImage,
    opts: &'a RenderOptions,
    fps: Fps,
    background: &'a RgbImage,
    primary: &'a mut dyn FrameSink,
    secondary: &'a mut Secondary<'b>,
}

impl WithProgram for SinkRun<'_, '_> {
    type Output = u64;

    fn run<P: Program>(self) -> ReelResult<u64> {
        let Self {
            source,
            opts,
            fps,
            background,
            primary,
            secondary,
        } = self;
        let (mut program, total) = prepare::<P>(source, opts, fps, background)?;
        let cfg = SinkConfig {
            width: opts.canvas.width,
            height: opts.canvas.height,
            fps,
            frame_count: total,
        };

        primary.begin(cfg)?;
        secondary.begin(cfg);
        let res = produce(&mut program, background, fps, total, total, |idx, frame| {
            primary.push_frame(idx, frame)?;
            secondary.push_frame(idx, frame);
            Ok(())
        })
        .and_then(|()| primary.end());

        if let Err(e) = res {
            primary.abort();
            secondary.abort();
            return Err(e);
        }
        secondary.end();
        Ok(total)
    }
}

struct SingleFrame<'a> {
    source: &'a RgbImage,
    opts: &'a RenderOptions,
    fps: Fps,
    background: &'a RgbImage,
    frame: FrameIndex,
}

impl WithProgram for SingleFrame<'_> {
    type Output = RgbImage;

    fn run<P: Program>(self) -> ReelResult<RgbImage> {
        let (mut program, total) = prepare::<P>(self.source, self.opts, self.fps, self.background)?;
        if self.frame.0 >= total {
            return Err(ReelError::validation(format!(
                "frame {} is past the end of {} ({total} frames)",
                self.frame.0,
                P::KIND
            )));
        }
        let mut last = None;
        produce(
            &mut program,
            self.background,
            self.fps,
            total,
            self.frame.0 + 1,
            |_, frame| {
                last = Some(frame.clone());
                Ok(())
            },
        )?;
        last.ok_or_else(|| ReelError::validation("no frame produced"))
    }
}

#[cfg(test)]
#[path = "../tests/unit/render.rs"]
mod tests;
