//! stillreel renders short animated portrait videos from a single still image.
//!
//! Each of the seven animation programs is a phase table plus a closed-form per-phase state
//! function. A shared engine walks frames `0..N`, resolves the active phase and its progress,
//! composites the source onto a copy of an immutable background, and streams the frame to the
//! system `ffmpeg` binary.
//!
//! # Pipeline overview
//!
//! 1. **Acquire**: path or URL → `RgbImage` ([`load_image`])
//! 2. **Prepare**: derive the fixed bitmaps a program composites from ([`Program::prepare`])
//! 3. **Render**: `FrameIndex → FrameCursor → FrameState → RgbImage` ([`render`])
//! 4. **Encode**: stream frames to `ffmpeg` ([`FfmpegSink`]), plus an optional faded copy
//! 5. **Publish** (optional): mux audio, upload ([`run_job`])
//!
//! Constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Frames are independent**: every frame starts as a clone of the background template. The
//!   particle overlay is the only state carried between frames.
//! - **Packed RGB8** end-to-end, channel order R, G, B.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Easing, phase tables, frame state and particles.
pub mod animation;
/// Source acquisition: decode and fetch.
pub mod assets;
/// Frame sinks: ffmpeg, in-memory, cinematic copy.
pub mod encode;
/// Value types, errors and numeric helpers.
pub mod foundation;
/// End-to-end JSON jobs.
pub mod job;
/// ffprobe and audio mux.
pub mod media;
/// The seven animation programs.
pub mod programs;
/// Remote upload.
pub mod publish;
/// Compositing primitives on RGB8 frames.
pub mod raster;
/// The frame-loop engine.
pub mod render;
/// Cartoon stylization.
pub mod stylize;

pub use animation::ease::Ease;
pub use animation::state::FrameState;
pub use animation::timeline::{Boundary, FrameCursor, Phase, PhasePosition, Timeline};
pub use assets::{MediaSource, load_image};
pub use encode::cinematic::CinematicSink;
pub use encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, is_ffmpeg_on_path, is_ffprobe_on_path};
pub use encode::sink::{FrameCounter, FrameSink, InMemorySink, SinkConfig};
pub use foundation::core::{Canvas, Fps, FrameIndex, Rgb8};
pub use foundation::error::{ReelError, ReelResult};
pub use job::{JobReport, RenderJob, run_job};
pub use media::probe::{VideoInfo, probe_duration, probe_video};
pub use programs::{AnimationKind, CinematicFade, Program, Setup};
pub use publish::UploadConfig;
pub use raster::background::BackgroundSpec;
pub use render::{RenderOptions, RenderOutcome, render, render_frame, render_to_sink};
pub use stylize::{CartoonStylizer, Stylizer};
