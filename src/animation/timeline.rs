use crate::foundation::core::{Fps, FrameIndex, TIME_EPSILON};
use crate::foundation::error::{ReelError, ReelResult};
use crate::foundation::math::clamp01;

/// Which phase owns a time that lands exactly on a phase's upper bound.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Boundary {
    /// `t == end` belongs to the following phase (`t < end` stays in the current one).
    #[default]
    NextPhase,
    /// `t == end` still belongs to the phase that is ending (`t <= end`).
    PreviousPhase,
}

/// One named, timed sub-interval of a render.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Phase<K> {
    /// Program-defined tag selecting the parameter formula.
    pub kind: K,
    /// Length in seconds (positive, finite).
    pub duration_secs: f64,
}

/// Contiguous, exhaustive phase table covering a whole render.
#[derive(Clone, Debug)]
pub struct Timeline<K> {
    phases: Vec<Phase<K>>,
    ends: Vec<f64>,
    boundary: Boundary,
}

/// Result of resolving a time against a [`Timeline`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhasePosition<K> {
    /// Index into the phase table.
    pub index: usize,
    /// Tag of the active phase.
    pub kind: K,
    /// Cumulative start of the active phase.
    pub start_secs: f64,
    /// Duration of the active phase.
    pub duration_secs: f64,
    /// Seconds since the phase started. Not clamped: past the end of the table this keeps growing.
    pub local_secs: f64,
    /// `local_secs / duration_secs`, clamped to `[0, 1]`.
    pub progress: f64,
}

impl<K: Copy> Timeline<K> {
    /// Build a timeline from `(kind, seconds)` pairs in playback order.
    pub fn new(phases: impl IntoIterator<Item = (K, f64)>) -> ReelResult<Self> {
        let phases: Vec<Phase<K>> = phases
            .into_iter()
            .map(|(kind, duration_secs)| Phase {
                kind,
                duration_secs,
            })
            .collect();
        if phases.is_empty() {
            return Err(ReelError::validation("timeline needs at least one phase"));
        }

        let mut ends = Vec::with_capacity(phases.len());
        let mut acc = 0.0f64;
        for (i, p) in phases.iter().enumerate() {
            if !p.duration_secs.is_finite() || p.duration_secs <= 0.0 {
                return Err(ReelError::validation(format!(
                    "phase {i} duration must be positive and finite, got {}",
                    p.duration_secs
                )));
            }
            acc += p.duration_secs;
            ends.push(acc);
        }

        Ok(Self {
            phases,
            ends,
            boundary: Boundary::default(),
        })
    }

    /// Choose how exact phase boundaries are attributed.
    pub fn with_boundary(mut self, boundary: Boundary) -> Self {
        self.boundary = boundary;
        self
    }

    /// The phase table.
    pub fn phases(&self) -> &[Phase<K>] {
        &self.phases
    }

    /// Boundary policy in effect.
    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    /// Sum of all phase durations.
    pub fn total_secs(&self) -> f64 {
        self.ends.last().copied().unwrap_or(0.0)
    }

    /// `floor(total_secs * fps)`.
    pub fn total_frames(&self, fps: Fps) -> u64 {
        fps.secs_to_frames_floor(self.total_secs())
    }

    /// Cumulative start time of phase `index`.
    pub fn start_secs(&self, index: usize) -> f64 {
        if index == 0 {
            0.0
        } else {
            self.ends[index - 1]
        }
    }

    /// Resolve which phase is active at `t` seconds and how far into it we are.
    ///
    /// Times at or beyond the total duration resolve to the last phase.
    pub fn resolve(&self, t: f64) -> PhasePosition<K> {
        let index = self
            .ends
            .iter()
            .position(|&end| match self.boundary {
                Boundary::NextPhase => t < end - TIME_EPSILON,
                Boundary::PreviousPhase => t <= end + TIME_EPSILON,
            })
            .unwrap_or(self.phases.len() - 1);

        let phase = self.phases[index];
        let start_secs = self.start_secs(index);
        let local_secs = t - start_secs;
        PhasePosition {
            index,
            kind: phase.kind,
            start_secs,
            duration_secs: phase.duration_secs,
            local_secs,
            progress: clamp01(local_secs / phase.duration_secs),
        }
    }

    /// Resolve frame `frame` of a `total_frames`-long render at `fps`.
    pub fn cursor(&self, frame: FrameIndex, fps: Fps, total_frames: u64) -> FrameCursor<K> {
        let time_secs = fps.frames_to_secs(frame.0);
        FrameCursor {
            frame,
            total_frames,
            fps,
            time_secs,
            phase: self.resolve(time_secs),
        }
    }
}

/// Everything a program needs to compute one frame, derived from `(frame, fps, phase table)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameCursor<K> {
    /// Frame being produced.
    pub frame: FrameIndex,
    /// Number of frames in the whole render.
    pub total_frames: u64,
    /// Output frame rate.
    pub fps: Fps,
    /// `frame / fps`.
    pub time_secs: f64,
    /// Active phase.
    pub phase: PhasePosition<K>,
}

impl<K: Copy> FrameCursor<K> {
    /// Active phase tag.
    pub fn kind(&self) -> K {
        self.phase.kind
    }

    /// Clamped phase-local progress.
    pub fn progress(&self) -> f64 {
        self.phase.progress
    }

    /// Seconds since the active phase started.
    pub fn local_secs(&self) -> f64 {
        self.phase.local_secs
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
