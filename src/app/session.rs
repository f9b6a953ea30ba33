// SPDX-License-Identifier: GPL-3.0-only

//! Capture session state machine
//!
//! Pure bookkeeping: which phase the session is in, which attempt is in
//! flight, and what was captured last. The Idle-only entry guard is the
//! only concurrency control; it is enough because one screen owns exactly
//! one session. Completions carry the [`Generation`] of the attempt that
//! produced them and are dropped when it no longer matches.

use crate::app::state::{Artifact, ArtifactKind, CapturePhase, Generation};
use crate::errors::AppError;
use tracing::{debug, info, warn};

#[derive(Debug, Default)]
pub struct CaptureSessionMachine {
    phase: CapturePhase,
    generation: Generation,
    in_flight: Option<Generation>,
    last_artifact: Option<Artifact>,
    last_error: Option<AppError>,
}

impl CaptureSessionMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> CapturePhase {
        self.phase
    }

    /// Generation of the attempt currently in flight
    pub fn in_flight(&self) -> Option<Generation> {
        self.in_flight
    }

    pub fn last_artifact(&self) -> Option<&Artifact> {
        self.last_artifact.as_ref()
    }

    pub fn last_error(&self) -> Option<&AppError> {
        self.last_error.as_ref()
    }

    /// `Idle → Capturing`; `None` when anything else is in flight
    pub fn begin_photo(&mut self) -> Option<Generation> {
        self.begin(CapturePhase::Capturing)
    }

    /// `Idle → Recording`; `None` when anything else is in flight
    pub fn begin_recording(&mut self) -> Option<Generation> {
        self.begin(CapturePhase::Recording)
    }

    fn begin(&mut self, next: CapturePhase) -> Option<Generation> {
        if self.phase != CapturePhase::Idle {
            warn!(phase = ?self.phase, requested = ?next, "Capture rejected: session not idle");
            return None;
        }
        self.generation = self.generation.next();
        self.in_flight = Some(self.generation);
        self.phase = next;
        self.last_error = None;
        info!(generation = %self.generation, phase = ?next, "Capture started");
        Some(self.generation)
    }

    /// `Recording → Finalizing`; the recording's own completion finishes it
    pub fn request_stop(&mut self) -> Option<Generation> {
        if self.phase != CapturePhase::Recording {
            debug!(phase = ?self.phase, "Stop ignored: not recording");
            return None;
        }
        self.phase = CapturePhase::Finalizing;
        info!(generation = ?self.in_flight, "Recording finalizing");
        self.in_flight
    }

    /// `Capturing → Idle` with the stored photo
    pub fn complete_photo(&mut self, generation: Generation, artifact: Artifact) -> bool {
        if !self.accepts(generation, &[CapturePhase::Capturing]) {
            return false;
        }
        self.finish(ArtifactKind::Photo, artifact);
        true
    }

    /// `Recording | Finalizing → Idle` with the stored video
    pub fn complete_recording(&mut self, generation: Generation, artifact: Artifact) -> bool {
        if !self.accepts(
            generation,
            &[CapturePhase::Recording, CapturePhase::Finalizing],
        ) {
            return false;
        }
        self.finish(ArtifactKind::Video, artifact);
        true
    }

    fn finish(&mut self, kind: ArtifactKind, artifact: Artifact) {
        debug_assert_eq!(artifact.kind, kind);
        if let Some(previous) = &self.last_artifact
            && previous.kind != kind
        {
            debug!(previous = ?previous.kind, "Replacing artifact of the other kind");
        }
        info!(
            generation = ?self.in_flight,
            kind = ?kind,
            path = %artifact.display_path().display(),
            "Capture complete"
        );
        // One slot for both kinds: a new photo drops the old video and vice versa
        self.last_artifact = Some(artifact);
        self.in_flight = None;
        self.phase = CapturePhase::Idle;
    }

    /// Any in-flight phase `→ Error`
    pub fn fail(&mut self, generation: Generation, error: AppError) -> bool {
        if self.in_flight != Some(generation) || !self.phase.is_busy() {
            debug!(%generation, phase = ?self.phase, "Discarding stale failure");
            return false;
        }
        warn!(%generation, phase = ?self.phase, error = %error, "Capture failed");
        self.phase = CapturePhase::Error;
        self.last_error = Some(error);
        true
    }

    /// `Error → Idle`
    pub fn recover(&mut self, generation: Generation) -> bool {
        if self.phase != CapturePhase::Error || self.in_flight != Some(generation) {
            return false;
        }
        self.phase = CapturePhase::Idle;
        self.in_flight = None;
        debug!(%generation, "Session recovered");
        true
    }

    /// Record a non-fatal error without leaving the current phase
    pub fn note_error(&mut self, error: AppError) {
        self.last_error = Some(error);
    }

    /// Forget the last capture (screen left or torn down)
    pub fn clear_artifact(&mut self) {
        self.last_artifact = None;
    }

    fn accepts(&self, generation: Generation, phases: &[CapturePhase]) -> bool {
        if self.in_flight != Some(generation) || !phases.contains(&self.phase) {
            warn!(
                %generation,
                current = ?self.in_flight,
                phase = ?self.phase,
                "Discarding stale completion"
            );
            return false;
        }
        true
    }
}
