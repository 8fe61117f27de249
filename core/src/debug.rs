use std::{fmt, time::Instant};

use crate::models::{AccessSegment, DebugLevel};

/// Level-gated tracing for access operations.
///
/// The level lives on the caller's `AccessOptions`, so two documents configured differently can
/// be used side by side (and tests can run in parallel) without touching shared state.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DebugTrace {
  level: DebugLevel,
}

impl DebugTrace {
  pub(crate) fn new(level: DebugLevel) -> Self {
    Self { level }
  }

  pub(crate) fn enabled(&self, at: DebugLevel) -> bool {
    self.level != DebugLevel::None && self.level >= at
  }

  pub(crate) fn failure(&self, access: &str, kind: &str, suggestion: &str) {
    if !self.enabled(DebugLevel::Basic) {
      return;
    }
    tracing::warn!(target: "ja_core", access, kind, suggestion, "access failed");
  }

  pub(crate) fn success(&self, op: &str, details: fmt::Arguments<'_>) {
    if !self.enabled(DebugLevel::Basic) {
      return;
    }
    tracing::debug!(target: "ja_core", op, "{}", details);
  }

  pub(crate) fn detail(&self, op: &str, details: fmt::Arguments<'_>) {
    if !self.enabled(DebugLevel::Detailed) {
      return;
    }
    tracing::debug!(target: "ja_core", op, "  {}", details);
  }

  pub(crate) fn parsed(&self, access: &str, segments: &[AccessSegment]) {
    if !self.enabled(DebugLevel::Verbose) {
      return;
    }
    let steps = segments
      .iter()
      .map(describe_segment)
      .collect::<Vec<_>>()
      .join(" -> ");
    tracing::trace!(target: "ja_core", access, "parsed as: {}", steps);
  }

  /// Times an operation; the elapsed time is reported on drop at `Detailed` and above.
  pub(crate) fn scope(&self, op: &'static str, access: &str) -> DebugScope {
    let armed = self.enabled(DebugLevel::Detailed);
    DebugScope {
      op,
      access: if armed { access.to_string() } else { String::new() },
      started: Instant::now(),
      armed,
    }
  }
}

pub(crate) struct DebugScope {
  op: &'static str,
  access: String,
  started: Instant,
  armed: bool,
}

impl Drop for DebugScope {
  fn drop(&mut self) {
    if !self.armed {
      return;
    }
    let elapsed_ms = self.started.elapsed().as_secs_f64() * 1000.0;
    tracing::debug!(
      target: "ja_core",
      op = self.op,
      access = %self.access,
      elapsed_ms,
      "finished"
    );
  }
}

fn describe_segment(seg: &AccessSegment) -> String {
  match seg {
    AccessSegment::Step(s) if s.is_array_access => {
      let idx = s
        .indices
        .iter()
        .map(|i| format!("[{i}]"))
        .collect::<String>();
      format!("{}{}", s.property_name, idx)
    }
    AccessSegment::Step(s) => s.property_name.clone(),
    AccessSegment::Attribute { name } => format!("@{name}"),
  }
}
