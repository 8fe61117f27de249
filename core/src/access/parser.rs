use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
  access::validate::sanitize_access_string,
  models::{AccessSegment, AccessStep, GrammarMode},
};

// Property name followed by a trailing run of one or more `[digits]` groups.
static INDEX_RUN: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"^(.*?)((?:\[[0-9]+\])+)$").expect("index run pattern"));

static INDEX_GROUP: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"\[([0-9]+)\]").expect("index group pattern"));

// Legacy grammar: only the last `[digits]` group counts as an index.
static LAST_INDEX: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"^(.*)\[([0-9]+)\]$").expect("last index pattern"));

/// Split an access string into segments.
///
/// Never fails. The input is sanitized first and empty segments are skipped, so `""` and `"."`
/// both yield an empty path (the root). A segment whose bracket tail cannot be read comes back
/// as a literal, non-indexed step carrying the segment text unchanged.
pub fn parse_access_string(path: &str, grammar: GrammarMode) -> Vec<AccessSegment> {
  let sanitized = sanitize_access_string(path);
  let mut out = Vec::new();

  for component in sanitized.split('.').filter(|c| !c.is_empty()) {
    if grammar == GrammarMode::Legacy {
      if let Some(name) = component.strip_prefix('@').filter(|n| !n.is_empty()) {
        out.push(AccessSegment::Attribute {
          name: name.to_string(),
        });
        // Attribute lookups end the walk; anything after is ignored.
        break;
      }
    }

    let step = match grammar {
      GrammarMode::Advanced => parse_component(component),
      GrammarMode::Legacy => parse_legacy_component(component),
    };
    out.push(AccessSegment::Step(step));
  }

  out
}

/// Advanced-grammar parse returning plain steps.
pub fn parse_steps(path: &str) -> Vec<AccessStep> {
  parse_access_string(path, GrammarMode::Advanced)
    .into_iter()
    .filter_map(|seg| match seg {
      AccessSegment::Step(step) => Some(step),
      AccessSegment::Attribute { .. } => None,
    })
    .collect()
}

pub fn contains_array_access(path: &str) -> bool {
  path.contains('[') && path.contains(']')
}

/// Longest run of indices on any single step, e.g. `users[0].matrix[1][2]` -> 2.
pub fn max_array_depth(path: &str) -> usize {
  parse_steps(path)
    .iter()
    .map(|s| s.indices.len())
    .max()
    .unwrap_or(0)
}

fn parse_component(component: &str) -> AccessStep {
  let Some(caps) = INDEX_RUN.captures(component) else {
    return AccessStep::field(component);
  };
  let name = &caps[1];
  if name.is_empty() {
    return AccessStep::field(component);
  }

  let mut indices = Vec::new();
  for group in INDEX_GROUP.captures_iter(&caps[2]) {
    match group[1].parse::<usize>() {
      Ok(i) => indices.push(i),
      Err(_) => return AccessStep::field(component),
    }
  }
  AccessStep::indexed(name, indices)
}

fn parse_legacy_component(component: &str) -> AccessStep {
  let Some(caps) = LAST_INDEX.captures(component) else {
    return AccessStep::field(component);
  };
  let name = &caps[1];
  match caps[2].parse::<usize>() {
    Ok(i) if !name.is_empty() => AccessStep::indexed(name, vec![i]),
    _ => AccessStep::field(component),
  }
}
