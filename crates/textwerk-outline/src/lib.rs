// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// textwerk-outline — Text cleanup and structural parsing for Textwerk.
//
// Provides the text normalizer (whitespace collapse, control-character and
// punctuation filtering) and the outline builder, a single-pass line
// classifier that turns flat cleaned text into a nested section/subsection
// document.

pub mod builder;
pub mod normalize;

pub use builder::build_outline;
pub use normalize::{normalize, normalize_lines};
