// Copyright 2026 the Espalier Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Paint hints: category fill colors and inclusion opacity.
//!
//! These are the only styling decisions the core makes; everything else about
//! drawing belongs to the renderer.

use espalier_tree::Category;

/// Opacity of an included node.
pub const INCLUDED_OPACITY: f64 = 1.0;

/// Opacity of an excluded node. Exclusion de-emphasizes; it never removes a
/// node from the layout.
pub const EXCLUDED_OPACITY: f64 = 0.3;

/// Fill used for tags outside the known category set.
pub const DEFAULT_FILL: &str = "lightgrey";

/// CSS color name for a category's fill.
#[must_use]
pub fn fill_color(category: &Category) -> &'static str {
    match category {
        Category::Root => "lightblue",
        Category::Branch => "lightgray",
        Category::Leaf => "lightgreen",
        Category::Fruit => "lightcoral",
        Category::Other(_) => DEFAULT_FILL,
    }
}

/// Render opacity for an inclusion flag.
#[must_use]
pub fn opacity(included: bool) -> f64 {
    if included {
        INCLUDED_OPACITY
    } else {
        EXCLUDED_OPACITY
    }
}
