// Host-side tests for page integration constants.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
fn canvas_style_keeps_backdrop_behind_and_inert() {
    assert!(CANVAS_STYLE.contains("position:fixed"));
    assert!(CANVAS_STYLE.contains("pointer-events:none"));
    assert!(CANVAS_STYLE.contains("z-index:-50"));
    assert!(CANVAS_STYLE.contains("100vw"));
    assert!(CANVAS_STYLE.contains("100vh"));
    // additive white stars need a dark layer under them on light pages
    assert!(CANVAS_STYLE.contains("background:#000"));
    assert!(!CANVAS_STYLE.contains('\n'));
}

#[test]
fn mount_id_is_a_plain_dom_id() {
    assert_eq!(MOUNT_ELEMENT_ID, "cosmic-background");
    assert!(!MOUNT_ELEMENT_ID.contains(char::is_whitespace));
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn msaa_count_is_a_supported_power_of_two() {
    assert!(MSAA_SAMPLE_COUNT.is_power_of_two());
    assert!(MSAA_SAMPLE_COUNT <= 4);
}

#[test]
fn star_quad_is_centered_and_unit_sized() {
    let mut unique: Vec<[f32; 2]> = Vec::new();
    for c in STAR_QUAD_CORNERS {
        assert!((c[0].abs() - 0.5).abs() < 1e-6);
        assert!((c[1].abs() - 0.5).abs() < 1e-6);
        if !unique.contains(&c) {
            unique.push(c);
        }
    }
    // two triangles sharing a diagonal
    assert_eq!(unique.len(), 4);
    let sum = unique
        .iter()
        .fold([0.0f32; 2], |acc, c| [acc[0] + c[0], acc[1] + c[1]]);
    assert!(sum[0].abs() < 1e-6 && sum[1].abs() < 1e-6);
}
