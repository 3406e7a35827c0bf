//! Property-style tests for the layout engine
//!
//! Exercises the public API over a synthetic fixed-metrics font.

use std::sync::Arc;

use sdff_font::{AtlasImage, FontAsset};
use sdff_text::{Align, Boundary, TextBox};

/// Uniform font: every printable ASCII glyph advances 6.0 at base
/// size 12.0.
fn uniform_font() -> Arc<FontAsset> {
    let mut metrics = String::new();
    for cp in 33u32..127 {
        let i = cp - 33;
        let x = (i % 16) * 10;
        let y = (i / 16) * 12;
        metrics.push_str(&format!("{cp} 6 0 0 {x} {y} 5 10\n"));
    }
    metrics.push_str("32 6 0 0 0 0 0 0\n");
    Arc::new(
        FontAsset::from_image_and_metrics("Uniform", 12.0, AtlasImage::blank(160, 96), &metrics)
            .unwrap(),
    )
}

fn boxed(text: &str, width: f32) -> TextBox {
    let mut tb = TextBox::new(uniform_font(), width, 100.0);
    tb.set_text(text);
    tb
}

#[test]
fn test_determinism() {
    let text = "the quick brown fox jumps over the lazy dog";
    let mut a = boxed(text, 80.0);
    let mut b = boxed(text, 80.0);
    a.set_align(Align::Center);
    b.set_align(Align::Center);
    a.set_line_space(1.4);
    b.set_line_space(1.4);

    assert_eq!(a.layout(), b.layout());
    assert_eq!(a.bounds(), b.bounds());
}

#[test]
fn test_word_integrity() {
    // every word is 3-7 glyphs, 18.0-42.0 wide; the box fits any of
    // them, so none may be split across lines
    let words = ["alpha", "bee", "gamma", "deltas", "epsilon", "zed"];
    let text = words.join(" ");
    let mut tb = boxed(&text, 50.0);

    let per_line: Vec<usize> = tb.layout().lines.iter().map(|l| l.quads.len()).collect();
    let word_lens: Vec<usize> = words.iter().map(|w| w.len()).collect();

    // each line's glyph count must be a sum of whole word lengths
    let mut remaining = word_lens.as_slice();
    for count in per_line {
        let mut taken = 0;
        let mut n = 0;
        while taken < count {
            taken += remaining[n];
            n += 1;
        }
        assert_eq!(taken, count, "line splits a word");
        remaining = &remaining[n..];
    }
    assert!(remaining.is_empty());
}

#[test]
fn test_center_symmetry() {
    let mut tb = boxed("one two three four five six", 70.0);
    tb.set_align(Align::Center);

    let layout = tb.layout();
    assert!(layout.line_count() > 1);
    for line in &layout.lines {
        if line.quads.is_empty() {
            continue;
        }
        let left_gap = line.quads[0].dst.x;
        let right_gap = 70.0 - line.width - left_gap;
        assert!(
            (left_gap - right_gap).abs() <= 1.0,
            "gaps {left_gap} vs {right_gap}"
        );
    }
}

#[test]
fn test_line_space_monotonic() {
    let text = "wrap me across several lines please";
    let mut tb = boxed(text, 60.0);
    assert!(tb.layout().line_count() > 1);

    let mut prev = tb.bounds().1;
    for spacing in [1.1, 1.25, 1.7, 2.0, 3.5] {
        tb.set_line_space(spacing);
        let height = tb.bounds().1;
        assert!(height > prev, "spacing {spacing} must grow the block");
        prev = height;
    }
}

#[test]
fn test_wrap_without_whitespace() {
    // "AAAA" in a box of exactly three advances: AAA / A
    let mut tb = boxed("AAAA", 18.0);
    let layout = tb.layout();
    assert_eq!(layout.line_count(), 2);
    assert_eq!(layout.lines[0].quads.len(), 3);
    assert_eq!(layout.lines[1].quads.len(), 1);
}

#[test]
fn test_empty_text_bounds() {
    let mut tb = boxed("", 18.0);
    assert_eq!(tb.layout().line_count(), 0);
    assert_eq!(tb.bounds(), (0.0, 0.0));
}

#[test]
fn test_letter_and_word_agree_on_single_word() {
    let mut word = boxed("abcdefgh", 30.0);
    let mut letter = boxed("abcdefgh", 30.0);
    letter.set_boundary(Boundary::Letter);

    // with no whitespace the word-mode fallback degenerates to
    // letter wrapping
    assert_eq!(word.layout(), letter.layout());
}
