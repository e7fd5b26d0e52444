//! Arrangement → SVG scene assembly.
//!
//! Emits the composition back-to-front as a fixed-size SVG document:
//! background, wrap gradient, greenery bed, stack-ordered items (each
//! clipped to a circle; image if resolvable, colored disc otherwise),
//! ribbon + bow, then title and attribution text. The rasterizer flattens
//! the result at the canonical resolution, so the interactive view's
//! zoom/pan never leaks into exports.

use crate::images::{ImageSource, data_uri};
use bq_core::model::{Arrangement, CANVAS_HEIGHT, CANVAS_WIDTH, Color};

/// Local origin of the bouquet in canvas coordinates.
const CENTER_X: f32 = 300.0;
const CENTER_Y: f32 = 300.0;

/// Wrap and greenery-bed radii in working units.
const WRAP_RADIUS: f32 = 265.0;
const BED_RADIUS: f32 = 205.0;

/// Circular mask radius for an item at scale 1.0.
const BLOOM_RADIUS: f32 = 34.0;

const BACKGROUND: &str = "#FAF7F2";
const BED_INNER: &str = "#7FA65A";
const BED_OUTER: &str = "#4C763A";
const TITLE_FILL: &str = "#3A3430";
const CAPTION_FILL: &str = "#8A8178";
const CAPTION: &str = "Hand-arranged with Bouquet Studio";

/// Build the full scene SVG for an arrangement.
///
/// Deterministic for a fixed set of resolved images: the same arrangement,
/// label and source always produce the same document.
pub fn build_scene_svg(
    arrangement: &Arrangement,
    label: &str,
    images: &dyn ImageSource,
) -> String {
    let mut svg = String::with_capacity(4096);
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{CANVAS_WIDTH}\" height=\"{CANVAS_HEIGHT}\" viewBox=\"0 0 {CANVAS_WIDTH} {CANVAS_HEIGHT}\">\n"
    ));
    svg.push_str("<style>\n  text { font-family: Georgia, 'Times New Roman', serif; }\n</style>\n");

    push_defs(&mut svg, arrangement);

    // 1. Flat background.
    svg.push_str(&format!(
        "<rect x=\"0\" y=\"0\" width=\"{CANVAS_WIDTH}\" height=\"{CANVAS_HEIGHT}\" fill=\"{BACKGROUND}\" />\n"
    ));

    // 2. Outer wrap.
    svg.push_str(&format!(
        "<circle cx=\"{CENTER_X}\" cy=\"{CENTER_Y}\" r=\"{WRAP_RADIUS}\" fill=\"url(#wrap_grad)\" />\n"
    ));

    // 3. Greenery bed.
    svg.push_str(&format!(
        "<circle cx=\"{CENTER_X}\" cy=\"{CENTER_Y}\" r=\"{BED_RADIUS}\" fill=\"url(#bed_grad)\" />\n"
    ));

    // 4. Items, back to front.
    for index in arrangement.draw_order() {
        push_item(&mut svg, arrangement, index, images);
    }

    // 5. Ribbon and bow.
    push_ribbon(&mut svg, arrangement.ribbon_color);

    // 6. Title and attribution.
    svg.push_str(&format!(
        "<text x=\"{CENTER_X}\" y=\"634\" font-size=\"26\" font-weight=\"600\" fill=\"{TITLE_FILL}\" text-anchor=\"middle\">{}</text>\n",
        escape_xml(label)
    ));
    svg.push_str(&format!(
        "<text x=\"{CENTER_X}\" y=\"662\" font-size=\"12\" fill=\"{CAPTION_FILL}\" text-anchor=\"middle\">{CAPTION}</text>\n"
    ));

    svg.push_str("</svg>");
    svg
}

fn push_defs(svg: &mut String, arrangement: &Arrangement) {
    let (inner, outer) = arrangement.wrap_style.gradient();
    svg.push_str("<defs>\n");
    svg.push_str(&format!(
        "  <radialGradient id=\"wrap_grad\">\n    <stop offset=\"0%\" stop-color=\"{}\" />\n    <stop offset=\"100%\" stop-color=\"{}\" />\n  </radialGradient>\n",
        inner.to_hex(),
        outer.to_hex()
    ));
    svg.push_str(&format!(
        "  <radialGradient id=\"bed_grad\">\n    <stop offset=\"0%\" stop-color=\"{BED_INNER}\" />\n    <stop offset=\"100%\" stop-color=\"{BED_OUTER}\" />\n  </radialGradient>\n"
    ));

    // Per-item circular clip masks, keyed by original list index so the
    // draw loop can reference them regardless of stack order.
    for (index, item) in arrangement.items.iter().enumerate() {
        let (cx, cy, r) = item_geometry(arrangement, index);
        svg.push_str(&format!(
            "  <clipPath id=\"bloom_clip_{index}\"><circle cx=\"{cx}\" cy=\"{cy}\" r=\"{r}\" /></clipPath>\n"
        ));
    }
    svg.push_str("</defs>\n");
}

/// Canvas-space center and mask radius for the item at `index`.
fn item_geometry(arrangement: &Arrangement, index: usize) -> (f32, f32, f32) {
    let item = &arrangement.items[index];
    let s = arrangement.size_scale;
    (
        CENTER_X + item.position.x * s,
        CENTER_Y + item.position.y * s,
        BLOOM_RADIUS * item.scale * s,
    )
}

fn push_item(svg: &mut String, arrangement: &Arrangement, index: usize, images: &dyn ImageSource) {
    let item = &arrangement.items[index];
    let (cx, cy, r) = item_geometry(arrangement, index);
    let rotation = item.display_rotation();

    svg.push_str(&format!(
        "<g data-item=\"{}\" transform=\"rotate({rotation} {cx} {cy})\">\n",
        escape_xml(item.id.as_str())
    ));

    let uri = match images.fetch(&item.image_ref) {
        Ok(data) => data_uri(&data),
        Err(err) => {
            log::warn!("image fetch failed, falling back to disc: {err}");
            None
        }
    };
    match uri {
        Some(uri) => {
            // Square image slice-fitted into the circular mask.
            let d = r * 2.0;
            svg.push_str(&format!(
                "  <image x=\"{}\" y=\"{}\" width=\"{d}\" height=\"{d}\" clip-path=\"url(#bloom_clip_{index})\" preserveAspectRatio=\"xMidYMid slice\" href=\"{uri}\" />\n",
                cx - r,
                cy - r
            ));
        }
        None => {
            svg.push_str(&format!(
                "  <circle cx=\"{cx}\" cy=\"{cy}\" r=\"{r}\" fill=\"{}\" />\n",
                item.color.to_hex()
            ));
        }
    }
    svg.push_str("</g>\n");
}

fn push_ribbon(svg: &mut String, color: Color) {
    let fill = color.to_hex();
    // Band across the stem area, anchored near the bottom.
    svg.push_str(&format!(
        "<rect x=\"208\" y=\"528\" width=\"184\" height=\"44\" rx=\"18\" fill=\"{fill}\" />\n"
    ));
    // Two bow lobes.
    svg.push_str(&format!(
        "<ellipse cx=\"260\" cy=\"522\" rx=\"34\" ry=\"20\" transform=\"rotate(-28 260 522)\" fill=\"{fill}\" />\n"
    ));
    svg.push_str(&format!(
        "<ellipse cx=\"340\" cy=\"522\" rx=\"34\" ry=\"20\" transform=\"rotate(28 340 522)\" fill=\"{fill}\" />\n"
    ));
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::images::NoImages;
    use bq_core::model::{Item, Vec2};
    use bq_core::{FlowerTypeId, InstanceId};

    fn item(color: Color, stack_order: i32) -> Item {
        Item {
            id: InstanceId::fresh(),
            flower: FlowerTypeId::intern("scene_rose"),
            color,
            image_ref: "missing.png".into(),
            position: Vec2::new(0.0, 0.0),
            rotation: 0.0,
            scale: 1.0,
            stack_order,
        }
    }

    #[test]
    fn items_are_emitted_in_stable_stack_order() {
        let a = Color::rgb(0xAA, 0x00, 0x00);
        let b = Color::rgb(0x00, 0xBB, 0x00);
        let c = Color::rgb(0x00, 0x00, 0xCC);
        let arrangement = Arrangement {
            items: vec![item(a, 5), item(b, 2), item(c, 5)],
            ..Default::default()
        };

        let svg = build_scene_svg(&arrangement, "Test", &NoImages);
        let pos = |hex: &str| svg.rfind(hex).unwrap();
        // b (stack 2) draws first, then a and c keep insertion order.
        assert!(pos("#00BB00") < pos("#AA0000"));
        assert!(pos("#AA0000") < pos("#0000CC"));
    }

    #[test]
    fn failed_image_degrades_to_colored_disc() {
        let arrangement = Arrangement {
            items: vec![item(Color::rgb(0x12, 0x34, 0x56), 0)],
            ..Default::default()
        };
        let svg = build_scene_svg(&arrangement, "Posy", &NoImages);
        assert!(svg.contains("fill=\"#123456\""));
        assert!(!svg.contains("<image"));
    }

    #[test]
    fn label_is_escaped() {
        let arrangement = Arrangement::default();
        let svg = build_scene_svg(&arrangement, "Roses & \"Thorns\" <3", &NoImages);
        assert!(svg.contains("Roses &amp; &quot;Thorns&quot; &lt;3"));
    }

    #[test]
    fn scene_is_deterministic() {
        let arrangement = Arrangement {
            items: vec![item(Color::rgb(1, 2, 3), 1)],
            ..Default::default()
        };
        let first = build_scene_svg(&arrangement, "Same", &NoImages);
        let second = build_scene_svg(&arrangement, "Same", &NoImages);
        assert_eq!(first, second);
    }

    #[test]
    fn size_scale_only_affects_geometry() {
        let base = Arrangement {
            items: vec![item(Color::rgb(9, 9, 9), 0)],
            ..Default::default()
        };
        let mut scaled = base.clone();
        scaled.size_scale = 1.5;

        let svg = build_scene_svg(&scaled, "Big", &NoImages);
        // Mask radius grows with the render-time multiplier...
        assert!(svg.contains(&format!("r=\"{}\"", BLOOM_RADIUS * 1.5)));
        // ...while the stored item scale is untouched.
        assert_eq!(scaled.items[0].scale, 1.0);
    }
}
