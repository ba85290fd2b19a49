use crate::node::{Node, NodeType};
use crate::parser::component_values::parse_one_component_value;
use crate::parser::Input;
use crate::utils::split_on_comma;
use colors_transform::{Color as _, Hsl};
use lazy_static::lazy_static;

/// An sRGB color with an alpha channel.
///
/// Channels are fractions: 255 maps to 1.0 and 0 to 0.0. Values outside
/// the 0..1 range are kept as given (`rgb(-10%, 120%, 0%)` is
/// `(-0.1, 1.2, 0.0)`); only alpha is clamped.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub alpha: f64,
}

impl Rgba {
    pub fn new(r: f64, g: f64, b: f64, alpha: f64) -> Self {
        Rgba { r, g, b, alpha }
    }
}

/// A parsed CSS Color Level 4 `<color>` value.
///
/// sRGB-family inputs (keywords, hex, `rgb()`, `hsl()`, `hwb()`) become
/// [`Rgba`]; the other color spaces keep their components unconverted.
#[derive(Clone, Debug, PartialEq)]
pub enum Color {
    /// The `currentColor` keyword, resolved by the consumer
    CurrentColor,
    Rgba(Rgba),
    Lab {
        lightness: f64,
        a: f64,
        b: f64,
        alpha: f64,
    },
    Lch {
        lightness: f64,
        chroma: f64,
        hue: f64,
        alpha: f64,
    },
    Oklab {
        lightness: f64,
        a: f64,
        b: f64,
        alpha: f64,
    },
    Oklch {
        lightness: f64,
        chroma: f64,
        hue: f64,
        alpha: f64,
    },
    /// A `color(<space> c1 c2 … / alpha)` value, components as given
    Space {
        name: String,
        components: Vec<f64>,
        alpha: f64,
    },
}

/// Parses a CSS `<color>` value.
///
/// Accepts a named color, `transparent`, `currentColor`, a hex color, or
/// one of the color functions. Returns `None` for anything else; no
/// error is raised.
pub fn parse_color<'i>(input: impl Into<Input<'i>>) -> Option<Color> {
    log::trace!("parse_color");

    let token = parse_one_component_value(input);
    match &*token.node_type {
        NodeType::Ident { value } => keyword_color(&value.to_ascii_lowercase()),
        NodeType::Hash { value, .. } => hash_color(value),
        NodeType::Function { name, arguments } => function_color(name, arguments),
        _ => None,
    }
}

fn keyword_color(keyword: &str) -> Option<Color> {
    match keyword {
        "currentcolor" => Some(Color::CurrentColor),
        "transparent" => Some(Color::Rgba(Rgba::new(0.0, 0.0, 0.0, 0.0))),
        _ => CSS_COLORNAMES
            .iter()
            .find(|entry| entry.name == keyword)
            .map(|entry| {
                let (r, g, b) = entry.rgb;
                Color::Rgba(Rgba::new(
                    f64::from(r) / 255.0,
                    f64::from(g) / 255.0,
                    f64::from(b) / 255.0,
                    1.0,
                ))
            }),
    }
}

/// Parses the name of a hash token as `rgb`, `rgba`, `rrggbb` or
/// `rrggbbaa` hex digits
fn hash_color(value: &str) -> Option<Color> {
    if !value.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let pair = |i: usize| {
        u8::from_str_radix(&value[i..i + 2], 16)
            .map(|v| f64::from(v) / 255.0)
            .ok()
    };
    let single = |i: usize| {
        u8::from_str_radix(&value[i..i + 1], 16)
            .map(|v| f64::from(v * 17) / 255.0)
            .ok()
    };

    match value.len() {
        3 => Some(Color::Rgba(Rgba::new(
            single(0)?,
            single(1)?,
            single(2)?,
            1.0,
        ))),
        4 => Some(Color::Rgba(Rgba::new(
            single(0)?,
            single(1)?,
            single(2)?,
            single(3)?,
        ))),
        6 => Some(Color::Rgba(Rgba::new(pair(0)?, pair(2)?, pair(4)?, 1.0))),
        8 => Some(Color::Rgba(Rgba::new(
            pair(0)?,
            pair(2)?,
            pair(4)?,
            pair(6)?,
        ))),
        _ => None,
    }
}

fn function_color(name: &str, arguments: &[Node]) -> Option<Color> {
    let (components, alpha) = separate_arguments(arguments)?;
    let alpha = match alpha {
        Some(node) => parse_alpha(node)?,
        None => 1.0,
    };

    match name {
        "rgb" | "rgba" => rgb_color(&components, alpha),
        "hsl" | "hsla" => hsl_color(&components, alpha),
        "hwb" => hwb_color(&components, alpha),
        "lab" => {
            let [l, a, b] = three(&components)?;
            Some(Color::Lab {
                lightness: number_or_percent(l, 100.0)?,
                a: number_or_percent(a, 125.0)?,
                b: number_or_percent(b, 125.0)?,
                alpha,
            })
        }
        "lch" => {
            let [l, c, h] = three(&components)?;
            Some(Color::Lch {
                lightness: number_or_percent(l, 100.0)?,
                chroma: number_or_percent(c, 150.0)?,
                hue: hue_degrees(h)?,
                alpha,
            })
        }
        "oklab" => {
            let [l, a, b] = three(&components)?;
            Some(Color::Oklab {
                lightness: number_or_percent(l, 1.0)?,
                a: number_or_percent(a, 0.4)?,
                b: number_or_percent(b, 0.4)?,
                alpha,
            })
        }
        "oklch" => {
            let [l, c, h] = three(&components)?;
            Some(Color::Oklch {
                lightness: number_or_percent(l, 1.0)?,
                chroma: number_or_percent(c, 0.4)?,
                hue: hue_degrees(h)?,
                alpha,
            })
        }
        "color" => {
            let (space, rest) = components.split_first()?;
            let NodeType::Ident { value } = &*space.node_type else {
                return None;
            };
            if rest.is_empty() {
                return None;
            }

            let mut channels = Vec::with_capacity(rest.len());
            for node in rest {
                channels.push(number_or_percent(node, 1.0)?);
            }

            Some(Color::Space {
                name: value.to_ascii_lowercase(),
                components: channels,
                alpha,
            })
        }
        _ => None,
    }
}

fn rgb_color(components: &[&Node], alpha: f64) -> Option<Color> {
    let [r, g, b] = three(components)?;
    let channel = |node: &Node| match &*node.node_type {
        NodeType::Number { value, .. } => Some(value / 255.0),
        NodeType::Percentage { value, .. } => Some(value / 100.0),
        _ => None,
    };

    Some(Color::Rgba(Rgba::new(
        channel(r)?,
        channel(g)?,
        channel(b)?,
        alpha,
    )))
}

fn hsl_color(components: &[&Node], alpha: f64) -> Option<Color> {
    let [h, s, l] = three(components)?;
    Some(hsl_to_rgba(
        hue_degrees(h)?,
        percent_scale(s)?,
        percent_scale(l)?,
        alpha,
    ))
}

/// The hwb() algorithm of css-color-4: mix the pure hue with white and
/// black; when whiteness and blackness sum to one or more, the result is
/// an achromatic gray.
fn hwb_color(components: &[&Node], alpha: f64) -> Option<Color> {
    let [h, w, b] = three(components)?;
    let hue = hue_degrees(h)?;
    let white = percent_scale(w)? / 100.0;
    let black = percent_scale(b)? / 100.0;

    if white + black >= 1.0 {
        let gray = white / (white + black);
        return Some(Color::Rgba(Rgba::new(gray, gray, gray, alpha)));
    }

    let base = Hsl::from(hue.rem_euclid(360.0) as f32, 100.0, 50.0).to_rgb();
    let mix = |channel: f32| {
        f64::from(channel) / 255.0 * (1.0 - white - black) + white
    };

    Some(Color::Rgba(Rgba::new(
        mix(base.get_red()),
        mix(base.get_green()),
        mix(base.get_blue()),
        alpha,
    )))
}

fn hsl_to_rgba(hue: f64, saturation: f64, lightness: f64, alpha: f64) -> Color {
    let hsl = Hsl::from(
        hue.rem_euclid(360.0) as f32,
        saturation.clamp(0.0, 100.0) as f32,
        lightness.clamp(0.0, 100.0) as f32,
    );
    let rgb = hsl.to_rgb();

    Color::Rgba(Rgba::new(
        f64::from(rgb.get_red()) / 255.0,
        f64::from(rgb.get_green()) / 255.0,
        f64::from(rgb.get_blue()) / 255.0,
        alpha,
    ))
}

/// Splits function arguments into component tokens and an optional alpha
/// token. Handles both the legacy comma syntax (`rgb(1, 2, 3)`,
/// optionally with a fourth alpha argument) and the modern
/// space-separated syntax with `/ alpha`.
fn separate_arguments<'a>(arguments: &'a [Node]) -> Option<(Vec<&'a Node>, Option<&'a Node>)> {
    if arguments.iter().any(|node| node.is_literal(",")) {
        let mut args = Vec::new();
        for part in split_on_comma(arguments) {
            let significant: Vec<&Node> =
                part.iter().filter(|node| node.is_significant()).collect();
            if significant.len() != 1 {
                return None;
            }
            args.push(significant[0]);
        }

        return match args.len() {
            3 => Some((args, None)),
            4 => {
                let alpha = args.pop();
                Some((args, alpha))
            }
            _ => None,
        };
    }

    let tokens: Vec<&Node> = arguments
        .iter()
        .filter(|node| node.is_significant())
        .collect();

    if tokens.len() >= 2 && tokens[tokens.len() - 2].is_literal("/") {
        let alpha = tokens[tokens.len() - 1];
        Some((tokens[..tokens.len() - 2].to_vec(), Some(alpha)))
    } else {
        Some((tokens, None))
    }
}

fn three<'a>(components: &[&'a Node]) -> Option<[&'a Node; 3]> {
    match components {
        &[a, b, c] => Some([a, b, c]),
        _ => None,
    }
}

/// An alpha value: a number or percentage, clamped to 0..1
fn parse_alpha(node: &Node) -> Option<f64> {
    match &*node.node_type {
        NodeType::Number { value, .. } => Some(value.clamp(0.0, 1.0)),
        NodeType::Percentage { value, .. } => Some((value / 100.0).clamp(0.0, 1.0)),
        _ => None,
    }
}

/// A value on the 0..100 percent scale; plain numbers are taken as-is
fn percent_scale(node: &Node) -> Option<f64> {
    match &*node.node_type {
        NodeType::Number { value, .. } | NodeType::Percentage { value, .. } => Some(*value),
        _ => None,
    }
}

/// A number, or a percentage scaled so that 100% maps to `percent_reference`
fn number_or_percent(node: &Node, percent_reference: f64) -> Option<f64> {
    match &*node.node_type {
        NodeType::Number { value, .. } => Some(*value),
        NodeType::Percentage { value, .. } => Some(value * percent_reference / 100.0),
        _ => None,
    }
}

/// A hue, as a plain number of degrees or an angle dimension
fn hue_degrees(node: &Node) -> Option<f64> {
    match &*node.node_type {
        NodeType::Number { value, .. } => Some(*value),
        NodeType::Dimension { value, unit, .. } => match unit.as_str() {
            "deg" => Some(*value),
            "grad" => Some(value * 0.9),
            "rad" => Some(value.to_degrees()),
            "turn" => Some(value * 360.0),
            _ => None,
        },
        _ => None,
    }
}

/// A named CSS color
pub struct NamedColorEntry {
    pub name: &'static str,
    pub rgb: (u8, u8, u8),
}

lazy_static! {
    /// The CSS named-color table, including `rebeccapurple`
    pub static ref CSS_COLORNAMES: &'static [NamedColorEntry] = &[
        NamedColorEntry { name: "aliceblue", rgb: (0xF0, 0xF8, 0xFF) },
        NamedColorEntry { name: "antiquewhite", rgb: (0xFA, 0xEB, 0xD7) },
        NamedColorEntry { name: "aqua", rgb: (0x00, 0xFF, 0xFF) },
        NamedColorEntry { name: "aquamarine", rgb: (0x7F, 0xFF, 0xD4) },
        NamedColorEntry { name: "azure", rgb: (0xF0, 0xFF, 0xFF) },
        NamedColorEntry { name: "beige", rgb: (0xF5, 0xF5, 0xDC) },
        NamedColorEntry { name: "bisque", rgb: (0xFF, 0xE4, 0xC4) },
        NamedColorEntry { name: "black", rgb: (0x00, 0x00, 0x00) },
        NamedColorEntry { name: "blanchedalmond", rgb: (0xFF, 0xEB, 0xCD) },
        NamedColorEntry { name: "blue", rgb: (0x00, 0x00, 0xFF) },
        NamedColorEntry { name: "blueviolet", rgb: (0x8A, 0x2B, 0xE2) },
        NamedColorEntry { name: "brown", rgb: (0xA5, 0x2A, 0x2A) },
        NamedColorEntry { name: "burlywood", rgb: (0xDE, 0xB8, 0x87) },
        NamedColorEntry { name: "cadetblue", rgb: (0x5F, 0x9E, 0xA0) },
        NamedColorEntry { name: "chartreuse", rgb: (0x7F, 0xFF, 0x00) },
        NamedColorEntry { name: "chocolate", rgb: (0xD2, 0x69, 0x1E) },
        NamedColorEntry { name: "coral", rgb: (0xFF, 0x7F, 0x50) },
        NamedColorEntry { name: "cornflowerblue", rgb: (0x64, 0x95, 0xED) },
        NamedColorEntry { name: "cornsilk", rgb: (0xFF, 0xF8, 0xDC) },
        NamedColorEntry { name: "crimson", rgb: (0xDC, 0x14, 0x3C) },
        NamedColorEntry { name: "cyan", rgb: (0x00, 0xFF, 0xFF) },
        NamedColorEntry { name: "darkblue", rgb: (0x00, 0x00, 0x8B) },
        NamedColorEntry { name: "darkcyan", rgb: (0x00, 0x8B, 0x8B) },
        NamedColorEntry { name: "darkgoldenrod", rgb: (0xB8, 0x86, 0x0B) },
        NamedColorEntry { name: "darkgray", rgb: (0xA9, 0xA9, 0xA9) },
        NamedColorEntry { name: "darkgreen", rgb: (0x00, 0x64, 0x00) },
        NamedColorEntry { name: "darkgrey", rgb: (0xA9, 0xA9, 0xA9) },
        NamedColorEntry { name: "darkkhaki", rgb: (0xBD, 0xB7, 0x6B) },
        NamedColorEntry { name: "darkmagenta", rgb: (0x8B, 0x00, 0x8B) },
        NamedColorEntry { name: "darkolivegreen", rgb: (0x55, 0x6B, 0x2F) },
        NamedColorEntry { name: "darkorange", rgb: (0xFF, 0x8C, 0x00) },
        NamedColorEntry { name: "darkorchid", rgb: (0x99, 0x32, 0xCC) },
        NamedColorEntry { name: "darkred", rgb: (0x8B, 0x00, 0x00) },
        NamedColorEntry { name: "darksalmon", rgb: (0xE9, 0x96, 0x7A) },
        NamedColorEntry { name: "darkseagreen", rgb: (0x8F, 0xBC, 0x8F) },
        NamedColorEntry { name: "darkslateblue", rgb: (0x48, 0x3D, 0x8B) },
        NamedColorEntry { name: "darkslategray", rgb: (0x2F, 0x4F, 0x4F) },
        NamedColorEntry { name: "darkslategrey", rgb: (0x2F, 0x4F, 0x4F) },
        NamedColorEntry { name: "darkturquoise", rgb: (0x00, 0xCE, 0xD1) },
        NamedColorEntry { name: "darkviolet", rgb: (0x94, 0x00, 0xD3) },
        NamedColorEntry { name: "deeppink", rgb: (0xFF, 0x14, 0x93) },
        NamedColorEntry { name: "deepskyblue", rgb: (0x00, 0xBF, 0xFF) },
        NamedColorEntry { name: "dimgray", rgb: (0x69, 0x69, 0x69) },
        NamedColorEntry { name: "dimgrey", rgb: (0x69, 0x69, 0x69) },
        NamedColorEntry { name: "dodgerblue", rgb: (0x1E, 0x90, 0xFF) },
        NamedColorEntry { name: "firebrick", rgb: (0xB2, 0x22, 0x22) },
        NamedColorEntry { name: "floralwhite", rgb: (0xFF, 0xFA, 0xF0) },
        NamedColorEntry { name: "forestgreen", rgb: (0x22, 0x8B, 0x22) },
        NamedColorEntry { name: "fuchsia", rgb: (0xFF, 0x00, 0xFF) },
        NamedColorEntry { name: "gainsboro", rgb: (0xDC, 0xDC, 0xDC) },
        NamedColorEntry { name: "ghostwhite", rgb: (0xF8, 0xF8, 0xFF) },
        NamedColorEntry { name: "gold", rgb: (0xFF, 0xD7, 0x00) },
        NamedColorEntry { name: "goldenrod", rgb: (0xDA, 0xA5, 0x20) },
        NamedColorEntry { name: "gray", rgb: (0x80, 0x80, 0x80) },
        NamedColorEntry { name: "green", rgb: (0x00, 0x80, 0x00) },
        NamedColorEntry { name: "greenyellow", rgb: (0xAD, 0xFF, 0x2F) },
        NamedColorEntry { name: "grey", rgb: (0x80, 0x80, 0x80) },
        NamedColorEntry { name: "honeydew", rgb: (0xF0, 0xFF, 0xF0) },
        NamedColorEntry { name: "hotpink", rgb: (0xFF, 0x69, 0xB4) },
        NamedColorEntry { name: "indianred", rgb: (0xCD, 0x5C, 0x5C) },
        NamedColorEntry { name: "indigo", rgb: (0x4B, 0x00, 0x82) },
        NamedColorEntry { name: "ivory", rgb: (0xFF, 0xFF, 0xF0) },
        NamedColorEntry { name: "khaki", rgb: (0xF0, 0xE6, 0x8C) },
        NamedColorEntry { name: "lavender", rgb: (0xE6, 0xE6, 0xFA) },
        NamedColorEntry { name: "lavenderblush", rgb: (0xFF, 0xF0, 0xF5) },
        NamedColorEntry { name: "lawngreen", rgb: (0x7C, 0xFC, 0x00) },
        NamedColorEntry { name: "lemonchiffon", rgb: (0xFF, 0xFA, 0xCD) },
        NamedColorEntry { name: "lightblue", rgb: (0xAD, 0xD8, 0xE6) },
        NamedColorEntry { name: "lightcoral", rgb: (0xF0, 0x80, 0x80) },
        NamedColorEntry { name: "lightcyan", rgb: (0xE0, 0xFF, 0xFF) },
        NamedColorEntry { name: "lightgoldenrodyellow", rgb: (0xFA, 0xFA, 0xD2) },
        NamedColorEntry { name: "lightgray", rgb: (0xD3, 0xD3, 0xD3) },
        NamedColorEntry { name: "lightgreen", rgb: (0x90, 0xEE, 0x90) },
        NamedColorEntry { name: "lightgrey", rgb: (0xD3, 0xD3, 0xD3) },
        NamedColorEntry { name: "lightpink", rgb: (0xFF, 0xB6, 0xC1) },
        NamedColorEntry { name: "lightsalmon", rgb: (0xFF, 0xA0, 0x7A) },
        NamedColorEntry { name: "lightseagreen", rgb: (0x20, 0xB2, 0xAA) },
        NamedColorEntry { name: "lightskyblue", rgb: (0x87, 0xCE, 0xFA) },
        NamedColorEntry { name: "lightslategray", rgb: (0x77, 0x88, 0x99) },
        NamedColorEntry { name: "lightslategrey", rgb: (0x77, 0x88, 0x99) },
        NamedColorEntry { name: "lightsteelblue", rgb: (0xB0, 0xC4, 0xDE) },
        NamedColorEntry { name: "lightyellow", rgb: (0xFF, 0xFF, 0xE0) },
        NamedColorEntry { name: "lime", rgb: (0x00, 0xFF, 0x00) },
        NamedColorEntry { name: "limegreen", rgb: (0x32, 0xCD, 0x32) },
        NamedColorEntry { name: "linen", rgb: (0xFA, 0xF0, 0xE6) },
        NamedColorEntry { name: "magenta", rgb: (0xFF, 0x00, 0xFF) },
        NamedColorEntry { name: "maroon", rgb: (0x80, 0x00, 0x00) },
        NamedColorEntry { name: "mediumaquamarine", rgb: (0x66, 0xCD, 0xAA) },
        NamedColorEntry { name: "mediumblue", rgb: (0x00, 0x00, 0xCD) },
        NamedColorEntry { name: "mediumorchid", rgb: (0xBA, 0x55, 0xD3) },
        NamedColorEntry { name: "mediumpurple", rgb: (0x93, 0x70, 0xDB) },
        NamedColorEntry { name: "mediumseagreen", rgb: (0x3C, 0xB3, 0x71) },
        NamedColorEntry { name: "mediumslateblue", rgb: (0x7B, 0x68, 0xEE) },
        NamedColorEntry { name: "mediumspringgreen", rgb: (0x00, 0xFA, 0x9A) },
        NamedColorEntry { name: "mediumturquoise", rgb: (0x48, 0xD1, 0xCC) },
        NamedColorEntry { name: "mediumvioletred", rgb: (0xC7, 0x15, 0x85) },
        NamedColorEntry { name: "midnightblue", rgb: (0x19, 0x19, 0x70) },
        NamedColorEntry { name: "mintcream", rgb: (0xF5, 0xFF, 0xFA) },
        NamedColorEntry { name: "mistyrose", rgb: (0xFF, 0xE4, 0xE1) },
        NamedColorEntry { name: "moccasin", rgb: (0xFF, 0xE4, 0xB5) },
        NamedColorEntry { name: "navajowhite", rgb: (0xFF, 0xDE, 0xAD) },
        NamedColorEntry { name: "navy", rgb: (0x00, 0x00, 0x80) },
        NamedColorEntry { name: "oldlace", rgb: (0xFD, 0xF5, 0xE6) },
        NamedColorEntry { name: "olive", rgb: (0x80, 0x80, 0x00) },
        NamedColorEntry { name: "olivedrab", rgb: (0x6B, 0x8E, 0x23) },
        NamedColorEntry { name: "orange", rgb: (0xFF, 0xA5, 0x00) },
        NamedColorEntry { name: "orangered", rgb: (0xFF, 0x45, 0x00) },
        NamedColorEntry { name: "orchid", rgb: (0xDA, 0x70, 0xD6) },
        NamedColorEntry { name: "palegoldenrod", rgb: (0xEE, 0xE8, 0xAA) },
        NamedColorEntry { name: "palegreen", rgb: (0x98, 0xFB, 0x98) },
        NamedColorEntry { name: "paleturquoise", rgb: (0xAF, 0xEE, 0xEE) },
        NamedColorEntry { name: "palevioletred", rgb: (0xDB, 0x70, 0x93) },
        NamedColorEntry { name: "papayawhip", rgb: (0xFF, 0xEF, 0xD5) },
        NamedColorEntry { name: "peachpuff", rgb: (0xFF, 0xDA, 0xB9) },
        NamedColorEntry { name: "peru", rgb: (0xCD, 0x85, 0x3F) },
        NamedColorEntry { name: "pink", rgb: (0xFF, 0xC0, 0xCB) },
        NamedColorEntry { name: "plum", rgb: (0xDD, 0xA0, 0xDD) },
        NamedColorEntry { name: "powderblue", rgb: (0xB0, 0xE0, 0xE6) },
        NamedColorEntry { name: "purple", rgb: (0x80, 0x00, 0x80) },
        NamedColorEntry { name: "rebeccapurple", rgb: (0x66, 0x33, 0x99) },
        NamedColorEntry { name: "red", rgb: (0xFF, 0x00, 0x00) },
        NamedColorEntry { name: "rosybrown", rgb: (0xBC, 0x8F, 0x8F) },
        NamedColorEntry { name: "royalblue", rgb: (0x41, 0x69, 0xE1) },
        NamedColorEntry { name: "saddlebrown", rgb: (0x8B, 0x45, 0x13) },
        NamedColorEntry { name: "salmon", rgb: (0xFA, 0x80, 0x72) },
        NamedColorEntry { name: "sandybrown", rgb: (0xF4, 0xA4, 0x60) },
        NamedColorEntry { name: "seagreen", rgb: (0x2E, 0x8B, 0x57) },
        NamedColorEntry { name: "seashell", rgb: (0xFF, 0xF5, 0xEE) },
        NamedColorEntry { name: "sienna", rgb: (0xA0, 0x52, 0x2D) },
        NamedColorEntry { name: "silver", rgb: (0xC0, 0xC0, 0xC0) },
        NamedColorEntry { name: "skyblue", rgb: (0x87, 0xCE, 0xEB) },
        NamedColorEntry { name: "slateblue", rgb: (0x6A, 0x5A, 0xCD) },
        NamedColorEntry { name: "slategray", rgb: (0x70, 0x80, 0x90) },
        NamedColorEntry { name: "slategrey", rgb: (0x70, 0x80, 0x90) },
        NamedColorEntry { name: "snow", rgb: (0xFF, 0xFA, 0xFA) },
        NamedColorEntry { name: "springgreen", rgb: (0x00, 0xFF, 0x7F) },
        NamedColorEntry { name: "steelblue", rgb: (0x46, 0x82, 0xB4) },
        NamedColorEntry { name: "tan", rgb: (0xD2, 0xB4, 0x8C) },
        NamedColorEntry { name: "teal", rgb: (0x00, 0x80, 0x80) },
        NamedColorEntry { name: "thistle", rgb: (0xD8, 0xBF, 0xD8) },
        NamedColorEntry { name: "tomato", rgb: (0xFF, 0x63, 0x47) },
        NamedColorEntry { name: "turquoise", rgb: (0x40, 0xE0, 0xD0) },
        NamedColorEntry { name: "violet", rgb: (0xEE, 0x82, 0xEE) },
        NamedColorEntry { name: "wheat", rgb: (0xF5, 0xDE, 0xB3) },
        NamedColorEntry { name: "white", rgb: (0xFF, 0xFF, 0xFF) },
        NamedColorEntry { name: "whitesmoke", rgb: (0xF5, 0xF5, 0xF5) },
        NamedColorEntry { name: "yellow", rgb: (0xFF, 0xFF, 0x00) },
        NamedColorEntry { name: "yellowgreen", rgb: (0x9A, 0xCD, 0x32) },
    ];
}

#[cfg(test)]
mod test {
    use super::*;

    fn rgba(input: &str) -> Rgba {
        match parse_color(input) {
            Some(Color::Rgba(rgba)) => rgba,
            other => panic!("expected an rgba color for {input:?}, got {other:?}"),
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-4,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn keywords() {
        assert_eq!(parse_color("currentColor"), Some(Color::CurrentColor));
        assert_eq!(parse_color("CURRENTCOLOR"), Some(Color::CurrentColor));
        assert_eq!(
            parse_color("transparent"),
            Some(Color::Rgba(Rgba::new(0.0, 0.0, 0.0, 0.0)))
        );
        assert_eq!(
            parse_color("red"),
            Some(Color::Rgba(Rgba::new(1.0, 0.0, 0.0, 1.0)))
        );
        assert_eq!(
            parse_color("rebeccapurple"),
            Some(Color::Rgba(Rgba::new(
                f64::from(0x66) / 255.0,
                f64::from(0x33) / 255.0,
                f64::from(0x99) / 255.0,
                1.0,
            )))
        );
        assert_eq!(parse_color("not-a-color"), None);
    }

    #[test]
    fn hex_colors() {
        assert_eq!(rgba("#ff0000"), Rgba::new(1.0, 0.0, 0.0, 1.0));
        // shorthand digits are doubled
        assert_eq!(rgba("#abc"), rgba("#aabbcc"));
        assert_eq!(rgba("#abcd"), rgba("#aabbccdd"));
        assert_close(rgba("#00000080").alpha, 128.0 / 255.0);
        assert_eq!(parse_color("#12345"), None);
        assert_eq!(parse_color("#xyz"), None);
    }

    #[test]
    fn rgb_legacy_syntax() {
        assert_eq!(
            rgba("rgb(10, 20, 30)"),
            Rgba::new(10.0 / 255.0, 20.0 / 255.0, 30.0 / 255.0, 1.0)
        );
        assert_eq!(
            rgba("rgba(10, 20, 30, 0.5)"),
            Rgba::new(10.0 / 255.0, 20.0 / 255.0, 30.0 / 255.0, 0.5)
        );
        assert_eq!(rgba("rgb(0%, 50%, 100%)"), Rgba::new(0.0, 0.5, 1.0, 1.0));
        // channels are not clamped, alpha is
        assert_eq!(
            rgba("rgb(-10%, 120%, 0%)"),
            Rgba::new(-0.1, 1.2, 0.0, 1.0)
        );
        assert_close(rgba("rgba(0, 0, 0, 7)").alpha, 1.0);
        assert_eq!(parse_color("rgb(10, 20)"), None);
        assert_eq!(parse_color("rgb(10, 20, 30, 40, 50)"), None);
    }

    #[test]
    fn rgb_modern_syntax() {
        assert_eq!(
            rgba("rgb(10 20 30)"),
            Rgba::new(10.0 / 255.0, 20.0 / 255.0, 30.0 / 255.0, 1.0)
        );
        assert_eq!(
            rgba("rgb(10 20 30 / 50%)"),
            Rgba::new(10.0 / 255.0, 20.0 / 255.0, 30.0 / 255.0, 0.5)
        );
    }

    #[test]
    fn hsl_colors() {
        let green = rgba("hsl(120, 100%, 50%)");
        assert_close(green.r, 0.0);
        assert_close(green.g, 1.0);
        assert_close(green.b, 0.0);

        // hsla and the modern syntax agree
        let a = rgba("hsla(240, 100%, 50%, 0.25)");
        let b = rgba("hsl(240 100% 50% / 25%)");
        assert_close(a.b, 1.0);
        assert_eq!(a, b);

        // hues wrap around
        let wrapped = rgba("hsl(480, 100%, 50%)");
        assert_close(wrapped.g, green.g);

        // angle units
        let turn = rgba("hsl(0.5turn, 100%, 50%)");
        let deg = rgba("hsl(180deg, 100%, 50%)");
        assert_eq!(turn, deg);
    }

    #[test]
    fn hwb_colors() {
        let color = rgba("hwb(0 40% 40%)");
        assert_close(color.r, 0.6);
        assert_close(color.g, 0.4);
        assert_close(color.b, 0.4);

        // whiteness + blackness >= 100% is gray
        let gray = rgba("hwb(120 50% 60%)");
        assert_close(gray.r, 0.5 / 1.1);
        assert_close(gray.g, gray.r);
        assert_close(gray.b, gray.r);
    }

    #[test]
    fn lab_and_friends() {
        assert_eq!(
            parse_color("lab(50% -20 30 / 0.5)"),
            Some(Color::Lab {
                lightness: 50.0,
                a: -20.0,
                b: 30.0,
                alpha: 0.5,
            })
        );
        assert_eq!(
            parse_color("lch(52.2% 72.2 50)"),
            Some(Color::Lch {
                lightness: 52.2,
                chroma: 72.2,
                hue: 50.0,
                alpha: 1.0,
            })
        );
        assert_eq!(
            parse_color("oklab(40% 100% -50%)"),
            Some(Color::Oklab {
                lightness: 0.4,
                a: 0.4,
                b: -0.2,
                alpha: 1.0,
            })
        );
        assert_eq!(
            parse_color("oklch(0.6 0.2 120deg)"),
            Some(Color::Oklch {
                lightness: 0.6,
                chroma: 0.2,
                hue: 120.0,
                alpha: 1.0,
            })
        );
    }

    #[test]
    fn color_function() {
        assert_eq!(
            parse_color("color(display-p3 1 0 0.5)"),
            Some(Color::Space {
                name: "display-p3".to_string(),
                components: vec![1.0, 0.0, 0.5],
                alpha: 1.0,
            })
        );
        assert_eq!(
            parse_color("color(srgb 100% 0% 0% / 50%)"),
            Some(Color::Space {
                name: "srgb".to_string(),
                components: vec![1.0, 0.0, 0.0],
                alpha: 0.5,
            })
        );
        assert_eq!(parse_color("color(display-p3)"), None);
    }

    #[test]
    fn whitespace_and_comments_around_arguments() {
        assert_eq!(
            rgba("rgb( 10 , /* G */ 20 , 30 )"),
            Rgba::new(10.0 / 255.0, 20.0 / 255.0, 30.0 / 255.0, 1.0)
        );
    }

    #[test]
    fn invalid_colors() {
        assert_eq!(parse_color(""), None);
        assert_eq!(parse_color("12px"), None);
        assert_eq!(parse_color("rgb(10, 20px, 30)"), None);
        assert_eq!(parse_color("hsl(a, b, c)"), None);
        assert_eq!(parse_color("red blue"), None);
    }
}
