//! Display and Debug implementations for Variant
//!
//! Both walk the tree with an explicit stack of pending output steps.
//! Mapping keys are rendered quoted and in sorted order so the output is
//! deterministic.

use std::fmt::{self, Write};

use crate::value::{Variant, VariantRef};

/// Rendering limits for diagnostic output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderConfig {
    /// Containers at or below this depth collapse to `...`
    pub max_depth: Option<usize>,
    /// Maximum sequence items or mapping entries to show
    pub max_items: Option<usize>,
}

impl RenderConfig {
    /// No limits
    pub const fn full() -> Self {
        Self {
            max_depth: None,
            max_items: None,
        }
    }

    /// Limits suitable for log lines
    pub const fn compact_limited() -> Self {
        Self {
            max_depth: Some(10),
            max_items: Some(100),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Style {
    Plain,
    Verbose,
}

enum Step<'a> {
    Node {
        value: &'a Variant,
        depth: usize,
    },
    Key(&'a str),
    Punct(&'static str),
}

fn render<W: Write>(
    root: &Variant,
    style: Style,
    config: &RenderConfig,
    out: &mut W,
) -> fmt::Result {
    let mut steps = vec![Step::Node {
        value: root,
        depth: 0,
    }];

    while let Some(step) = steps.pop() {
        let (value, depth) = match step {
            Step::Punct(text) => {
                out.write_str(text)?;
                continue;
            }
            Step::Key(key) => {
                write!(out, "{key:?}: ")?;
                continue;
            }
            Step::Node { value, depth } => (value, depth),
        };

        let view = value.view();
        if view.kind().is_container() && config.max_depth.is_some_and(|max| depth >= max) {
            out.write_str("...")?;
            continue;
        }
        let shown = config.max_items.unwrap_or(usize::MAX);

        match view {
            VariantRef::Sequence(items) => {
                out.write_str(match style {
                    Style::Plain => "[",
                    Style::Verbose => "Sequence[",
                })?;
                steps.push(Step::Punct("]"));
                if items.len() > shown {
                    steps.push(Step::Punct(if shown == 0 { "..." } else { ", ..." }));
                }
                for (index, item) in items.iter().take(shown).enumerate().rev() {
                    steps.push(Step::Node {
                        value: item,
                        depth: depth + 1,
                    });
                    if index > 0 {
                        steps.push(Step::Punct(", "));
                    }
                }
            }
            VariantRef::Mapping(entries) => {
                let mut sorted: Vec<_> = entries.iter().collect();
                sorted.sort_unstable_by(|a, b| a.0.cmp(b.0));

                out.write_str(match style {
                    Style::Plain => "{",
                    Style::Verbose => "Mapping{",
                })?;
                steps.push(Step::Punct("}"));
                if sorted.len() > shown {
                    steps.push(Step::Punct(if shown == 0 { "..." } else { ", ..." }));
                }
                for (index, (key, item)) in sorted.into_iter().take(shown).enumerate().rev() {
                    steps.push(Step::Node {
                        value: item,
                        depth: depth + 1,
                    });
                    steps.push(Step::Key(key));
                    if index > 0 {
                        steps.push(Step::Punct(", "));
                    }
                }
            }
            scalar => write_scalar(out, scalar, style, depth > 0)?,
        }
    }
    Ok(())
}

fn write_scalar<W: Write>(
    out: &mut W,
    scalar: VariantRef<'_>,
    style: Style,
    nested: bool,
) -> fmt::Result {
    match (style, scalar) {
        (Style::Plain, VariantRef::Empty) => out.write_str("null"),
        (Style::Plain, VariantRef::Boolean(b)) => write!(out, "{b}"),
        (Style::Plain, VariantRef::Signed(i)) => write!(out, "{i}"),
        (Style::Plain, VariantRef::Unsigned(u)) => write!(out, "{u}"),
        (Style::Plain, VariantRef::Floating(f)) => write_float(out, f),
        (Style::Plain, VariantRef::Text(t)) if nested => write!(out, "{t:?}"),
        (Style::Plain, VariantRef::Text(t)) => out.write_str(t),

        (Style::Verbose, VariantRef::Empty) => out.write_str("Empty"),
        (Style::Verbose, VariantRef::Boolean(b)) => write!(out, "Boolean({b})"),
        (Style::Verbose, VariantRef::Signed(i)) => write!(out, "Signed({i})"),
        (Style::Verbose, VariantRef::Unsigned(u)) => write!(out, "Unsigned({u})"),
        (Style::Verbose, VariantRef::Floating(f)) => write!(out, "Floating({f:?})"),
        (Style::Verbose, VariantRef::Text(t)) => write!(out, "Text({t:?})"),

        (_, VariantRef::Sequence(_) | VariantRef::Mapping(_)) => Ok(()),
    }
}

fn write_float<W: Write>(out: &mut W, value: f64) -> fmt::Result {
    if value.is_nan() {
        out.write_str("NaN")
    } else if value == f64::INFINITY {
        out.write_str("+Infinity")
    } else if value == f64::NEG_INFINITY {
        out.write_str("-Infinity")
    } else {
        write!(out, "{value}")
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(self, Style::Plain, &RenderConfig::full(), f)
    }
}

impl fmt::Debug for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render(self, Style::Verbose, &RenderConfig::full(), f)
    }
}

impl Variant {
    /// Render with depth and size limits, for logging large values
    ///
    /// ```
    /// use rvariant::Variant;
    /// use rvariant::display::RenderConfig;
    ///
    /// let value: Variant = (1..=5).map(Variant::from).collect();
    /// let config = RenderConfig { max_items: Some(2), ..RenderConfig::full() };
    /// assert_eq!(value.render_with(&config), "[1, 2, ...]");
    /// ```
    pub fn render_with(&self, config: &RenderConfig) -> String {
        let mut output = String::new();
        // Writing into a String cannot fail.
        let _ = render(self, Style::Plain, config, &mut output);
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Mapping;
    use pretty_assertions::assert_eq;

    fn sample() -> Variant {
        [
            ("name", Variant::from("Ann")),
            ("age", Variant::from(30)),
            (
                "tags",
                Variant::from(vec![Variant::from("x"), Variant::empty()]),
            ),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_scalars() {
        assert_eq!(Variant::empty().to_string(), "null");
        assert_eq!(Variant::from(false).to_string(), "false");
        assert_eq!(Variant::from(-42).to_string(), "-42");
        assert_eq!(Variant::from(u64::MAX).to_string(), "18446744073709551615");
        assert_eq!(Variant::from(2.5).to_string(), "2.5");
        assert_eq!(Variant::from(f64::NAN).to_string(), "NaN");
        assert_eq!(Variant::from(f64::NEG_INFINITY).to_string(), "-Infinity");
        assert_eq!(Variant::from("plain text").to_string(), "plain text");
    }

    #[test]
    fn test_containers_sorted_and_quoted() {
        assert_eq!(
            sample().to_string(),
            r#"{"age": 30, "name": "Ann", "tags": ["x", null]}"#
        );
        assert_eq!(Variant::sequence(Vec::new()).to_string(), "[]");
        assert_eq!(Variant::mapping(Mapping::new()).to_string(), "{}");
    }

    #[test]
    fn test_keys_with_separators_stay_distinct() {
        let joined: Variant = [("a, b", Variant::from(1))].into_iter().collect();
        let split: Variant = [("a", Variant::from(1)), ("b", Variant::from(1))]
            .into_iter()
            .collect();
        assert_eq!(joined.to_string(), r#"{"a, b": 1}"#);
        assert_eq!(split.to_string(), r#"{"a": 1, "b": 1}"#);
        assert_eq!(
            Variant::from_iter([("k: v", Variant::empty())]).to_string(),
            r#"{"k: v": null}"#
        );
    }

    #[test]
    fn test_debug_names_cases() {
        assert_eq!(
            format!("{:?}", sample()),
            r#"Mapping{"age": Signed(30), "name": Text("Ann"), "tags": Sequence[Text("x"), Empty]}"#
        );
        assert_eq!(format!("{:?}", Variant::from(7u8)), "Unsigned(7)");
        assert_eq!(format!("{:?}", Variant::from(1.0)), "Floating(1.0)");
    }

    #[test]
    fn test_render_limits() {
        let deep = Variant::from(vec![Variant::from(vec![Variant::from(1)])]);
        let config = RenderConfig {
            max_depth: Some(1),
            ..RenderConfig::full()
        };
        assert_eq!(deep.render_with(&config), "[...]");

        let config = RenderConfig {
            max_items: Some(0),
            ..RenderConfig::full()
        };
        assert_eq!(sample().render_with(&config), "{...}");
        assert_eq!(
            sample().render_with(&RenderConfig::compact_limited()),
            sample().to_string()
        );
    }

    #[test]
    fn test_deep_render() {
        let mut value = Variant::from(0);
        for _ in 0..100_000 {
            value = Variant::sequence(vec![value]);
        }
        let text = value.to_string();
        assert_eq!(text.len(), 200_001);
        assert!(text.starts_with("[[[") && text.ends_with("]]]"));
    }
}
