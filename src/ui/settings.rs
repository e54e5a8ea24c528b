use std::ops::RangeInclusive;

use egui::{Color32, Visuals};
use serde::{Deserialize, Serialize};

pub const UI_SCALE_RANGE: RangeInclusive<f32> = 0.75..=2.0;
pub const DEFAULT_UI_SCALE: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// The three colors every widget is painted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Color32,
    pub text: Color32,
    pub widget: Color32,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Light => Palette {
                background: Color32::from_rgb(0xFF, 0xFF, 0xFF),
                text: Color32::from_rgb(0x00, 0x00, 0x00),
                widget: Color32::from_rgb(0xF0, 0xF0, 0xF0),
            },
            Theme::Dark => Palette {
                background: Color32::from_rgb(0x33, 0x33, 0x33),
                text: Color32::from_rgb(0xFF, 0xFF, 0xFF),
                widget: Color32::from_rgb(0x55, 0x55, 0x55),
            },
        }
    }

    /// Paints panels, text fields, buttons and sliders from the palette.
    pub fn visuals(self) -> Visuals {
        let p = self.palette();
        let mut v = match self {
            Theme::Light => Visuals::light(),
            Theme::Dark => Visuals::dark(),
        };

        v.override_text_color = Some(p.text);
        v.panel_fill = p.background;
        v.window_fill = p.background;
        v.faint_bg_color = p.background;
        v.extreme_bg_color = p.widget;

        for w in [
            &mut v.widgets.noninteractive,
            &mut v.widgets.inactive,
            &mut v.widgets.hovered,
            &mut v.widgets.active,
            &mut v.widgets.open,
        ] {
            w.fg_stroke.color = p.text;
        }
        for w in [&mut v.widgets.inactive, &mut v.widgets.open] {
            w.bg_fill = p.widget;
            w.weak_bg_fill = p.widget;
        }
        v.widgets.noninteractive.bg_fill = p.background;

        v
    }

    pub fn label(self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct UiSettings {
    pub ui_scale: f32,
    pub theme: Theme,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            ui_scale: DEFAULT_UI_SCALE,
            theme: Theme::Light,
        }
    }
}

impl UiSettings {
    /// Pulls a hand-edited scale back into the slider's range. egui cannot
    /// lay out at zero, negative or non-finite pixels per point.
    pub fn sanitized(mut self) -> Self {
        self.ui_scale = if self.ui_scale.is_finite() {
            self.ui_scale
                .clamp(*UI_SCALE_RANGE.start(), *UI_SCALE_RANGE.end())
        } else {
            DEFAULT_UI_SCALE
        };
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_swaps_palettes() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
        assert_ne!(Theme::Light.palette(), Theme::Dark.palette());
    }

    #[test]
    fn visuals_use_palette() {
        for theme in [Theme::Light, Theme::Dark] {
            let p = theme.palette();
            let v = theme.visuals();
            assert_eq!(v.panel_fill, p.background);
            assert_eq!(v.override_text_color, Some(p.text));
            assert_eq!(v.widgets.inactive.bg_fill, p.widget);
            assert_eq!(v.dark_mode, theme == Theme::Dark);
        }
    }

    #[test]
    fn partial_settings_fill_defaults() {
        let s: UiSettings = serde_json::from_str(r#"{"theme":"dark"}"#).unwrap();
        assert_eq!(s.theme, Theme::Dark);
        assert_eq!(s.ui_scale, 1.0);
    }

    #[test]
    fn bad_scales_are_repaired() {
        for (raw, expected) in [(0.0, 0.75), (-3.0, 0.75), (40.0, 2.0), (1.5, 1.5)] {
            let s = UiSettings {
                ui_scale: raw,
                theme: Theme::Dark,
            }
            .sanitized();
            assert_eq!(s.ui_scale, expected, "scale {raw}");
            assert_eq!(s.theme, Theme::Dark);
        }

        for raw in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            let s = UiSettings {
                ui_scale: raw,
                ..Default::default()
            };
            assert_eq!(s.sanitized().ui_scale, DEFAULT_UI_SCALE);
        }
    }
}
