//! Debug control panel: a static table of widget descriptors bound to the
//! water parameters, drawn with egui.

use crate::params::{PanelConfig, ParamError, ParamKind, ParamName, ParamValue, Rgb, WaterParams};

/// Widget type of a control
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlKind {
    /// Numeric slider. `min`/`max` bound the widget only, never the store.
    Slider { min: f32, max: f32, step: f32 },
    /// Colour picker
    Color,
}

/// One row of the panel, bound to a store parameter
#[derive(Debug, Clone, Copy)]
pub struct Control {
    pub label: &'static str,
    pub param: ParamName,
    /// Component of a vector parameter (0 = x, 1 = y)
    pub component: Option<usize>,
    pub kind: ControlKind,
}

impl Control {
    fn mismatch(&self, expected: ParamKind, found: &ParamValue) -> ParamError {
        ParamError::KindMismatch {
            name: self.param,
            expected,
            found: found.kind(),
        }
    }

    /// Current value under a slider
    pub fn value(&self, params: &WaterParams) -> Result<f32, ParamError> {
        match (params.get(self.param), self.component) {
            (ParamValue::Float(v), None) => Ok(v),
            (ParamValue::Vec2(v), Some(i @ 0..=1)) => Ok(v[i]),
            (other, None) => Err(self.mismatch(ParamKind::Float, &other)),
            (other, Some(_)) => Err(self.mismatch(ParamKind::Vec2, &other)),
        }
    }

    /// Write a slider value to the store. Vector parameters keep their
    /// other component.
    pub fn set_value(&self, params: &mut WaterParams, value: f32) -> Result<(), ParamError> {
        let new_value = match self.component {
            None => ParamValue::Float(value),
            Some(i) => match params.get(self.param) {
                ParamValue::Vec2(mut v) if i < 2 => {
                    v[i] = value;
                    ParamValue::Vec2(v)
                }
                other => return Err(self.mismatch(ParamKind::Vec2, &other)),
            },
        };
        params.set(self.param, new_value)
    }

    /// Current colour under a picker
    pub fn color(&self, params: &WaterParams) -> Result<Rgb, ParamError> {
        match params.get(self.param) {
            ParamValue::Color(c) => Ok(c),
            other => Err(self.mismatch(ParamKind::Color, &other)),
        }
    }
}

const fn slider(
    label: &'static str,
    param: ParamName,
    component: Option<usize>,
    min: f32,
    max: f32,
) -> Control {
    Control {
        label,
        param,
        component,
        kind: ControlKind::Slider {
            min,
            max,
            step: 0.001,
        },
    }
}

const fn color(label: &'static str, param: ParamName) -> Control {
    Control {
        label,
        param,
        component: None,
        kind: ControlKind::Color,
    }
}

/// Panel rows in display order
pub const CONTROLS: [Control; 8] = [
    slider("Elevation Y", ParamName::WaveElevation, None, 0.0, 1.0),
    slider("Frequency X", ParamName::WaveFrequency, Some(0), 0.0, 10.0),
    slider("Frequency Y", ParamName::WaveFrequency, Some(1), 0.0, 10.0),
    slider("Wave Speed", ParamName::WaveSpeed, None, 0.0, 10.0),
    slider("Color Offset", ParamName::ColorOffset, None, 0.0, 1.0),
    slider("Color Multiplier", ParamName::ColorMultiplier, None, 0.0, 1.0),
    color("Depth Color", ParamName::DepthColor),
    color("Surface Color", ParamName::SurfaceColor),
];

/// Panel window state
pub struct ControlPanel {
    config: PanelConfig,
}

impl ControlPanel {
    pub fn new(config: PanelConfig) -> Self {
        Self { config }
    }

    pub fn is_visible(&self) -> bool {
        self.config.visible
    }

    pub fn toggle(&mut self) {
        self.config.visible = !self.config.visible;
        log::debug!("Control panel visible: {}", self.config.visible);
    }

    /// Draw the panel. Returns true if any parameter was changed.
    pub fn show(&mut self, ctx: &egui::Context, params: &mut WaterParams) -> bool {
        if !self.config.visible {
            return false;
        }

        let mut changed = false;
        egui::Window::new(self.config.title.as_str())
            .id(egui::Id::new("water_control_panel"))
            .anchor(egui::Align2::RIGHT_TOP, [-8.0, 8.0])
            .default_width(self.config.width)
            .resizable(false)
            .show(ctx, |ui| {
                ui.set_min_width(self.config.width - 16.0);
                for control in &CONTROLS {
                    changed |= Self::control_row(ui, control, params);
                }
            });
        changed
    }

    /// One widget. Edits go through a local copy so the store is only
    /// written when the user actually moves the widget.
    fn control_row(ui: &mut egui::Ui, control: &Control, params: &mut WaterParams) -> bool {
        let result = match control.kind {
            ControlKind::Slider { min, max, step } => {
                Self::slider_row(ui, control, params, min..=max, step)
            }
            ControlKind::Color => Self::color_row(ui, control, params),
        };
        result.unwrap_or_else(|e| {
            log::warn!("Control '{}' skipped: {}", control.label, e);
            false
        })
    }

    fn slider_row(
        ui: &mut egui::Ui,
        control: &Control,
        params: &mut WaterParams,
        range: std::ops::RangeInclusive<f32>,
        step: f32,
    ) -> Result<bool, ParamError> {
        let mut value = control.value(params)?;
        let response = ui.add(
            egui::Slider::new(&mut value, range)
                .clamping(egui::SliderClamping::Never)
                .step_by(step as f64)
                .text(control.label),
        );
        if !response.changed() {
            return Ok(false);
        }
        control.set_value(params, value)?;
        Ok(true)
    }

    fn color_row(
        ui: &mut egui::Ui,
        control: &Control,
        params: &mut WaterParams,
    ) -> Result<bool, ParamError> {
        let mut srgb = control.color(params)?.to_srgb8();
        let changed = ui
            .horizontal(|ui| {
                let changed = ui.color_edit_button_srgb(&mut srgb).changed();
                ui.label(control.label);
                ui.monospace(Rgb::from_srgb8(srgb).to_hex());
                changed
            })
            .inner;
        if !changed {
            return Ok(false);
        }
        params.set_color_hex(control.param, &Rgb::from_srgb8(srgb).to_hex())?;
        Ok(true)
    }
}
