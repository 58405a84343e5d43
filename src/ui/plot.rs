use eframe::egui::{Color32, RichText, Ui};
use egui_plot::{HLine, Legend, Line, Plot, PlotPoints, VLine};

use crate::color::to_color32;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Hysteresis preview (central panel)
// ---------------------------------------------------------------------------

/// Render the loop of the previewed file, styled like the exported PNG.
pub fn hysteresis_plot(ui: &mut Ui, state: &AppState) {
    let Some(preview) = &state.preview else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Load .odt files to preview their hysteresis loop  (File → Open…)");
        });
        return;
    };

    let frame = match &preview.frame {
        Ok(frame) => frame,
        Err(msg) => {
            ui.heading(preview.title.as_str());
            ui.label(RichText::new(msg).color(Color32::RED));
            return;
        }
    };

    ui.horizontal(|ui: &mut Ui| {
        ui.heading(preview.title.as_str());
        ui.label(format!("{}°, {} rows", frame.angle(), frame.len()))
            .on_hover_text(format!(
                "Bx: {}\nBy: {}",
                raw_range(frame.bx()),
                raw_range(frame.by())
            ));
        if frame.field_from_by() {
            ui.label(RichText::new("field axis: By").italics());
        }
    });

    let colors = state.style.colors;
    let width = state.style.line_width as f32;

    Plot::new("hysteresis_plot")
        .legend(Legend::default())
        .x_axis_label("H / mT")
        .y_axis_label("M / Msat")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.hline(HLine::new(0.0).color(Color32::BLACK).width(0.5));
            plot_ui.vline(VLine::new(0.0).color(Color32::BLACK).width(0.5));

            let long: PlotPoints = frame.longitudinal_points().map(|(h, m)| [h, m]).collect();
            plot_ui.line(
                Line::new(long)
                    .name("M_long")
                    .color(to_color32(colors.longitudinal))
                    .width(width),
            );

            let trans: PlotPoints = frame.transversal_points().map(|(h, m)| [h, m]).collect();
            plot_ui.line(
                Line::new(trans)
                    .name("M_trans")
                    .color(to_color32(colors.transversal))
                    .width(width),
            );
        });
}

/// Min and max of a raw field column, for the header tooltip.
fn raw_range(values: &[f64]) -> String {
    if values.is_empty() {
        return "no data".to_string();
    }
    let (lo, hi) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    format!("{lo:.1} … {hi:.1} mT")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_range() {
        assert_eq!(raw_range(&[]), "no data");
        assert_eq!(raw_range(&[5.0, -100.0, 100.0]), "-100.0 … 100.0 mT");
    }
}
