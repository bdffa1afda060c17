//! Distance-vs-age scatter with the least-squares spreading-rate line.
use egui::{Color32, Ui};
use egui_plot::{Legend, Line, MarkerShape, Plot, PlotPoints, Points};

use engine::stats::RateFit;
use engine::{AnomalyTable, Polarity, SpreadingRate};

use crate::session::{Dataset, Session};

/// Scatter points split by polarity, `[distance_km, age_myr]`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ScatterSeries {
    pub normal: Vec<[f64; 2]>,
    pub reversed: Vec<[f64; 2]>,
}

impl ScatterSeries {
    pub fn from_table(table: &AnomalyTable) -> Self {
        let mut s = Self::default();
        for r in table {
            let p = [r.distance_from_ridge, r.age];
            match r.polarity {
                Polarity::Normal => s.normal.push(p),
                Polarity::Reversed => s.reversed.push(p),
            }
        }
        s
    }

    pub fn len(&self) -> usize {
        self.normal.len() + self.reversed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// End points of the fitted line over `[0, oldest]`, as `[distance, age]`.
pub fn fit_line_points(fit: &RateFit, oldest_myr: f64) -> Vec<[f64; 2]> {
    vec![[fit.predict_km(0.0), 0.0], [fit.predict_km(oldest_myr), oldest_myr]]
}

fn rate_colors(rate: SpreadingRate) -> (Color32, Color32) {
    match rate {
        SpreadingRate::Slow => (Color32::from_rgb(33, 102, 172), Color32::from_rgb(146, 197, 222)),
        SpreadingRate::Fast => (Color32::from_rgb(178, 24, 43), Color32::from_rgb(244, 165, 130)),
    }
}

fn add_dataset(plot_ui: &mut egui_plot::PlotUi, rate: SpreadingRate, ds: &Dataset) {
    let (c_norm, c_rev) = rate_colors(rate);
    let series = ScatterSeries::from_table(&ds.table);
    plot_ui.points(
        Points::new(PlotPoints::from(series.normal))
            .name(format!("{rate}: normal"))
            .color(c_norm)
            .shape(MarkerShape::Circle)
            .radius(2.5),
    );
    plot_ui.points(
        Points::new(PlotPoints::from(series.reversed))
            .name(format!("{rate}: reversed"))
            .color(c_rev)
            .shape(MarkerShape::Diamond)
            .radius(2.5),
    );
    if let Some(fit) = ds.fit {
        plot_ui.line(
            Line::new(PlotPoints::from(fit_line_points(&fit, ds.summary.oldest_myr)))
                .name(format!("{rate} fit ≈ {:.1} mm/yr", fit.half_rate_mm_per_yr()))
                .color(c_norm),
        );
    }
}

/// Draw the scatter; `compare` overlays both rate classes.
pub fn ui(ui: &mut Ui, session: &Session, compare: bool) {
    let active = session.config.anomaly.spreading_rate;
    Plot::new("distance_vs_age")
        .legend(Legend::default())
        .x_axis_label("Distance from ridge (km)")
        .y_axis_label("Age (Myr)")
        .include_x(0.0)
        .include_y(0.0)
        .show(ui, |plot_ui| {
            if compare {
                for rate in SpreadingRate::ALL {
                    add_dataset(plot_ui, rate, session.dataset(rate));
                }
            } else {
                add_dataset(plot_ui, active, session.active());
            }
        });
}
