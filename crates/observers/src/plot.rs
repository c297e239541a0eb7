//! Plotting observer for temperature histories.
//!
//! See [`PlotObserver`] and [`Plottable`] for usage.

use eframe::egui;
use egui_plot::{Legend, Line, Plot, PlotPoints};
use spacetherm_core::Observer;

/// Configuration for rendering a [`PlotObserver`] result.
///
/// Construct with [`ShowConfig::new`] and chain builder methods as needed.
///
/// # Example
///
/// ```ignore
/// obs.show(ShowConfig::new().title("Thermal Sim - Earth").legend().y_label("K"))?;
/// ```
pub struct ShowConfig {
    title: Option<String>,
    legend: bool,
    x_label: Option<String>,
    y_label: Option<String>,
}

impl ShowConfig {
    /// Creates a new `ShowConfig` with defaults: no title, legend, or axis labels.
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: None,
            legend: false,
            x_label: None,
            y_label: None,
        }
    }

    /// Sets the window title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Enables a legend labeling each trace by name.
    #[must_use]
    pub fn legend(mut self) -> Self {
        self.legend = true;
        self
    }

    #[must_use]
    pub fn x_label(mut self, label: impl Into<String>) -> Self {
        self.x_label = Some(label.into());
        self
    }

    #[must_use]
    pub fn y_label(mut self, label: impl Into<String>) -> Self {
        self.y_label = Some(label.into());
        self
    }
}

impl Default for ShowConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Extracts plottable data from a solver event.
///
/// Return `None` from [`x`][Plottable::x] to skip the event entirely, or
/// `None` in a trace slot to skip that trace for the event. Solver events
/// from `spacetherm-solvers` are foreign to most crates, so they are usually
/// recorded through [`PlotObserver::record`] from a closure instead.
pub trait Plottable {
    /// The x-axis value for this event, or `None` to skip recording entirely.
    fn x(&self) -> Option<f64>;

    /// The y-axis values, one per trace in the order the observer was
    /// created with. Missing trailing slots are skipped.
    fn traces(&self) -> Vec<Option<f64>>;
}

/// An observer that collects trace data during solving and displays it via egui.
///
/// Create with [`PlotObserver::new`], passing one name per trace. Record data
/// either by implementing [`Plottable`] on the event type, or by calling
/// [`record`][PlotObserver::record] from a closure:
///
/// ```ignore
/// let mut obs = PlotObserver::new(model.component_names());
///
/// dopri5::solve(&model, &ThermalProblem, input, t_end, &config, |event: &dopri5::Event<_, _>| {
///     if let Some(snapshot) = event.snapshot() {
///         obs.record(
///             snapshot.input.time,
///             snapshot.input.state.temperatures().iter().copied().map(Some),
///         );
///     }
///     None
/// })?;
///
/// obs.show(ShowConfig::new().title("Thermal Sim").legend())?;
/// ```
pub struct PlotObserver {
    names: Vec<String>,
    data: Vec<Vec<[f64; 2]>>,
}

impl PlotObserver {
    /// Creates a new `PlotObserver` with the given trace names.
    pub fn new<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let data = vec![Vec::new(); names.len()];
        Self { names, data }
    }

    /// Number of traces.
    pub fn trace_count(&self) -> usize {
        self.names.len()
    }

    /// Records a single data point across all traces.
    ///
    /// For each trace slot, `None` skips recording for that trace while
    /// leaving other traces unaffected. Values beyond the last trace are
    /// ignored.
    pub fn record(&mut self, x: f64, traces: impl IntoIterator<Item = Option<f64>>) {
        for (points, y) in self.data.iter_mut().zip(traces) {
            if let Some(y) = y {
                points.push([x, y]);
            }
        }
    }

    /// Opens a blocking egui window displaying all collected traces.
    ///
    /// Blocks until the window is closed by the user.
    ///
    /// # Errors
    ///
    /// Returns an error if the native window cannot be created.
    pub fn show(self, config: ShowConfig) -> Result<(), eframe::Error> {
        let options = eframe::NativeOptions::default();
        let title = config.title.clone().unwrap_or_default();
        let traces: Vec<(String, Vec<[f64; 2]>)> = self.names.into_iter().zip(self.data).collect();

        eframe::run_native(
            &title,
            options,
            Box::new(move |_cc| Ok(Box::new(PlotApp { traces, config }))),
        )
    }
}

impl<E, A> Observer<E, A> for PlotObserver
where
    E: Plottable,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        if let Some(x) = event.x() {
            self.record(x, event.traces());
        }
        None
    }
}

/// Allows `&mut PlotObserver` to be passed to solvers that take an observer
/// by value, so [`PlotObserver::show`] can be called after the solve completes.
impl<E, A> Observer<E, A> for &mut PlotObserver
where
    E: Plottable,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        (*self).observe(event)
    }
}

/// The egui [`eframe::App`] that renders collected traces.
struct PlotApp {
    traces: Vec<(String, Vec<[f64; 2]>)>,
    config: ShowConfig,
}

impl eframe::App for PlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let mut plot = Plot::new("plot_observer");
            if self.config.legend {
                plot = plot.legend(Legend::default());
            }
            if let Some(label) = &self.config.x_label {
                plot = plot.x_axis_label(label.as_str());
            }
            if let Some(label) = &self.config.y_label {
                plot = plot.y_axis_label(label.as_str());
            }
            plot.show(ui, |plot_ui| {
                for (name, points) in &self.traces {
                    let plot_points: PlotPoints = points.iter().copied().collect();
                    plot_ui.line(Line::new(plot_points).name(name));
                }
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spacetherm_core::Observer;

    #[derive(Clone)]
    struct Event {
        x: Option<f64>,
        temps: Vec<Option<f64>>,
    }

    impl Plottable for Event {
        fn x(&self) -> Option<f64> {
            self.x
        }

        fn traces(&self) -> Vec<Option<f64>> {
            self.temps.clone()
        }
    }

    fn make_observer() -> PlotObserver {
        PlotObserver::new(["Radiators", "Sample Box"])
    }

    fn points(obs: &PlotObserver, trace: usize) -> &[[f64; 2]] {
        &obs.data[trace]
    }

    fn feed(obs: &mut PlotObserver, event: Event) {
        let _: Option<()> = obs.observe(&event);
    }

    #[test]
    fn records_point_when_both_x_and_y_are_some() {
        let mut obs = make_observer();
        feed(
            &mut obs,
            Event {
                x: Some(0.0),
                temps: vec![Some(293.0), Some(180.0)],
            },
        );
        assert_eq!(points(&obs, 0), [[0.0, 293.0]]);
        assert_eq!(points(&obs, 1), [[0.0, 180.0]]);
    }

    #[test]
    fn skips_all_traces_when_x_is_none() {
        let mut obs = make_observer();
        feed(
            &mut obs,
            Event {
                x: None,
                temps: vec![Some(293.0), Some(180.0)],
            },
        );
        assert!(points(&obs, 0).is_empty());
        assert!(points(&obs, 1).is_empty());
    }

    #[test]
    fn skips_only_affected_trace_when_y_is_none() {
        let mut obs = make_observer();
        feed(
            &mut obs,
            Event {
                x: Some(10.0),
                temps: vec![None, Some(181.0)],
            },
        );
        assert!(points(&obs, 0).is_empty());
        assert_eq!(points(&obs, 1), [[10.0, 181.0]]);
    }

    #[test]
    fn ignores_values_beyond_the_last_trace() {
        let mut obs = make_observer();
        obs.record(5.0, [Some(1.0), Some(2.0), Some(3.0)]);

        assert_eq!(obs.trace_count(), 2);
        assert_eq!(points(&obs, 0), [[5.0, 1.0]]);
        assert_eq!(points(&obs, 1), [[5.0, 2.0]]);
    }

    #[test]
    fn accumulates_points_across_calls() {
        let mut obs = make_observer();
        obs.record(0.0, [Some(293.0), None]);
        obs.record(100.0, [Some(290.0), Some(182.0)]);

        assert_eq!(points(&obs, 0), [[0.0, 293.0], [100.0, 290.0]]);
        assert_eq!(points(&obs, 1), [[100.0, 182.0]]);
    }
}
