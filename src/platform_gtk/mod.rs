//! GTK4 host view for [`PriceChart`].
//!
//! The adapter owns a `DrawingArea`, forwards pointer and touch input to the
//! chart and repaints through the cairo backend.

use std::cell::RefCell;
use std::rc::Rc;

use gtk4 as gtk;
use gtk4::prelude::*;
use tracing::warn;

use crate::api::{PriceChart, PriceChartConfig};
use crate::core::{DataPoint, Viewport};
use crate::error::ChartResult;
use crate::render::CairoRenderer;

pub type SharedPriceChart = Rc<RefCell<PriceChart<CairoRenderer>>>;

pub struct GtkPriceChart {
    chart: SharedPriceChart,
    drawing_area: gtk::DrawingArea,
}

impl GtkPriceChart {
    pub fn new(config: PriceChartConfig) -> ChartResult<Self> {
        let width = i32::try_from(config.viewport.width).unwrap_or(i32::MAX);
        let height = i32::try_from(config.viewport.height).unwrap_or(i32::MAX);
        let renderer = CairoRenderer::new(width.max(1), height.max(1))?;
        let chart = Rc::new(RefCell::new(PriceChart::new(renderer, config)?));

        let drawing_area = gtk::DrawingArea::new();
        drawing_area.set_content_width(width);
        drawing_area.set_content_height(height);
        drawing_area.set_hexpand(true);
        drawing_area.set_vexpand(true);

        let adapter = Self {
            chart,
            drawing_area,
        };
        adapter.install_draw_func();
        adapter.install_pointer_controllers();
        Ok(adapter)
    }

    #[must_use]
    pub fn chart(&self) -> SharedPriceChart {
        Rc::clone(&self.chart)
    }

    #[must_use]
    pub fn drawing_area(&self) -> &gtk::DrawingArea {
        &self.drawing_area
    }

    /// Replaces the series and schedules a repaint.
    pub fn set_data(&self, points: Vec<DataPoint>) {
        if let Ok(mut chart) = self.chart.try_borrow_mut() {
            chart.set_data(points);
        }
        self.drawing_area.queue_draw();
    }

    fn install_draw_func(&self) {
        let chart = Rc::clone(&self.chart);
        self.drawing_area
            .set_draw_func(move |_, context, width, height| {
                let Ok(mut chart) = chart.try_borrow_mut() else {
                    return;
                };
                let viewport = Viewport::new(
                    u32::try_from(width).unwrap_or(0),
                    u32::try_from(height).unwrap_or(0),
                );
                chart.set_viewport(viewport);
                if let Err(err) = chart.render_on_cairo_context(context) {
                    warn!(error = %err, "price chart draw failed");
                }
            });
    }

    fn install_pointer_controllers(&self) {
        let motion = gtk::EventControllerMotion::new();
        {
            let chart = Rc::clone(&self.chart);
            let drawing_area = self.drawing_area.clone();
            motion.connect_motion(move |_, x, y| {
                if let Ok(mut chart) = chart.try_borrow_mut() {
                    chart.pointer_move(x, y);
                }
                drawing_area.queue_draw();
            });
        }
        {
            let chart = Rc::clone(&self.chart);
            let drawing_area = self.drawing_area.clone();
            motion.connect_leave(move |_| {
                if let Ok(mut chart) = chart.try_borrow_mut() {
                    chart.pointer_leave();
                }
                drawing_area.queue_draw();
            });
        }
        self.drawing_area.add_controller(motion);

        let touch = gtk::GestureDrag::new();
        touch.set_touch_only(true);
        {
            let chart = Rc::clone(&self.chart);
            let drawing_area = self.drawing_area.clone();
            touch.connect_drag_begin(move |_, x, y| {
                if let Ok(mut chart) = chart.try_borrow_mut() {
                    chart.touch_move(x, y);
                }
                drawing_area.queue_draw();
            });
        }
        {
            let chart = Rc::clone(&self.chart);
            let drawing_area = self.drawing_area.clone();
            touch.connect_drag_update(move |gesture, dx, dy| {
                let Some((start_x, start_y)) = gesture.start_point() else {
                    return;
                };
                if let Ok(mut chart) = chart.try_borrow_mut() {
                    chart.touch_move(start_x + dx, start_y + dy);
                }
                drawing_area.queue_draw();
            });
        }
        {
            let chart = Rc::clone(&self.chart);
            let drawing_area = self.drawing_area.clone();
            touch.connect_drag_end(move |_, _, _| {
                if let Ok(mut chart) = chart.try_borrow_mut() {
                    chart.pointer_leave();
                }
                drawing_area.queue_draw();
            });
        }
        self.drawing_area.add_controller(touch);
    }
}
