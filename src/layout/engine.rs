//! Card layout engine.
//!
//! Places words one by one into the card grid and issues the drawing
//! commands for each card to a [`Canvas`].

use super::placement::{CardHalf, Placement, Slot};
use crate::canvas::{Canvas, Orientation};
use crate::config::{Decoration, GridSpec, CROSSHAIR_GRAY, CROSSHAIR_SIZE, FOLD_DASH};
use crate::error::Result;
use crate::geometry::{Point, Rect};
use crate::pagination::Balancing;

/// Lays out words on cards and draws them onto a canvas.
///
/// ```
/// use krucindiko::canvas::RecordingCanvas;
/// use krucindiko::config::{Decoration, GridSpec};
/// use krucindiko::layout::CardLayout;
/// use krucindiko::pagination::Balancing;
///
/// let mut layout = CardLayout::new(
///     RecordingCanvas::new(),
///     GridSpec::standard(),
///     Decoration::Crosshairs,
///     Balancing::Unbalanced,
/// );
/// layout.render(["kato", "hundo"]).unwrap();
/// assert_eq!(layout.pages_started(), 1);
/// let commands = layout.finish().unwrap();
/// assert!(!commands.is_empty());
/// ```
pub struct CardLayout<C: Canvas> {
    canvas: C,
    grid: GridSpec,
    decoration: Decoration,
    balancing: Balancing,
    placement: Placement,
    page_open: bool,
    pages_started: usize,
}

impl<C: Canvas> CardLayout<C> {
    /// Create a layout engine drawing onto `canvas`.
    pub fn new(canvas: C, grid: GridSpec, decoration: Decoration, balancing: Balancing) -> Self {
        Self {
            canvas,
            placement: Placement::new(grid.words_per_page()),
            grid,
            decoration,
            balancing,
            page_open: false,
            pages_started: 0,
        }
    }

    /// Index at which the next word will be placed.
    pub fn placement_index(&self) -> usize {
        self.placement.index()
    }

    /// Number of pages begun so far.
    pub fn pages_started(&self) -> usize {
        self.pages_started
    }

    /// Place every word in order.
    pub fn render<'w>(&mut self, words: impl IntoIterator<Item = &'w str>) -> Result<()> {
        for word in words {
            self.add_word(word)?;
        }
        Ok(())
    }

    /// Place the next word.
    pub fn add_word(&mut self, word: &str) -> Result<()> {
        if self.placement.balance(&self.balancing) {
            log::debug!("Starting page early at index {}", self.placement.index());
        }

        let slot = self.placement.slot(&self.grid);

        if slot.starts_page() {
            if self.page_open {
                self.canvas.end_page()?;
            }
            self.canvas.begin_page()?;
            self.page_open = true;
            self.pages_started += 1;
            self.draw_decoration();
        }

        let card = self.card_rect(&slot);
        self.draw_fold_line(card);

        let (top, bottom) = card.split_horizontally();
        let (area, orientation) = match slot.half() {
            CardHalf::Top => (top, Orientation::Upright),
            CardHalf::Bottom => (bottom, Orientation::Inverted),
        };
        self.canvas.set_font_size(self.grid.font_size());
        self.canvas.draw_text_centered(word, area, orientation)?;

        self.placement.place_next();
        Ok(())
    }

    /// Close the last page and finish the canvas.
    pub fn finish(mut self) -> Result<C::Output> {
        if self.page_open {
            self.canvas.end_page()?;
        }
        self.canvas.finish()
    }

    /// Square occupied by the card of `slot`.
    fn card_rect(&self, slot: &Slot) -> Rect {
        let (start_x, start_y) = self.grid.cards_start();
        let size = self.grid.card_size;
        Rect::new(
            start_x + slot.column as f32 * size,
            start_y + slot.row as f32 * size,
            size,
            size,
        )
    }

    fn draw_fold_line(&mut self, card: Rect) {
        let size = self.grid.card_size;
        let y = card.top() + size / 2.0;

        self.canvas.set_stroke_gray(0.0);
        self.canvas.set_dash(&FOLD_DASH);
        self.canvas.move_to(Point::new(card.left() + size / 8.0, y));
        self.canvas.line_to(Point::new(card.left() + size * 7.0 / 8.0, y));
        self.canvas.stroke();
    }

    fn draw_decoration(&mut self) {
        match self.decoration {
            Decoration::Crosshairs => self.draw_crosshairs(),
            Decoration::Outlines => self.draw_outlines(),
        }
    }

    /// Grey `+` marks at every grid intersection.
    fn draw_crosshairs(&mut self) {
        let (start_x, start_y) = self.grid.cards_start();
        let size = self.grid.card_size;
        let arm = CROSSHAIR_SIZE / 2.0;

        self.canvas.set_stroke_gray(CROSSHAIR_GRAY);
        self.canvas.set_dash(&[]);

        for y in 0..=self.grid.rows {
            for x in 0..=self.grid.columns {
                let center = Point::new(start_x + size * x as f32, start_y + size * y as f32);
                self.canvas.move_to(center.offset(0.0, -arm));
                self.canvas.line_to(center.offset(0.0, arm));
                self.canvas.move_to(center.offset(arm, 0.0));
                self.canvas.line_to(center.offset(-arm, 0.0));
            }
        }

        self.canvas.stroke();
    }

    /// Solid cut lines along every column and row boundary.
    fn draw_outlines(&mut self) {
        let (start_x, start_y) = self.grid.cards_start();
        let size = self.grid.card_size;
        let width = size * self.grid.columns as f32;
        let height = size * self.grid.rows as f32;

        self.canvas.set_stroke_gray(0.0);
        self.canvas.set_dash(&[]);

        for x in 0..=self.grid.columns {
            let left = start_x + size * x as f32;
            self.canvas.move_to(Point::new(left, start_y));
            self.canvas.line_to(Point::new(left, start_y + height));
        }
        for y in 0..=self.grid.rows {
            let top = start_y + size * y as f32;
            self.canvas.move_to(Point::new(start_x, top));
            self.canvas.line_to(Point::new(start_x + width, top));
        }

        self.canvas.stroke();
    }
}
