//! Text renderer drawing the grid one character per cell.

use floorplan_core::elements::ElementKind;
use floorplan_core::{Footprint, Frame, GridCoord, Layer, Placeable, Renderer};

/// Cell with nothing on it.
pub const EMPTY: char = ' ';
/// Cell inside a room.
pub const INTERIOR: char = '.';
/// Cell covered by the live wall/room preview.
pub const PREVIEW: char = '+';
/// Selected cell whose glyph has no uppercase form.
pub const SELECTED: char = '*';

/// Glyph for an element kind. Rooms only show through the interior mask.
pub fn glyph(kind: ElementKind) -> Option<char> {
    match kind {
        ElementKind::Wall => Some('#'),
        ElementKind::Room => None,
        ElementKind::Door => Some('d'),
        ElementKind::Window => Some('w'),
        ElementKind::Fan => Some('f'),
        ElementKind::Chair => Some('c'),
        ElementKind::Table => Some('t'),
        ElementKind::Bed => Some('b'),
    }
}

fn highlight(c: char) -> char {
    if c.is_ascii_alphabetic() { c.to_ascii_uppercase() } else { SELECTED }
}

struct Canvas {
    size: usize,
    cells: Vec<char>,
}

impl Canvas {
    fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![EMPTY; size * size],
        }
    }

    fn get_mut(&mut self, coord: GridCoord) -> Option<&mut char> {
        let x = usize::try_from(coord.x).ok()?;
        let y = usize::try_from(coord.y).ok()?;
        if x >= self.size || y >= self.size {
            return None;
        }
        self.cells.get_mut(y * self.size + x)
    }

    fn paint(&mut self, footprint: Footprint, glyph: char) {
        for cell in footprint.cells() {
            if let Some(c) = self.get_mut(cell) {
                *c = glyph;
            }
        }
    }

    fn coords(&self) -> impl Iterator<Item = GridCoord> + use<> {
        let size = self.size as i32;
        (0..size).flat_map(move |y| (0..size).map(move |x| GridCoord::new(x, y)))
    }

    fn into_text(self) -> String {
        self.cells
            .chunks(self.size.max(1))
            .map(|row| row.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Render a frame to text, one row per line.
///
/// With `heatmap` set, empty and interior cells show the overlay value
/// scaled to a digit `0`-`9`.
pub fn render_frame(frame: &Frame<'_>, heatmap: bool) -> String {
    let document = frame.document;
    let mut canvas = Canvas::new(document.grid_size as usize);

    if let Some(mask) = frame.interior {
        for coord in canvas.coords() {
            if mask.is_interior(coord) {
                canvas.paint(Footprint::cell(coord), INTERIOR);
            }
        }
    }

    if heatmap {
        if let Some(map) = &document.overlay_layer.heatmap {
            for coord in canvas.coords() {
                let Some(value) = map.normalized_at(coord.y as usize, coord.x as usize) else {
                    continue;
                };
                let digit = char::from_digit((value * 9.0).round() as u32, 10).unwrap_or(EMPTY);
                canvas.paint(Footprint::cell(coord), digit);
            }
        }
    }

    // Lowest priority first so the element a click would select ends up on top.
    for layer in [Layer::Structural, Layer::Furniture] {
        for &kind in layer.priority().iter().rev() {
            let Some(glyph) = glyph(kind) else {
                continue;
            };
            for element in document.iter_kind(kind) {
                canvas.paint(element.footprint(), glyph);
            }
        }
    }

    if let Some(element) = frame.selection.and_then(|s| document.get(s.id)) {
        for cell in element.footprint().cells() {
            if let Some(c) = canvas.get_mut(cell) {
                *c = highlight(*c);
            }
        }
    }

    if let Some(preview) = frame.preview {
        canvas.paint(preview, PREVIEW);
    }

    canvas.into_text()
}

/// Renderer keeping the most recent frame as text.
#[derive(Debug, Clone, Default)]
pub struct AsciiRenderer {
    heatmap: bool,
    last: String,
    redraws: usize,
}

impl AsciiRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the heatmap overlay on free cells.
    pub fn with_heatmap(mut self, heatmap: bool) -> Self {
        self.heatmap = heatmap;
        self
    }

    /// Text of the last redraw.
    pub fn last_frame(&self) -> &str {
        &self.last
    }

    pub fn redraw_count(&self) -> usize {
        self.redraws
    }
}

impl Renderer for AsciiRenderer {
    fn redraw(&mut self, frame: &Frame<'_>) {
        self.last = render_frame(frame, self.heatmap);
        self.redraws += 1;
        log::trace!("Redraw #{} ({:?} layer)", self.redraws, frame.active_layer);
    }
}
