//! GameView: maps `core::GameState` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! The 3D board is shown as two orthographic panels, both oriented by the camera
//! so that the player's "away" is up on screen (top view) or into the screen
//! (front view):
//!
//! - **TOP**: one cell per column, colored by its topmost cube and brighter the
//!   taller the column
//! - **FRONT**: one cell per (column, layer), colored by the cube nearest to the
//!   viewer and darker the further back it sits
//!
//! The falling block is drawn over both panels.

use glam::{IVec3, Vec3};

use crate::core::{resolve_command, BlockMove, GameState};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::input::{key_label, KeyMap};
use crate::types::{Command, Phase};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

const BG: Rgb = Rgb::new(0, 0, 0);
const WELL_BG: Rgb = Rgb::new(30, 30, 40);

/// Screen orientation of the board for one view direction.
///
/// `away` and `right` are unit vectors along +/-X or +/-Z.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Facing {
    pub away: IVec3,
    pub right: IVec3,
}

impl Facing {
    /// Snap a view direction to the board axis the controls use for "away"
    pub fn from_view(view: Vec3) -> Self {
        let away = match resolve_command(Command::MoveAway, view) {
            Some(BlockMove::Translate(delta)) => delta,
            _ => IVec3::NEG_Z,
        };
        Self {
            away,
            right: away.cross(IVec3::Y),
        }
    }

    pub fn label(&self) -> &'static str {
        match (self.away.x, self.away.z) {
            (1, _) => "+X",
            (-1, _) => "-X",
            (_, 1) => "+Z",
            _ => "-Z",
        }
    }

    fn along(v: IVec3, axis: IVec3) -> i32 {
        if axis.x != 0 {
            v.x
        } else {
            v.z
        }
    }

    fn positive(axis: IVec3) -> bool {
        axis.x + axis.z > 0
    }
}

/// Board extents projected on the facing axes
#[derive(Debug, Clone, Copy)]
struct Projection {
    facing: Facing,
    /// Cells across the screen
    cols: i32,
    /// Cells from the viewer to the back
    rows: i32,
    layers: i32,
}

impl Projection {
    fn new(facing: Facing, state: &GameState) -> Self {
        let board = state.board();
        let extent = |axis: IVec3| {
            if axis.x != 0 {
                board.width() as i32
            } else {
                board.depth() as i32
            }
        };
        Self {
            facing,
            cols: extent(facing.right),
            rows: extent(facing.away),
            layers: board.height() as i32,
        }
    }

    /// Screen column of a world cell, 0 = left
    fn col(&self, cell: IVec3) -> i32 {
        let v = Facing::along(cell, self.facing.right);
        if Facing::positive(self.facing.right) {
            v
        } else {
            self.cols - 1 - v
        }
    }

    /// Distance from the viewer, 0 = nearest
    fn depth(&self, cell: IVec3) -> i32 {
        let v = Facing::along(cell, self.facing.away);
        if Facing::positive(self.facing.away) {
            v
        } else {
            self.rows - 1 - v
        }
    }

    /// World cell at a screen column, viewer distance and layer
    fn cell(&self, col: i32, depth: i32, layer: i32) -> IVec3 {
        let r = if Facing::positive(self.facing.right) {
            col
        } else {
            self.cols - 1 - col
        };
        let a = if Facing::positive(self.facing.away) {
            depth
        } else {
            self.rows - 1 - depth
        };
        if self.facing.away.x != 0 {
            IVec3::new(a, layer, r)
        } else {
            IVec3::new(r, layer, a)
        }
    }

    fn in_columns(&self, cell: IVec3) -> bool {
        let col = self.col(cell);
        let depth = self.depth(cell);
        (0..self.cols).contains(&col) && (0..self.rows).contains(&depth)
    }
}

/// Panel placement, in terminal cells
#[derive(Debug, Clone, Copy)]
struct Layout {
    top_x: u16,
    front_x: u16,
    y: u16,
    top_w: u16,
    top_h: u16,
    front_w: u16,
    front_h: u16,
    total_w: u16,
    total_h: u16,
}

/// A lightweight terminal renderer for the 3D board.
#[derive(Debug, Clone)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    keys: KeyMap,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            keys: KeyMap::default(),
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            ..Self::default()
        }
    }

    /// Show these bindings in the controls panel
    pub fn with_keys(mut self, keys: KeyMap) -> Self {
        self.keys = keys;
        self
    }

    /// Render the game into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(
        &self,
        state: &GameState,
        view_direction: Vec3,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let facing = Facing::from_view(view_direction);
        let proj = Projection::new(facing, state);
        let layout = self.layout(&proj, viewport);

        let border = CellStyle::new(Rgb::new(200, 200, 200), BG);
        let well = CellStyle::new(Rgb::new(80, 80, 90), WELL_BG);

        fb.fill_rect(
            layout.top_x + 1,
            layout.y + 1,
            layout.top_w - 2,
            layout.top_h - 2,
            ' ',
            well,
        );
        fb.fill_rect(
            layout.front_x + 1,
            layout.y + 1,
            layout.front_w - 2,
            layout.front_h - 2,
            ' ',
            well,
        );
        draw_border(fb, layout.top_x, layout.y, layout.top_w, layout.top_h, border, "TOP");
        draw_border(
            fb,
            layout.front_x,
            layout.y,
            layout.front_w,
            layout.front_h,
            border,
            "FRONT",
        );

        self.draw_top(fb, state, &proj, &layout);
        self.draw_front(fb, state, &proj, &layout);
        self.draw_side_panel(fb, state, facing, viewport, &layout);

        if state.paused() {
            draw_overlay_text(fb, &layout, "PAUSED");
        } else if state.phase() == Phase::Lost {
            draw_overlay_text(fb, &layout, "GAME OVER");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, state: &GameState, view_direction: Vec3, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(state, view_direction, viewport, &mut fb);
        fb
    }

    fn layout(&self, proj: &Projection, viewport: Viewport) -> Layout {
        let top_w = (proj.cols as u16).saturating_mul(self.cell_w).saturating_add(2);
        let top_h = (proj.rows as u16).saturating_add(2);
        let front_w = top_w;
        let front_h = (proj.layers as u16).saturating_add(2);
        let total_w = top_w + 1 + front_w;
        let total_h = top_h.max(front_h);

        let top_x = viewport.width.saturating_sub(total_w) / 2;
        Layout {
            top_x,
            front_x: top_x + top_w + 1,
            y: viewport.height.saturating_sub(total_h) / 2,
            top_w,
            top_h,
            front_w,
            front_h,
            total_w,
            total_h,
        }
    }

    fn put_cell(&self, fb: &mut FrameBuffer, panel_x: u16, panel_y: u16, col: i32, row: i32, ch: char, style: CellStyle) {
        let x = panel_x + 1 + col as u16 * self.cell_w;
        let y = panel_y + 1 + row as u16;
        fb.fill_rect(x, y, self.cell_w, 1, ch, style);
    }

    fn draw_top(&self, fb: &mut FrameBuffer, state: &GameState, proj: &Projection, layout: &Layout) {
        let board = state.board();
        let empty = CellStyle::new(Rgb::new(90, 90, 100), WELL_BG).dim();

        for col in 0..proj.cols {
            for depth in 0..proj.rows {
                let cell = proj.cell(col, depth, 0);
                let row = proj.rows - 1 - depth;
                let height = board.column_height(cell.x, cell.z);
                if height == 0 {
                    self.put_cell(fb, layout.top_x, layout.y, col, row, '·', empty);
                    continue;
                }
                let top = IVec3::new(cell.x, height as i32 - 1, cell.z);
                let color = Rgb::from_packed(board.get(top).unwrap_or(0));
                let shade = 0.35 + 0.65 * height as f32 / proj.layers.max(1) as f32;
                let style = CellStyle::new(color.scaled(shade), WELL_BG);
                self.put_cell(fb, layout.top_x, layout.y, col, row, '█', style);
            }
        }

        let block = state.falling_block();
        let style = CellStyle::new(Rgb::from(block.color).highlighted(), WELL_BG).bold();
        for cube in block.cubes() {
            if proj.in_columns(cube) {
                let row = proj.rows - 1 - proj.depth(cube);
                self.put_cell(fb, layout.top_x, layout.y, proj.col(cube), row, '▓', style);
            }
        }
    }

    fn draw_front(&self, fb: &mut FrameBuffer, state: &GameState, proj: &Projection, layout: &Layout) {
        let board = state.board();
        let empty = CellStyle::new(Rgb::new(60, 60, 70), WELL_BG).dim();
        let far = (proj.rows - 1).max(1) as f32;

        for col in 0..proj.cols {
            for layer in 0..proj.layers {
                let row = proj.layers - 1 - layer;
                let nearest = (0..proj.rows).find_map(|depth| {
                    let value = board.get(proj.cell(col, depth, layer)).unwrap_or(0);
                    (value != 0).then_some((depth, value))
                });
                match nearest {
                    Some((depth, value)) => {
                        let shade = 1.0 - 0.6 * depth as f32 / far;
                        let style = CellStyle::new(Rgb::from_packed(value).scaled(shade), WELL_BG);
                        self.put_cell(fb, layout.front_x, layout.y, col, row, '█', style);
                    }
                    None => self.put_cell(fb, layout.front_x, layout.y, col, row, '·', empty),
                }
            }
        }

        let block = state.falling_block();
        let style = CellStyle::new(Rgb::from(block.color).highlighted(), WELL_BG).bold();
        for cube in block.cubes() {
            let col = proj.col(cube);
            if (0..proj.cols).contains(&col) && (0..proj.layers).contains(&cube.y) {
                let row = proj.layers - 1 - cube.y;
                self.put_cell(fb, layout.front_x, layout.y, col, row, '▓', style);
            }
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        state: &GameState,
        facing: Facing,
        viewport: Viewport,
        layout: &Layout,
    ) {
        let panel_x = layout
            .front_x
            .saturating_add(layout.front_w)
            .saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 12 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), BG);
        let dim = value.dim();

        let mut y = layout.y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, state.score(), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "LEVEL", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, state.level(), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "PHASE", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, state.phase().as_str(), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "FALL", label);
        y = y.saturating_add(1);
        let ms = (state.block_current_speed() * 1000.0).round() as u32;
        let x = fb.put_u32(panel_x, y, ms, value);
        fb.put_str(x, y, "ms", dim);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "TIME", label);
        y = y.saturating_add(1);
        let x = fb.put_u32(panel_x, y, state.total_time() as u32, value);
        fb.put_str(x, y, "s", dim);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "VIEW", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, facing.label(), value);
        y = y.saturating_add(2);

        let controls: [(&[Command], &str); 7] = [
            (
                &[Command::VerticalRotateAway, Command::VerticalRotateTowards],
                "tilt",
            ),
            (
                &[
                    Command::HorizontalRotateClockwise,
                    Command::HorizontalRotateCounterClockwise,
                ],
                "spin",
            ),
            (&[Command::MoveAway, Command::MoveTowards], "move"),
            (&[Command::Accelerate], "drop"),
            (
                &[
                    Command::CameraLeft,
                    Command::CameraRight,
                    Command::CameraUp,
                    Command::CameraDown,
                ],
                "view",
            ),
            (&[Command::Pause], "pause"),
            (&[Command::Quit], "quit"),
        ];
        for (commands, action) in controls {
            if y >= viewport.height {
                break;
            }
            let mut x = panel_x;
            for (i, cmd) in commands.iter().enumerate() {
                if i > 0 {
                    x = fb.put_str(x, y, "/", dim);
                }
                x = fb.put_str(x, y, &key_label(self.keys.key_for(*cmd)), value);
            }
            fb.put_str(x.saturating_add(1), y, action, dim);
            y = y.saturating_add(1);
        }
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle, title: &str) {
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }

    if (title.chars().count() as u16) + 4 <= w {
        fb.put_str(x + 2, y, title, style.bold());
    }
}

fn draw_overlay_text(fb: &mut FrameBuffer, layout: &Layout, text: &str) {
    let mid_y = layout.y.saturating_add(layout.total_h / 2);
    let text_w = text.chars().count() as u16;
    let x = layout
        .top_x
        .saturating_add(layout.total_w.saturating_sub(text_w) / 2);
    let style = CellStyle::new(Rgb::new(255, 255, 255), BG).bold();
    fb.put_str(x, mid_y, text, style);
}
