pub const MIN_WINDOW_WIDTH: f64 = 300.0;
pub const MAX_WINDOW_WIDTH: f64 = 800.0;
pub const MIN_WINDOW_HEIGHT: f64 = 400.0;
pub const MAX_WINDOW_HEIGHT: f64 = 700.0;

/// Gap between the window and the bottom-right viewport corner it is
/// anchored to.
pub const VIEWPORT_MARGIN: f64 = 20.0;

pub const DEFAULT_WINDOW_WIDTH: f64 = 400.0;
pub const DEFAULT_WINDOW_HEIGHT: f64 = 500.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowSize {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Openness {
    Closed,
    Open,
}

/// Visible/hidden/minimized/resizing state for the floating chat window.
///
/// `minimized` only carries meaning while open; `resizing` is only
/// reachable from the open, non-minimized state. None of this is
/// persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatWindow {
    openness: Openness,
    minimized: bool,
    size: WindowSize,
    resizing: bool,
}

impl Default for ChatWindow {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatWindow {
    #[must_use]
    pub fn new() -> Self {
        Self {
            openness: Openness::Closed,
            minimized: false,
            size: WindowSize {
                width: DEFAULT_WINDOW_WIDTH,
                height: DEFAULT_WINDOW_HEIGHT,
            },
            resizing: false,
        }
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.openness == Openness::Open
    }

    #[must_use]
    pub fn is_minimized(&self) -> bool {
        self.is_open() && self.minimized
    }

    #[must_use]
    pub fn is_expanded(&self) -> bool {
        self.is_open() && !self.minimized
    }

    #[must_use]
    pub fn is_resizing(&self) -> bool {
        self.resizing
    }

    #[must_use]
    pub fn size(&self) -> WindowSize {
        self.size
    }

    /// Opens into the expanded state.
    pub fn open(&mut self) {
        self.openness = Openness::Open;
        self.minimized = false;
    }

    /// Closes the window, clearing the minimized flag so the next open is
    /// expanded.
    pub fn close(&mut self) {
        self.openness = Openness::Closed;
        self.minimized = false;
        self.resizing = false;
    }

    /// Flips between expanded and minimized; from closed it opens expanded.
    pub fn toggle_minimize(&mut self) {
        if !self.is_open() {
            self.open();
            return;
        }

        self.minimized = !self.minimized;
        if self.minimized {
            self.resizing = false;
        }
    }

    /// Enters the resizing state. Only accepted while expanded; returns
    /// whether the transition happened.
    pub fn begin_resize(&mut self) -> bool {
        if !self.is_expanded() {
            return false;
        }

        self.resizing = true;
        true
    }

    /// Recomputes the window size from the latest pointer position while
    /// resizing. The size is a pure function of pointer and viewport;
    /// event frequency and ordering cannot affect the result.
    pub fn resize_to(&mut self, pointer: PointerPosition, viewport: Viewport) {
        if !self.resizing {
            return;
        }

        self.size = clamp_window_size(pointer, viewport);
    }

    pub fn end_resize(&mut self) {
        self.resizing = false;
    }

    /// Window transition animation is suppressed for the duration of a
    /// resize gesture.
    #[must_use]
    pub fn animations_suppressed(&self) -> bool {
        self.resizing
    }
}

/// Size of a window anchored [`VIEWPORT_MARGIN`] off the bottom-right
/// viewport corner whose top-left corner tracks the pointer, clamped to the
/// fixed bounds.
#[must_use]
pub fn clamp_window_size(pointer: PointerPosition, viewport: Viewport) -> WindowSize {
    let width = ((viewport.width - VIEWPORT_MARGIN) - pointer.x)
        .clamp(MIN_WINDOW_WIDTH, MAX_WINDOW_WIDTH);
    let height = ((viewport.height - VIEWPORT_MARGIN) - pointer.y)
        .clamp(MIN_WINDOW_HEIGHT, MAX_WINDOW_HEIGHT);

    WindowSize { width, height }
}

#[cfg(test)]
mod tests {
    use super::{
        clamp_window_size, ChatWindow, PointerPosition, Viewport, DEFAULT_WINDOW_HEIGHT,
        DEFAULT_WINDOW_WIDTH, MAX_WINDOW_HEIGHT, MAX_WINDOW_WIDTH, MIN_WINDOW_HEIGHT,
        MIN_WINDOW_WIDTH,
    };

    const VIEWPORT: Viewport = Viewport {
        width: 1280.0,
        height: 900.0,
    };

    #[test]
    fn new_window_is_closed_with_default_size() {
        let window = ChatWindow::new();
        assert!(!window.is_open());
        assert!(!window.is_minimized());
        assert!(!window.is_resizing());
        assert_eq!(window.size().width, DEFAULT_WINDOW_WIDTH);
        assert_eq!(window.size().height, DEFAULT_WINDOW_HEIGHT);
    }

    #[test]
    fn open_from_closed_is_expanded() {
        let mut window = ChatWindow::new();
        window.open();
        assert!(window.is_expanded());
    }

    #[test]
    fn close_clears_minimized_so_next_open_is_expanded() {
        let mut window = ChatWindow::new();
        window.open();
        window.toggle_minimize();
        assert!(window.is_minimized());

        window.close();
        assert!(!window.is_open());

        window.open();
        assert!(window.is_expanded());
    }

    #[test]
    fn toggle_minimize_flips_between_expanded_and_minimized() {
        let mut window = ChatWindow::new();
        window.open();

        window.toggle_minimize();
        assert!(window.is_minimized());

        window.toggle_minimize();
        assert!(window.is_expanded());
    }

    #[test]
    fn toggle_minimize_from_closed_opens_expanded() {
        let mut window = ChatWindow::new();
        window.toggle_minimize();
        assert!(window.is_expanded());
    }

    #[test]
    fn begin_resize_requires_expanded_state() {
        let mut window = ChatWindow::new();
        assert!(!window.begin_resize());

        window.open();
        window.toggle_minimize();
        assert!(!window.begin_resize());

        window.toggle_minimize();
        assert!(window.begin_resize());
        assert!(window.animations_suppressed());
    }

    #[test]
    fn resize_tracks_pointer_anchored_to_bottom_right() {
        let mut window = ChatWindow::new();
        window.open();
        assert!(window.begin_resize());

        window.resize_to(PointerPosition { x: 760.0, y: 280.0 }, VIEWPORT);
        assert_eq!(window.size().width, 500.0);
        assert_eq!(window.size().height, 600.0);

        window.end_resize();
        assert!(!window.is_resizing());
    }

    #[test]
    fn resize_outside_resizing_state_is_ignored() {
        let mut window = ChatWindow::new();
        window.open();
        let before = window.size();

        window.resize_to(PointerPosition { x: 0.0, y: 0.0 }, VIEWPORT);
        assert_eq!(window.size(), before);
    }

    #[test]
    fn minimizing_ends_an_active_resize() {
        let mut window = ChatWindow::new();
        window.open();
        assert!(window.begin_resize());

        window.toggle_minimize();
        assert!(!window.is_resizing());
    }

    #[test]
    fn clamp_keeps_any_pointer_inside_the_fixed_bounds() {
        let extremes = [
            PointerPosition { x: -5000.0, y: -5000.0 },
            PointerPosition { x: 0.0, y: 0.0 },
            PointerPosition { x: 640.0, y: 450.0 },
            PointerPosition {
                x: VIEWPORT.width,
                y: VIEWPORT.height,
            },
            PointerPosition { x: 5000.0, y: 5000.0 },
        ];

        for pointer in extremes {
            let size = clamp_window_size(pointer, VIEWPORT);
            assert!(
                (MIN_WINDOW_WIDTH..=MAX_WINDOW_WIDTH).contains(&size.width),
                "width {} out of bounds for {pointer:?}",
                size.width
            );
            assert!(
                (MIN_WINDOW_HEIGHT..=MAX_WINDOW_HEIGHT).contains(&size.height),
                "height {} out of bounds for {pointer:?}",
                size.height
            );
        }
    }

    #[test]
    fn clamp_is_a_pure_function_of_pointer_and_viewport() {
        let pointer = PointerPosition { x: 700.0, y: 350.0 };
        let first = clamp_window_size(pointer, VIEWPORT);
        let second = clamp_window_size(pointer, VIEWPORT);
        assert_eq!(first, second);
    }
}
