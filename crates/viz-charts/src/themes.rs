use plotters::style::{RGBColor, BLACK, WHITE};

/// Whether titles, axis labels and legends are drawn.
///
/// Text needs the `ttf` feature; without it plotters has no font backend
/// and the charts are drawn with bare axes.
pub const TEXT_ENABLED: bool = cfg!(feature = "ttf");

pub const FONT_FAMILY: &str = "sans-serif";

/// Line colour of the daily chart.
pub const LINE_RED: RGBColor = RGBColor(214, 39, 40);

/// One fill colour per calendar month, January first.
pub const MONTH_PALETTE: [RGBColor; 12] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
    RGBColor(174, 199, 232),
    RGBColor(255, 187, 120),
];

/// Size, spacing and colours for one chart.
#[derive(Debug, Clone)]
pub struct ChartTheme {
    // ── Canvas ───────────────────────────────────────────────────────────────
    pub width: u32,
    pub height: u32,
    pub background: RGBColor,
    pub margin: u32,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub text_enabled: bool,
    pub title_size: u32,
    pub label_size: u32,
    /// Space reserved for tick labels below the x axis.
    pub x_label_area: u32,
    /// Space reserved for tick labels left of the y axis.
    pub y_label_area: u32,

    // ── Series ───────────────────────────────────────────────────────────────
    pub axis: RGBColor,
    pub line: RGBColor,
    pub line_width: u32,
    pub palette: [RGBColor; 12],
}

impl ChartTheme {
    fn base(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            background: WHITE,
            margin: 20,
            text_enabled: TEXT_ENABLED,
            title_size: 36,
            label_size: 22,
            x_label_area: 70,
            y_label_area: 110,
            axis: BLACK,
            line: LINE_RED,
            line_width: 2,
            palette: MONTH_PALETTE,
        }
    }

    /// Wide canvas for the daily line chart.
    pub fn line() -> Self {
        Self::base(3200, 1000)
    }

    /// Grouped bar chart of monthly means.
    pub fn bar() -> Self {
        Self {
            title_size: 28,
            label_size: 20,
            ..Self::base(1500, 1000)
        }
    }

    /// Two box-plot panels side by side.
    pub fn boxes() -> Self {
        Self {
            title_size: 30,
            ..Self::base(3200, 1000)
        }
    }

    /// Label areas collapse to zero when no text is drawn.
    pub fn label_areas(&self) -> (u32, u32) {
        if self.text_enabled {
            (self.x_label_area, self.y_label_area)
        } else {
            (0, 0)
        }
    }

    /// Fill colour for the month at `index` (0 = January).
    pub fn month_color(&self, index: usize) -> RGBColor {
        self.palette[index % self.palette.len()]
    }
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self::line()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_sizes() {
        let line = ChartTheme::line();
        assert_eq!((line.width, line.height), (3200, 1000));
        let bar = ChartTheme::bar();
        assert_eq!((bar.width, bar.height), (1500, 1000));
        let boxes = ChartTheme::boxes();
        assert_eq!((boxes.width, boxes.height), (3200, 1000));
    }

    #[test]
    fn test_line_is_red() {
        assert_eq!(ChartTheme::line().line, LINE_RED);
    }

    #[test]
    fn test_month_colors_are_distinct() {
        let theme = ChartTheme::bar();
        for i in 0..12 {
            for j in (i + 1)..12 {
                assert_ne!(theme.month_color(i), theme.month_color(j));
            }
        }
    }

    #[test]
    fn test_label_areas_follow_text_flag() {
        let plain = ChartTheme {
            text_enabled: false,
            ..ChartTheme::line()
        };
        assert_eq!(plain.label_areas(), (0, 0));

        let labelled = ChartTheme {
            text_enabled: true,
            ..ChartTheme::line()
        };
        assert_eq!(labelled.label_areas(), (70, 110));
    }

    #[test]
    fn test_text_enabled_matches_feature() {
        assert_eq!(ChartTheme::default().text_enabled, cfg!(feature = "ttf"));
    }
}
