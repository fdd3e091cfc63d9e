use crate::config::WIDE_BREAKPOINT;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutMode {
    /// Footer is fixed under the content, which scrolls off to reveal it.
    Wide,
    /// Footer flows after the content.
    Narrow,
}

impl LayoutMode {
    pub fn for_width(viewport_width: f64) -> Self {
        if viewport_width >= WIDE_BREAKPOINT {
            LayoutMode::Wide
        } else {
            LayoutMode::Narrow
        }
    }

    pub fn pins_footer(self) -> bool {
        self == LayoutMode::Wide
    }
}

/// Stacking order of the page layers, lowest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Layer {
    /// Fixed footer uncovered as the content scrolls away.
    PinnedFooter,
    Hero,
    Content,
    /// Footer in normal flow after the content.
    InlineFooter,
}

impl Layer {
    pub fn z_index(self) -> i32 {
        match self {
            Layer::PinnedFooter => 0,
            Layer::Hero => 1,
            Layer::Content => 10,
            Layer::InlineFooter => 20,
        }
    }

    pub fn style(self) -> String {
        format!("z-index: {};", self.z_index())
    }
}

const CONTENT_RADIUS: &str = "3rem";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutMetrics {
    pub mode: LayoutMode,
    pub footer_height: f64,
}

impl LayoutMetrics {
    pub fn new(viewport_width: f64, footer_height: f64) -> Self {
        Self {
            mode: LayoutMode::for_width(viewport_width),
            footer_height: footer_height.max(0.0),
        }
    }

    /// Space reserved under the content so the pinned footer can be uncovered.
    pub fn content_bottom_spacing(&self) -> f64 {
        match self.mode {
            LayoutMode::Wide => self.footer_height,
            LayoutMode::Narrow => 0.0,
        }
    }

    /// Whether moving to `next` changes anything scroll positions depend on.
    pub fn needs_refresh(&self, next: &LayoutMetrics) -> bool {
        self.mode != next.mode || (self.content_bottom_spacing() - next.content_bottom_spacing()).abs() > 0.5
    }

    /// Top corners are always rounded; the bottom ones only when the footer
    /// is revealed underneath.
    pub fn content_style(&self) -> String {
        let bottom = if self.mode.pins_footer() { CONTENT_RADIUS } else { "0" };
        format!(
            "margin-bottom: {}px; {} border-radius: {r} {r} {b} {b};",
            self.content_bottom_spacing().round(),
            Layer::Content.style(),
            r = CONTENT_RADIUS,
            b = bottom,
        )
    }

    pub fn footer_layer(&self) -> Layer {
        if self.mode.pins_footer() {
            Layer::PinnedFooter
        } else {
            Layer::InlineFooter
        }
    }

    pub fn footer_style(&self) -> String {
        self.footer_layer().style()
    }

    pub fn footer_class(&self) -> &'static str {
        if self.mode.pins_footer() {
            "site-footer-shell pinned"
        } else {
            "site-footer-shell"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_layout_reserves_the_footer_height() {
        let metrics = LayoutMetrics::new(1280.0, 600.0);
        assert_eq!(metrics.mode, LayoutMode::Wide);
        assert_eq!(metrics.content_bottom_spacing(), 600.0);
        assert_eq!(
            metrics.content_style(),
            "margin-bottom: 600px; z-index: 10; border-radius: 3rem 3rem 3rem 3rem;"
        );
        assert!(metrics.mode.pins_footer());
    }

    #[test]
    fn narrow_layout_reserves_nothing() {
        let metrics = LayoutMetrics::new(767.0, 900.0);
        assert_eq!(metrics.mode, LayoutMode::Narrow);
        assert_eq!(metrics.content_bottom_spacing(), 0.0);
        assert_eq!(metrics.footer_class(), "site-footer-shell");
        assert!(metrics.content_style().ends_with("border-radius: 3rem 3rem 0 0;"));
    }

    #[test]
    fn pinned_footer_sits_under_hero_and_content() {
        let wide = LayoutMetrics::new(1280.0, 600.0);
        assert_eq!(wide.footer_layer(), Layer::PinnedFooter);
        assert!(Layer::PinnedFooter.z_index() < Layer::Hero.z_index());
        assert!(Layer::Hero.z_index() < Layer::Content.z_index());
        assert_eq!(wide.footer_style(), "z-index: 0;");
    }

    #[test]
    fn inline_footer_paints_over_the_fixed_hero() {
        let narrow = LayoutMetrics::new(600.0, 600.0);
        assert_eq!(narrow.footer_layer(), Layer::InlineFooter);
        assert!(narrow.footer_layer().z_index() > Layer::Hero.z_index());
        assert!(narrow.footer_layer().z_index() > Layer::Content.z_index());
    }

    #[test]
    fn crossing_the_breakpoint_requires_a_refresh() {
        let wide = LayoutMetrics::new(1024.0, 500.0);
        let narrow = LayoutMetrics::new(600.0, 500.0);
        assert!(wide.needs_refresh(&narrow));
        assert!(narrow.needs_refresh(&wide));
    }

    #[test]
    fn footer_growth_only_matters_when_pinned() {
        let before = LayoutMetrics::new(1024.0, 500.0);
        assert!(before.needs_refresh(&LayoutMetrics::new(1024.0, 540.0)));
        assert!(!before.needs_refresh(&LayoutMetrics::new(1100.0, 500.0)));

        let narrow = LayoutMetrics::new(400.0, 500.0);
        assert!(!narrow.needs_refresh(&LayoutMetrics::new(400.0, 800.0)));
    }
}
