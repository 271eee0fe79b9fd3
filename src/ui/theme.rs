//! Theme definitions for the planner.

use egui::Color32;

/// Colors used across the application, applied on top of egui's base
/// visuals.
#[derive(Debug, Clone)]
pub struct PlannerTheme {
    pub is_dark: bool,
    pub app_background: Color32,
    pub board_background: Color32,
    pub weekend_background: Color32,
    pub today_background: Color32,
    pub today_border: Color32,
    pub surface_border: Color32,
    pub text_primary: Color32,
    pub text_secondary: Color32,
    pub accent: Color32,
    pub danger: Color32,
}

impl PlannerTheme {
    pub fn light() -> Self {
        Self {
            is_dark: false,
            app_background: Color32::from_rgb(245, 245, 247),
            board_background: Color32::from_rgb(255, 255, 255),
            weekend_background: Color32::from_rgb(249, 250, 252),
            today_background: Color32::from_rgb(232, 241, 255),
            today_border: Color32::from_rgb(100, 150, 255),
            surface_border: Color32::from_rgb(220, 222, 228),
            text_primary: Color32::from_rgb(38, 40, 48),
            text_secondary: Color32::from_rgb(104, 108, 120),
            accent: Color32::from_rgb(99, 102, 241),
            danger: Color32::from_rgb(239, 68, 68),
        }
    }

    pub fn dark() -> Self {
        Self {
            is_dark: true,
            app_background: Color32::from_rgb(28, 29, 34),
            board_background: Color32::from_rgb(38, 40, 46),
            weekend_background: Color32::from_rgb(34, 35, 41),
            today_background: Color32::from_rgb(48, 58, 80),
            today_border: Color32::from_rgb(100, 150, 255),
            surface_border: Color32::from_rgb(58, 60, 68),
            text_primary: Color32::from_rgb(236, 237, 240),
            text_secondary: Color32::from_rgb(166, 170, 180),
            accent: Color32::from_rgb(129, 140, 248),
            danger: Color32::from_rgb(248, 113, 113),
        }
    }

    pub fn by_name(name: &str) -> Self {
        if name.to_lowercase().contains("dark") {
            Self::dark()
        } else {
            Self::light()
        }
    }

    /// Apply this theme to an egui context.
    pub fn apply_to_context(&self, ctx: &egui::Context) {
        let mut visuals = if self.is_dark {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };

        visuals.window_fill = self.app_background;
        visuals.panel_fill = self.app_background;
        visuals.widgets.noninteractive.bg_fill = self.board_background;
        visuals.widgets.inactive.bg_fill = self.board_background;
        visuals.widgets.hovered.bg_fill = self.today_background;
        visuals.widgets.active.bg_fill = self.today_background;
        visuals.override_text_color = Some(self.text_primary);

        ctx.set_visuals(visuals);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_by_name() {
        assert!(PlannerTheme::by_name("dark").is_dark);
        assert!(PlannerTheme::by_name("Dark").is_dark);
        assert!(!PlannerTheme::by_name("light").is_dark);
        assert!(!PlannerTheme::by_name("anything-else").is_dark);
    }
}
