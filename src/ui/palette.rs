use egui::Color32;

use super::theme::PlannerTheme;
use crate::utils::color::with_alpha;

/// Derived colors for the weekly board surfaces.
#[derive(Clone, Copy)]
pub(crate) struct BoardPalette {
    pub column_bg: Color32,
    pub weekend_bg: Color32,
    pub today_bg: Color32,
    pub column_border: Color32,
    pub hour_line: Color32,
    pub half_hour_line: Color32,
    pub highlight_fill: Color32,
    pub highlight_border: Color32,
    pub overlay_shade: Color32,
    pub text: Color32,
    pub muted_text: Color32,
}

impl BoardPalette {
    pub fn from_theme(theme: &PlannerTheme) -> Self {
        Self {
            column_bg: theme.board_background,
            weekend_bg: theme.weekend_background,
            today_bg: theme.today_background,
            column_border: theme.surface_border,
            hour_line: with_alpha(theme.surface_border, 200),
            half_hour_line: with_alpha(theme.surface_border, 90),
            highlight_fill: with_alpha(theme.accent, if theme.is_dark { 60 } else { 40 }),
            highlight_border: theme.accent,
            overlay_shade: Color32::from_black_alpha(if theme.is_dark { 110 } else { 70 }),
            text: theme.text_primary,
            muted_text: theme.text_secondary,
        }
    }
}

/// Derived colors for the month grid cells.
#[derive(Clone, Copy)]
pub(crate) struct MonthPalette {
    pub cell_bg: Color32,
    pub weekend_bg: Color32,
    pub today_bg: Color32,
    pub outside_bg: Color32,
    pub border: Color32,
    pub today_border: Color32,
    pub hover_border: Color32,
    pub text: Color32,
    pub muted_text: Color32,
}

impl MonthPalette {
    pub fn from_theme(theme: &PlannerTheme) -> Self {
        Self {
            cell_bg: theme.board_background,
            weekend_bg: theme.weekend_background,
            today_bg: theme.today_background,
            outside_bg: theme.app_background,
            border: theme.surface_border,
            today_border: theme.today_border,
            hover_border: with_alpha(theme.today_border, if theme.is_dark { 160 } else { 120 }),
            text: theme.text_primary,
            muted_text: theme.text_secondary,
        }
    }
}
