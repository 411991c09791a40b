use fluent_overlay::ui::{GlobalState, global_state};
use fluent_overlay::{DEFAULT_POPUP_GAP, TimeFunction, VisibilityMotion};

#[derive(Clone, Debug, PartialEq)]
pub struct FluentTheme {
    pub color: ColorTheme,
    pub typography: TypographyTheme,
    pub motion: MotionTheme,
    pub popup: PopupTheme,
    pub dialog: DialogTheme,
}

/// Colors are hex strings handed to the backend as-is.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorTheme {
    pub flyout_background: String,
    pub dialog_background: String,
    pub dialog_footer_background: String,
    pub scrim: String,
    pub text_primary: String,
    pub text_disabled: String,
    pub accent: String,
    pub on_accent: String,
    pub subtle_hover: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TypographyTheme {
    pub body: f32,
    pub subtitle: f32,
    pub semibold_weight: u16,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionTheme {
    pub popup: VisibilityMotion,
    pub dialog: VisibilityMotion,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PopupTheme {
    /// Distance between the anchor and the popup surface.
    pub gap: i32,
    pub corner_radius: f32,
    /// Inset around menu rows.
    pub padding: f32,
    /// Inset around free-form flyout content.
    pub flyout_padding: f32,
    pub menu_min_width: f32,
    pub menu_item_height: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DialogTheme {
    pub min_width: f32,
    pub standard_width: f32,
    pub max_width: f32,
    pub scrim_opacity: f32,
    pub padding: f32,
    pub button_gap: f32,
    pub corner_radius: f32,
}

impl FluentTheme {
    pub fn light() -> Self {
        Self {
            color: ColorTheme {
                flyout_background: "#F9F9F9".to_string(),
                dialog_background: "#FFFFFF".to_string(),
                dialog_footer_background: "#F3F3F3".to_string(),
                scrim: "#000000".to_string(),
                text_primary: "#1B1B1B".to_string(),
                text_disabled: "#A0A0A0".to_string(),
                accent: "#005FB8".to_string(),
                on_accent: "#FFFFFF".to_string(),
                subtle_hover: "#0000000A".to_string(),
            },
            typography: TypographyTheme {
                body: 14.0,
                subtitle: 20.0,
                semibold_weight: 600,
            },
            motion: MotionTheme {
                popup: VisibilityMotion::new(250, 167),
                dialog: VisibilityMotion {
                    enter_duration_ms: 250,
                    exit_duration_ms: 167,
                    enter_timing: TimeFunction::DECELERATE,
                    exit_timing: TimeFunction::STANDARD,
                },
            },
            popup: PopupTheme {
                gap: DEFAULT_POPUP_GAP,
                corner_radius: 8.0,
                padding: 4.0,
                flyout_padding: 16.0,
                menu_min_width: 120.0,
                menu_item_height: 32.0,
            },
            dialog: DialogTheme {
                min_width: 320.0,
                standard_width: 448.0,
                max_width: 548.0,
                scrim_opacity: 0.3,
                padding: 24.0,
                button_gap: 8.0,
                corner_radius: 8.0,
            },
        }
    }

    pub fn dark() -> Self {
        let mut theme = Self::light();
        theme.color = ColorTheme {
            flyout_background: "#2C2C2C".to_string(),
            dialog_background: "#2B2B2B".to_string(),
            dialog_footer_background: "#202020".to_string(),
            scrim: "#000000".to_string(),
            text_primary: "#FFFFFF".to_string(),
            text_disabled: "#787878".to_string(),
            accent: "#60CDFF".to_string(),
            on_accent: "#000000".to_string(),
            subtle_hover: "#FFFFFF0F".to_string(),
        };
        theme.dialog.scrim_opacity = 0.5;
        theme
    }
}

impl Default for FluentTheme {
    fn default() -> Self {
        Self::light()
    }
}

pub fn use_theme() -> GlobalState<FluentTheme> {
    global_state(FluentTheme::light)
}

pub fn set_theme(theme: FluentTheme) {
    use_theme().set(theme);
}
