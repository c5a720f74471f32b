use eframe::egui::Color32;

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub background: Color32,
    pub foreground: Color32,
    pub muted: Color32,
    /// Optimized route polyline.
    pub route: Color32,
    /// Baseline (shortest-distance) polyline.
    pub baseline: Color32,
    /// Graph connections not on either route.
    pub connection: Color32,
    pub panel_background: Color32,
    pub error_background: Color32,
    pub error_foreground: Color32,
    pub route_width: f32,
    pub baseline_width: f32,
    pub connection_width: f32,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            background: Color32::from_rgb(0x1E, 0x1E, 0x1E),
            foreground: Color32::from_rgb(0xC8, 0xC8, 0xC8),
            muted: Color32::from_rgb(0x80, 0x80, 0x80),
            route: Color32::from_rgb(0x5C, 0xB8, 0xFF),
            baseline: Color32::from_rgb(0xE8, 0xA8, 0x38),
            connection: Color32::from_rgb(0x4A, 0x4A, 0x4A),
            panel_background: Color32::from_rgb(0x2D, 0x2D, 0x2D),
            error_background: Color32::from_rgb(0x5A, 0x1E, 0x1E),
            error_foreground: Color32::from_rgb(0xFF, 0xC8, 0xC8),
            route_width: 5.0,
            baseline_width: 3.0,
            connection_width: 1.5,
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            background: Color32::from_rgb(0xF4, 0xF1, 0xEA),
            foreground: Color32::from_rgb(0x1A, 0x1A, 0x2E),
            muted: Color32::from_rgb(0x70, 0x70, 0x70),
            route: Color32::from_rgb(0x1A, 0x6B, 0xB5),
            baseline: Color32::from_rgb(0xB8, 0x7B, 0x0A),
            connection: Color32::from_rgb(0xC4, 0xC0, 0xB8),
            panel_background: Color32::from_rgb(0xF5, 0xF5, 0xF5),
            error_background: Color32::from_rgb(0xFD, 0xE2, 0xE1),
            error_foreground: Color32::from_rgb(0x8A, 0x1C, 0x1C),
            route_width: 5.0,
            baseline_width: 3.0,
            connection_width: 1.5,
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "dark" => Self::dark(),
            _ => Self::light(),
        }
    }

    pub fn toggled(&self) -> Self {
        if self.name == "dark" {
            Self::light()
        } else {
            Self::dark()
        }
    }

    pub fn is_dark(&self) -> bool {
        self.name == "dark"
    }

    /// Apply opacity to a color
    pub fn with_opacity(color: Color32, opacity: f32) -> Color32 {
        Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), (opacity * 255.0) as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name_and_toggle() {
        assert_eq!(Theme::from_name("dark").name, "dark");
        assert_eq!(Theme::from_name("unknown").name, "light");
        assert!(Theme::light().toggled().is_dark());
        assert!(!Theme::dark().toggled().is_dark());
    }

    #[test]
    fn test_route_stands_out_from_connections() {
        for theme in [Theme::light(), Theme::dark()] {
            assert_ne!(theme.route, theme.connection);
            assert_ne!(theme.route, theme.baseline);
            assert!(theme.route_width > theme.baseline_width);
        }
    }
}
