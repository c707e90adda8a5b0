use egui::Color32;

/// Startup settings for the canvas app
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasConfig {
    /// Window and toolbar title
    pub title: String,
    pub stroke_color: Color32,
    pub background_color: Color32,
    /// Initial brush thickness in logical pixels, clamped on use
    pub thickness: i32,
    /// File name the "Save" action delivers
    pub export_file_name: String,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            title: "Kids Canvas".to_owned(),
            stroke_color: Color32::BLACK,
            background_color: Color32::WHITE,
            thickness: 2,
            export_file_name: "drawing.png".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CanvasConfig::default();
        assert_eq!(config.export_file_name, "drawing.png");
        assert_eq!(config.title, "Kids Canvas");
        assert_eq!(config.thickness, 2);
    }
}
