use hex_color::HexColor;
use iced::Color;
use serde::{Deserialize, Deserializer, de::Error as _};

/// Color configuration used to paint the window and the clock faces.
#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(untagged)]
pub enum AppearanceColor {
    /// Simple color variant with a single hex value.
    Simple(HexColor),
    /// Color with an explicit text color drawn on top of it.
    Complete {
        base: HexColor,
        text: Option<HexColor>,
    },
}

impl AppearanceColor {
    /// Returns the base [`Color`] representation.
    #[must_use]
    pub fn get_base(&self) -> Color {
        match self {
            AppearanceColor::Simple(color) => Color::from_rgb8(color.r, color.g, color.b),
            AppearanceColor::Complete { base, .. } => Color::from_rgb8(base.r, base.g, base.b),
        }
    }

    /// Returns the text [`Color`] if configured.
    #[must_use]
    pub fn get_text(&self) -> Option<Color> {
        match self {
            AppearanceColor::Simple(_) => None,
            AppearanceColor::Complete { text, .. } => {
                text.map(|color| Color::from_rgb8(color.r, color.g, color.b))
            }
        }
    }
}

/// Window and clock face appearance.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Appearance {
    #[serde(default)]
    pub font_name: Option<String>,
    #[serde(
        deserialize_with = "scale_factor_deserializer",
        default = "default_scale_factor"
    )]
    pub scale_factor: f64,
    #[serde(default = "default_face_size")]
    pub face_size: f32,
    #[serde(default = "default_background_color")]
    pub background_color: AppearanceColor,
    #[serde(default = "default_face_color")]
    pub face_color: AppearanceColor,
    #[serde(default = "default_primary_color")]
    pub primary_color: AppearanceColor,
    #[serde(default = "default_success_color")]
    pub success_color: AppearanceColor,
    #[serde(default = "default_danger_color")]
    pub danger_color: AppearanceColor,
    #[serde(default = "default_text_color")]
    pub text_color: AppearanceColor,
}

static PRIMARY: HexColor = HexColor::rgb(250, 179, 135);

fn scale_factor_deserializer<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let v = f64::deserialize(deserializer)?;

    if v <= 0.0 {
        return Err(D::Error::custom("Scale factor must be greater than 0.0"));
    }

    if v > 2.0 {
        return Err(D::Error::custom("Scale factor cannot be greater than 2.0"));
    }

    Ok(v)
}

fn default_scale_factor() -> f64 {
    1.0
}

fn default_face_size() -> f32 {
    280.0
}

fn default_background_color() -> AppearanceColor {
    AppearanceColor::Simple(HexColor::rgb(30, 30, 46))
}

fn default_face_color() -> AppearanceColor {
    AppearanceColor::Complete {
        base: HexColor::rgb(49, 50, 68),
        text: Some(HexColor::rgb(205, 214, 244)),
    }
}

fn default_primary_color() -> AppearanceColor {
    AppearanceColor::Complete {
        base: PRIMARY,
        text: Some(HexColor::rgb(30, 30, 46)),
    }
}

fn default_success_color() -> AppearanceColor {
    AppearanceColor::Simple(HexColor::rgb(166, 227, 161))
}

fn default_danger_color() -> AppearanceColor {
    AppearanceColor::Simple(HexColor::rgb(243, 139, 168))
}

fn default_text_color() -> AppearanceColor {
    AppearanceColor::Simple(HexColor::rgb(205, 214, 244))
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            font_name: None,
            scale_factor: default_scale_factor(),
            face_size: default_face_size(),
            background_color: default_background_color(),
            face_color: default_face_color(),
            primary_color: default_primary_color(),
            success_color: default_success_color(),
            danger_color: default_danger_color(),
            text_color: default_text_color(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Wrapper {
        appearance: Appearance,
    }

    #[test]
    fn simple_color_has_no_text() {
        let color = AppearanceColor::Simple(HexColor::rgb(10, 20, 30));
        assert_eq!(color.get_base(), Color::from_rgb8(10, 20, 30));
        assert!(color.get_text().is_none());
    }

    #[test]
    fn complete_color_parses_from_table() {
        let wrapper: Wrapper = toml::from_str(
            r##"
            [appearance]
            face_color = { base = "#101010", text = "#FAFAFA" }
            "##,
        )
        .expect("appearance parses");

        assert_eq!(
            wrapper.appearance.face_color.get_text(),
            Some(Color::from_rgb8(0xFA, 0xFA, 0xFA))
        );
        assert_eq!(wrapper.appearance.scale_factor, 1.0);
    }

    #[test]
    fn scale_factor_out_of_range_is_rejected() {
        let result = toml::from_str::<Wrapper>(
            r#"
            [appearance]
            scale_factor = 3.0
            "#,
        );

        assert!(result.is_err());
    }
}
