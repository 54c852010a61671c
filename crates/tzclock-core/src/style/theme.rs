use iced::{
    Color, Theme,
    theme::{Palette, palette},
};
use tzclock_proto::config::Appearance;

/// Builds the application [`Theme`] from the configured [`Appearance`].
///
/// The weak background pair takes the face colour so cards and the selector
/// match the dials.
#[must_use]
pub fn tzclock_theme(appearance: &Appearance,) -> Theme
{
    let face = appearance.face_color;
    let text = appearance.text_color.get_base();

    Theme::custom_with_fn(
        "tzclock".to_string(),
        Palette {
            background: appearance.background_color.get_base(),
            text,
            primary: appearance.primary_color.get_base(),
            success: appearance.success_color.get_base(),
            danger: appearance.danger_color.get_base(),
        },
        move |palette| {
            let mut extended = palette::Extended::generate(palette,);
            extended.background.weak =
                palette::Pair::new(face.get_base(), face.get_text().unwrap_or(text,),);
            extended.is_dark = true;
            extended
        },
    )
}

/// Colours used by the canvas that paints a dial.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FacePalette
{
    pub face:        Color,
    pub rim:         Color,
    pub marker:      Color,
    pub hour_marker: Color,
    pub hand:        Color,
    pub second_hand: Color,
}

impl FacePalette
{
    #[must_use]
    pub fn from_appearance(appearance: &Appearance,) -> Self
    {
        let ink = appearance
            .face_color
            .get_text()
            .unwrap_or_else(|| appearance.text_color.get_base(),);

        Self {
            face:        appearance.face_color.get_base(),
            rim:         appearance.primary_color.get_base().scale_alpha(0.4,),
            marker:      ink.scale_alpha(0.5,),
            hour_marker: ink,
            hand:        ink,
            second_hand: appearance.primary_color.get_base(),
        }
    }
}

impl Default for FacePalette
{
    fn default() -> Self
    {
        Self::from_appearance(&Appearance::default(),)
    }
}

#[cfg(test)]
mod tests
{
    use hex_color::HexColor;
    use tzclock_proto::config::AppearanceColor;

    use super::*;

    #[test]
    fn theme_uses_configured_palette()
    {
        let appearance = Appearance {
            background_color: AppearanceColor::Simple(HexColor::rgb(10, 20, 30,),),
            primary_color: AppearanceColor::Simple(HexColor::rgb(120, 60, 30,),),
            face_color: AppearanceColor::Complete {
                base: HexColor::rgb(40, 50, 60,),
                text: Some(HexColor::rgb(250, 250, 250,),),
            },
            ..Appearance::default()
        };

        let theme = tzclock_theme(&appearance,);

        assert_eq!(theme.palette().background, Color::from_rgb8(10, 20, 30,));
        assert_eq!(theme.palette().primary, Color::from_rgb8(120, 60, 30,));
        let extended = theme.extended_palette();
        assert_eq!(extended.background.weak.color, Color::from_rgb8(40, 50, 60,));
        assert_eq!(extended.background.weak.text, Color::from_rgb8(250, 250, 250,));
        assert!(extended.is_dark);
    }

    #[test]
    fn face_palette_falls_back_to_text_color()
    {
        let appearance = Appearance {
            face_color: AppearanceColor::Simple(HexColor::rgb(1, 2, 3,),),
            text_color: AppearanceColor::Simple(HexColor::rgb(200, 100, 50,),),
            ..Appearance::default()
        };

        let palette = FacePalette::from_appearance(&appearance,);

        assert_eq!(palette.face, Color::from_rgb8(1, 2, 3,));
        assert_eq!(palette.hand, Color::from_rgb8(200, 100, 50,));
        assert!((palette.marker.a - 0.5).abs() < f32::EPSILON);
        assert_eq!(palette.second_hand, appearance.primary_color.get_base());
    }
}
