use iced::{
    Border, Theme,
    widget::{container::Style, text},
};

/// Container style for one clock card.
pub fn card_container_style(highlighted: bool,) -> impl Fn(&Theme,) -> Style
{
    move |theme: &Theme| {
        let palette = theme.extended_palette();
        let border_color = if highlighted {
            palette.primary.base.color
        } else {
            palette.background.strong.color
        };

        Style {
            background: Some(palette.background.base.color.into(),),
            border: Border {
                color:  border_color,
                width:  1.0,
                radius: 16.0.into(),
            },
            ..Style::default()
        }
    }
}

/// Dimmed text used for the banner subtitle and offset.
pub fn banner_text_style(theme: &Theme,) -> text::Style
{
    text::Style {
        color: Some(theme.palette().text.scale_alpha(0.7,),),
    }
}

#[cfg(test)]
mod tests
{
    use iced::{Background, Color};

    use super::*;

    fn color(background: Option<Background,>,) -> Color
    {
        match background.expect("background should be set",) {
            Background::Color(color,) => color,
            other => panic!("unexpected background: {other:?}"),
        }
    }

    #[test]
    fn highlighted_card_uses_primary_border()
    {
        let theme = Theme::default();

        let style = card_container_style(true,)(&theme,);
        assert_eq!(style.border.color, theme.extended_palette().primary.base.color);
        assert_eq!(style.border.radius, 16.0.into());
        assert_eq!(color(style.background,), theme.extended_palette().background.base.color);

        let plain = card_container_style(false,)(&theme,);
        assert_eq!(plain.border.color, theme.extended_palette().background.strong.color);
    }

    #[test]
    fn banner_text_is_dimmed()
    {
        let theme = Theme::default();
        let style = banner_text_style(&theme,);

        let color = style.color.expect("color",);
        assert!((color.a - 0.7 * theme.palette().text.a).abs() < f32::EPSILON);
    }
}
