use iced::widget::{column, container, image as iced_image, row, text};
use iced::{Element, Length};
use image::DynamicImage;

/// Upload an image buffer as an iced handle
pub fn rgba_handle(img: &DynamicImage) -> iced_image::Handle {
    let rgba = img.to_rgba8();
    iced_image::Handle::from_rgba(rgba.width(), rgba.height(), rgba.into_raw())
}

/// Captioned image, or a placeholder while nothing is rendered
pub fn image_pane<'a, Message>(
    caption: &'a str,
    handle: Option<&iced_image::Handle>,
) -> Element<'a, Message>
where
    Message: 'a,
{
    let body: Element<'a, Message> = match handle {
        Some(h) => iced_image::viewer(h.clone())
            .width(Length::Fill)
            .height(Length::Fill)
            .into(),
        None => container(text("No Image").size(20))
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .style(|_| {
                container::Style::default().background(iced::Color::from_rgb(0.1, 0.1, 0.1))
            })
            .into(),
    };

    column![text(caption).size(16), body]
        .spacing(10)
        .width(Length::FillPortion(1))
        .into()
}

pub fn layout<'a, Message>(
    sidebar: impl Into<Element<'a, Message>>,
    main_content: impl Into<Element<'a, Message>>,
) -> Element<'a, Message>
where
    Message: 'a,
{
    container(
        row![
            container(sidebar.into())
                .width(Length::FillPortion(1))
                .height(Length::Fill)
                .padding(10),
            container(main_content.into())
                .width(Length::FillPortion(4))
                .height(Length::Fill)
                .padding(10),
        ]
        .spacing(10),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .into()
}
