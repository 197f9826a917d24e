use iced::{
    Color, Element, Theme, border,
    widget::{column, container, container::Style, row, text},
};
use iced_widget::container::bordered_box;

/// Where the user is in the load / apply / save flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Load,
    Apply,
    Save,
}

impl Stage {
    const ALL: [Stage; 3] = [Stage::Load, Stage::Apply, Stage::Save];

    fn label(self) -> &'static str {
        match self {
            Stage::Load => "Load Image",
            Stage::Apply => "Apply Effect",
            Stage::Save => "Save Result",
        }
    }

    fn style(self, other: Self) -> impl Fn(&Theme) -> Style {
        move |theme: &Theme| {
            let style = bordered_box(theme).border(border::width(5));
            // if done, gray out background
            if self > other {
                let mut color_rgba = theme.palette().background.into_rgba8();
                color_rgba[0] /= 2;
                color_rgba[1] /= 2;
                color_rgba[2] /= 2;
                style.background(Color::from_rgb8(color_rgba[0], color_rgba[1], color_rgba[2]))
            } else {
                style.background(theme.palette().background)
            }
        }
    }
}

/// Progress sidebar with controls underneath, main content on the right
pub fn layout<'a, Message>(
    sidebar: impl Into<Element<'a, Message>>,
    main_content: impl Into<Element<'a, Message>>,
    stage: Stage,
) -> Element<'a, Message>
where
    Message: 'a,
{
    let steps = Stage::ALL.into_iter().fold(column![], |steps, step| {
        steps.push(
            container(text(step.label()))
                .style(stage.style(step))
                .padding(10)
                .width(iced::Length::Fill),
        )
    });

    container(row![
        container(column![
            steps,
            container(sidebar.into()).height(iced::Length::Fill),
        ])
        .width(iced::Length::FillPortion(1)),
        container(main_content.into()).width(iced::Length::FillPortion(3)),
    ])
    .center_x(iced::Length::Fill)
    .center_y(iced::Length::Fill)
    .into()
}
