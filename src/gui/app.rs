use std::path::PathBuf;

use iced::widget::{button, column, image as iced_image, pick_list, row, slider, text};
use iced::{Element, Length, Task, Theme};
use image::DynamicImage;
use rfd::AsyncFileDialog;

use super::Message;
use super::widgets::{image_pane, layout, rgba_handle};
use crate::dataset::Dataset;
use crate::detection::ModeKind;
use crate::session::{
    ANNOTATED_CAPTION, BLOCK_SIZE_RANGE, BLOCK_SIZE_STEP, CANNY_THRESHOLD_RANGE, C_VALUE_RANGE,
    Frame, MASK_CAPTION, ORIGINAL_CAPTION, Session,
};

const MODES: &[ModeKind] = &ModeKind::ALL;

/// Open the detector window on a dataset root
pub fn run(dataset_root: PathBuf) -> iced::Result {
    iced::application(
        move || DefectScanApp::new(dataset_root.clone()),
        DefectScanApp::update,
        DefectScanApp::view,
    )
    .title(|_state: &DefectScanApp| "Metal Surface Defect Detection".to_string())
    .theme(|_state: &DefectScanApp| Theme::Dark)
    .run()
}

struct Views {
    original: iced_image::Handle,
    annotated: iced_image::Handle,
    mask: iced_image::Handle,
}

pub struct DefectScanApp {
    session: Option<Session>,
    views: Option<Views>,
    status: String,
}

impl DefectScanApp {
    fn new(dataset_root: PathBuf) -> (Self, Task<Message>) {
        let mut app = Self {
            session: None,
            views: None,
            status: "Open a dataset to start".to_string(),
        };
        app.open_dataset(dataset_root);
        (app, Task::none())
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::OpenDataset => {
                return Task::perform(
                    AsyncFileDialog::new()
                        .set_title("Open Dataset")
                        .pick_folder(),
                    |handle| Message::DatasetPicked(handle.map(|h| h.path().to_path_buf())),
                );
            }
            Message::DatasetPicked(Some(path)) => {
                self.open_dataset(path);
                return Task::none();
            }
            Message::DatasetPicked(None) => return Task::none(),
            _ => {}
        }

        let Some(session) = self.session.as_mut() else {
            return Task::none();
        };

        let result = match message {
            Message::CategorySelected(category) => session.select_category(&category),
            Message::ImageSelected(image) => session.select_image(&image),
            Message::ModeSelected(mode) => {
                session.select_mode(mode);
                Ok(())
            }
            Message::CannyLowChanged(value) => {
                session.set_canny_low(value.round() as u8);
                Ok(())
            }
            Message::CannyHighChanged(value) => {
                session.set_canny_high(value.round() as u8);
                Ok(())
            }
            Message::BlockSizeChanged(value) => {
                session.set_block_size(value.round() as u32);
                Ok(())
            }
            Message::CValueChanged(value) => {
                session.set_c_value(value.round() as u8);
                Ok(())
            }
            Message::OpenDataset | Message::DatasetPicked(_) => Ok(()),
        };

        match result {
            Ok(()) => self.refresh(),
            Err(e) => {
                log::warn!("{e:#}");
                self.status = format!("Error: {e:#}");
            }
        }
        Task::none()
    }

    fn open_dataset(&mut self, root: PathBuf) {
        match Session::open(Dataset::new(&root)) {
            Ok(session) => {
                log::info!("Opened dataset {}", root.display());
                self.session = Some(session);
                self.refresh();
            }
            Err(e) => {
                log::warn!("{e:#}");
                self.session = None;
                self.views = None;
                self.status = format!("Error: {e:#}");
            }
        }
    }

    /// Reload the selected image and rerun detection with the current controls
    fn refresh(&mut self) {
        let Some(session) = &self.session else {
            return;
        };

        match session.render() {
            Ok(Some(frame)) => {
                self.status = summary(session, &frame);
                self.views = Some(views_of(frame));
            }
            Ok(None) => {
                self.views = None;
                self.status = format!("No images in {}", session.dataset().root().display());
            }
            Err(e) => {
                log::warn!("{e:#}");
                self.views = None;
                self.status = format!("Error: {e:#}");
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let empty: &[String] = &[];
        let (categories, images) = match &self.session {
            Some(session) => (session.categories(), session.images()),
            None => (empty, empty),
        };
        let selected_category = self.session.as_ref().and_then(|s| s.category());
        let selected_image = self.session.as_ref().and_then(|s| s.image());
        let mode = self.session.as_ref().map(|s| s.mode()).unwrap_or_default();

        let mut sidebar = column![
            button("Open Dataset...").on_press(Message::OpenDataset),
            text("Defect Type").size(14),
            pick_list(categories, selected_category, Message::CategorySelected),
            text("Image").size(14),
            pick_list(images, selected_image, Message::ImageSelected),
            text("Detection Settings").size(18),
            text("Detection Mode").size(14),
            pick_list(MODES, Some(mode), Message::ModeSelected),
        ]
        .spacing(10)
        .width(Length::Fill);

        if let Some(session) = &self.session {
            match mode {
                ModeKind::Canny => {
                    sidebar = sidebar
                        .push(text(format!("Canny Low Threshold: {}", session.canny_low())))
                        .push(
                            slider(
                                f32::from(*CANNY_THRESHOLD_RANGE.start())
                                    ..=f32::from(*CANNY_THRESHOLD_RANGE.end()),
                                f32::from(session.canny_low()),
                                Message::CannyLowChanged,
                            )
                            .step(1.0),
                        )
                        .push(text(format!("Canny High Threshold: {}", session.canny_high())))
                        .push(
                            slider(
                                f32::from(*CANNY_THRESHOLD_RANGE.start())
                                    ..=f32::from(*CANNY_THRESHOLD_RANGE.end()),
                                f32::from(session.canny_high()),
                                Message::CannyHighChanged,
                            )
                            .step(1.0),
                        );
                }
                ModeKind::Adaptive => {
                    sidebar = sidebar
                        .push(text(format!("Block Size (odd): {}", session.block_size())))
                        .push(
                            slider(
                                *BLOCK_SIZE_RANGE.start() as f32..=*BLOCK_SIZE_RANGE.end() as f32,
                                session.block_size() as f32,
                                Message::BlockSizeChanged,
                            )
                            .step(BLOCK_SIZE_STEP as f32),
                        )
                        .push(text(format!("C Value: {}", session.c_value())))
                        .push(
                            slider(
                                f32::from(*C_VALUE_RANGE.start())..=f32::from(*C_VALUE_RANGE.end()),
                                f32::from(session.c_value()),
                                Message::CValueChanged,
                            )
                            .step(1.0),
                        );
                }
                ModeKind::Otsu | ModeKind::Morph => {}
            }
        }

        let panes = row![
            image_pane(ORIGINAL_CAPTION, self.views.as_ref().map(|v| &v.original)),
            image_pane(ANNOTATED_CAPTION, self.views.as_ref().map(|v| &v.annotated)),
            image_pane(MASK_CAPTION, self.views.as_ref().map(|v| &v.mask)),
        ]
        .spacing(20)
        .height(Length::Fill);

        let main_content = column![
            text("Metal Surface Defect Detection").size(24),
            text(&self.status).size(14),
            panes,
        ]
        .spacing(20);

        layout(sidebar, main_content)
    }
}

fn summary(session: &Session, frame: &Frame) -> String {
    format!(
        "{} / {} | {}: {} regions found, {} drawn",
        session.category().map(String::as_str).unwrap_or("-"),
        session.image().map(String::as_str).unwrap_or("-"),
        session.mode(),
        frame.detection.region_count(),
        frame.detection.drawn_count()
    )
}

fn views_of(frame: Frame) -> Views {
    Views {
        original: rgba_handle(&DynamicImage::ImageRgb8(frame.original)),
        annotated: rgba_handle(&DynamicImage::ImageRgb8(frame.detection.annotated)),
        mask: rgba_handle(&DynamicImage::ImageLuma8(frame.detection.mask)),
    }
}
