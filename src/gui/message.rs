use std::path::PathBuf;

use crate::detection::ModeKind;

#[derive(Debug, Clone)]
pub enum Message {
    OpenDataset,
    DatasetPicked(Option<PathBuf>),
    CategorySelected(String),
    ImageSelected(String),
    ModeSelected(ModeKind),
    CannyLowChanged(f32),
    CannyHighChanged(f32),
    BlockSizeChanged(f32),
    CValueChanged(f32),
}
