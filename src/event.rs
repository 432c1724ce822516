use crate::loader::{Dataset, DatasetKey};

#[derive(Debug, Clone)]
pub enum AppEvent {
    DatasetLoaded(Dataset),
    LoadFailed { key: DatasetKey, error: String },
}
