//! Business logic services for the Crop Management Portal

pub mod batch;
pub mod changes;
pub mod crop;
pub mod synthetic;

pub use batch::{Batch, BatchPlan};
pub use changes::ChangeNotifier;
pub use crop::CropRecordService;
pub use synthetic::SyntheticCropGenerator;
