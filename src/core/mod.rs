pub mod codec;
pub mod document;
pub mod etl;
pub mod link;
pub mod pipeline;
pub mod table;

pub use crate::domain::model::{InputRow, OutputRecord, RunSummary};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
