pub mod tooltip;

pub use tooltip::Tooltip;
