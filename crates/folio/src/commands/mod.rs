//! CLI command implementations.

pub(crate) mod check_url;
pub(crate) mod render;

pub(crate) use check_url::CheckUrlArgs;
pub(crate) use render::RenderArgs;
