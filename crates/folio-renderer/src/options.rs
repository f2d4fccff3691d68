//! Rendering options.

/// Default nesting limit for rendered subtrees.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Options controlling rendered output.
///
/// None of these affect sanitization: URLs are validated the same way
/// regardless of configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    /// Subtrees nested deeper than this are omitted.
    pub max_depth: usize,
    /// `rel` attribute for links (`None` omits the attribute).
    pub link_rel: Option<String>,
    /// `target` attribute for links (`None` omits the attribute).
    pub link_target: Option<String>,
    /// Class attribute for images.
    pub image_class: Option<String>,
    /// Class attribute for the video embed wrapper.
    pub embed_class: Option<String>,
    /// Frame width used when the node carries none.
    pub embed_width: u32,
    /// Frame height used when the node carries none.
    pub embed_height: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            link_rel: Some("noopener noreferrer nofollow".to_owned()),
            link_target: Some("_blank".to_owned()),
            image_class: None,
            embed_class: Some("video-embed".to_owned()),
            embed_width: 840,
            embed_height: 472,
        }
    }
}
